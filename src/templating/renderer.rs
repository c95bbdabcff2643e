//! Template rendering engine with Tera.

use tera::{Context as TeraContext, Tera};

use crate::core::TxtplateError;
use crate::values::{Mapping, ValueTree};

/// Name the template is registered under inside the Tera instance.
///
/// It has no `.html`/`.xml` suffix, so Tera never autoescapes output.
const TEMPLATE_NAME: &str = "template";

/// Renders a template string against a resolved values tree.
///
/// Each top-level key of the values tree becomes a template variable, so a
/// values file `{"db": {"host": "x"}}` is used as `{{ db.host }}`.
#[derive(Debug, Default, Clone)]
pub struct TemplateRenderer {
    /// Fail on output that still contains template delimiters after rendering
    strict: bool,
}

impl TemplateRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject output that still contains `{{` or `{%` after rendering.
    ///
    /// Catches values that themselves contain template syntax, which Tera
    /// emits verbatim.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Render `template` with `values` as the context.
    ///
    /// A fresh Tera instance is created per render; there is no template cache.
    ///
    /// # Errors
    ///
    /// - [`TxtplateError::TemplateCompile`] if the template does not parse
    /// - [`TxtplateError::TemplateRender`] if rendering fails, e.g. an
    ///   undefined variable, or leftover delimiters in strict mode
    /// - [`TxtplateError::Other`] if `values` is not a mapping
    pub fn render(&self, template: &str, values: &ValueTree) -> Result<String, TxtplateError> {
        let mapping = values.as_mapping().ok_or_else(|| TxtplateError::Other {
            message: format!("Template values must be a mapping, found {}", values.kind()),
        })?;
        let context = build_context(mapping);

        let mut tera = Tera::default();
        tera.autoescape_on(Vec::new());
        tera.add_raw_template(TEMPLATE_NAME, template).map_err(|e| {
            TxtplateError::TemplateCompile {
                message: format_tera_error(&e),
            }
        })?;

        let rendered = tera.render(TEMPLATE_NAME, &context).map_err(|e| {
            TxtplateError::TemplateRender {
                message: format_tera_error(&e),
            }
        })?;

        if self.strict && (rendered.contains("{{") || rendered.contains("{%")) {
            return Err(TxtplateError::TemplateRender {
                message: "rendered output still contains template delimiters".to_string(),
            });
        }

        tracing::debug!("Rendered template ({} bytes)", rendered.len());
        Ok(rendered)
    }
}

/// Build a Tera context with one variable per top-level key.
fn build_context(values: &Mapping) -> TeraContext {
    let mut context = TeraContext::new();
    for (key, value) in values {
        tracing::trace!("Template variable: {}", key);
        context.insert(key.as_str(), value);
    }
    context
}

/// Format a Tera error with the whole cause chain.
///
/// Tera wraps the interesting message ("Variable `x` not found", "expected
/// ...") in generic "Failed to render/parse" layers; those are dropped.
pub fn format_tera_error(error: &tera::Error) -> String {
    use std::error::Error;

    let mut all_messages = vec![error.to_string()];
    let mut current_error: Option<&dyn Error> = error.source();
    while let Some(err) = current_error {
        all_messages.push(err.to_string());
        current_error = err.source();
    }

    let wrapper_prefixes = [
        format!("Failed to render '{TEMPLATE_NAME}'"),
        format!("Failed to parse '{TEMPLATE_NAME}'"),
    ];

    let messages: Vec<String> = all_messages
        .into_iter()
        .map(|msg| msg.replace(&format!("'{TEMPLATE_NAME}'"), "template").trim().to_string())
        .filter(|msg| !msg.is_empty())
        .filter(|msg| !wrapper_prefixes.iter().any(|prefix| msg == prefix))
        .collect();

    if messages.is_empty() {
        error.to_string()
    } else {
        messages.join("\n  → ")
    }
}
