//! Template execution for resolved values.
//!
//! Templates use [Tera](https://keats.github.io/tera/) syntax. The resolved
//! values tree is exposed as the template context: each top-level key is a
//! variable.
//!
//! ```rust
//! use txtplate::templating::TemplateRenderer;
//! use txtplate::values::ValueTree;
//! use serde_json::json;
//!
//! let values = ValueTree::from(json!({"app": {"name": "demo", "replicas": 3}}));
//! let out = TemplateRenderer::new()
//!     .render("{{ app.name }} x{{ app.replicas }}", &values)?;
//! assert_eq!(out, "demo x3");
//! # Ok::<(), txtplate::core::TxtplateError>(())
//! ```
//!
//! # Supported Features
//!
//! - Variable substitution: `{{ db.host }}`
//! - Conditionals and loops: `{% if debug %}`, `{% for s in servers %}`
//! - Tera's built-in filters and functions (`upper`, `default`, `json_encode`, ...)
//!
//! Undefined variables are errors, not empty strings.

mod renderer;

pub use renderer::{TemplateRenderer, format_tera_error};
