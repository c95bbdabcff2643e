//! The render pipeline: read template, resolve values, render, write.

use anyhow::{Context, Result};
use std::io::{Read, Write};

use crate::config::{DumpFormat, RenderConfig};
use crate::templating::TemplateRenderer;
use crate::utils::fs::{read_input, write_output};
use crate::values::{ValueTree, resolve_values};

/// Run one render with an explicit configuration.
///
/// `stdin` and `stdout` are used only when `config` has no input/output path,
/// which keeps the pipeline testable without touching process streams.
///
/// # Errors
///
/// Fails on the first read, parse, merge, render or write error. Nothing is
/// written when an earlier step fails.
pub fn run<R: Read, W: Write>(config: &RenderConfig, stdin: R, stdout: W) -> Result<()> {
    let output = match config.dump_values {
        Some(format) => {
            let values = resolve_values(&config.values_files)?;
            dump_values(&values, format)?
        }
        None => {
            let template = read_input(config.input.as_deref(), stdin)?;
            let values = resolve_values(&config.values_files)?;
            TemplateRenderer::new().strict(config.strict).render(&template, &values)?
        }
    };

    write_output(config.output.as_deref(), output.as_bytes(), stdout)
}

/// Serialize a resolved values tree for debugging.
///
/// Key order follows the values files: first appearance wins the position.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn dump_values(values: &ValueTree, format: DumpFormat) -> Result<String> {
    match format {
        DumpFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(values).context("Failed to serialize values as JSON")?;
            json.push('\n');
            Ok(json)
        }
        DumpFormat::Yaml => {
            serde_yaml::to_string(values).context("Failed to serialize values as YAML")
        }
    }
}
