//! Command-line interface for txtplate.
//!
//! ```bash
//! # Render stdin with merged values to stdout
//! cat page.tpl | txtplate base.yaml prod.json > page.txt
//!
//! # Explicit input/output
//! txtplate -i page.tpl -o page.txt base.yaml prod.json
//!
//! # Inspect the merged values without rendering
//! txtplate --dump-values yaml base.yaml prod.json
//! ```
//!
//! Values files are merged left to right; later files override earlier ones.
//! `.yaml`/`.yml` files are read as YAML, everything else as JSON.

pub mod render;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{DumpFormat, LogConfig, RenderConfig};

/// Main CLI structure for txtplate.
#[derive(Parser, Debug)]
#[command(
    name = "txtplate",
    version,
    about = "Apply values in JSON or YAML files to Tera templates",
    long_about = "By default reads a template from stdin (or --input), renders it with the \
values merged from the given files and writes the result to stdout (or --output). \
Values files are merged left to right; later files override earlier ones. The file type \
of each values file is detected by extension (.yaml/.yml) and defaults to JSON.

Example:
    cat mytemplate.tpl | txtplate values.json > output.txt"
)]
pub struct Cli {
    /// Values files to merge, in order of increasing precedence.
    #[arg(required = true, value_name = "VALUES_FILES")]
    values_files: Vec<PathBuf>,

    /// Read the template from this file instead of stdin.
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Write the result to this file instead of stdout.
    ///
    /// The file is written atomically and parent directories are created.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Write the merged values in this format instead of rendering a template.
    #[arg(long, value_name = "FORMAT")]
    dump_values: Option<DumpFormat>,

    /// Fail if the rendered output still contains `{{` or `{%`.
    #[arg(long)]
    strict: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Build the run configuration from the parsed arguments.
    #[must_use]
    pub fn build_config(&self) -> RenderConfig {
        RenderConfig {
            values_files: self.values_files.clone(),
            input: self.input.clone(),
            output: self.output.clone(),
            dump_values: self.dump_values,
            strict: self.strict,
        }
    }

    #[must_use]
    pub fn log_config(&self) -> LogConfig {
        LogConfig::from_flags(self.verbose, self.quiet)
    }

    /// Execute with the process's stdin and stdout.
    ///
    /// # Errors
    ///
    /// Returns the first error of the render pipeline.
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        tracing::debug!("Running with {:?}", config);
        render::run(&config, std::io::stdin().lock(), std::io::stdout().lock())
    }
}

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins over the configured level when it is set. Calling this
/// twice is harmless; the second call is ignored.
pub fn init_logging(config: &LogConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
