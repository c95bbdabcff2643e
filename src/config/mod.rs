//! Run configuration for txtplate
//!
//! Everything a run needs is carried in explicit values built once from the
//! command line and passed down; nothing is read from global state.
//!
//! - [`RenderConfig`] - values files, template input, output target, dump mode
//! - [`LogConfig`] - log verbosity
//!
//! # Examples
//!
//! ```rust
//! use txtplate::config::{DumpFormat, RenderConfig};
//!
//! let config = RenderConfig::new(vec!["base.yaml".into(), "prod.json".into()])
//!     .with_input("page.tpl")
//!     .with_output("page.txt");
//!
//! assert_eq!(config.values_files.len(), 2);
//! assert_eq!(config.dump_values, None::<DumpFormat>);
//! ```

use std::fmt;
use std::path::PathBuf;

/// Output format for `--dump-values`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DumpFormat {
    Json,
    Yaml,
}

impl fmt::Display for DumpFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Configuration for one render run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderConfig {
    /// Values files, merged left to right. Later files win.
    pub values_files: Vec<PathBuf>,
    /// Template path; `None` reads stdin.
    pub input: Option<PathBuf>,
    /// Output path; `None` writes stdout.
    pub output: Option<PathBuf>,
    /// Write the resolved values in this format instead of rendering.
    pub dump_values: Option<DumpFormat>,
    /// Fail if rendered output still contains template delimiters.
    pub strict: bool,
}

impl RenderConfig {
    #[must_use]
    pub fn new(values_files: Vec<PathBuf>) -> Self {
        Self {
            values_files,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    #[must_use]
    pub fn with_dump_values(mut self, format: DumpFormat) -> Self {
        self.dump_values = Some(format);
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Logging configuration.
///
/// `RUST_LOG`, when set, takes precedence over `level`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Default filter directive, e.g. `"warn"` or `"debug"`
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl LogConfig {
    /// Level from the `--verbose`/`--quiet` flags.
    #[must_use]
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        let level = if verbose {
            "debug"
        } else if quiet {
            "error"
        } else {
            "warn"
        };
        Self {
            level: level.to_string(),
        }
    }
}
