//! Error handling for txtplate
//!
//! This module provides the error types and user-friendly error reporting for
//! txtplate. The error system follows two principles:
//! 1. **Strongly-typed errors** for precise handling in library code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`TxtplateError`] - Enumerated error types for every failure in txtplate
//! - [`ErrorContext`] - Wrapper that adds user-friendly details and suggestions
//!
//! # Error Categories
//!
//! - **Values resolution**: [`TxtplateError::Decode`], [`TxtplateError::KeyNotString`],
//!   [`TxtplateError::TypeMismatch`], [`TxtplateError::NoValuesFiles`]
//! - **File system**: [`TxtplateError::FileSystemError`]
//! - **Templating**: [`TxtplateError::TemplateCompile`], [`TxtplateError::TemplateRender`]
//!
//! Every error is fatal for the run. Resolution stops at the first error in
//! file order and nothing is retried.
//!
//! # Examples
//!
//! ```rust,no_run
//! use txtplate::core::{TxtplateError, user_friendly_error};
//!
//! let error = TxtplateError::NoValuesFiles;
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::values::ValuesFormat;

/// The main error type for txtplate operations.
///
/// The first three variants are the values-resolution failures:
///
/// | Variant | Meaning |
/// |---------|---------|
/// | [`Decode`](Self::Decode) | bytes are not valid YAML/JSON |
/// | [`KeyNotString`](Self::KeyNotString) | a mapping key has no string form |
/// | [`TypeMismatch`](Self::TypeMismatch) | a document root is not a mapping |
#[derive(Error, Debug, Clone)]
pub enum TxtplateError {
    /// A values file could not be decoded in its inferred format.
    #[error("Failed to parse values file {} as {format}: {reason}", path.display())]
    Decode {
        /// The values file that failed to decode
        path: PathBuf,
        /// The format inferred from the file extension
        format: ValuesFormat,
        /// The decoder's error message
        reason: String,
    },

    /// A mapping key could not be normalized to a string.
    ///
    /// Numeric keys are accepted and stringified. Booleans, nulls, sequences,
    /// mappings and tagged values are rejected.
    #[error("Key is not a string in values file {}: {key}", path.display())]
    KeyNotString {
        /// The values file containing the key
        path: PathBuf,
        /// Description of the offending key
        key: String,
    },

    /// The top-level value of a values document is not a mapping.
    #[error("Expected a mapping at the top level of values file {}, found {found}", path.display())]
    TypeMismatch {
        /// The values file whose root has the wrong shape
        path: PathBuf,
        /// The kind of value that was found instead (e.g. "sequence")
        found: &'static str,
    },

    /// Resolution was requested with an empty list of values files.
    #[error("At least one values file is required")]
    NoValuesFiles,

    /// General file system error
    #[error("File system error during {operation}: {path}")]
    FileSystemError {
        /// The operation that failed (e.g. "read values file")
        operation: String,
        /// The path involved
        path: String,
        /// Underlying I/O error message
        reason: String,
    },

    /// The template could not be parsed
    #[error("Failed to compile template: {message}")]
    TemplateCompile {
        /// Cleaned-up Tera error chain
        message: String,
    },

    /// The template parsed but failed while executing
    #[error("Failed to execute template: {message}")]
    TemplateRender {
        /// Cleaned-up Tera error chain
        message: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl TxtplateError {
    /// Build a [`TxtplateError::FileSystemError`] from an I/O failure.
    pub fn file_system(operation: impl Into<String>, path: &Path, err: &std::io::Error) -> Self {
        Self::FileSystemError {
            operation: operation.into(),
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    /// The values file this error refers to, if any.
    #[must_use]
    pub fn values_path(&self) -> Option<&Path> {
        match self {
            Self::Decode {
                path,
                ..
            }
            | Self::KeyNotString {
                path,
                ..
            }
            | Self::TypeMismatch {
                path,
                ..
            } => Some(path),
            _ => None,
        }
    }
}

/// Error context wrapper that provides user-friendly error information.
///
/// ```rust,no_run
/// use txtplate::core::{TxtplateError, ErrorContext};
///
/// let context = ErrorContext::new(TxtplateError::NoValuesFiles)
///     .with_suggestion("Pass one or more .json/.yaml files after the options")
///     .with_details("Values files are merged left to right");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying txtplate error
    pub error: TxtplateError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: TxtplateError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    ///
    /// Suggestions are displayed in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    ///
    /// Details are displayed in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Walks the `anyhow` chain looking for a [`TxtplateError`]; I/O errors get
/// filesystem guidance, anything else is wrapped as [`TxtplateError::Other`]
/// with the full chain in the message.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(txtplate_error) = cause.downcast_ref::<TxtplateError>() {
            return create_error_context(txtplate_error);
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        let context = ErrorContext::new(TxtplateError::Other {
            message: format!("{error:#}"),
        });
        return match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => context
                .with_suggestion("Check file ownership and permissions")
                .with_details("txtplate could not access a file it needed"),
            std::io::ErrorKind::NotFound => context
                .with_suggestion("Check that the file exists and the path is correct"),
            _ => context,
        };
    }

    ErrorContext::new(TxtplateError::Other {
        message: format!("{error:#}"),
    })
}

/// Create a user-friendly error context from a [`TxtplateError`]
pub fn create_error_context(error: &TxtplateError) -> ErrorContext {
    let context = ErrorContext::new(error.clone());
    match error {
        TxtplateError::Decode {
            format,
            ..
        } => context
            .with_details(format!(
                "The format was inferred from the file extension ({format}); \
                 .yaml and .yml are read as YAML, everything else as JSON"
            ))
            .with_suggestion("Fix the syntax error or rename the file to match its format"),
        TxtplateError::KeyNotString {
            ..
        } => context
            .with_details("Mapping keys must be strings or numbers")
            .with_suggestion("Quote the key, e.g. \"true\": value"),
        TxtplateError::TypeMismatch {
            ..
        } => context
            .with_details("Each values file must contain a mapping at the top level")
            .with_suggestion("Wrap the document in a key, e.g. items: [...]"),
        TxtplateError::NoValuesFiles => context
            .with_suggestion("Pass one or more .json/.yaml files, e.g. txtplate values.json"),
        TxtplateError::FileSystemError {
            reason,
            ..
        } => context
            .with_details(reason.clone())
            .with_suggestion("Check that the path exists and is readable/writable"),
        TxtplateError::TemplateCompile {
            ..
        } => context.with_suggestion("Check the template for unbalanced {{ }} or {% %} tags"),
        TxtplateError::TemplateRender {
            ..
        } => context.with_suggestion(
            "Check that every variable used by the template is defined in a values file",
        ),
        TxtplateError::Other {
            ..
        } => context,
    }
}
