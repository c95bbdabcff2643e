//! txtplate - render text templates with values from JSON and YAML files
//!
//! txtplate reads a template, merges one or more values files into a single
//! tree and renders the template against it.
//!
//! # Architecture Overview
//!
//! ```text
//! values files ──▶ values::parser ──▶ values::merge ──▶ ValueTree ──▶ templating ──▶ output
//!                  (decode + key       (deep merge,                   (Tera)
//!                   normalization)      last wins)
//! ```
//!
//! # Core Modules
//!
//! - [`values`] - Parsing, key normalization and deep merge of values files
//! - [`templating`] - Tera-based template rendering
//! - [`core`] - Error types and user-facing error reporting
//!
//! # Supporting Modules
//!
//! - [`cli`] - Command-line parsing and the render pipeline
//! - [`config`] - Explicit run configuration
//! - [`utils`] - File reading and atomic output writes
//!
//! # Command-Line Usage
//!
//! ```bash
//! cat mytemplate.tpl | txtplate defaults.yaml values.json > output.txt
//! ```

// Core functionality modules
pub mod core;
pub mod templating;
pub mod values;

// Supporting modules
pub mod cli;
pub mod config;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
