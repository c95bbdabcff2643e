//! Integration test suite for txtplate
//!
//! End-to-end tests that run the compiled binary or drive the public library
//! API against real files in temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: Binary behavior, stdin/stdout, `--input`/`--output`, exit codes
//! - **values**: Merge precedence and normalization through the library API
//! - **templating**: Rendering resolved values with Tera features

mod cli;
mod templating;
mod values;
