//! Test utilities for txtplate
//!
//! Helpers shared by unit tests and the integration suite (through the
//! `test-utils` feature): one-time tracing setup and a scratch directory for
//! values files and templates.
//!
//! # Example
//!
//! ```rust,no_run
//! use txtplate::test_utils::{TestProject, init_test_logging};
//! use txtplate::values::resolve_values;
//!
//! init_test_logging(None);
//! let project = TestProject::new().unwrap();
//! let base = project.create_file("base.yaml", "replicas: 1\n").unwrap();
//! let prod = project.create_file("prod.json", r#"{"replicas": 3}"#).unwrap();
//!
//! let values = resolve_values(&[base, prod]).unwrap();
//! assert_eq!(values.pointer("/replicas").and_then(|v| v.as_u64()), Some(3));
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. With `None` the `RUST_LOG` variable
/// is used, and nothing is logged if it is unset.
///
/// ```bash
/// RUST_LOG=txtplate=trace cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer() // captured per test by the harness
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// A temporary directory holding values files and templates for one test.
///
/// The directory is removed when the project is dropped.
pub struct TestProject {
    temp_dir: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp directory")?;
        Ok(Self {
            temp_dir,
        })
    }

    /// Root of the project directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn create_file(&self, relative: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn read_file(&self, relative: impl AsRef<Path>) -> Result<String> {
        let path = self.path().join(relative);
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    pub fn file_exists(&self, relative: impl AsRef<Path>) -> bool {
        self.path().join(relative).exists()
    }
}
