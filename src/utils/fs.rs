//! File system helpers for reading inputs and writing rendered output.
//!
//! # Key Features
//!
//! - **Atomic output**: Rendered files are written to a temporary file in the
//!   target directory and renamed into place, so a failed run never leaves a
//!   half-written output
//! - **Stdin/stdout fallbacks**: The template and the output default to the
//!   process streams when no path is given
//!
//! # Examples
//!
//! ```rust,no_run
//! use txtplate::utils::fs::{atomic_write, read_input};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let template = read_input(Some(Path::new("page.tpl")), std::io::stdin())?;
//! atomic_write(Path::new("out/page.txt"), template.as_bytes())?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::core::TxtplateError;

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// # Errors
///
/// Returns an error if the path exists but is not a directory, or creation fails.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }

    if path.exists() {
        if !path.is_dir() {
            anyhow::bail!("Path exists but is not a directory: {}", path.display());
        }
        return Ok(());
    }

    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}

/// Read a whole file into memory.
///
/// `operation` names what the read was for and ends up in the error.
///
/// # Errors
///
/// Returns [`TxtplateError::FileSystemError`] if the file cannot be read.
pub fn read_bytes(path: &Path, operation: &str) -> Result<Vec<u8>, TxtplateError> {
    fs::read(path).map_err(|e| TxtplateError::file_system(operation, path, &e))
}

/// Read the template text from `path`, or from `stdin` when no path is given.
///
/// # Errors
///
/// Returns an error if the source cannot be read or is not valid UTF-8.
pub fn read_input<R: Read>(path: Option<&Path>, mut stdin: R) -> Result<String> {
    match path {
        Some(path) => {
            let bytes = read_bytes(path, "read template")?;
            String::from_utf8(bytes)
                .with_context(|| format!("Template is not valid UTF-8: {}", path.display()))
        }
        None => {
            let mut content = String::new();
            stdin.read_to_string(&mut content).context("Failed to read template from stdin")?;
            Ok(content)
        }
    }
}

/// Write `content` to `path`, or to `stdout` when no path is given.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn write_output<W: Write>(path: Option<&Path>, content: &[u8], mut stdout: W) -> Result<()> {
    match path {
        Some(path) => atomic_write(path, content),
        None => {
            stdout.write_all(content).context("Failed to write output to stdout")?;
            stdout.flush().context("Failed to flush stdout")
        }
    }
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// The temporary file is created next to the target so the final rename never
/// crosses file systems. Parent directories are created as needed. An existing
/// file keeps its permissions; a new file gets `0o644` on Unix.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or any step of the
/// write fails. The target is left untouched in that case.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    ensure_dir(parent)?;

    let existing_permissions = fs::metadata(path).ok().map(|m| m.permissions());

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;
    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for: {}", path.display()))?;
    temp.as_file().sync_all().context("Failed to sync file to disk")?;

    match existing_permissions {
        Some(permissions) => fs::set_permissions(temp.path(), permissions)
            .with_context(|| format!("Failed to copy permissions of: {}", path.display()))?,
        None => set_default_permissions(temp.path())?,
    }

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
        .with_context(|| format!("Failed to set permissions on: {}", path.display()))
}

#[cfg(not(unix))]
fn set_default_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
