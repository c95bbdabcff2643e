//! Utilities shared by the CLI and the library.
//!
//! - [`fs`] - Reading values files and templates, atomic output writes

pub mod fs;

pub use fs::{atomic_write, ensure_dir, read_bytes, read_input, write_output};
