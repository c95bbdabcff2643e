//! Core types and error handling for txtplate
//!
//! - [`error`] - [`TxtplateError`], [`ErrorContext`] and [`user_friendly_error`]

pub mod error;

pub use error::{ErrorContext, TxtplateError, create_error_context, user_friendly_error};
