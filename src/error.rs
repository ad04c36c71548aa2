//! Global error handling for llmcontext
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use thiserror::Error;

/// Global error type for llmcontext operations
#[derive(Error, Debug)]
pub enum LlmContextError {
    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Pattern compilation errors from the gitignore matcher
    #[error("Pattern error: {0}")]
    Pattern(#[from] ignore::Error),

    /// A requested scan root does not exist or is not a directory
    #[error("Invalid scan root: {0}")]
    InvalidRoot(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Output document write errors
    #[error("Writer error: {0}")]
    Writer(String),

    /// JSON report serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Unexpected error
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Specialized Result type for llmcontext operations
pub type Result<T> = std::result::Result<T, LlmContextError>;

/// Creates a LlmContextError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::LlmContextError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

/// Extension trait for adding context to errors
pub trait ResultExt<T, E> {
    /// Add additional context to an error
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display;
}

impl<T, E: std::error::Error + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: std::fmt::Display,
    {
        self.map_err(|e| {
            let context = f();
            LlmContextError::Unexpected(format!("{}: {}", context, e))
        })
    }
}
