//! Error types and handling for the CLI
//!
//! This module provides error types and utilities for handling
//! various failure modes in the CLI application.

use colored::Colorize;
use std::io;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for CLI operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error (pipes, terminals)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error from csemver-core library
    #[error("{0}")]
    Core(#[from] csemver_core::Error),

    /// Range expression did not parse
    #[error("Invalid range expression: {message}")]
    InvalidRange { message: String },

    /// A tested version fell outside the bound
    #[error("{count} version(s) did not satisfy the bound")]
    Unsatisfied { count: usize },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid range error from a parse failure message
    pub fn invalid_range(message: impl Into<String>) -> Self {
        Self::InvalidRange {
            message: message.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Unsatisfied { .. } => 1,
            Self::Core(_) => 2,
            Self::InvalidRange { .. } => 3,
            Self::Io(_) => 4,
            Self::Json(_) => 5,
        }
    }
}

/// Format an error for terminal display
pub fn format_error(error: &Error, use_color: bool) -> String {
    if use_color {
        format!("{} {}", "error:".red().bold(), error)
    } else {
        format!("error: {}", error)
    }
}
