//! Application error types.

use thiserror::Error;

/// Application-level errors for Epistola.
#[derive(Error, Debug)]
pub enum AppError {
    // Table errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Filter errors
    #[error("Invalid time span '{0}': expected 'start,end' with start <= end")]
    InvalidTimeSpan(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // Graph errors
    #[error("Graph is empty, nothing to render: {0}")]
    EmptyGraph(String),

    // Rendering errors
    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("Font could not be loaded from {path}: {reason}")]
    Font { path: String, reason: String },

    // Config errors
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    /// Wrap any drawing backend failure.
    pub fn render(err: impl std::fmt::Display) -> Self {
        Self::Render(err.to_string())
    }
}
