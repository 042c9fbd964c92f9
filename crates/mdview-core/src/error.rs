//! Error types for mdview operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! the mdview crates. Uses `thiserror` for derive macros.

use std::path::Path;

use thiserror::Error;

/// Errors that can occur while loading, converting or rendering a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific path.
    #[error("I/O error at {path}: {source}")]
    IoAt {
        /// Path that was being accessed.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Asset not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data or format.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Markup conversion failed.
    #[error("Conversion failed: {0}")]
    Conversion(String),

    /// The render surface rejected a request.
    #[error("Render failed: {0}")]
    Render(String),

    /// The render surface itself could not be constructed.
    #[error("Provisioning failed: {0}")]
    Provisioning(String),

    /// Work was submitted after the worker pool was shut down.
    #[error("Worker pool has been shut down")]
    PoolShutdown,
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create a conversion error.
    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }

    /// Create a render error.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Create a provisioning error.
    pub fn provisioning(msg: impl Into<String>) -> Self {
        Self::Provisioning(msg.into())
    }

    /// Wrap an I/O error with the path it occurred at.
    ///
    /// `NotFound` I/O errors become [`Error::NotFound`] so callers can
    /// match on a missing asset without inspecting the io kind.
    pub fn io_with_path(err: std::io::Error, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().display().to_string();
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::IoAt { path, source: err }
        }
    }

    /// Returns `true` if this error means the requested item does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias using mdview's Error type.
pub type Result<T> = std::result::Result<T, Error>;
