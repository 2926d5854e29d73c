//! Core error types for setpace-core.
//!
//! Run control (abort, skip) is not an error: phases report those through
//! their outcome. Errors here are the things that can genuinely fail, which
//! in this crate means the catalog on disk.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for setpace-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Exercise catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Exercise-catalog-specific errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to read the catalog file
    #[error("Failed to load catalog from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to write the catalog file
    #[error("Failed to save catalog to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Catalog file exists but is not valid TOML
    #[error("Failed to parse catalog: {0}")]
    ParseFailed(String),

    /// No exercise with the requested name
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),

    /// Could not create the config directory
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for core operations.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
