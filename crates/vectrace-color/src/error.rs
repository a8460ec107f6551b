//! Error types for vectrace-color

use thiserror::Error;

/// Errors that can occur during palette construction and clustering
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] vectrace_core::Error),

    /// Fixed-palette mode selected without a usable palette
    #[error("palette mode requires a non-empty palette in the options")]
    MissingPalette,

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
