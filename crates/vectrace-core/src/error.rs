//! Error types for vectrace-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// Vectrace core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Pixel buffer length does not match the declared dimensions
    #[error("invalid buffer length: {width}x{height} RGBA needs {expected} bytes, got {actual}")]
    InvalidBufferLength {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// Pixel coordinate outside the buffer
    #[error("pixel out of bounds: ({x},{y}) in {width}x{height}")]
    PixelOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Malformed hex color string
    #[error("invalid hex color: {0:?}")]
    InvalidHexColor(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
