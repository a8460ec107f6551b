//! Error types for vectrace-trace

use thiserror::Error;

/// Errors that can occur during contour scanning and path fitting
#[derive(Debug, Error)]
pub enum TraceError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] vectrace_core::Error),

    /// The contour walk hit a (code, direction) pair with no valid
    /// transition. The edge raster is corrupted; this indicates a bug,
    /// never expected input.
    #[error("no edge transition for code {code} in direction {direction}")]
    InvalidEdgeTransition { code: i8, direction: u8 },
}

/// Result type for trace operations
pub type TraceResult<T> = Result<T, TraceError>;
