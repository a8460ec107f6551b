//! Crate-wide error type

use thiserror::Error;

/// Any failure the tracing pipeline can surface.
#[derive(Debug, Error)]
pub enum Error {
    #[error("core error: {0}")]
    Core(#[from] vectrace_core::Error),

    #[error("color quantization error: {0}")]
    Color(#[from] vectrace_color::ColorError),

    #[error("tracing error: {0}")]
    Trace(#[from] vectrace_trace::TraceError),
}

pub type Result<T> = std::result::Result<T, Error>;
