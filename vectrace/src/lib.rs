//! vectrace - raster image to vector outline tracer
//!
//! Turns a decoded RGBA image into per-color vector outlines: the image
//! is quantized onto a small palette, each color layer's boundaries are
//! walked as closed contours with hole nesting, and the contours are
//! fitted with straight lines and quadratic Bezier curves.
//!
//! # Example
//!
//! ```
//! use vectrace::{ImageTracer, Options, Rgba, RgbaBuffer};
//!
//! let image = RgbaBuffer::filled(8, 8, Rgba::opaque(200, 30, 30));
//! let tracer = ImageTracer::new(Options {
//!     seed: Some(1),
//!     ..Options::default()
//! });
//! let traced = tracer.trace(&image).unwrap();
//! assert_eq!(traced.width, 8);
//! ```

mod error;
mod options;
mod tracer;

pub use error::{Error, Result};
pub use options::{Layering, Options, Preset};
pub use tracer::{ImageTracer, PaletteFn, TraceData};

// Re-export core types (used in the public API)
pub use vectrace_core::{BoundingBox, Point, Rgba, RgbaBuffer};

// Re-export domain crates as modules for direct access to the stages
pub use vectrace_color as color;
pub use vectrace_trace as trace;
