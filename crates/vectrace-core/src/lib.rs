//! Vectrace Core - Basic data structures for raster-to-vector tracing
//!
//! This crate provides the fundamental data structures used throughout
//! the vectrace image tracing library:
//!
//! - [`Rgba`] / [`ColorCounter`] - Color model and channel arithmetic
//! - [`RgbaBuffer`] - The input pixel buffer (flat RGBA8)
//! - [`Point`] / [`BoundingBox`] - Path geometry primitives

pub mod buffer;
pub mod color;
pub mod error;
pub mod geom;

pub use buffer::RgbaBuffer;
pub use color::{ColorCounter, MINIMUM_ALPHA, Rgba};
pub use error::{Error, Result};
pub use geom::{BoundingBox, Point};
