//! Vectrace Color - Palette construction and pixel clustering
//!
//! This crate reduces an RGBA image to a small palette and assigns every
//! pixel to a palette entry:
//!
//! - **Palette building** ([`palette`]): initial color sets from four
//!   sampling policies (generate, sample, scan, fixed palette)
//! - **Clustering** ([`cluster`]): iterative k-means style refinement that
//!   produces the padded per-pixel color index grid

pub mod cluster;
pub mod error;
pub mod palette;

// Re-export core types
pub use vectrace_core;

pub use cluster::{ClusterOptions, ColorIndex, DistanceBuffering, NO_COLOR, build_color_index};
pub use error::{ColorError, ColorResult};
pub use palette::{MIN_PALETTE_SIZE, PaletteMode, build_palette};
