//! Vectrace Trace - From color index to vector outlines
//!
//! The per-color tracing chain:
//!
//! - **Edge rasters** ([`edge`]): 4-bit corner-membership codes per cell
//! - **Area scanning** ([`scan`]): transition-table contour walk with
//!   hole nesting
//! - **Interpolation** ([`interpolate`]): midpoint smoothing and 8-way
//!   trajectory codes
//! - **Path fitting** ([`fit`]): recursive line/quadratic-curve
//!   approximation within error margins
//!
//! The chains for different palette colors share no mutable state.

pub mod edge;
pub mod error;
pub mod fit;
pub mod interpolate;
pub mod scan;

// Re-export upstream crates
pub use vectrace_color;
pub use vectrace_core;

pub use edge::{EdgeRaster, build_all_rasters, build_raster_for_color};
pub use error::{TraceError, TraceResult};
pub use fit::{DrawCommand, OutlinedArea, trace_area};
pub use interpolate::{InterpolationMode, Trajectory, TrajectoryArea, TrajectoryPoint, interpolate};
pub use scan::{EdgeArea, EdgePoint, scan_areas};
