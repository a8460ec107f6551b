//! Tracer configuration

use vectrace_color::{DistanceBuffering, PaletteMode};
use vectrace_core::Rgba;
use vectrace_trace::InterpolationMode;

/// How the per-color pipeline stages are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layering {
    /// Run the full raster, scan, interpolate and fit chain color by color.
    Sequential,
    /// Run each stage over all colors before moving to the next stage.
    /// Builds all edge rasters in a single pass over the color index.
    #[default]
    Batch,
}

/// Full tracer configuration.
///
/// `Options::default()` gives the reference settings; the preset
/// constructors tweak a handful of fields for common looks.
#[derive(Debug, Clone)]
pub struct Options {
    /// Squared maximum distance a point may be off a run to still be
    /// fitted by a straight line.
    pub line_error_margin: f64,
    /// Squared maximum distance a point may be off a run to still be
    /// fitted by a quadratic curve.
    pub curve_error_margin: f64,
    /// Areas with an outline of fewer points are discarded.
    pub min_shape_outline: usize,
    /// Keep right-angle corners sharp instead of rounding them off.
    pub enhance_right_angles: bool,
    pub interpolation: InterpolationMode,

    /// How the initial palette is obtained.
    pub color_sampling: PaletteMode,
    /// Fixed palette for [`PaletteMode::Palette`].
    pub palette: Option<Vec<Rgba>>,
    /// Target palette size. Clamped to at least 2.
    pub number_of_colors: usize,
    /// Colors assigned a smaller fraction of all pixels are reseeded
    /// with a random color between clustering cycles.
    pub min_color_quota: f64,
    pub color_clustering_cycles: usize,
    pub distance_buffering: DistanceBuffering,

    pub layering: Layering,

    /// Seed for the palette and reseeding RNG. `None` draws entropy from
    /// the operating system; set it to make a trace reproducible.
    pub seed: Option<u64>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            line_error_margin: 1.0,
            curve_error_margin: 1.0,
            min_shape_outline: 8,
            enhance_right_angles: true,
            interpolation: InterpolationMode::Interpolate,
            color_sampling: PaletteMode::Scan,
            palette: None,
            number_of_colors: 16,
            min_color_quota: 0.0,
            color_clustering_cycles: 3,
            distance_buffering: DistanceBuffering::Reasonable,
            layering: Layering::Batch,
            seed: None,
        }
    }
}

/// Named option bundles for common looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// Two generated colors, maximum flattening.
    Posterized,
    /// Favors curves everywhere, corners included.
    Curvy,
    /// Favors line segments, keeps corners.
    Sharp,
    /// Keeps even the smallest shapes, with a large palette.
    Detailed,
    /// Seven generated gray shades.
    Grayscale,
}

impl Options {
    pub fn preset(preset: Preset) -> Self {
        let base = Self::default();
        match preset {
            Preset::Posterized => Self {
                color_sampling: PaletteMode::Generate,
                number_of_colors: 2,
                ..base
            },
            Preset::Curvy => Self {
                line_error_margin: 0.01,
                enhance_right_angles: false,
                ..base
            },
            Preset::Sharp => Self {
                curve_error_margin: 0.01,
                ..base
            },
            Preset::Detailed => Self {
                min_shape_outline: 0,
                line_error_margin: 0.5,
                curve_error_margin: 0.5,
                number_of_colors: 64,
                ..base
            },
            Preset::Grayscale => Self {
                color_sampling: PaletteMode::Generate,
                color_clustering_cycles: 1,
                number_of_colors: 7,
                ..base
            },
        }
    }
}
