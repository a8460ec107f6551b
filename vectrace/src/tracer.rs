//! Pipeline orchestrator
//!
//! Runs the full chain: palette construction, color clustering, edge
//! raster building, contour scanning, interpolation and segment fitting.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::Result;
use crate::options::{Layering, Options};
use vectrace_color::{ClusterOptions, ColorIndex, ColorResult, build_color_index, build_palette};
use vectrace_core::{Rgba, RgbaBuffer};
use vectrace_trace::{
    OutlinedArea, build_all_rasters, build_raster_for_color, interpolate, scan_areas, trace_area,
};

/// Custom palette builder, replacing the built-in sampling modes.
///
/// Receives the image, the requested color count and the tracer's RNG,
/// and returns the initial palette for clustering.
pub type PaletteFn =
    Box<dyn Fn(&RgbaBuffer, usize, &mut StdRng) -> ColorResult<Vec<Rgba>> + Send + Sync>;

/// The traced image: one list of outlined areas per palette color.
///
/// `areas_by_color[i]` holds the fitted boundaries of palette color
/// `colors[i]`; hole areas appear both in the list and in their parent's
/// `child_holes` indices.
#[derive(Debug, Clone)]
pub struct TraceData {
    pub colors: Vec<Rgba>,
    pub areas_by_color: Vec<Vec<OutlinedArea>>,
    pub width: usize,
    pub height: usize,
}

/// Raster to vector tracer.
pub struct ImageTracer {
    options: Options,
    palette_fn: Option<PaletteFn>,
}

impl ImageTracer {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            palette_fn: None,
        }
    }

    /// Replace the built-in palette construction with a custom one.
    pub fn with_palette_fn(mut self, palette_fn: PaletteFn) -> Self {
        self.palette_fn = Some(palette_fn);
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Trace an image into per-color vector outlines.
    pub fn trace(&self, image: &RgbaBuffer) -> Result<TraceData> {
        let mut rng = match self.options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut palette = self.build_palette(image, &mut rng)?;
        tracing::debug!(colors = palette.len(), "palette ready");

        let cluster_options = ClusterOptions {
            cycles: self.options.color_clustering_cycles,
            min_color_quota: self.options.min_color_quota,
            buffering: self.options.distance_buffering,
        };
        let index = build_color_index(image, &mut palette, &cluster_options, &mut rng)?;
        tracing::debug!(
            width = index.width(),
            height = index.height(),
            "pixels clustered"
        );

        let areas_by_color = match self.options.layering {
            Layering::Sequential => self.trace_layers_sequential(&index, palette.len())?,
            Layering::Batch => self.trace_layers_batch(&index, palette.len())?,
        };
        tracing::debug!(
            areas = areas_by_color.iter().map(Vec::len).sum::<usize>(),
            "outlines fitted"
        );

        Ok(TraceData {
            colors: palette,
            areas_by_color,
            width: index.width(),
            height: index.height(),
        })
    }

    fn build_palette(&self, image: &RgbaBuffer, rng: &mut StdRng) -> Result<Vec<Rgba>> {
        let palette = match &self.palette_fn {
            Some(palette_fn) => palette_fn(image, self.options.number_of_colors, rng)?,
            None => build_palette(
                image,
                self.options.number_of_colors,
                self.options.color_sampling,
                self.options.palette.as_deref(),
                rng,
            )?,
        };
        Ok(palette)
    }

    /// Full per-color chain, one color at a time.
    fn trace_layers_sequential(
        &self,
        index: &ColorIndex,
        palette_len: usize,
    ) -> Result<Vec<Vec<OutlinedArea>>> {
        let mut areas_by_color = Vec::with_capacity(palette_len);
        for color in 0..palette_len {
            let mut raster = build_raster_for_color(index, color as i32);
            let areas = scan_areas(&mut raster, self.options.min_shape_outline)?;
            areas_by_color.push(self.fit_layer(areas));
        }
        Ok(areas_by_color)
    }

    /// Stage by stage over all colors, sharing one pass over the index
    /// for raster building.
    fn trace_layers_batch(
        &self,
        index: &ColorIndex,
        palette_len: usize,
    ) -> Result<Vec<Vec<OutlinedArea>>> {
        let mut rasters = build_all_rasters(index, palette_len);

        let mut areas_by_color = Vec::with_capacity(rasters.len());
        for raster in &mut rasters {
            areas_by_color.push(scan_areas(raster, self.options.min_shape_outline)?);
        }

        Ok(areas_by_color
            .into_iter()
            .map(|areas| self.fit_layer(areas))
            .collect())
    }

    fn fit_layer(&self, areas: Vec<vectrace_trace::EdgeArea>) -> Vec<OutlinedArea> {
        let interpolated = interpolate(
            self.options.interpolation,
            areas,
            self.options.enhance_right_angles,
        );
        interpolated
            .iter()
            .map(|area| {
                trace_area(
                    area,
                    self.options.line_error_margin,
                    self.options.curve_error_margin,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vectrace_trace::DrawCommand;

    fn uniform_image(width: usize, height: usize, color: Rgba) -> RgbaBuffer {
        RgbaBuffer::filled(width, height, color)
    }

    fn seeded_options() -> Options {
        Options {
            seed: Some(7),
            min_shape_outline: 0,
            ..Options::default()
        }
    }

    #[test]
    fn test_uniform_image_single_area() {
        let image = uniform_image(4, 4, Rgba::opaque(255, 0, 0));
        let tracer = ImageTracer::new(seeded_options());
        let data = tracer.trace(&image).unwrap();

        assert_eq!(data.width, 4);
        assert_eq!(data.height, 4);
        // Every pixel is the same color, so exactly one layer has areas.
        let populated: Vec<&Vec<OutlinedArea>> = data
            .areas_by_color
            .iter()
            .filter(|areas| !areas.is_empty())
            .collect();
        assert_eq!(populated.len(), 1);
        assert_eq!(populated[0].len(), 1);
        assert!(!populated[0][0].is_hole);
    }

    #[test]
    fn test_layering_modes_agree() {
        let image = uniform_image(6, 4, Rgba::opaque(0, 128, 255));
        let sequential = ImageTracer::new(Options {
            layering: Layering::Sequential,
            ..seeded_options()
        });
        let batch = ImageTracer::new(Options {
            layering: Layering::Batch,
            ..seeded_options()
        });

        let a = sequential.trace(&image).unwrap();
        let b = batch.trace(&image).unwrap();

        assert_eq!(a.colors, b.colors);
        assert_eq!(a.areas_by_color.len(), b.areas_by_color.len());
        for (areas_a, areas_b) in a.areas_by_color.iter().zip(&b.areas_by_color) {
            assert_eq!(areas_a.len(), areas_b.len());
            for (area_a, area_b) in areas_a.iter().zip(areas_b) {
                assert_eq!(area_a.commands, area_b.commands);
                assert_eq!(area_a.is_hole, area_b.is_hole);
            }
        }
    }

    #[test]
    fn test_custom_palette_fn() {
        let image = uniform_image(4, 4, Rgba::opaque(10, 20, 30));
        let tracer = ImageTracer::new(seeded_options()).with_palette_fn(Box::new(|_, _, _| {
            Ok(vec![Rgba::opaque(10, 20, 30), Rgba::opaque(200, 200, 200)])
        }));
        let data = tracer.trace(&image).unwrap();
        // Clustering pulls the first color onto the image average.
        assert_eq!(data.colors[0], Rgba::opaque(10, 20, 30));
    }

    #[test]
    fn test_commands_form_closed_loops() {
        let mut image = uniform_image(8, 8, Rgba::opaque(255, 255, 255));
        image.fill_rect(2, 2, 4, 4, Rgba::opaque(0, 0, 0));
        let tracer = ImageTracer::new(seeded_options());
        let data = tracer.trace(&image).unwrap();

        for areas in &data.areas_by_color {
            for area in areas {
                let Some(first) = area.commands.first() else {
                    continue;
                };
                let (start_x, start_y) = match *first {
                    DrawCommand::Line { x1, y1, .. } => (x1, y1),
                    DrawCommand::Curve { x1, y1, .. } => (x1, y1),
                };
                let last = area.commands.last().unwrap();
                assert_eq!(last.end_point(), (start_x, start_y));
            }
        }
    }
}
