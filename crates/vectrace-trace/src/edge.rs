//! Edge raster construction
//!
//! For one palette color, every cell of a padded `(height+2) x (width+2)`
//! grid is classified by which corners of the 2x2 pixel block behind it
//! belong to the color:
//!
//! ```text
//! 12  ..  #.  .#  ##  ..  #.  .#  ##  ..  #.  .#  ##  ..  #.  .#  ##
//! 84  ..  ..  ..  ..  .#  .#  .#  .#  #.  #.  #.  #.  ##  ##  ##  ##
//!     0   1   2   3   4   5   6   7   8   9   10  11  12  13  14  15
//! ```
//!
//! Codes 0 and 15 are entirely outside/inside and carry no boundary;
//! codes 4 and 11 are the outward-corner seed types the scanner starts
//! from.

use vectrace_color::ColorIndex;

/// Per-color grid of edge codes, sized like the padded color index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRaster {
    width: usize,
    height: usize,
    cells: Vec<i8>,
}

impl EdgeRaster {
    /// Create a zeroed raster with the given (padded) grid dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Grid width including padding.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height including padding.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i8 {
        self.cells[row * self.width + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, code: i8) {
        self.cells[row * self.width + col] = code;
    }
}

/// Build the edge raster for a single palette color by direct 2x2
/// classification of every grid cell.
pub fn build_raster_for_color(index: &ColorIndex, color: i32) -> EdgeRaster {
    let height = index.padded_height();
    let width = index.padded_width();
    let mut raster = EdgeRaster::new(width, height);

    for row in 1..height {
        for col in 1..width {
            let code = (index.get(row - 1, col - 1) == color) as i8
                + ((index.get(row - 1, col) == color) as i8) * 2
                + ((index.get(row, col - 1) == color) as i8) * 8
                + ((index.get(row, col) == color) as i8) * 4;
            raster.set(row, col, code);
        }
    }
    raster
}

/// Build one edge raster per palette color in a single pass over the
/// color index.
///
/// Each interior pixel updates the four raster cells it touches in its
/// own color's grid, so every cell ends up with the full 4-corner code.
/// The per-color grids share no state and the result is identical to
/// calling [`build_raster_for_color`] per color.
pub fn build_all_rasters(index: &ColorIndex, palette_len: usize) -> Vec<EdgeRaster> {
    let height = index.padded_height();
    let width = index.padded_width();
    let mut rasters = vec![EdgeRaster::new(width, height); palette_len];

    for row in 1..height.saturating_sub(1) {
        for col in 1..width.saturating_sub(1) {
            let color = index.get(row, col);
            if color < 0 {
                continue;
            }

            // Neighborhood around the pixel:
            //   n1 n2 n3
            //   n4    n5
            //   n6 n7 n8
            let n1 = (index.get(row - 1, col - 1) == color) as i8;
            let n2 = (index.get(row - 1, col) == color) as i8;
            let n3 = (index.get(row - 1, col + 1) == color) as i8;
            let n4 = (index.get(row, col - 1) == color) as i8;
            let n5 = (index.get(row, col + 1) == color) as i8;
            let n6 = (index.get(row + 1, col - 1) == color) as i8;
            let n7 = (index.get(row + 1, col) == color) as i8;
            let n8 = (index.get(row + 1, col + 1) == color) as i8;

            let raster = &mut rasters[color as usize];
            raster.set(row + 1, col + 1, 1 + n5 * 2 + n8 * 4 + n7 * 8);
            if n4 == 0 {
                raster.set(row + 1, col, 2 + n7 * 4 + n6 * 8);
            }
            if n2 == 0 {
                raster.set(row, col + 1, n3 * 2 + n5 * 4 + 8);
            }
            if n1 == 0 {
                raster.set(row, col, n2 * 2 + 4 + n4 * 8);
            }
        }
    }
    rasters
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use vectrace_color::{ClusterOptions, build_color_index};
    use vectrace_core::{Rgba, RgbaBuffer};

    const WHITE: Rgba = Rgba::opaque(255, 255, 255);
    const RED: Rgba = Rgba::opaque(255, 0, 0);
    const BLUE: Rgba = Rgba::opaque(0, 0, 255);

    fn index_for(image: &RgbaBuffer, palette: &[Rgba]) -> ColorIndex {
        let mut rng = StdRng::seed_from_u64(5);
        let mut palette = palette.to_vec();
        let options = ClusterOptions {
            cycles: 1,
            ..ClusterOptions::default()
        };
        build_color_index(image, &mut palette, &options, &mut rng).unwrap()
    }

    #[test]
    fn test_single_pixel_corner_codes() {
        let mut image = RgbaBuffer::filled(3, 3, WHITE);
        image.set(1, 1, RED).unwrap();
        let index = index_for(&image, &[WHITE, RED]);
        let raster = build_raster_for_color(&index, 1);

        // One pixel produces the four pure corner codes around it
        assert_eq!(raster.get(2, 2), 4);
        assert_eq!(raster.get(2, 3), 8);
        assert_eq!(raster.get(3, 2), 2);
        assert_eq!(raster.get(3, 3), 1);
    }

    #[test]
    fn test_solid_interior_is_fifteen() {
        let image = RgbaBuffer::filled(4, 4, RED);
        let index = index_for(&image, &[RED, WHITE]);
        let raster = build_raster_for_color(&index, 0);

        for row in 2..=4 {
            for col in 2..=4 {
                assert_eq!(raster.get(row, col), 15);
            }
        }
        // Top-left outward corner seeds a scan
        assert_eq!(raster.get(1, 1), 4);
    }

    #[test]
    fn test_batch_builder_matches_per_color() {
        let mut image = RgbaBuffer::filled(6, 5, WHITE);
        image.fill_rect(1, 1, 3, 2, RED);
        image.fill_rect(3, 2, 2, 2, BLUE);
        let palette = [WHITE, RED, BLUE];
        let index = index_for(&image, &palette);

        let batch = build_all_rasters(&index, palette.len());
        assert_eq!(batch.len(), palette.len());
        for (color, raster) in batch.iter().enumerate() {
            assert_eq!(*raster, build_raster_for_color(&index, color as i32));
        }
    }

    #[test]
    fn test_unused_color_raster_is_blank() {
        let image = RgbaBuffer::filled(3, 3, RED);
        let index = index_for(&image, &[RED, WHITE]);
        let raster = build_raster_for_color(&index, 1);
        for row in 0..raster.height() {
            for col in 0..raster.width() {
                assert_eq!(raster.get(row, col), 0);
            }
        }
    }
}
