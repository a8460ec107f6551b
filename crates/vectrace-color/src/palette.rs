//! Initial palette construction
//!
//! Builds the color set the clustering engine starts from. Four policies
//! are supported; all of them deduplicate by exact RGBA equality and all
//! clamp the requested size to [`MIN_PALETTE_SIZE`].

use crate::error::{ColorError, ColorResult};
use rand::Rng;
use vectrace_core::{Rgba, RgbaBuffer};

/// Requested palette sizes are clamped to at least this many colors.
pub const MIN_PALETTE_SIZE: usize = 2;

/// Palette sampling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteMode {
    /// Synthetic colors independent of image content: a grayscale ramp for
    /// fewer than 8 colors, otherwise a color-cube lattice topped up with
    /// random colors.
    Generate,
    /// Up to `4 * count` uniformly random pixel picks.
    Sample,
    /// Deterministic grid walk over the image.
    #[default]
    Scan,
    /// Caller-supplied fixed color list.
    Palette,
}

/// Build the initial palette for an image under the given policy.
///
/// `fixed` is only consulted in [`PaletteMode::Palette`]; supplying none,
/// or an empty list, is a configuration error. The other modes may return
/// fewer than `count` colors when the image does not contain enough
/// distinct ones.
pub fn build_palette(
    image: &RgbaBuffer,
    count: usize,
    mode: PaletteMode,
    fixed: Option<&[Rgba]>,
    rng: &mut impl Rng,
) -> ColorResult<Vec<Rgba>> {
    let count = count.max(MIN_PALETTE_SIZE);
    let palette = match mode {
        PaletteMode::Generate => generate_palette(count, rng),
        PaletteMode::Sample => sample_palette_random(image, count, rng),
        PaletteMode::Scan => sample_palette_scan(image, count),
        PaletteMode::Palette => match fixed {
            Some(colors) if !colors.is_empty() => colors.to_vec(),
            _ => return Err(ColorError::MissingPalette),
        },
    };
    tracing::debug!(colors = palette.len(), ?mode, "created palette");
    Ok(palette)
}

fn generate_palette(count: usize, rng: &mut impl Rng) -> Vec<Rgba> {
    if count < 8 {
        generate_grayscale_palette(count)
    } else {
        generate_color_cube_palette(count, rng)
    }
}

fn generate_grayscale_palette(count: usize) -> Vec<Rgba> {
    let step = (255 / (count - 1)) as u8;
    (0..count)
        .map(|i| {
            let shade = i as u8 * step;
            Rgba::opaque(shade, shade, shade)
        })
        .collect()
}

/// Evenly spaced lattice on the RGB cube, topped up with random colors to
/// exactly `count` entries.
fn generate_color_cube_palette(count: usize, rng: &mut impl Rng) -> Vec<Rgba> {
    let per_edge = ((count as f64).cbrt().floor() as usize).max(2);
    let step = (255 / (per_edge - 1)) as u8;

    let mut palette = Vec::with_capacity(count);
    for red in 0..per_edge {
        for green in 0..per_edge {
            for blue in 0..per_edge {
                palette.push(Rgba::opaque(
                    red as u8 * step,
                    green as u8 * step,
                    blue as u8 * step,
                ));
            }
        }
    }
    while palette.len() < count {
        palette.push(Rgba::random(rng));
    }
    palette
}

fn sample_palette_random(image: &RgbaBuffer, count: usize, rng: &mut impl Rng) -> Vec<Rgba> {
    let mut palette: Vec<Rgba> = Vec::new();
    let pixel_count = image.pixel_count();
    if pixel_count == 0 {
        return palette;
    }

    for _ in 0..4 * count {
        let index = rng.random_range(0..pixel_count);
        let color = Rgba::from_slice(image.data(), index * 4);
        if palette.contains(&color) {
            continue;
        }
        palette.push(color);
        if palette.len() == count {
            break;
        }
    }
    palette
}

/// Deterministic sampling: steps through the image along a rectangular
/// grid with `ceil(sqrt(count))` steps per axis.
fn sample_palette_scan(image: &RgbaBuffer, count: usize) -> Vec<Rgba> {
    let mut palette: Vec<Rgba> = Vec::new();
    if image.pixel_count() == 0 {
        return palette;
    }

    let steps = (count as f64).sqrt().ceil() as usize;
    let step_size_x = image.width() as f64 / (steps + 1) as f64;
    let step_size_y = image.height() as f64 / (steps + 1) as f64;

    'scan: for step_y in 1..=steps {
        let row_offset = step_y as f64 * step_size_y * image.width() as f64;
        for step_x in 1..=steps {
            let pixel_index = (row_offset + step_x as f64 * step_size_x).floor() as usize;
            // The fractional row offset can round the last steps past the
            // buffer on images smaller than the step grid.
            if pixel_index >= image.pixel_count() {
                continue;
            }
            let color = Rgba::from_slice(image.data(), pixel_index * 4);
            if palette.contains(&color) {
                continue;
            }
            palette.push(color);
            if palette.len() == count {
                break 'scan;
            }
        }
    }
    palette
}
