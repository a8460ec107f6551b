//! Color index clustering engine
//!
//! A form of k-means clustering: each cycle assigns every pixel to its
//! closest palette color, then moves each palette color to the channel
//! average of its assigned pixels. Colors attracting less than the
//! configured pixel quota are reseeded with random colors between cycles.

use crate::error::{ColorError, ColorResult};
use rand::Rng;
use std::collections::HashMap;
use vectrace_core::{ColorCounter, Rgba, RgbaBuffer};

/// Sentinel for the one-cell padding border of the color index.
pub const NO_COLOR: i32 = -1;

/// Whether pixel-to-palette distance results are memoized per distinct
/// pixel color.
///
/// Building the memo table only pays off on larger palettes; below ~32
/// colors the table costs more than the comparisons it saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceBuffering {
    Off,
    On,
    /// Buffer when the palette has at least 32 colors.
    #[default]
    Reasonable,
}

/// Clustering parameters
#[derive(Debug, Clone)]
pub struct ClusterOptions {
    /// Number of assignment/refinement cycles, minimum 1.
    pub cycles: usize,
    /// Palette colors whose pixel-count fraction falls below this quota
    /// are replaced with random colors on every cycle except the last.
    /// Zero disables reseeding.
    pub min_color_quota: f64,
    pub buffering: DistanceBuffering,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            cycles: 3,
            min_color_quota: 0.0,
            buffering: DistanceBuffering::default(),
        }
    }
}

/// Per-pixel palette assignment, padded by one border cell of [`NO_COLOR`]
/// on each side so downstream neighborhood lookups need no bounds checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorIndex {
    width: usize,
    height: usize,
    cells: Vec<i32>,
}

impl ColorIndex {
    fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![NO_COLOR; (width + 2) * (height + 2)],
        }
    }

    /// Image width (without padding).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height (without padding).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid width including the padding border.
    #[inline]
    pub fn padded_width(&self) -> usize {
        self.width + 2
    }

    /// Grid height including the padding border.
    #[inline]
    pub fn padded_height(&self) -> usize {
        self.height + 2
    }

    /// Cell at padded grid coordinates. Row 0 and column 0 are border
    /// cells; the pixel `(x, y)` lives at `(y + 1, x + 1)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> i32 {
        self.cells[row * self.padded_width() + col]
    }

    #[inline]
    fn set(&mut self, row: usize, col: usize, value: i32) {
        let width = self.padded_width();
        self.cells[row * width + col] = value;
    }
}

/// Run the clustering engine: assign pixels, refine the palette in place,
/// and return the final color index.
///
/// Terminates after `cycles` iterations, or earlier as soon as an
/// assignment is cell-for-cell identical to the previous cycle's.
pub fn build_color_index(
    image: &RgbaBuffer,
    palette: &mut [Rgba],
    options: &ClusterOptions,
    rng: &mut impl Rng,
) -> ColorResult<ColorIndex> {
    if palette.is_empty() && image.pixel_count() > 0 {
        return Err(ColorError::InvalidParameters(
            "clustering requires at least one palette color".to_string(),
        ));
    }

    let cycles = options.cycles.max(1);
    let mut index: Option<ColorIndex> = None;

    for cycle in 1..=cycles {
        let is_last_cycle = cycle == cycles;
        let next = assign_pixels(image, palette, options.buffering);
        let counters = count_colors(image, &next, palette.len());
        adjust_palette_to_averages(
            palette,
            &counters,
            image.pixel_count(),
            options.min_color_quota,
            is_last_cycle,
            rng,
        );

        let finished = is_last_cycle || index.as_ref().is_some_and(|prev| *prev == next);
        index = Some(next);
        if finished {
            tracing::debug!(cycles = cycle, "clustering converged");
            break;
        }
    }

    // cycles >= 1, so the loop ran at least once
    Ok(index.unwrap_or_else(|| ColorIndex::empty(image.width(), image.height())))
}

fn assign_pixels(image: &RgbaBuffer, palette: &[Rgba], buffering: DistanceBuffering) -> ColorIndex {
    let use_buffer = buffering == DistanceBuffering::On
        || (buffering == DistanceBuffering::Reasonable && palette.len() >= 32);
    if use_buffer {
        assign_pixels_buffered(image, palette)
    } else {
        assign_pixels_unbuffered(image, palette)
    }
}

fn assign_pixels_unbuffered(image: &RgbaBuffer, palette: &[Rgba]) -> ColorIndex {
    let mut index = ColorIndex::empty(image.width(), image.height());
    for y in 0..image.height() {
        for x in 0..image.width() {
            let offset = image.offset(x, y);
            let closest = find_closest_color(image.data(), offset, palette);
            index.set(y + 1, x + 1, closest as i32);
        }
    }
    index
}

/// Memoized assignment: identical pixel colors reuse the first nearest
/// color result, keyed on the packed RGBA value.
fn assign_pixels_buffered(image: &RgbaBuffer, palette: &[Rgba]) -> ColorIndex {
    let mut index = ColorIndex::empty(image.width(), image.height());
    let mut closest_by_color: HashMap<u32, usize> = HashMap::new();
    let mut skips = 0u64;

    for y in 0..image.height() {
        for x in 0..image.width() {
            let offset = image.offset(x, y);
            let color_id = image.pixel_id(offset);
            let closest = match closest_by_color.get(&color_id) {
                Some(&known) => {
                    skips += 1;
                    known
                }
                None => {
                    let found = find_closest_color(image.data(), offset, palette);
                    closest_by_color.insert(color_id, found);
                    found
                }
            };
            index.set(y + 1, x + 1, closest as i32);
        }
    }
    tracing::trace!(
        distinct = closest_by_color.len(),
        skips,
        "buffered color distances"
    );
    index
}

/// Closest palette color by rectilinear distance; ties go to the lowest
/// index via the strict comparison.
fn find_closest_color(data: &[u8], offset: usize, palette: &[Rgba]) -> usize {
    let mut closest_ix = 0;
    let mut closest_distance = 1024; // 4 * 256 exceeds any RGBA distance

    for (color_ix, color) in palette.iter().enumerate() {
        let distance = color.distance_to_pixel(data, offset);
        if distance < closest_distance {
            closest_distance = distance;
            closest_ix = color_ix;
        }
    }
    closest_ix
}

fn count_colors(image: &RgbaBuffer, index: &ColorIndex, palette_len: usize) -> Vec<ColorCounter> {
    let mut counters = vec![ColorCounter::default(); palette_len];
    for y in 0..image.height() {
        for x in 0..image.width() {
            let color_ix = index.get(y + 1, x + 1) as usize;
            counters[color_ix].add_pixel(image.data(), image.offset(x, y));
        }
    }
    counters
}

fn adjust_palette_to_averages(
    palette: &mut [Rgba],
    counters: &[ColorCounter],
    num_pixels: usize,
    min_color_quota: f64,
    is_last_cycle: bool,
    rng: &mut impl Rng,
) {
    for (color, counter) in palette.iter_mut().zip(counters) {
        let below_quota =
            min_color_quota > 0.0 && (counter.n as f64) / (num_pixels as f64) < min_color_quota;
        if below_quota && !is_last_cycle {
            color.randomize(rng);
        } else if let Some(average) = counter.average() {
            *color = average;
        }
    }
}
