//! RGBA color model
//!
//! Palette colors are plain 8-bit RGBA quadruples. Distance between a
//! palette color and a pixel is rectilinear (L1) over all four channels,
//! which works better than Euclidean distance for palette matching and is
//! cheaper to compute.

use crate::error::{Error, Result};
use rand::Rng;

/// Colors with alpha below this value are considered invisible (~0.05 of
/// full opacity). Invisible colors are excluded from rendering, not from
/// tracing.
pub const MINIMUM_ALPHA: u8 = 13;

/// An 8-bit RGBA color. A missing alpha channel defaults to 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::new(0, 0, 0, 255)
    }
}

impl Rgba {
    /// Create a color from all four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    #[inline]
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Read a color out of a flat RGBA8 buffer at the given byte offset.
    #[inline]
    pub fn from_slice(data: &[u8], offset: usize) -> Self {
        Self::new(
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        )
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let bad = || Error::InvalidHexColor(hex.to_string());
        if digits.len() != 6 && digits.len() != 8 {
            return Err(bad());
        }
        let mut channels = [0u8; 4];
        channels[3] = 255;
        for (i, pair) in digits.as_bytes().chunks(2).enumerate() {
            let pair = std::str::from_utf8(pair).map_err(|_| bad())?;
            channels[i] = u8::from_str_radix(pair, 16).map_err(|_| bad())?;
        }
        Ok(Self::new(channels[0], channels[1], channels[2], channels[3]))
    }

    /// Draw a random color: channels uniform in 0..=255, alpha biased to
    /// the opaque half (128..=255).
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::new(
            rng.random_range(0..=255),
            rng.random_range(0..=255),
            rng.random_range(0..=255),
            rng.random_range(128..=255),
        )
    }

    /// Replace this color with a random one (used for palette reseeding).
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        *self = Self::random(rng);
    }

    /// True when alpha is below [`MINIMUM_ALPHA`].
    #[inline]
    pub fn is_invisible(self) -> bool {
        self.a < MINIMUM_ALPHA
    }

    /// True when the color is not fully opaque.
    #[inline]
    pub fn has_opacity(self) -> bool {
        self.a < 255
    }

    /// Rectilinear distance to a pixel in a flat RGBA8 buffer.
    ///
    /// The maximum possible distance is 4 * 255.
    #[inline]
    pub fn distance_to_pixel(self, data: &[u8], offset: usize) -> u32 {
        (self.r as i32 - data[offset] as i32).unsigned_abs()
            + (self.g as i32 - data[offset + 1] as i32).unsigned_abs()
            + (self.b as i32 - data[offset + 2] as i32).unsigned_abs()
            + (self.a as i32 - data[offset + 3] as i32).unsigned_abs()
    }

    /// Rectilinear distance to another color.
    #[inline]
    pub fn distance(self, other: Rgba) -> u32 {
        (self.r as i32 - other.r as i32).unsigned_abs()
            + (self.g as i32 - other.g as i32).unsigned_abs()
            + (self.b as i32 - other.b as i32).unsigned_abs()
            + (self.a as i32 - other.a as i32).unsigned_abs()
    }

    /// Pack into a 32-bit `0xRRGGBBAA` value.
    #[inline]
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 24) | ((self.g as u32) << 16) | ((self.b as u32) << 8) | self.a as u32
    }

    /// CSS color string, `rgb(...)` for opaque colors, `rgba(...)` otherwise.
    pub fn to_css(self) -> String {
        if self.has_opacity() {
            format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        } else {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        }
    }

    /// Uppercase hex string, `#RRGGBB` for opaque colors, `#RRGGBBAA` otherwise.
    pub fn to_css_hex(self) -> String {
        if self.has_opacity() {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        } else {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        }
    }
}

/// Per-palette-color accumulator used by the clustering engine: running
/// channel sums and the number of pixels assigned to the color.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorCounter {
    pub r: u64,
    pub g: u64,
    pub b: u64,
    pub a: u64,
    pub n: u64,
}

impl ColorCounter {
    /// Accumulate one pixel from a flat RGBA8 buffer.
    #[inline]
    pub fn add_pixel(&mut self, data: &[u8], offset: usize) {
        self.r += data[offset] as u64;
        self.g += data[offset + 1] as u64;
        self.b += data[offset + 2] as u64;
        self.a += data[offset + 3] as u64;
        self.n += 1;
    }

    /// Channel-wise floor average, or `None` when no pixels were counted.
    pub fn average(&self) -> Option<Rgba> {
        if self.n == 0 {
            return None;
        }
        Some(Rgba::new(
            (self.r / self.n) as u8,
            (self.g / self.n) as u8,
            (self.b / self.n) as u8,
            (self.a / self.n) as u8,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_distance_is_rectilinear() {
        let c = Rgba::opaque(10, 20, 30);
        let data = [13, 18, 30, 255];
        assert_eq!(c.distance_to_pixel(&data, 0), 3 + 2);
        assert_eq!(c.distance(Rgba::new(10, 20, 30, 0)), 255);
    }

    #[test]
    fn test_distance_maximum() {
        let black = Rgba::new(0, 0, 0, 0);
        let white = Rgba::opaque(255, 255, 255);
        assert_eq!(black.distance(white), 4 * 255);
    }

    #[test]
    fn test_invisible_threshold() {
        assert!(Rgba::new(255, 0, 0, 12).is_invisible());
        assert!(!Rgba::new(255, 0, 0, 13).is_invisible());
    }

    #[test]
    fn test_counter_average_floors() {
        let mut counter = ColorCounter::default();
        counter.add_pixel(&[10, 0, 0, 255], 0);
        counter.add_pixel(&[13, 0, 0, 255], 0);
        counter.add_pixel(&[13, 0, 0, 255], 0);
        // 36 / 3 = 12 exactly, 765 / 3 = 255
        assert_eq!(counter.average(), Some(Rgba::new(12, 0, 0, 255)));
    }

    #[test]
    fn test_counter_empty_has_no_average() {
        assert_eq!(ColorCounter::default().average(), None);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgba::from_hex("#ff0080").unwrap(), Rgba::opaque(255, 0, 128));
        assert_eq!(
            Rgba::from_hex("10203040").unwrap(),
            Rgba::new(16, 32, 48, 64)
        );
        assert!(Rgba::from_hex("#abc").is_err());
        assert!(Rgba::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_css_formatting() {
        assert_eq!(Rgba::opaque(255, 0, 128).to_css(), "rgb(255,0,128)");
        assert_eq!(Rgba::new(1, 2, 3, 4).to_css(), "rgba(1,2,3,4)");
        assert_eq!(Rgba::opaque(255, 0, 128).to_css_hex(), "#FF0080");
        assert_eq!(Rgba::new(255, 0, 128, 16).to_css_hex(), "#FF008010");
    }

    #[test]
    fn test_pack_channel_order() {
        assert_eq!(Rgba::new(0x11, 0x22, 0x33, 0x44).to_u32(), 0x11223344);
    }

    #[test]
    fn test_random_alpha_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let c = Rgba::random(&mut rng);
            assert!(c.a >= 128);
        }
    }
}
