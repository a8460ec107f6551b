//! Flat RGBA8 pixel buffer
//!
//! The tracer consumes images as an owned flat byte buffer with explicit
//! dimensions, four channels per pixel. Decoding image files into this
//! shape is the caller's job.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// An RGBA8 image buffer, `data.len() == width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaBuffer {
    /// Create a zeroed (fully transparent black) buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    /// Create a buffer filled with a single color.
    pub fn filled(width: usize, height: usize, color: Rgba) -> Self {
        let mut buffer = Self::new(width, height);
        for offset in (0..buffer.data.len()).step_by(4) {
            buffer.data[offset] = color.r;
            buffer.data[offset + 1] = color.g;
            buffer.data[offset + 2] = color.b;
            buffer.data[offset + 3] = color.a;
        }
        buffer
    }

    /// Wrap an existing byte vector, validating its length.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(Error::InvalidBufferLength {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels in the buffer.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Raw channel data, row-major RGBA.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Byte offset of the pixel at `(x, y)`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * 4
    }

    /// Read the pixel at `(x, y)`. Panics when out of bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgba {
        Rgba::from_slice(&self.data, self.offset(x, y))
    }

    /// Write the pixel at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, color: Rgba) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let offset = self.offset(x, y);
        self.data[offset] = color.r;
        self.data[offset + 1] = color.g;
        self.data[offset + 2] = color.b;
        self.data[offset + 3] = color.a;
        Ok(())
    }

    /// Fill an axis-aligned rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, w: usize, h: usize, color: Rgba) {
        for y in y0..(y0 + h).min(self.height) {
            for x in x0..(x0 + w).min(self.width) {
                let _ = self.set(x, y, color);
            }
        }
    }

    /// Packed `0xRRGGBBAA` id of the pixel at the given byte offset, used
    /// as the memoization key for buffered color distance lookups.
    #[inline]
    pub fn pixel_id(&self, offset: usize) -> u32 {
        ((self.data[offset] as u32) << 24)
            | ((self.data[offset + 1] as u32) << 16)
            | ((self.data[offset + 2] as u32) << 8)
            | self.data[offset + 3] as u32
    }
}
