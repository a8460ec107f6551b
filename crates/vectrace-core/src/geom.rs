//! Path geometry primitives
//!
//! Points carry a payload that changes as a path moves through the
//! pipeline: edge codes after scanning, trajectory codes after
//! interpolation. Bounding box containment is strict on every side.

/// A path point with a stage-specific tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<D> {
    pub x: f64,
    pub y: f64,
    pub data: D,
}

impl<D> Point<D> {
    #[inline]
    pub fn new(x: f64, y: f64, data: D) -> Self {
        Self { x, y, data }
    }

    /// Replace the tag, keeping the coordinates.
    pub fn with_data<E>(&self, data: E) -> Point<E> {
        Point {
            x: self.x,
            y: self.y,
            data,
        }
    }
}

/// Axis-aligned bounding box `[min_x, min_y, max_x, max_y]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    #[inline]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Degenerate box at a single point.
    #[inline]
    pub fn at(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    /// Grow to include a point.
    pub fn include(&mut self, x: f64, y: f64) {
        if x < self.min_x {
            self.min_x = x;
        }
        if y < self.min_y {
            self.min_y = y;
        }
        if x > self.max_x {
            self.max_x = x;
        }
        if y > self.max_y {
            self.max_y = y;
        }
    }

    /// True when `other` lies strictly inside this box on all four sides.
    pub fn strictly_contains(&self, other: &BoundingBox) -> bool {
        self.min_x < other.min_x
            && self.min_y < other.min_y
            && self.max_x > other.max_x
            && self.max_y > other.max_y
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}
