//! World-space geometry: coordinates, viewport bounds, and chunk cells.
//!
//! All values here are world coordinates on the unbounded shared canvas unless
//! a function says otherwise. Coordinates are integral in practice (pointer
//! offsets and movement steps are whole numbers) but are held as `f64` so a
//! NaN component can stand for "unset" when validating host input.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// A point in world space (or, for pointer offsets, canvas-local space).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// The world origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether either component is NaN, the sentinel for an unparsable input.
    #[must_use]
    pub fn is_nan(self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }

    /// Whether both components are zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

impl Add for Coordinate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Coordinate {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Coordinate {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Coordinate {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Coordinate {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The world-space rectangle currently visible, `[lower, upper)`.
///
/// Invariant: `lower.x <= upper.x` and `lower.y <= upper.y`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub lower: Coordinate,
    pub upper: Coordinate,
}

impl Bounds {
    /// Derive bounds from a viewport origin and the surface size.
    ///
    /// Negative sizes are clamped to zero so the ordering invariant holds.
    #[must_use]
    pub fn from_location(location: Coordinate, size: Size) -> Self {
        Self {
            lower: location,
            upper: location + Coordinate::new(size.width.max(0.0), size.height.max(0.0)),
        }
    }

    /// Componentwise inclusive containment in `[lower, upper]`.
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        point.x >= self.lower.x
            && point.x <= self.upper.x
            && point.y >= self.lower.y
            && point.y <= self.upper.y
    }

    /// Whether the square `[origin, origin + side]` touches these bounds.
    #[must_use]
    pub fn intersects_square(&self, origin: Coordinate, side: f64) -> bool {
        origin.x + side >= self.lower.x
            && origin.x <= self.upper.x
            && origin.y + side >= self.lower.y
            && origin.y <= self.upper.y
    }
}

/// Identifier of a chunk cell, formatted `"{cx}x{cy}"`.
pub type ChunkId = String;

/// Grid cell index of a coordinate along both axes.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn chunk_cell(point: Coordinate, dimension: f64) -> (i64, i64) {
    (
        (point.x / dimension).floor() as i64,
        (point.y / dimension).floor() as i64,
    )
}

/// Id of the chunk cell that owns `point`.
///
/// Every coordinate in the same `dimension`-sized cell yields the same id.
#[must_use]
pub fn chunk_id(point: Coordinate, dimension: f64) -> ChunkId {
    let (cx, cy) = chunk_cell(point, dimension);
    format!("{cx}x{cy}")
}

/// World-space origin (top-left corner) of the chunk cell that owns `point`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn chunk_origin(point: Coordinate, dimension: f64) -> Coordinate {
    let (cx, cy) = chunk_cell(point, dimension);
    Coordinate::new(cx as f64 * dimension, cy as f64 * dimension)
}
