//! Viewport state: where the local view sits in the world and how it moves.
//!
//! [`Viewport`] holds the location (top-left world coordinate of the canvas)
//! and keeps the bounds derived from it and the canvas size in step.
//! [`Movement`] integrates held WASD keys into a velocity that the coordinator
//! applies once per frame.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::collections::HashSet;

use crate::geometry::{Bounds, Coordinate, Size};
use crate::input::MoveKey;

/// Location, canvas size, and the bounds derived from them.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    location: Coordinate,
    size: Size,
    bounds: Bounds,
}

impl Viewport {
    /// A viewport at the world origin.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self::at(Coordinate::ZERO, size)
    }

    #[must_use]
    pub fn at(location: Coordinate, size: Size) -> Self {
        Self { location, size, bounds: Bounds::from_location(location, size) }
    }

    #[must_use]
    pub fn location(&self) -> Coordinate {
        self.location
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Whether moving to `candidate` would be a no-op.
    ///
    /// A NaN component means the host could not parse its input, which is
    /// treated the same as "already there".
    #[must_use]
    pub fn is_location(&self, candidate: Coordinate) -> bool {
        candidate.is_nan() || candidate == self.location
    }

    /// Jump to `location`. Returns the delta moved, or `None` if
    /// [`Self::is_location`] says the move is a no-op.
    pub fn jump_to(&mut self, location: Coordinate) -> Option<Coordinate> {
        if self.is_location(location) {
            return None;
        }
        let delta = location - self.location;
        self.location = location;
        self.bounds = Bounds::from_location(location, self.size);
        Some(delta)
    }

    /// Move by `delta` and recompute bounds.
    pub fn translate(&mut self, delta: Coordinate) {
        self.location += delta;
        self.bounds = Bounds::from_location(self.location, self.size);
    }

    /// Adopt a new canvas size and recompute bounds.
    pub fn resize(&mut self, size: Size) {
        self.size = size;
        self.bounds = Bounds::from_location(self.location, size);
    }
}

/// Held movement keys and the velocity they add up to.
///
/// Pressing adds `speed` along the key's direction and releasing subtracts
/// the same amount, so opposite keys cancel exactly. Repeated presses of a
/// held key and releases of an unheld key change nothing.
#[derive(Debug, Clone)]
pub struct Movement {
    speed: f64,
    held: HashSet<MoveKey>,
    velocity: Coordinate,
}

impl Movement {
    #[must_use]
    pub fn new(speed: f64) -> Self {
        Self { speed, held: HashSet::new(), velocity: Coordinate::ZERO }
    }

    /// Key went down. Returns `false` for an auto-repeat of a held key.
    pub fn press(&mut self, key: MoveKey) -> bool {
        if !self.held.insert(key) {
            return false;
        }
        self.velocity += key.direction() * self.speed;
        true
    }

    /// Key came up. Returns `false` if the key was not held.
    pub fn release(&mut self, key: MoveKey) -> bool {
        if !self.held.remove(&key) {
            return false;
        }
        self.velocity -= key.direction() * self.speed;
        true
    }

    /// Forget every held key.
    pub fn clear(&mut self) {
        self.held.clear();
        self.velocity = Coordinate::ZERO;
    }

    #[must_use]
    pub fn velocity(&self) -> Coordinate {
        self.velocity
    }

    #[must_use]
    pub fn is_moving(&self) -> bool {
        !self.velocity.is_zero()
    }

    #[must_use]
    pub fn is_held(&self, key: MoveKey) -> bool {
        self.held.contains(&key)
    }
}
