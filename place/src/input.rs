//! Input model: movement keys and where keyboard focus currently sits.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::geometry::Coordinate;

/// Where keyboard focus is when a key event arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFocus {
    /// Focus is on the canvas or the page body.
    #[default]
    Canvas,
    /// Focus is inside a text field; movement keys are typing, not steering.
    TextField,
}

/// One of the four viewport movement keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    /// `w`: up.
    Up,
    /// `a`: left.
    Left,
    /// `s`: down.
    Down,
    /// `d`: right.
    Right,
}

impl MoveKey {
    /// Parse a key name as reported by the browser, ignoring case.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "w" | "W" => Some(Self::Up),
            "a" | "A" => Some(Self::Left),
            "s" | "S" => Some(Self::Down),
            "d" | "D" => Some(Self::Right),
            _ => None,
        }
    }

    /// Lowercase key name, as [`Self::from_key`] accepts it.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Up => "w",
            Self::Left => "a",
            Self::Down => "s",
            Self::Right => "d",
        }
    }

    /// Unit direction in world space (y grows downward).
    #[must_use]
    pub fn direction(self) -> Coordinate {
        match self {
            Self::Up => Coordinate::new(0.0, -1.0),
            Self::Left => Coordinate::new(-1.0, 0.0),
            Self::Down => Coordinate::new(0.0, 1.0),
            Self::Right => Coordinate::new(1.0, 0.0),
        }
    }
}
