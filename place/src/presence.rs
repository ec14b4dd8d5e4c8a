//! Presence: the local user this client owns, and everyone else.
//!
//! DESIGN
//! ======
//! The local user is mutated only by the coordinator. Remote users are a
//! snapshot that the authority replaces wholesale on every `users` event;
//! nothing is merged or patched client side.

#[cfg(test)]
#[path = "presence_test.rs"]
mod presence_test;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_COLOR;
use crate::geometry::Coordinate;

/// A participant and their world-space cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub color: String,
    pub cursor: Coordinate,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            color: DEFAULT_COLOR.to_owned(),
            cursor: Coordinate::ZERO,
        }
    }
}

/// Local user plus the latest remote snapshot.
#[derive(Debug, Default)]
pub struct Presence {
    local: User,
    remote: Vec<User>,
}

impl Presence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn local(&self) -> &User {
        &self.local
    }

    #[must_use]
    pub fn remote(&self) -> &[User] {
        &self.remote
    }

    /// Whether `candidate` is already the local user's name.
    #[must_use]
    pub fn is_name(&self, candidate: &str) -> bool {
        self.local.name == candidate
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.local.name = name.into();
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.local.color = color.into();
    }

    pub fn set_cursor(&mut self, cursor: Coordinate) {
        self.local.cursor = cursor;
    }

    /// Move the cursor by `delta`, keeping its on-screen position when the
    /// viewport moves by the same amount.
    pub fn shift_cursor(&mut self, delta: Coordinate) {
        self.local.cursor += delta;
    }

    /// Replace the remote snapshot.
    pub fn replace_remote(&mut self, users: Vec<User>) {
        self.remote = users;
    }
}
