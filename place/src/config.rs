//! Engine configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CHUNK_DIMENSION, ECHO_CAPACITY, SPEED};

/// Tunables for a [`crate::Place`].
///
/// `chunk_dimension` must match the authority's grid; the rest are local.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaceConfig {
    /// Side of a chunk cell in world units.
    pub chunk_dimension: f64,
    /// World units moved per frame per held movement key.
    pub speed: f64,
    /// Drop an inbound chat line equal to one we just sent.
    pub dedupe_message_echo: bool,
    /// Drop an inbound stroke equal to one we just drew.
    pub dedupe_line_echo: bool,
    /// How many own events to remember while waiting for an echo.
    pub echo_capacity: usize,
}

impl Default for PlaceConfig {
    fn default() -> Self {
        Self {
            chunk_dimension: CHUNK_DIMENSION,
            speed: SPEED,
            dedupe_message_echo: false,
            dedupe_line_echo: false,
            echo_capacity: ECHO_CAPACITY,
        }
    }
}
