//! Shared numeric constants for the place crate.

// ── World grid ──────────────────────────────────────────────────

/// Side length of one chunk cell, in world units.
pub const CHUNK_DIMENSION: f64 = 10_000.0;

// ── Movement ────────────────────────────────────────────────────

/// World units travelled per frame while a movement key is held.
pub const SPEED: f64 = 10.0;

// ── Presence ────────────────────────────────────────────────────

/// Stroke color of a fresh local user before the host picks one.
pub const DEFAULT_COLOR: &str = "#000000";

// ── Echo deduplication ──────────────────────────────────────────

/// Maximum own events remembered while waiting for an authority echo.
pub const ECHO_CAPACITY: usize = 256;
