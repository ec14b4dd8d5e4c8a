//! Rendering: paints visible line segments onto a drawing surface.
//!
//! This module is the only place that talks to a [`Surface`]. It is a pure
//! function of the chunk data, the current bounds, and the current location;
//! it never mutates engine state. World coordinates map to surface pixels by
//! subtracting the viewport location.
//!
//! A line is drawn when at least one endpoint lies inside the bounds. A segment
//! whose endpoints are both outside but which still crosses the viewport is
//! not detected and is skipped.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::chunk::{Chunk, ChunkStore, Line};
use crate::geometry::{Bounds, Coordinate, Size};

/// A 2D drawing target in viewport-local pixels.
pub trait Surface {
    /// Current pixel size of the surface.
    fn size(&self) -> Size;

    /// Erase everything on the surface.
    fn clear(&mut self);

    /// Set the stroke color to `color`, then stroke one segment.
    fn stroke_line(&mut self, from: Coordinate, to: Coordinate, color: &str);
}

/// Translate a world coordinate into surface pixels.
#[must_use]
pub fn to_canvas(world: Coordinate, location: Coordinate) -> Coordinate {
    world - location
}

/// Whether a line has at least one endpoint inside `bounds`.
#[must_use]
pub fn is_line_visible(line: &Line, bounds: &Bounds) -> bool {
    bounds.contains(line.from) || bounds.contains(line.to)
}

/// Draw one line if it is eligible. Returns whether it was stroked.
pub fn draw_line(surface: &mut dyn Surface, line: &Line, bounds: &Bounds, location: Coordinate) -> bool {
    if !is_line_visible(line, bounds) {
        return false;
    }
    surface.stroke_line(
        to_canvas(line.from, location),
        to_canvas(line.to, location),
        &line.color,
    );
    true
}

/// Draw every eligible line of one chunk without clearing. Returns the number stroked.
pub fn draw_chunk(surface: &mut dyn Surface, chunk: &Chunk, bounds: &Bounds, location: Coordinate) -> usize {
    chunk
        .lines
        .iter()
        .filter(|line| draw_line(surface, line, bounds, location))
        .count()
}

/// Clear the surface and draw every chunk whose footprint touches `bounds`.
///
/// Returns the number of lines stroked.
pub fn redraw_all(
    surface: &mut dyn Surface,
    chunks: &ChunkStore,
    bounds: &Bounds,
    location: Coordinate,
    dimension: f64,
) -> usize {
    surface.clear();
    chunks
        .visible(bounds, dimension)
        .map(|chunk| draw_chunk(surface, chunk, bounds, location))
        .sum()
}
