//! Spatial chunk store: every chunk the authority has streamed to this client.
//!
//! The world is cut into square cells of `chunk_dimension` world units. A
//! [`Line`] belongs to exactly one [`Chunk`], the one whose cell holds its
//! `from` endpoint. Chunks are only ever created by the remote authority; the
//! store never fabricates one and never evicts one.

#[cfg(test)]
#[path = "chunk_test.rs"]
mod chunk_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::{Bounds, ChunkId, Coordinate, chunk_id};

/// One stroke segment in world space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub from: Coordinate,
    pub to: Coordinate,
    /// CSS color string.
    pub color: String,
}

impl Line {
    #[must_use]
    pub fn new(from: Coordinate, to: Coordinate, color: impl Into<String>) -> Self {
        Self { from, to, color: color.into() }
    }

    /// Id of the chunk that owns this line (derived from `from`).
    #[must_use]
    pub fn chunk_id(&self, dimension: f64) -> ChunkId {
        chunk_id(self.from, dimension)
    }
}

/// A cell of the world grid and the lines drawn inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Chunk {
    #[must_use]
    pub fn origin(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }

    /// Whether this chunk's footprint touches `bounds`.
    ///
    /// The footprint reaches one `dimension` out from the reported origin on
    /// every side, so it covers the cell whether the authority reports the
    /// cell's corner or its center. This is a superset of the origin square
    /// `[origin, origin + dimension]`: a neighbouring cell whose own square
    /// lies wholly outside `bounds` still counts, and its lines are then
    /// filtered one by one by `render::is_line_visible`.
    #[must_use]
    pub fn is_in_bounds(&self, bounds: &Bounds, dimension: f64) -> bool {
        let reach = Coordinate::new(dimension, dimension);
        bounds.intersects_square(self.origin() - reach, dimension * 2.0)
    }
}

/// Every chunk known to this client, in arrival order, indexed by id.
#[derive(Debug, Default)]
pub struct ChunkStore {
    chunks: Vec<Chunk>,
    index: HashMap<ChunkId, usize>,
}

impl ChunkStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a chunk pushed by the authority.
    ///
    /// A chunk whose id is already known replaces the stored one in place, so
    /// its draw order is kept. Returns the stored chunk.
    pub fn insert(&mut self, chunk: Chunk) -> &Chunk {
        let slot = match self.index.get(&chunk.id) {
            Some(&slot) => {
                self.chunks[slot] = chunk;
                slot
            }
            None => {
                let slot = self.chunks.len();
                self.index.insert(chunk.id.clone(), slot);
                self.chunks.push(chunk);
                slot
            }
        };
        &self.chunks[slot]
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Chunk> {
        self.index.get(id).map(|&slot| &self.chunks[slot])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Append a line to a known chunk. Returns `false` if the chunk is unknown.
    pub fn append_line(&mut self, id: &str, line: Line) -> bool {
        let Some(&slot) = self.index.get(id) else {
            return false;
        };
        self.chunks[slot].lines.push(line);
        true
    }

    /// All chunks in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    /// Chunks whose footprint touches `bounds`, in arrival order.
    pub fn visible<'a>(&'a self, bounds: &'a Bounds, dimension: f64) -> impl Iterator<Item = &'a Chunk> + 'a {
        self.chunks
            .iter()
            .filter(move |chunk| chunk.is_in_bounds(bounds, dimension))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
