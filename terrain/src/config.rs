//! Terrain geometry configuration.

use crate::error::{TerrainDecodeError, TerrainResult};
use crate::{CELL_SIZE, CHUNK_SIZE, GRID_OFFSET_CHUNKS};

/// Chunk geometry shared by the codec and the store.
///
/// The chunk size fixes the Hilbert curve order used by snapshots, so a
/// client must use the same value as the server (64 for the live game).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainConfig {
    chunk_size: usize,
    cell_size: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            chunk_size: CHUNK_SIZE,
            cell_size: CELL_SIZE,
        }
    }
}

impl TerrainConfig {
    /// Creates a configuration for the given chunk size and the default cell size.
    pub const fn new(chunk_size: usize) -> TerrainResult<Self> {
        if chunk_size < 2 || !chunk_size.is_power_of_two() {
            return Err(TerrainDecodeError::InvalidChunkSize { size: chunk_size });
        }
        Ok(Self {
            chunk_size,
            cell_size: CELL_SIZE,
        })
    }

    /// Creates a small configuration (8x8 chunks) for tests.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            chunk_size: 8,
            cell_size: CELL_SIZE,
        }
    }

    /// Overrides the real-world size of one terrain cell.
    #[must_use]
    pub const fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Side length of a chunk in cells.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Real-world size of one cell.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of cells in one chunk.
    #[must_use]
    pub const fn cells(&self) -> usize {
        self.chunk_size * self.chunk_size
    }

    /// Hilbert curve order, `log2(chunk_size)`.
    #[must_use]
    pub const fn order(&self) -> u32 {
        self.chunk_size.trailing_zeros()
    }

    /// Terrain coordinate of the world origin on each axis.
    #[must_use]
    pub const fn grid_offset(&self) -> i32 {
        (GRID_OFFSET_CHUNKS * self.chunk_size) as i32
    }
}
