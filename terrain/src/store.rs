//! Persistent world terrain.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::config::TerrainConfig;
use crate::coords::{ChunkId, Coords, TerrainCoords};
use crate::error::{TerrainDecodeError, TerrainResult};
use crate::grid::AltitudeGrid;
use crate::update::{ChunkUpdate, TerrainUpdate};

/// Stored terrain for one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub chunk_id: ChunkId,
    pub altitudes: AltitudeGrid,
}

/// What applying a chunk update did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A snapshot created a chunk that was not stored yet.
    Created,
    /// A snapshot replaced an existing chunk's grid.
    Replaced,
    /// A patch overwrote `cells` cells of an existing chunk.
    Patched { cells: usize },
    /// A patch targeted a chunk with no snapshot yet and was dropped.
    IgnoredPatch,
}

/// Chunk id to chunk state for the whole session.
///
/// Chunks are created by their first snapshot and never evicted.
#[derive(Debug, Clone, Default)]
pub struct WorldTerrain {
    config: TerrainConfig,
    chunks: HashMap<ChunkId, Chunk>,
}

impl WorldTerrain {
    /// Creates an empty store.
    #[must_use]
    pub fn new(config: TerrainConfig) -> Self {
        Self {
            config,
            chunks: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Applies one chunk update.
    ///
    /// Patches are validated in full before any cell is written; on error the
    /// stored grid is unchanged.
    pub fn apply(&mut self, update: &ChunkUpdate) -> TerrainResult<ApplyOutcome> {
        let chunk_id = update.chunk_id;
        if !update.is_update {
            let altitudes = update.altitudes(&self.config)?.clone();
            let replaced = self
                .chunks
                .insert(chunk_id, Chunk { chunk_id, altitudes })
                .is_some();
            trace!(x = chunk_id.x, y = chunk_id.y, replaced, "applied snapshot");
            return Ok(if replaced {
                ApplyOutcome::Replaced
            } else {
                ApplyOutcome::Created
            });
        }

        let Some(chunk) = self.chunks.get_mut(&chunk_id) else {
            debug!(x = chunk_id.x, y = chunk_id.y, "patch for unknown chunk ignored");
            return Ok(ApplyOutcome::IgnoredPatch);
        };

        let cells = update.partial_altitudes()?;
        let size = chunk.altitudes.size();
        let limit = size as i32;
        if let Some(bad) = cells
            .iter()
            .find(|c| !(0..limit).contains(&c.coords.x) || !(0..limit).contains(&c.coords.y))
        {
            return Err(TerrainDecodeError::PatchOutOfRange {
                x: bad.coords.x,
                y: bad.coords.y,
                size,
            });
        }
        for cell in &cells {
            chunk.altitudes.set(
                cell.coords.x as usize,
                cell.coords.y as usize,
                cell.altitude,
            );
        }
        trace!(x = chunk_id.x, y = chunk_id.y, cells = cells.len(), "applied patch");
        Ok(ApplyOutcome::Patched { cells: cells.len() })
    }

    /// Applies a tick's chunk updates in order.
    ///
    /// A chunk that fails to apply is logged and skipped; the rest still
    /// apply. Returns one result per input chunk.
    pub fn apply_all(&mut self, update: &TerrainUpdate) -> Vec<TerrainResult<ApplyOutcome>> {
        update
            .iter()
            .map(|chunk| {
                let result = self.apply(chunk);
                if let Err(err) = &result {
                    warn!(
                        x = chunk.chunk_id.x,
                        y = chunk.chunk_id.y,
                        kind = %chunk.kind(),
                        error = %err,
                        "failed to apply chunk"
                    );
                }
                result
            })
            .collect()
    }

    /// Returns the stored chunk, if any.
    #[must_use]
    pub fn get(&self, chunk_id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(&chunk_id)
    }

    /// Returns the number of stored chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Returns `true` if no chunk is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterates stored chunks in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Converts a world position to terrain coordinates.
    #[must_use]
    pub fn real_to_terrain(&self, coords: Coords) -> TerrainCoords {
        TerrainCoords::from_real(coords, &self.config)
    }

    /// Converts terrain coordinates to a world position.
    #[must_use]
    pub fn terrain_to_real(&self, coords: TerrainCoords) -> Coords {
        coords.to_real(&self.config)
    }

    /// Returns the altitude of a world-grid cell, if its chunk is stored.
    #[must_use]
    pub fn altitude_at(&self, coords: TerrainCoords) -> Option<u8> {
        let chunk = self.chunks.get(&coords.chunk(&self.config))?;
        let local = coords.local(&self.config);
        chunk.altitudes.get(local.x as usize, local.y as usize)
    }
}
