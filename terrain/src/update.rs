//! Per-tick chunk updates.

use std::cell::OnceCell;
use std::fmt;

use crate::config::TerrainConfig;
use crate::coords::ChunkId;
use crate::error::{TerrainDecodeError, TerrainResult};
use crate::grid::AltitudeGrid;
use crate::patch::{decode_patch, PatchCell};
use crate::snapshot::decode_snapshot;

/// Whether a chunk update carries a full snapshot or a patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    Snapshot,
    Patch,
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snapshot => f.write_str("snapshot"),
            Self::Patch => f.write_str("patch"),
        }
    }
}

/// One chunk's terrain data for a tick.
///
/// Snapshot grids are decoded on first access and cached, so the update is
/// `Send` but not `Sync`.
#[derive(Debug, Clone)]
pub struct ChunkUpdate {
    pub chunk_id: ChunkId,
    pub is_update: bool,
    pub bytes: Vec<u32>,
    altitudes: OnceCell<AltitudeGrid>,
}

impl ChunkUpdate {
    /// Creates an update from its wire fields.
    #[must_use]
    pub const fn new(chunk_id: ChunkId, is_update: bool, bytes: Vec<u32>) -> Self {
        Self {
            chunk_id,
            is_update,
            bytes,
            altitudes: OnceCell::new(),
        }
    }

    /// Creates a full snapshot update.
    #[must_use]
    pub const fn snapshot(chunk_id: ChunkId, bytes: Vec<u32>) -> Self {
        Self::new(chunk_id, false, bytes)
    }

    /// Creates a patch update.
    #[must_use]
    pub const fn patch(chunk_id: ChunkId, values: Vec<u32>) -> Self {
        Self::new(chunk_id, true, values)
    }

    #[must_use]
    pub const fn kind(&self) -> ChunkKind {
        if self.is_update {
            ChunkKind::Patch
        } else {
            ChunkKind::Snapshot
        }
    }

    /// Returns the decoded snapshot grid, decoding it on first call.
    ///
    /// A failed decode is not cached; the next call decodes again. A grid
    /// cached under another chunk size is reported as a size mismatch.
    pub fn altitudes(&self, config: &TerrainConfig) -> TerrainResult<&AltitudeGrid> {
        if self.is_update {
            return Err(TerrainDecodeError::WrongKind {
                expected: ChunkKind::Snapshot,
            });
        }
        if let Some(grid) = self.altitudes.get() {
            if grid.size() != config.chunk_size() {
                return Err(TerrainDecodeError::SizeMismatch {
                    expected: config.cells(),
                    actual: grid.cells().len(),
                });
            }
            return Ok(grid);
        }
        let grid = decode_snapshot(&self.bytes, config)?;
        Ok(self.altitudes.get_or_init(|| grid))
    }

    /// Returns the decoded patch cells.
    pub fn partial_altitudes(&self) -> TerrainResult<Vec<PatchCell>> {
        if !self.is_update {
            return Err(TerrainDecodeError::WrongKind {
                expected: ChunkKind::Patch,
            });
        }
        Ok(decode_patch(&self.bytes))
    }

    /// Returns `true` once the snapshot grid has been decoded and cached.
    #[must_use]
    pub fn is_decoded(&self) -> bool {
        self.altitudes.get().is_some()
    }
}

impl PartialEq for ChunkUpdate {
    fn eq(&self, other: &Self) -> bool {
        self.chunk_id == other.chunk_id
            && self.is_update == other.is_update
            && self.bytes == other.bytes
    }
}

impl Eq for ChunkUpdate {}

/// The chunk updates received in one tick, in wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TerrainUpdate {
    pub chunks: Vec<ChunkUpdate>,
}

impl TerrainUpdate {
    #[must_use]
    pub const fn new(chunks: Vec<ChunkUpdate>) -> Self {
        Self { chunks }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Iterates the chunk updates in wire order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChunkUpdate> {
        self.chunks.iter()
    }

    /// Number of full snapshots in this tick.
    #[must_use]
    pub fn snapshots(&self) -> usize {
        self.chunks.iter().filter(|c| !c.is_update).count()
    }

    /// Number of patches in this tick.
    #[must_use]
    pub fn patches(&self) -> usize {
        self.chunks.iter().filter(|c| c.is_update).count()
    }
}

impl<'a> IntoIterator for &'a TerrainUpdate {
    type Item = &'a ChunkUpdate;
    type IntoIter = std::slice::Iter<'a, ChunkUpdate>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}
