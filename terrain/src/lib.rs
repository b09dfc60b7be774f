//! Terrain chunk codec and world terrain store for the warrior client.
//!
//! The server streams terrain as square chunks. A chunk arrives either as a
//! full snapshot (run-length bytes laid out along a Hilbert curve) or as a
//! patch of single-cell corrections. [`WorldTerrain`] keeps the latest grid
//! for every chunk seen this session.
//!
//! # Features
//!
//! - Snapshot decoding with memoized grids
//! - Patch decoding and atomic patch application
//! - Real/terrain coordinate transforms
//! - Reference encoders for tests and tooling
//!
//! # Design Principles
//!
//! - **Exact sizes** - Snapshots that do not cover the chunk are rejected,
//!   never padded or truncated.
//! - **No phantom chunks** - A patch for an unknown chunk is dropped.
//! - **All or nothing** - A patch with any out-of-range cell writes nothing.

mod config;
mod coords;
mod error;
mod grid;
pub mod hilbert;
mod patch;
mod snapshot;
mod store;
mod update;

pub use config::TerrainConfig;
pub use coords::{ChunkId, Coords, TerrainCoords};
pub use error::{TerrainDecodeError, TerrainResult};
pub use grid::{AltitudeGrid, LAND_THRESHOLD};
pub use patch::{decode_patch, decode_patch_cell, encode_patch_cell, PatchCell};
pub use snapshot::{decode_snapshot, encode_snapshot, expand_runs, MAX_RUN};
pub use store::{ApplyOutcome, Chunk, WorldTerrain};
pub use update::{ChunkKind, ChunkUpdate, TerrainUpdate};

/// Side length of a chunk in cells on the live server.
pub const CHUNK_SIZE: usize = 64;

/// Real-world size of one terrain cell.
pub const CELL_SIZE: f32 = 25.0;

/// Chunks between the terrain origin and the world origin on each axis.
pub const GRID_OFFSET_CHUNKS: usize = 8;
