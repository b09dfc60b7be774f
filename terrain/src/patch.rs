//! Incremental patch codec.
//!
//! Each patch value packs one chunk-local cell:
//!
//! ```text
//! bits 10..18  x
//! bits  4..10  y
//! bits  0..4   altitude nibble
//! ```

use crate::coords::TerrainCoords;

/// One decoded patch cell, positioned inside its chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PatchCell {
    /// Chunk-local position.
    pub coords: TerrainCoords,
    /// Widened altitude (nibble shifted left by 4).
    pub altitude: u8,
}

/// Decodes one packed patch value.
#[must_use]
pub const fn decode_patch_cell(value: u32) -> PatchCell {
    let x = (value >> 10) & 0xFF;
    let y = ((value >> 4) % 64) & 0xFF;
    let altitude = ((value % 16) << 4) as u8;
    PatchCell {
        coords: TerrainCoords::new(x as i32, y as i32),
        altitude,
    }
}

/// Decodes every value of a patch in order.
#[must_use]
pub fn decode_patch(values: &[u32]) -> Vec<PatchCell> {
    values.iter().map(|&v| decode_patch_cell(v)).collect()
}

/// Packs one patch cell. Inverse of [`decode_patch_cell`] for `y < 64`.
#[must_use]
pub const fn encode_patch_cell(x: u8, y: u8, altitude: u8) -> u32 {
    ((x as u32) << 10) | (((y as u32) & 0x3F) << 4) | ((altitude as u32) >> 4)
}
