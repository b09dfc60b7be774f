//! Full-chunk snapshot codec.
//!
//! A snapshot is a run-length encoded stream of bytes. Each byte carries the
//! altitude in its high nibble and `run length - 1` in its low nibble. The
//! expanded samples are listed in Hilbert order over the chunk.

use crate::config::TerrainConfig;
use crate::error::{TerrainDecodeError, TerrainResult};
use crate::grid::AltitudeGrid;
use crate::hilbert;

/// Longest run a single snapshot byte can describe.
pub const MAX_RUN: usize = 16;

const SAMPLE_MASK: u32 = 0xF0;
const RUN_MASK: u32 = 0x0F;

/// Decodes a snapshot into a chunk-sized altitude grid.
///
/// The runs must expand to exactly `chunk_size²` samples; short or long
/// streams are rejected rather than padded or truncated.
pub fn decode_snapshot(bytes: &[u32], config: &TerrainConfig) -> TerrainResult<AltitudeGrid> {
    let samples = expand_runs(bytes, config.cells())?;
    let order = config.order();
    let mut grid = AltitudeGrid::new(config.chunk_size());
    for (distance, sample) in samples.into_iter().enumerate() {
        let (x, y) = hilbert::point_from_distance(order, distance as u32);
        grid.set(x as usize, y as usize, sample);
    }
    Ok(grid)
}

/// Expands run-length bytes into `expected` widened samples, in stream order.
pub fn expand_runs(bytes: &[u32], expected: usize) -> TerrainResult<Vec<u8>> {
    // Validate before allocating so a hostile stream cannot force a large
    // expansion.
    let mut total = 0usize;
    for (index, &value) in bytes.iter().enumerate() {
        if value > u32::from(u8::MAX) {
            return Err(TerrainDecodeError::InvalidByte { index, value });
        }
        total += run_length(value);
    }
    if total != expected {
        return Err(TerrainDecodeError::SizeMismatch {
            expected,
            actual: total,
        });
    }

    let mut samples = Vec::with_capacity(expected);
    for &value in bytes {
        let sample = (value & SAMPLE_MASK) as u8;
        samples.extend(std::iter::repeat(sample).take(run_length(value)));
    }
    Ok(samples)
}

/// Encodes a grid as a snapshot stream.
///
/// Only the high nibble of each altitude survives. Fails with
/// [`TerrainDecodeError::InvalidChunkSize`] unless the grid side is a power
/// of two of at least 2.
pub fn encode_snapshot(grid: &AltitudeGrid) -> TerrainResult<Vec<u32>> {
    let config = TerrainConfig::new(grid.size())?;
    let order = config.order();
    let cells = config.cells() as u32;

    let mut out = Vec::new();
    let mut current: Option<(u32, usize)> = None;
    for distance in 0..cells {
        let (x, y) = hilbert::point_from_distance(order, distance);
        let sample = u32::from(grid.get(x as usize, y as usize).unwrap_or(0)) & SAMPLE_MASK;
        current = match current {
            Some((value, run)) if value == sample && run < MAX_RUN => Some((value, run + 1)),
            Some((value, run)) => {
                out.push(value | (run as u32 - 1));
                Some((sample, 1))
            }
            None => Some((sample, 1)),
        };
    }
    if let Some((value, run)) = current {
        out.push(value | (run as u32 - 1));
    }
    Ok(out)
}

const fn run_length(value: u32) -> usize {
    (value & RUN_MASK) as usize + 1
}
