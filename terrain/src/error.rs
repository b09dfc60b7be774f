//! Error types for terrain decoding.

use std::fmt;

use crate::update::ChunkKind;

/// Result type for terrain operations.
pub type TerrainResult<T> = Result<T, TerrainDecodeError>;

/// Errors that can occur while decoding or applying terrain chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerrainDecodeError {
    /// Run-length expansion does not cover the chunk exactly.
    SizeMismatch { expected: usize, actual: usize },

    /// A snapshot byte does not fit in eight bits.
    InvalidByte { index: usize, value: u32 },

    /// A patch cell lies outside the chunk.
    PatchOutOfRange { x: i32, y: i32, size: usize },

    /// The update is not of the kind the operation needs.
    WrongKind { expected: ChunkKind },

    /// Chunk size is not a power of two of at least 2.
    InvalidChunkSize { size: usize },
}

impl fmt::Display for TerrainDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "snapshot size mismatch: runs cover {actual} cells, chunk has {expected}"
                )
            }
            Self::InvalidByte { index, value } => {
                write!(f, "snapshot byte {index} out of range: {value}")
            }
            Self::PatchOutOfRange { x, y, size } => {
                write!(f, "patch cell ({x}, {y}) outside {size}x{size} chunk")
            }
            Self::WrongKind { expected } => {
                write!(f, "expected a {expected} update")
            }
            Self::InvalidChunkSize { size } => {
                write!(f, "invalid chunk size {size}: must be a power of two >= 2")
            }
        }
    }
}

impl std::error::Error for TerrainDecodeError {}
