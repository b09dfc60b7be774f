//! Error types for update aggregation.

use std::fmt;

use contact::ContactDecodeError;
use terrain::TerrainDecodeError;

/// Result type for per-record update decoding.
pub type UpdateResult<T> = Result<T, UpdateError>;

/// Errors that reject one record of a tick.
///
/// None of these fail the tick as a whole; they end up in
/// [`crate::Update::rejected`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateError {
    /// A contact failed to decode.
    Contact(ContactDecodeError),

    /// A chunk failed to decode.
    Terrain(TerrainDecodeError),

    /// A chunk entry does not have the `[[x, y], {is_update, bytes}]` shape.
    MalformedChunk { message: String },

    /// A top-level field holds a value of the wrong shape.
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    /// More records than the configured limit.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific update limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Contacts,
    Chunks,
}

impl fmt::Display for UpdateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contact(e) => write!(f, "contact error: {e}"),
            Self::Terrain(e) => write!(f, "terrain error: {e}"),
            Self::MalformedChunk { message } => write!(f, "malformed chunk: {message}"),
            Self::InvalidField { field, expected } => {
                write!(f, "invalid {field}: expected {expected}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => write!(f, "{kind} limit exceeded: {actual} > {limit}"),
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Contacts => "contacts",
            Self::Chunks => "chunks",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for UpdateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Contact(e) => Some(e),
            Self::Terrain(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ContactDecodeError> for UpdateError {
    fn from(err: ContactDecodeError) -> Self {
        Self::Contact(err)
    }
}

impl From<TerrainDecodeError> for UpdateError {
    fn from(err: TerrainDecodeError) -> Self {
        Self::Terrain(err)
    }
}
