//! Error types for contact decoding.

use std::fmt;

/// Result type for contact decoding.
pub type ContactResult<T> = Result<T, ContactDecodeError>;

/// Errors that can occur while decoding one contact record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactDecodeError {
    /// The data array holds fewer slots than the header requires.
    Truncated { needed: usize, actual: usize },

    /// A slot holds a value of the wrong shape for its field.
    InvalidValue {
        field: &'static str,
        expected: &'static str,
    },

    /// The contact entry is not a `[header, data]` pair.
    MalformedEntry,
}

impl fmt::Display for ContactDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated { needed, actual } => {
                write!(f, "contact truncated: needed {needed} slots, got {actual}")
            }
            Self::InvalidValue { field, expected } => {
                write!(f, "invalid contact {field}: expected {expected}")
            }
            Self::MalformedEntry => write!(f, "contact entry is not a [header, data] pair"),
        }
    }
}

impl std::error::Error for ContactDecodeError {}
