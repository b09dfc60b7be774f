//! Error types for envelope operations.

use std::fmt;

/// Result type for envelope operations.
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

/// Errors that can occur while wrapping or unwrapping a message envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EnvelopeError {
    /// Frame text is not valid JSON.
    MalformedJson { message: String },

    /// The expected outer tag is not present.
    MissingOuterTag { tag: &'static str },

    /// The expected type name key is not present.
    UnknownType { type_name: &'static str },

    /// A level of the envelope is not a JSON object.
    NotAnObject { context: &'static str },

    /// The frame is an object with no keys.
    EmptyFrame,

    /// The payload under the type name does not match the message type.
    InvalidPayload {
        type_name: &'static str,
        message: String,
    },

    /// The message could not be serialized.
    Encode {
        type_name: &'static str,
        message: String,
    },

    /// Limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },
}

/// Specific envelope limits that can be exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    FrameBytes,
}

impl fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedJson { message } => write!(f, "malformed json: {message}"),
            Self::MissingOuterTag { tag } => write!(f, "missing outer tag \"{tag}\""),
            Self::UnknownType { type_name } => {
                write!(f, "missing type name \"{type_name}\" in envelope")
            }
            Self::NotAnObject { context } => write!(f, "{context} is not a json object"),
            Self::EmptyFrame => write!(f, "frame has no tag"),
            Self::InvalidPayload { type_name, message } => {
                write!(f, "invalid payload for {type_name}: {message}")
            }
            Self::Encode { type_name, message } => {
                write!(f, "failed to encode {type_name}: {message}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FrameBytes => "frame bytes",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for EnvelopeError {}
