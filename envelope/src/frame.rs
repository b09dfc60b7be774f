//! Inbound frame classification.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{EnvelopeError, EnvelopeResult};
use crate::limits::EnvelopeLimits;
use crate::message::{decode_payload, parse_frame_text, unwrap_payload, WireMessage};

/// An inbound frame split into its top-level tag and body.
///
/// Servers send one tag per frame (`Game`, `Client`, `Chat`, ...), so the
/// tag is enough to route a frame before committing to a message type.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub tag: String,
    pub body: Value,
}

impl Frame {
    /// Returns `true` if the frame carries the given top-level tag.
    #[must_use]
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Decodes the frame as message type `M`.
    ///
    /// The frame tag must equal `M`'s outer tag, or its type name when the
    /// type has no outer tag.
    pub fn decode<M>(self) -> EnvelopeResult<M>
    where
        M: WireMessage + DeserializeOwned,
    {
        match M::OUTER_TAG {
            Some(tag) => {
                if self.tag != tag {
                    return Err(EnvelopeError::MissingOuterTag { tag });
                }
                let payload = unwrap_payload(self.body, None, M::TYPE_NAME)?;
                decode_payload(payload)
            }
            None => {
                if self.tag != M::TYPE_NAME {
                    return Err(EnvelopeError::UnknownType {
                        type_name: M::TYPE_NAME,
                    });
                }
                decode_payload(self.body)
            }
        }
    }
}

/// Parses frame text and splits off its top-level tag.
pub fn peek_frame(text: &str, limits: &EnvelopeLimits) -> EnvelopeResult<Frame> {
    split_frame(parse_frame_text(text, limits)?)
}

/// Splits an already-parsed frame value into tag and body.
pub fn split_frame(value: Value) -> EnvelopeResult<Frame> {
    let Value::Object(map) = value else {
        return Err(EnvelopeError::NotAnObject { context: "frame" });
    };
    let (tag, body) = map.into_iter().next().ok_or(EnvelopeError::EmptyFrame)?;
    Ok(Frame { tag, body })
}
