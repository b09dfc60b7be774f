//! Tagged JSON envelope codec for warrior protocol messages.
//!
//! Every message on the game socket is a JSON object keyed by the message
//! type name, optionally wrapped once more in a routing tag:
//!
//! ```text
//! {"Game": {"Spawn": {"entity_type": "fairmileD"}}}
//! {"Game": {"contacts": [...], "terrain": [...]}}
//! ```
//!
//! This crate wraps and unwraps that structure. It does not know about game
//! state types, only about the envelope.
//!
//! # Design Principles
//!
//! - **No domain knowledge** - Types declare their tags through [`WireMessage`].
//! - **Absent means omitted** - `None` fields never reach the wire.
//! - **Distinct failures** - A missing tag and a missing type name are
//!   different errors.
//!
//! # Example
//!
//! ```
//! use envelope::{decode, encode, WireMessage};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Spawn {
//!     entity_type: String,
//! }
//!
//! impl WireMessage for Spawn {
//!     const TYPE_NAME: &'static str = "Spawn";
//!     const OUTER_TAG: Option<&'static str> = Some("Game");
//! }
//!
//! let text = encode(&Spawn { entity_type: "fairmileD".into() }).unwrap();
//! assert_eq!(text, r#"{"Game":{"Spawn":{"entity_type":"fairmileD"}}}"#);
//! let back: Spawn = decode(&text).unwrap();
//! assert_eq!(back.entity_type, "fairmileD");
//! ```

mod error;
mod frame;
mod limits;
mod message;

pub use error::{EnvelopeError, EnvelopeResult, LimitKind};
pub use frame::{peek_frame, split_frame, Frame};
pub use limits::EnvelopeLimits;
pub use message::{
    decode, decode_payload, decode_value, decode_with_limits, encode, encode_value,
    strip_absent, unwrap_payload, WireMessage,
};
