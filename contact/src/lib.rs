//! Bitmask-driven contact record decoding for the warrior client.
//!
//! A contact is one entity the server reports as visible. Its shape is not
//! fixed: a header bitmask says which optional fields follow the three
//! leading slots (id, position, direction), and their values appear in a flat
//! array in header bit order.
//!
//! ```
//! use contact::{decode_contact, ContactField};
//! use serde_json::json;
//!
//! let data = json!([12, [100.0, -50.0], 1.5, "fairmileD"]);
//! let contact = decode_contact(0b0010_0000, data.as_array().unwrap()).unwrap();
//! assert!(contact.header.contains(ContactField::EntityType));
//! assert_eq!(contact.entity_type.as_deref(), Some("fairmileD"));
//! ```

mod contact;
mod error;
mod field;
mod guidance;
mod header;
mod types;

pub use contact::{decode_contact, decode_contact_entry, Contact, LEADING_SLOTS};
pub use error::{ContactDecodeError, ContactResult};
pub use field::ContactField;
pub use guidance::Guidance;
pub use header::ContactHeader;
pub use types::{EntityId, PlayerId};
