//! Contact record decoding.

use serde::Serialize;
use serde_json::Value;
use terrain::{Coords, TerrainConfig, TerrainCoords};

use crate::error::{ContactDecodeError, ContactResult};
use crate::field::ContactField;
use crate::guidance::Guidance;
use crate::header::ContactHeader;
use crate::types::{EntityId, PlayerId};

/// Slots every contact carries before its optional fields: id, position,
/// direction.
pub const LEADING_SLOTS: usize = 3;

/// One observation of a visible entity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contact {
    pub header: ContactHeader,
    pub id: EntityId,
    pub position: Coords,
    pub direction: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub altitude: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance: Option<Guidance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player_id: Option<PlayerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reloads: Option<Value>,
}

impl Contact {
    /// Returns the contact's position on the terrain grid.
    #[must_use]
    pub fn position_to_terrain(&self, config: &TerrainConfig) -> TerrainCoords {
        TerrainCoords::from_real(self.position, config)
    }

    /// Returns `true` if this contact reports the given player's entity.
    #[must_use]
    pub fn is_player(&self, player_id: PlayerId) -> bool {
        self.player_id == Some(player_id)
    }
}

/// Decodes one contact from its header bits and flat data array.
///
/// Each set header bit consumes exactly one slot after the leading three, in
/// bit order. Slots past the header's count are ignored.
pub fn decode_contact(header_bits: u64, data: &[Value]) -> ContactResult<Contact> {
    let header = ContactHeader::from_bits(header_bits);
    let needed = LEADING_SLOTS + header.len();
    if data.len() < needed {
        return Err(ContactDecodeError::Truncated {
            needed,
            actual: data.len(),
        });
    }

    let (leading, tail) = data.split_at(LEADING_SLOTS);
    let mut contact = Contact {
        header,
        id: EntityId::new(to_u32(&leading[0], "id")?),
        position: to_coords(&leading[1], "position")?,
        direction: to_f32(&leading[2], "direction")?,
        altitude: None,
        guidance: None,
        damage: None,
        entity_type: None,
        player_id: None,
        reloads: None,
    };

    for (field, value) in header.iter().zip(tail) {
        let name = field.name();
        match field {
            // Sent but not modelled.
            ContactField::Velocity => {}
            ContactField::Altitude => contact.altitude = Some(to_i32(value, name)?),
            ContactField::DirectionTarget => {
                contact
                    .guidance
                    .get_or_insert_with(Guidance::default)
                    .direction_target = Some(to_f32(value, name)?);
            }
            ContactField::VelocityTarget => {
                contact
                    .guidance
                    .get_or_insert_with(Guidance::default)
                    .velocity_target = Some(to_i32(value, name)?);
            }
            ContactField::Damage => contact.damage = Some(to_u32(value, name)?),
            ContactField::EntityType => contact.entity_type = Some(to_string(value, name)?),
            ContactField::PlayerId => contact.player_id = Some(PlayerId::new(to_u32(value, name)?)),
            ContactField::Reloads => contact.reloads = Some(value.clone()),
        }
    }

    Ok(contact)
}

/// Decodes one wire contact entry, a `[header, [data...]]` pair.
pub fn decode_contact_entry(entry: &Value) -> ContactResult<Contact> {
    let [header, data] = entry.as_array().map(Vec::as_slice).unwrap_or_default() else {
        return Err(ContactDecodeError::MalformedEntry);
    };
    let header_bits = header.as_u64().ok_or(ContactDecodeError::InvalidValue {
        field: "header",
        expected: "unsigned integer",
    })?;
    let data = data.as_array().ok_or(ContactDecodeError::MalformedEntry)?;
    decode_contact(header_bits, data)
}

const fn invalid(field: &'static str, expected: &'static str) -> ContactDecodeError {
    ContactDecodeError::InvalidValue { field, expected }
}

fn to_u32(value: &Value, field: &'static str) -> ContactResult<u32> {
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(invalid(field, "unsigned 32-bit integer"))
}

fn to_i32(value: &Value, field: &'static str) -> ContactResult<i32> {
    value
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or(invalid(field, "32-bit integer"))
}

fn to_f32(value: &Value, field: &'static str) -> ContactResult<f32> {
    value
        .as_f64()
        .map(|v| v as f32)
        .ok_or(invalid(field, "number"))
}

fn to_string(value: &Value, field: &'static str) -> ContactResult<String> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or(invalid(field, "string"))
}

fn to_coords(value: &Value, field: &'static str) -> ContactResult<Coords> {
    match value.as_array().map(Vec::as_slice) {
        Some([x, y]) => Ok(Coords::new(to_f32(x, field)?, to_f32(y, field)?)),
        _ => Err(invalid(field, "[x, y] pair")),
    }
}
