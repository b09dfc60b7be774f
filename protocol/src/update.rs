//! Per-tick update aggregation.

use std::fmt;

use contact::{decode_contact_entry, Contact};
use envelope::{EnvelopeLimits, EnvelopeResult, Frame, WireMessage};
use serde::Deserialize;
use serde_json::Value;
use terrain::{ChunkId, ChunkUpdate, TerrainConfig, TerrainUpdate};
use tracing::{debug, warn};

use crate::error::{LimitKind, UpdateError, UpdateResult};
use crate::limits::UpdateLimits;

/// Which part of a tick a rejected record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Contact,
    Chunk,
    /// A top-level scalar or list field.
    Field,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Contact => "contact",
            Self::Chunk => "chunk",
            Self::Field => "field",
        };
        write!(f, "{name}")
    }
}

/// A record skipped while assembling a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position in its list; 0 for top-level fields.
    pub index: usize,
    pub kind: RecordKind,
    pub reason: String,
}

/// Everything the server sent in one game tick.
///
/// Deserializing an `Update` directly uses [`UpdateDecoder::default`];
/// use an explicit decoder to change limits or chunk geometry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawTick")]
pub struct Update {
    pub contacts: Option<Vec<Contact>>,
    pub terrain: Option<TerrainUpdate>,
    pub score: Option<u32>,
    pub world_radius: Option<f32>,
    pub death_reason: Option<String>,
    pub rejected: Vec<RejectedRecord>,
}

impl Update {
    /// Returns `true` if the tick carried nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_none()
            && self.terrain.is_none()
            && self.score.is_none()
            && self.world_radius.is_none()
            && self.death_reason.is_none()
            && self.rejected.is_empty()
    }

    /// Contacts decoded this tick.
    pub fn contacts(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter().flatten()
    }

    /// Chunk updates decoded this tick.
    pub fn chunks(&self) -> impl Iterator<Item = &ChunkUpdate> {
        self.terrain.iter().flat_map(TerrainUpdate::iter)
    }
}

impl WireMessage for Update {
    const TYPE_NAME: &'static str = "Game";
}

/// Wire form of a tick before per-record decoding.
#[derive(Debug, Default, Deserialize)]
struct RawTick {
    contacts: Option<Value>,
    terrain: Option<Value>,
    score: Option<Value>,
    world_radius: Option<Value>,
    death_reason: Option<Value>,
}

impl WireMessage for RawTick {
    const TYPE_NAME: &'static str = "Game";
}

impl From<RawTick> for Update {
    fn from(raw: RawTick) -> Self {
        UpdateDecoder::default().assemble(raw)
    }
}

#[derive(Debug, Deserialize)]
struct RawChunk {
    is_update: bool,
    bytes: Vec<u32>,
}

/// Assembles ticks into [`Update`]s.
///
/// Envelope failures fail the call. A contact or chunk that fails to decode
/// is logged, recorded in [`Update::rejected`], and skipped.
#[derive(Debug, Clone, Default)]
pub struct UpdateDecoder {
    terrain: TerrainConfig,
    limits: UpdateLimits,
    envelope: EnvelopeLimits,
}

impl UpdateDecoder {
    #[must_use]
    pub fn new(terrain: TerrainConfig, limits: UpdateLimits) -> Self {
        Self {
            terrain,
            limits,
            envelope: EnvelopeLimits::default(),
        }
    }

    /// Overrides the frame-level limits used by [`Self::decode`].
    #[must_use]
    pub fn with_envelope_limits(mut self, envelope: EnvelopeLimits) -> Self {
        self.envelope = envelope;
        self
    }

    #[must_use]
    pub const fn terrain_config(&self) -> &TerrainConfig {
        &self.terrain
    }

    #[must_use]
    pub const fn limits(&self) -> &UpdateLimits {
        &self.limits
    }

    /// Decodes a `{"Game": {...}}` frame from text.
    pub fn decode(&self, text: &str) -> EnvelopeResult<Update> {
        let raw: RawTick = envelope::decode_with_limits(text, &self.envelope)?;
        Ok(self.assemble(raw))
    }

    /// Decodes a `{"Game": {...}}` frame that is already parsed.
    pub fn decode_value(&self, value: Value) -> EnvelopeResult<Update> {
        let raw: RawTick = envelope::decode_value(value)?;
        Ok(self.assemble(raw))
    }

    /// Decodes a frame split by [`envelope::peek_frame`].
    pub fn decode_frame(&self, frame: Frame) -> EnvelopeResult<Update> {
        let raw: RawTick = frame.decode()?;
        Ok(self.assemble(raw))
    }

    fn assemble(&self, raw: RawTick) -> Update {
        let mut rejected = Vec::new();

        let contacts = raw
            .contacts
            .and_then(|value| self.decode_contacts(&value, &mut rejected));
        let terrain = raw
            .terrain
            .and_then(|value| self.decode_terrain(&value, &mut rejected));
        let score = raw.score.and_then(|value| {
            scalar(&value, "score", "unsigned integer", &mut rejected, to_score)
        });
        let world_radius = raw.world_radius.and_then(|value| {
            scalar(&value, "world_radius", "number", &mut rejected, to_radius)
        });
        let death_reason = raw.death_reason.map(death_reason_text);

        debug!(
            contacts = contacts.as_ref().map_or(0, Vec::len),
            chunks = terrain.as_ref().map_or(0, TerrainUpdate::len),
            rejected = rejected.len(),
            "assembled tick"
        );

        Update {
            contacts,
            terrain,
            score,
            world_radius,
            death_reason,
            rejected,
        }
    }

    fn decode_contacts(
        &self,
        value: &Value,
        rejected: &mut Vec<RejectedRecord>,
    ) -> Option<Vec<Contact>> {
        let Some(entries) = value.as_array() else {
            let err = UpdateError::InvalidField {
                field: "contacts",
                expected: "array",
            };
            reject(rejected, 0, RecordKind::Field, &err);
            return None;
        };

        let mut contacts = Vec::with_capacity(entries.len().min(self.limits.max_contacts));
        for (index, entry) in entries.iter().enumerate() {
            let result = if index < self.limits.max_contacts {
                decode_contact_entry(entry).map_err(UpdateError::from)
            } else {
                Err(UpdateError::LimitsExceeded {
                    kind: LimitKind::Contacts,
                    limit: self.limits.max_contacts,
                    actual: entries.len(),
                })
            };
            match result {
                Ok(contact) => contacts.push(contact),
                Err(err) => reject(rejected, index, RecordKind::Contact, &err),
            }
        }
        Some(contacts)
    }

    fn decode_terrain(
        &self,
        value: &Value,
        rejected: &mut Vec<RejectedRecord>,
    ) -> Option<TerrainUpdate> {
        let Some(entries) = value.as_array() else {
            let err = UpdateError::InvalidField {
                field: "terrain",
                expected: "array",
            };
            reject(rejected, 0, RecordKind::Field, &err);
            return None;
        };

        let mut chunks = Vec::with_capacity(entries.len().min(self.limits.max_chunks));
        for (index, entry) in entries.iter().enumerate() {
            let result = if index < self.limits.max_chunks {
                self.decode_chunk(entry)
            } else {
                Err(UpdateError::LimitsExceeded {
                    kind: LimitKind::Chunks,
                    limit: self.limits.max_chunks,
                    actual: entries.len(),
                })
            };
            match result {
                Ok(chunk) => chunks.push(chunk),
                Err(err) => reject(rejected, index, RecordKind::Chunk, &err),
            }
        }
        Some(TerrainUpdate::new(chunks))
    }

    /// Decodes one `[[x, y], {is_update, bytes}]` entry. Snapshots are
    /// decoded here so a bad one is rejected with the tick; the grid stays
    /// cached on the returned update.
    fn decode_chunk(&self, entry: &Value) -> UpdateResult<ChunkUpdate> {
        let (id, body) = <([i32; 2], RawChunk)>::deserialize(entry).map_err(|err| {
            UpdateError::MalformedChunk {
                message: err.to_string(),
            }
        })?;
        let chunk = ChunkUpdate::new(ChunkId::from(id), body.is_update, body.bytes);
        if !chunk.is_update {
            chunk.altitudes(&self.terrain)?;
        }
        Ok(chunk)
    }
}

fn reject(rejected: &mut Vec<RejectedRecord>, index: usize, kind: RecordKind, err: &UpdateError) {
    warn!(index, kind = %kind, error = %err, "rejected record");
    rejected.push(RejectedRecord {
        index,
        kind,
        reason: err.to_string(),
    });
}

fn scalar<T>(
    value: &Value,
    field: &'static str,
    expected: &'static str,
    rejected: &mut Vec<RejectedRecord>,
    convert: fn(&Value) -> Option<T>,
) -> Option<T> {
    let converted = convert(value);
    if converted.is_none() {
        reject(
            rejected,
            0,
            RecordKind::Field,
            &UpdateError::InvalidField { field, expected },
        );
    }
    converted
}

fn to_score(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|v| u32::try_from(v).ok())
}

fn to_radius(value: &Value) -> Option<f32> {
    value.as_f64().map(|v| v as f32)
}

/// Death reasons are strings on the wire; anything else is kept as its JSON
/// text.
fn death_reason_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use terrain::{encode_patch_cell, ChunkKind};

    fn flat_snapshot_bytes(config: &TerrainConfig) -> Vec<u32> {
        vec![0x0F; config.cells() / 16]
    }

    fn decoder() -> UpdateDecoder {
        UpdateDecoder::new(TerrainConfig::for_testing(), UpdateLimits::for_testing())
    }

    #[test]
    fn empty_tick() {
        let update = decoder().decode(r#"{"Game":{}}"#).unwrap();
        assert!(update.is_empty());
    }

    #[test]
    fn scalars_pass_through() {
        let update = decoder()
            .decode_value(json!({"Game": {
                "score": 120,
                "world_radius": 1500.5,
                "death_reason": "Collision",
            }}))
            .unwrap();
        assert_eq!(update.score, Some(120));
        assert_eq!(update.world_radius, Some(1500.5));
        assert_eq!(update.death_reason.as_deref(), Some("Collision"));
        assert!(update.contacts.is_none());
        assert!(update.terrain.is_none());
    }

    #[test]
    fn structured_death_reason_is_stringified() {
        let update = decoder()
            .decode_value(json!({"Game": {"death_reason": {"Sunk": "pirate"}}}))
            .unwrap();
        assert_eq!(update.death_reason.as_deref(), Some(r#"{"Sunk":"pirate"}"#));
    }

    #[test]
    fn contacts_and_chunks() {
        let config = TerrainConfig::for_testing();
        let update = decoder()
            .decode_value(json!({"Game": {
                "contacts": [[32, [1, [0, 0], 0, "fairmileD"]], [0, [2, [5, 5], 1]]],
                "terrain": [
                    [[0, 1], {"is_update": false, "bytes": flat_snapshot_bytes(&config)}],
                    [[0, 1], {"is_update": true, "bytes": [encode_patch_cell(1, 2, 0x30)]}],
                ],
            }}))
            .unwrap();
        assert_eq!(update.contacts().count(), 2);
        let chunks: Vec<_> = update.chunks().collect();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].kind(), ChunkKind::Snapshot);
        assert!(chunks[0].is_decoded());
        assert_eq!(chunks[1].chunk_id, ChunkId::new(0, 1));
        assert!(update.rejected.is_empty());
    }

    #[test]
    fn bad_records_are_skipped_and_recorded() {
        let config = TerrainConfig::for_testing();
        let update = decoder()
            .decode_value(json!({"Game": {
                "contacts": [[1, [1, [0, 0], 0]], [0, [2, [0, 0], 0]]],
                "terrain": [
                    [[0, 0], {"is_update": false, "bytes": [0x0F]}],
                    [[1, 0], {"is_update": false, "bytes": flat_snapshot_bytes(&config)}],
                ],
            }}))
            .unwrap();
        let contacts = update.contacts.as_ref().unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].id.raw(), 2);
        assert_eq!(update.terrain.as_ref().unwrap().len(), 1);
        assert_eq!(update.rejected.len(), 2);
        assert_eq!(update.rejected[0].kind, RecordKind::Contact);
        assert_eq!(update.rejected[0].index, 0);
        assert_eq!(update.rejected[1].kind, RecordKind::Chunk);
        assert_eq!(update.rejected[1].index, 0);
        assert!(update.rejected[1].reason.contains("size mismatch"));
    }

    #[test]
    fn malformed_chunk_shape() {
        let update = decoder()
            .decode_value(json!({"Game": {"terrain": [[[0, 0], {"bytes": []}]]}}))
            .unwrap();
        assert_eq!(update.terrain.unwrap().len(), 0);
        assert!(update.rejected[0].reason.starts_with("malformed chunk"));
    }

    #[test]
    fn non_array_contacts_rejected_as_field() {
        let update = decoder()
            .decode_value(json!({"Game": {"contacts": 5, "score": "high"}}))
            .unwrap();
        assert!(update.contacts.is_none());
        assert!(update.score.is_none());
        assert_eq!(update.rejected.len(), 2);
        assert!(update
            .rejected
            .iter()
            .all(|r| r.kind == RecordKind::Field));
    }

    #[test]
    fn contacts_past_limit_are_rejected() {
        let entries: Vec<_> = (0..10).map(|i| json!([0, [i, [0, 0], 0]])).collect();
        let update = decoder()
            .decode_value(json!({"Game": {"contacts": entries}}))
            .unwrap();
        assert_eq!(update.contacts.unwrap().len(), 8);
        assert_eq!(update.rejected.len(), 2);
        assert_eq!(update.rejected[0].index, 8);
        assert!(update.rejected[0].reason.contains("contacts limit exceeded"));
    }

    #[test]
    fn envelope_errors_fail_the_call() {
        let err = decoder().decode(r#"{"Client":{}}"#).unwrap_err();
        assert_eq!(err, envelope::EnvelopeError::UnknownType { type_name: "Game" });
        assert!(decoder().decode("not json").is_err());
        assert!(decoder().decode(r#"{"Game":"tick"}"#).is_err());
    }

    #[test]
    fn envelope_limits_apply() {
        let decoder = decoder().with_envelope_limits(EnvelopeLimits { max_frame_bytes: 8 });
        assert!(matches!(
            decoder.decode(r#"{"Game":{}}"#),
            Err(envelope::EnvelopeError::LimitsExceeded { .. })
        ));
    }

    #[test]
    fn decode_frame_routes_game_frames() {
        let frame = envelope::peek_frame(
            r#"{"Game":{"score":3}}"#,
            &EnvelopeLimits::for_testing(),
        )
        .unwrap();
        assert!(frame.is("Game"));
        let update = decoder().decode_frame(frame).unwrap();
        assert_eq!(update.score, Some(3));
    }

    #[test]
    fn deserialize_uses_default_decoder() {
        let update: Update = envelope::decode(r#"{"Game":{"world_radius":900}}"#).unwrap();
        assert_eq!(update.world_radius, Some(900.0));
    }
}
