//! Message wrapping and unwrapping.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{EnvelopeError, EnvelopeResult, LimitKind};
use crate::limits::EnvelopeLimits;

/// A message type that travels inside a tagged envelope.
///
/// The wire form is `{ OUTER_TAG: { TYPE_NAME: fields } }`, or
/// `{ TYPE_NAME: fields }` when the type has no outer tag. Field mapping is
/// the type's serde implementation, so a type that needs a custom wire shape
/// (a bare string, a raw tick that is post-processed) expresses it with serde
/// attributes or a hand-written impl.
pub trait WireMessage {
    /// Key selecting this message inside its envelope.
    const TYPE_NAME: &'static str;

    /// Optional tag wrapping the typed layer.
    const OUTER_TAG: Option<&'static str> = None;
}

/// Encodes a message to envelope text.
pub fn encode<M>(message: &M) -> EnvelopeResult<String>
where
    M: WireMessage + Serialize,
{
    let value = encode_value(message)?;
    serde_json::to_string(&value).map_err(|err| EnvelopeError::Encode {
        type_name: M::TYPE_NAME,
        message: err.to_string(),
    })
}

/// Encodes a message to an envelope value.
///
/// Absent fields are removed before wrapping; see [`strip_absent`].
pub fn encode_value<M>(message: &M) -> EnvelopeResult<Value>
where
    M: WireMessage + Serialize,
{
    let fields = serde_json::to_value(message).map_err(|err| EnvelopeError::Encode {
        type_name: M::TYPE_NAME,
        message: err.to_string(),
    })?;

    let mut wrapped = wrap(M::TYPE_NAME, strip_absent(fields));
    if let Some(tag) = M::OUTER_TAG {
        wrapped = wrap(tag, wrapped);
    }
    Ok(wrapped)
}

/// Decodes a message from envelope text using default limits.
pub fn decode<M>(text: &str) -> EnvelopeResult<M>
where
    M: WireMessage + DeserializeOwned,
{
    decode_with_limits(text, &EnvelopeLimits::default())
}

/// Decodes a message from envelope text.
pub fn decode_with_limits<M>(text: &str, limits: &EnvelopeLimits) -> EnvelopeResult<M>
where
    M: WireMessage + DeserializeOwned,
{
    decode_value(parse_frame_text(text, limits)?)
}

/// Decodes a message from an already-parsed envelope value.
pub fn decode_value<M>(value: Value) -> EnvelopeResult<M>
where
    M: WireMessage + DeserializeOwned,
{
    let payload = unwrap_payload(value, M::OUTER_TAG, M::TYPE_NAME)?;
    decode_payload(payload)
}

/// Maps an unwrapped payload onto the message type.
pub fn decode_payload<M>(payload: Value) -> EnvelopeResult<M>
where
    M: WireMessage + DeserializeOwned,
{
    serde_json::from_value(payload).map_err(|err| EnvelopeError::InvalidPayload {
        type_name: M::TYPE_NAME,
        message: err.to_string(),
    })
}

/// Descends through the optional outer tag and the type name.
pub fn unwrap_payload(
    value: Value,
    outer_tag: Option<&'static str>,
    type_name: &'static str,
) -> EnvelopeResult<Value> {
    let mut value = value;
    if let Some(tag) = outer_tag {
        value = take_key(value, tag, "envelope")?
            .ok_or(EnvelopeError::MissingOuterTag { tag })?;
    }
    let context = if outer_tag.is_some() {
        "tagged layer"
    } else {
        "envelope"
    };
    take_key(value, type_name, context)?.ok_or(EnvelopeError::UnknownType { type_name })
}

/// Removes null-valued entries from every object in the value tree.
///
/// Array elements are left in place: positions in an array carry meaning.
#[must_use]
pub fn strip_absent(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k, strip_absent(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_absent).collect()),
        other => other,
    }
}

pub(crate) fn parse_frame_text(text: &str, limits: &EnvelopeLimits) -> EnvelopeResult<Value> {
    if text.len() > limits.max_frame_bytes {
        return Err(EnvelopeError::LimitsExceeded {
            kind: LimitKind::FrameBytes,
            limit: limits.max_frame_bytes,
            actual: text.len(),
        });
    }
    serde_json::from_str(text).map_err(|err| EnvelopeError::MalformedJson {
        message: err.to_string(),
    })
}

fn take_key(value: Value, key: &str, context: &'static str) -> EnvelopeResult<Option<Value>> {
    match value {
        Value::Object(mut map) => Ok(map.remove(key)),
        _ => Err(EnvelopeError::NotAnObject { context }),
    }
}

fn wrap(key: &str, value: Value) -> Value {
    let mut map = Map::with_capacity(1);
    map.insert(key.to_owned(), value);
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Ping {
        seq: u32,
        note: Option<String>,
    }

    impl WireMessage for Ping {
        const TYPE_NAME: &'static str = "Ping";
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TaggedPing {
        seq: u32,
    }

    impl WireMessage for TaggedPing {
        const TYPE_NAME: &'static str = "Ping";
        const OUTER_TAG: Option<&'static str> = Some("Debug");
    }

    #[test]
    fn encode_wraps_under_type_name() {
        let value = encode_value(&Ping {
            seq: 3,
            note: Some("hi".into()),
        })
        .unwrap();
        assert_eq!(value, json!({"Ping": {"seq": 3, "note": "hi"}}));
    }

    #[test]
    fn encode_wraps_outer_tag() {
        let value = encode_value(&TaggedPing { seq: 9 }).unwrap();
        assert_eq!(value, json!({"Debug": {"Ping": {"seq": 9}}}));
    }

    #[test]
    fn encode_omits_absent_fields() {
        let text = encode(&Ping { seq: 1, note: None }).unwrap();
        assert_eq!(text, r#"{"Ping":{"seq":1}}"#);
    }

    #[test]
    fn decode_missing_optional_is_absent() {
        let ping: Ping = decode(r#"{"Ping":{"seq":4}}"#).unwrap();
        assert_eq!(ping, Ping { seq: 4, note: None });
    }

    #[test]
    fn decode_missing_outer_tag() {
        let err = decode::<TaggedPing>(r#"{"Ping":{"seq":4}}"#).unwrap_err();
        assert_eq!(err, EnvelopeError::MissingOuterTag { tag: "Debug" });
    }

    #[test]
    fn decode_unknown_type() {
        let err = decode::<Ping>(r#"{"Pong":{"seq":4}}"#).unwrap_err();
        assert_eq!(err, EnvelopeError::UnknownType { type_name: "Ping" });
    }

    #[test]
    fn decode_malformed_json() {
        let err = decode::<Ping>(r#"{"Ping":"#).unwrap_err();
        assert!(matches!(err, EnvelopeError::MalformedJson { .. }));
    }

    #[test]
    fn decode_non_object_envelope() {
        let err = decode::<Ping>("[1,2]").unwrap_err();
        assert_eq!(err, EnvelopeError::NotAnObject { context: "envelope" });
    }

    #[test]
    fn decode_payload_type_mismatch() {
        let err = decode::<Ping>(r#"{"Ping":{"seq":"x"}}"#).unwrap_err();
        assert!(matches!(
            err,
            EnvelopeError::InvalidPayload {
                type_name: "Ping",
                ..
            }
        ));
    }

    #[test]
    fn decode_rejects_oversized_frame() {
        let text = format!(r#"{{"Ping":{{"seq":1,"note":"{}"}}}}"#, "a".repeat(5000));
        let err = decode_with_limits::<Ping>(&text, &EnvelopeLimits::for_testing()).unwrap_err();
        assert!(matches!(
            err,
            EnvelopeError::LimitsExceeded {
                kind: LimitKind::FrameBytes,
                ..
            }
        ));
    }

    #[test]
    fn strip_absent_recurses_into_objects() {
        let value = json!({"a": null, "b": {"c": null, "d": 1}, "e": [null, {"f": null}]});
        assert_eq!(
            strip_absent(value),
            json!({"b": {"d": 1}, "e": [null, {}]})
        );
    }
}
