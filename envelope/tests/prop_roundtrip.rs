use envelope::{decode, encode, encode_value, WireMessage};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Steer {
    heading: Option<i32>,
    speed: Option<u16>,
    label: Option<String>,
    active: bool,
}

impl WireMessage for Steer {
    const TYPE_NAME: &'static str = "Steer";
    const OUTER_TAG: Option<&'static str> = Some("Game");
}

fn steer_strategy() -> impl Strategy<Value = Steer> {
    (
        prop::option::of(any::<i32>()),
        prop::option::of(any::<u16>()),
        prop::option::of("[a-zA-Z0-9 ]{0,16}"),
        any::<bool>(),
    )
        .prop_map(|(heading, speed, label, active)| Steer {
            heading,
            speed,
            label,
            active,
        })
}

proptest! {
    #[test]
    fn prop_roundtrip(steer in steer_strategy()) {
        let text = encode(&steer).unwrap();
        let decoded: Steer = decode(&text).unwrap();
        prop_assert_eq!(decoded, steer);
    }

    #[test]
    fn prop_absent_fields_never_on_wire(steer in steer_strategy()) {
        let value = encode_value(&steer).unwrap();
        let fields = value["Game"]["Steer"].as_object().unwrap();
        prop_assert_eq!(fields.contains_key("heading"), steer.heading.is_some());
        prop_assert_eq!(fields.contains_key("speed"), steer.speed.is_some());
        prop_assert_eq!(fields.contains_key("label"), steer.label.is_some());
        prop_assert!(fields.values().all(|v| !v.is_null()));
    }

    #[test]
    fn prop_arbitrary_text_does_not_panic(text in ".{0,256}") {
        let _ = decode::<Steer>(&text);
    }
}
