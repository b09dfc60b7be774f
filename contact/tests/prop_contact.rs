use contact::decode_contact;
use proptest::prelude::*;
use serde_json::{json, Value};

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(|v| json!(v)),
        any::<f32>()
            .prop_filter("finite", |v| v.is_finite())
            .prop_map(|v| json!(v)),
        "[a-z]{0,8}".prop_map(|s| json!(s)),
        Just(Value::Null),
        Just(json!([1, 2])),
    ]
}

proptest! {
    #[test]
    fn arbitrary_slots_never_panic(
        header in any::<u64>(),
        data in prop::collection::vec(value_strategy(), 0..12),
    ) {
        let _ = decode_contact(header, &data);
    }
}
