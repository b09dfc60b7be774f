#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let Some((&header, rest)) = data.split_first() else {
        return;
    };
    let Ok(Value::Array(slots)) = serde_json::from_slice::<Value>(rest) else {
        return;
    };
    if let Ok(contact) = contact::decode_contact(u64::from(header), &slots) {
        assert_eq!(contact.header.raw(), header);
        assert!(slots.len() >= contact::LEADING_SLOTS + contact.header.len());
    }
});
