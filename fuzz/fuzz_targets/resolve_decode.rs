#![no_main]

use aclscope::{
    path::resolve,
    rights::{decode, named_rights, AccessMask},
    rule::encode,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(path) = resolve(text) {
            let _ = path.to_string();
        }
        if let Ok(mask) = AccessMask::parse(text) {
            assert_eq!(AccessMask::parse(&mask.to_string()).ok(), Some(mask));
        }
    }

    if data.len() >= 4 {
        let mask = AccessMask::new(u32::from_le_bytes([data[0], data[1], data[2], data[3]]));
        let decoded = decode(mask);
        let explicit = named_rights(mask);
        assert_eq!(named_rights(encode(explicit.iter().copied())), explicit);
        assert!(explicit.is_subset(decoded.rights()));
    }
});
