// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = hdds_abi::decode_json(data) {
        let bytes = hdds_abi::to_bytes(&value).expect("decoded JSON value re-encodes");
        assert_eq!(hdds_abi::from_bytes(&bytes).ok(), Some(value));
    }
});
