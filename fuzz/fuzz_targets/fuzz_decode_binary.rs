// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;

// Small budget so hostile counts and lengths hit the limit quickly.
const FUZZ_MAX_BYTES: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    if let Ok((value, consumed)) = hdds_abi::decode(data, FUZZ_MAX_BYTES) {
        // Record fields may arrive unsorted, so compare sizes, not bytes.
        let bytes = hdds_abi::to_bytes(&value).expect("decoded value re-encodes");
        assert_eq!(bytes.len(), consumed);
        if let Ok(json) = hdds_abi::encode_json(&value) {
            assert_eq!(hdds_abi::decode_json(&json).ok(), Some(value));
        }
    }
});
