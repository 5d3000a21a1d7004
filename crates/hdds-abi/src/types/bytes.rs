// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Byte-string kinds.
//!
//! | Kind      | Binary                         | JSON                  |
//! |-----------|--------------------------------|-----------------------|
//! | `Str`     | u32 BE length + UTF-8 bytes    | string literal        |
//! | `Bytes`   | u32 BE length + raw bytes      | unpadded base64       |
//! | `Bytes32` | 32 raw bytes                   | unpadded base64 (32)  |
//! | `Bytes65` | 65 raw bytes                   | unpadded base64 (65)  |

use crate::codec::Codec;
use crate::error::{AbiError, Result};
use crate::registry::Kind;
use crate::ser::{
    json, read_len_prefixed, write_len_prefixed, AbiDecode, AbiEncode, Budget, Cursor,
    LEN_PREFIX_SIZE,
};
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine as _;
use serde_json::Value as JsonValue;
use std::fmt;

/// UTF-8 string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Str(String);

impl Str {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Str {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Str {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for Str {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AbiEncode for Str {
    fn size_hint(&self) -> usize {
        LEN_PREFIX_SIZE + self.0.len()
    }

    fn encode_abi(&self, dst: &mut Vec<u8>) -> Result<usize> {
        write_len_prefixed(dst, self.0.as_bytes())
    }

    fn to_json(&self) -> JsonValue {
        JsonValue::String(self.0.clone())
    }
}

impl AbiDecode for Str {
    fn decode_abi(src: &mut Cursor<'_>, budget: &mut Budget, codec: &Codec) -> Result<Self> {
        let data = read_len_prefixed(src, budget, codec.config().max_bytes)?;
        Ok(Self(String::from_utf8(data.to_vec())?))
    }

    fn from_json(json: &JsonValue, _codec: &Codec) -> Result<Self> {
        Ok(Self(json::as_str(json, Kind::String.name())?.to_string()))
    }
}

/// Variable-length byte string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bytes(Vec<u8>);

impl Bytes {
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self(data.into())
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(data: Vec<u8>) -> Self {
        Self(data)
    }
}

impl From<&[u8]> for Bytes {
    fn from(data: &[u8]) -> Self {
        Self(data.to_vec())
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&STANDARD_NO_PAD.encode(&self.0))
    }
}

impl AbiEncode for Bytes {
    fn size_hint(&self) -> usize {
        LEN_PREFIX_SIZE + self.0.len()
    }

    fn encode_abi(&self, dst: &mut Vec<u8>) -> Result<usize> {
        write_len_prefixed(dst, &self.0)
    }

    fn to_json(&self) -> JsonValue {
        JsonValue::String(STANDARD_NO_PAD.encode(&self.0))
    }
}

impl AbiDecode for Bytes {
    fn decode_abi(src: &mut Cursor<'_>, budget: &mut Budget, codec: &Codec) -> Result<Self> {
        let data = read_len_prefixed(src, budget, codec.config().max_bytes)?;
        Ok(Self(data.to_vec()))
    }

    fn from_json(json: &JsonValue, _codec: &Codec) -> Result<Self> {
        let text = json::as_str(json, Kind::Bytes.name())?;
        Ok(Self(STANDARD_NO_PAD.decode(text)?))
    }
}

macro_rules! impl_fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $size:literal, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name([u8; $size]);

        impl $name {
            pub const SIZE: usize = $size;

            pub const fn new(data: [u8; $size]) -> Self {
                Self(data)
            }

            pub fn as_bytes(&self) -> &[u8; $size] {
                &self.0
            }

            /// Copy from a slice that must be exactly [`Self::SIZE`] bytes.
            pub fn from_slice(data: &[u8]) -> Result<Self> {
                let array: [u8; $size] =
                    data.try_into().map_err(|_| AbiError::InvalidLength {
                        kind: $kind,
                        expected: $size,
                        actual: data.len(),
                    })?;
                Ok(Self(array))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self([0u8; $size])
            }
        }

        impl From<[u8; $size]> for $name {
            fn from(data: [u8; $size]) -> Self {
                Self(data)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&STANDARD_NO_PAD.encode(self.0))
            }
        }

        impl AbiEncode for $name {
            fn size_hint(&self) -> usize {
                $size
            }

            fn encode_abi(&self, dst: &mut Vec<u8>) -> Result<usize> {
                dst.extend_from_slice(&self.0);
                Ok($size)
            }

            fn to_json(&self) -> JsonValue {
                JsonValue::String(STANDARD_NO_PAD.encode(self.0))
            }
        }

        impl AbiDecode for $name {
            fn decode_abi(
                src: &mut Cursor<'_>,
                budget: &mut Budget,
                _codec: &Codec,
            ) -> Result<Self> {
                budget.consume($size)?;
                Ok(Self(src.read_array::<$size>()?))
            }

            fn from_json(json: &JsonValue, _codec: &Codec) -> Result<Self> {
                let text = json::as_str(json, $kind.name())?;
                Self::from_slice(&STANDARD_NO_PAD.decode(text)?)
            }
        }
    };
}

impl_fixed_bytes!(
    /// Fixed 32-byte array (hashes, keys).
    Bytes32,
    32,
    Kind::Bytes32
);
impl_fixed_bytes!(
    /// Fixed 65-byte array (recoverable signatures).
    Bytes65,
    65,
    Kind::Bytes65
);
