// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec entry points.
//!
//! A [`Codec`] pairs an [`AbiConfig`] with the set of installed extension
//! decoders. Every top-level decode creates one [`Budget`] from the configured
//! maximum and threads it through the whole value tree.
//!
//! The free functions at the bottom of this module use a shared default codec
//! (32 MiB limit, no extensions).

use crate::config::AbiConfig;
use crate::error::{AbiError, Result};
use crate::ext::ExtensionRegistry;
use crate::ser::{json, AbiDecode, AbiEncode, Budget, Cursor};
use crate::value::Value;
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

/// Binary and JSON codec for tagged values.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: AbiConfig,
    extensions: ExtensionRegistry,
}

impl Codec {
    pub fn new(config: AbiConfig) -> Self {
        Self {
            config,
            extensions: ExtensionRegistry::new(),
        }
    }

    pub fn with_extensions(config: AbiConfig, extensions: ExtensionRegistry) -> Self {
        Self { config, extensions }
    }

    pub fn config(&self) -> &AbiConfig {
        &self.config
    }

    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.extensions
    }

    pub fn extensions_mut(&mut self) -> &mut ExtensionRegistry {
        &mut self.extensions
    }

    fn check_encoded_size(&self, size: usize) -> Result<()> {
        if size > self.config.max_bytes {
            log::debug!(
                "[abi] encoded size {} exceeds max object size {}",
                size,
                self.config.max_bytes
            );
            return Err(AbiError::BudgetExceeded {
                needed: size,
                remaining: self.config.max_bytes,
            });
        }
        Ok(())
    }

    fn check_depth(&self, value: &Value) -> Result<()> {
        let depth = value.depth();
        if depth > self.config.max_depth {
            log::debug!(
                "[abi] nesting depth {} exceeds {}",
                depth,
                self.config.max_depth
            );
            return Err(AbiError::DepthExceeded {
                max: self.config.max_depth,
            });
        }
        Ok(())
    }

    /// Append `[tag][payload]` to `out`, returning the bytes written.
    ///
    /// Values larger than the maximum object size or nested deeper than the
    /// depth limit are refused, since no peer with the same limits could
    /// decode them. This also applies to values built by hand.
    pub fn encode(&self, value: &Value, out: &mut Vec<u8>) -> Result<usize> {
        self.check_depth(value)?;
        let size = value.size_hint();
        self.check_encoded_size(size)?;
        out.reserve(size);
        value.encode_abi(out)
    }

    pub fn to_bytes(&self, value: &Value) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.encode(value, &mut out)?;
        Ok(out)
    }

    /// Decode one value from the front of `src` with the configured budget.
    ///
    /// Returns the value and the number of bytes consumed; trailing input is
    /// left for the caller.
    pub fn decode(&self, src: &[u8]) -> Result<(Value, usize)> {
        self.decode_with_budget(src, self.config.max_bytes)
    }

    /// Like [`Codec::decode`] with an explicit byte budget.
    pub fn decode_with_budget(&self, src: &[u8], max_bytes: usize) -> Result<(Value, usize)> {
        let mut cursor = Cursor::new(src);
        let mut budget = Budget::new(max_bytes).with_max_depth(self.config.max_depth);
        let value = self.decode_value(&mut cursor, &mut budget)?;
        Ok((value, cursor.offset()))
    }

    /// Decode one tagged value at the cursor, charging `budget`.
    ///
    /// This is the recursion point for abstract kinds and extension decoders.
    pub fn decode_value(&self, src: &mut Cursor<'_>, budget: &mut Budget) -> Result<Value> {
        Value::decode_abi(src, budget, self)
    }

    /// Decode exactly one value; bytes left over are an error.
    pub fn from_bytes(&self, src: &[u8]) -> Result<Value> {
        let (value, consumed) = self.decode(src)?;
        if consumed != src.len() {
            return Err(AbiError::TrailingBytes(src.len() - consumed));
        }
        Ok(value)
    }

    /// Serialize to the `[name, payload]` JSON form.
    pub fn encode_json(&self, value: &Value) -> Result<Vec<u8>> {
        self.check_depth(value)?;
        let out = serde_json::to_vec(&value.to_json())?;
        self.check_encoded_size(out.len())?;
        Ok(out)
    }

    /// Parse a `[name, payload]` JSON document.
    pub fn decode_json(&self, src: &[u8]) -> Result<Value> {
        if src.len() > self.config.max_bytes {
            log::debug!(
                "[abi] JSON input of {} bytes exceeds max object size {}",
                src.len(),
                self.config.max_bytes
            );
            return Err(AbiError::BudgetExceeded {
                needed: src.len(),
                remaining: self.config.max_bytes,
            });
        }
        let document = json::parse(src)?;
        self.value_from_json(&document)
    }

    /// Convert a parsed `[name, payload]` tree, enforcing the depth limit.
    pub(crate) fn value_from_json(&self, json: &JsonValue) -> Result<Value> {
        let value = Value::from_json(json, self)?;
        self.check_depth(&value)?;
        Ok(value)
    }
}

// ---------------------------------------------------------------------------
// Default codec
// ---------------------------------------------------------------------------

pub(crate) fn default_codec() -> &'static Codec {
    static DEFAULT: OnceLock<Codec> = OnceLock::new();
    DEFAULT.get_or_init(Codec::default)
}

/// Encode with the default codec, appending to `out`.
pub fn encode(value: &Value, out: &mut Vec<u8>) -> Result<usize> {
    default_codec().encode(value, out)
}

pub fn to_bytes(value: &Value) -> Result<Vec<u8>> {
    default_codec().to_bytes(value)
}

/// Decode one value from the front of `src` under a `max_bytes` budget.
pub fn decode(src: &[u8], max_bytes: usize) -> Result<(Value, usize)> {
    default_codec().decode_with_budget(src, max_bytes)
}

pub fn from_bytes(src: &[u8]) -> Result<Value> {
    default_codec().from_bytes(src)
}

pub fn encode_json(value: &Value) -> Result<Vec<u8>> {
    default_codec().encode_json(value)
}

pub fn decode_json(src: &[u8]) -> Result<Value> {
    default_codec().decode_json(src)
}

/// Encoded size of `value` including its tag.
pub fn size_hint(value: &Value) -> usize {
    value.size_hint()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;
    use crate::types::{Bytes, List};

    #[test]
    fn test_decode_reports_consumed_bytes() {
        let mut buf = to_bytes(&Value::from(7u32)).expect("encode");
        buf.extend_from_slice(&[0xEE, 0xEE]);
        let (value, consumed) = decode(&buf, 64).expect("decode");
        assert_eq!(value, Value::from(7u32));
        assert_eq!(consumed, 6);

        assert!(matches!(from_bytes(&buf), Err(AbiError::TrailingBytes(2))));
    }

    #[test]
    fn test_encode_refuses_oversize_value() {
        let codec = Codec::new(AbiConfig::with_max_bytes(16));
        let value = Value::from(Bytes::new(vec![0u8; 32]));
        let err = codec.to_bytes(&value).expect_err("too large");
        assert_eq!(err.class(), ErrorClass::BudgetExceeded);

        let small = Value::from(Bytes::new(vec![0u8; 10]));
        assert_eq!(codec.to_bytes(&small).expect("fits").len(), 16);
    }

    #[test]
    fn test_depth_limit_applies_to_every_path() {
        let codec = Codec::new(AbiConfig::default().with_max_depth(2));
        let mut inner = List::new();
        inner.append(List::new());
        let ok = Value::from(inner.clone());
        let mut outer = List::new();
        outer.append(inner);
        let deep = Value::from(outer);

        let bytes = codec.to_bytes(&ok).expect("depth 2");
        assert_eq!(codec.from_bytes(&bytes).expect("decode"), ok);
        let text = codec.encode_json(&ok).expect("depth 2");
        assert_eq!(codec.decode_json(&text).expect("decode"), ok);

        assert!(matches!(codec.to_bytes(&deep), Err(AbiError::DepthExceeded { max: 2 })));
        assert!(matches!(codec.encode_json(&deep), Err(AbiError::DepthExceeded { max: 2 })));

        let bytes = to_bytes(&deep).expect("default codec");
        assert!(matches!(codec.from_bytes(&bytes), Err(AbiError::DepthExceeded { max: 2 })));
        let text = encode_json(&deep).expect("default codec");
        assert!(matches!(codec.decode_json(&text), Err(AbiError::DepthExceeded { max: 2 })));
    }

    #[test]
    fn test_decode_json_rejects_oversize_document() {
        let codec = Codec::new(AbiConfig::with_max_bytes(8));
        assert!(matches!(
            codec.decode_json(br#"["u64", "1234567"]"#),
            Err(AbiError::BudgetExceeded { needed: 18, remaining: 8 })
        ));
    }

    #[test]
    fn test_json_roundtrip_through_bytes() {
        let mut list = List::new();
        list.append(1u8);
        list.append(vec![1u8, 2, 3]);
        let value = Value::from(list);
        let text = encode_json(&value).expect("encode");
        assert_eq!(
            std::str::from_utf8(&text).expect("utf8"),
            r#"["list",[["u8","1"],["b","AQID"]]]"#
        );
        assert_eq!(decode_json(&text).expect("decode"), value);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            from_bytes(&[]),
            Err(AbiError::BudgetExceeded { .. }) | Err(AbiError::UnexpectedEof { .. })
        ));
        assert!(matches!(decode_json(b""), Err(AbiError::Json(_))));
    }

    #[test]
    fn test_size_hint_matches_encoding() {
        let value = Value::from("hello");
        assert_eq!(size_hint(&value), to_bytes(&value).expect("encode").len());
    }
}
