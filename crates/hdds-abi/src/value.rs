// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Tagged value and polymorphic dispatch.
//!
//! [`Value`] is the closed sum of every core kind plus [`Value::Ext`] for
//! registered extensions. Its [`AbiEncode`]/[`AbiDecode`] impls produce and
//! consume the self-describing form: `[tag][payload]` in binary and
//! `[name, payload]` in JSON.

use crate::codec::{self, Codec};
use crate::error::{AbiError, Result};
use crate::ext::{Extension, ExtValue};
use crate::registry::{Kind, TagClass, TAG_SIZE};
use crate::ser::{json, AbiDecode, AbiEncode, Budget, Cursor};
use crate::types::{
    Bool, Bytes, Bytes32, Bytes65, List, Record, Str, U128, U16, U256, U32, U64, U8,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;

/// Any encodable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(Bool),
    U8(U8),
    U16(U16),
    U32(U32),
    U64(U64),
    U128(U128),
    U256(U256),
    String(Str),
    Bytes(Bytes),
    Bytes32(Bytes32),
    Bytes65(Bytes65),
    List(List),
    Record(Record),
    Ext(ExtValue),
}

/// Apply `$body` to the inner value of every core variant.
macro_rules! with_core {
    ($value:expr, $inner:ident => $body:expr, $ext:ident => $ext_body:expr) => {
        match $value {
            Value::Bool($inner) => $body,
            Value::U8($inner) => $body,
            Value::U16($inner) => $body,
            Value::U32($inner) => $body,
            Value::U64($inner) => $body,
            Value::U128($inner) => $body,
            Value::U256($inner) => $body,
            Value::String($inner) => $body,
            Value::Bytes($inner) => $body,
            Value::Bytes32($inner) => $body,
            Value::Bytes65($inner) => $body,
            Value::List($inner) => $body,
            Value::Record($inner) => $body,
            Value::Ext($ext) => $ext_body,
        }
    };
}

impl Value {
    /// Core kind, `None` for extension values.
    pub fn kind(&self) -> Option<Kind> {
        Some(match self {
            Value::Bool(_) => Kind::Bool,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::U128(_) => Kind::U128,
            Value::U256(_) => Kind::U256,
            Value::String(_) => Kind::String,
            Value::Bytes(_) => Kind::Bytes,
            Value::Bytes32(_) => Kind::Bytes32,
            Value::Bytes65(_) => Kind::Bytes65,
            Value::List(_) => Kind::List,
            Value::Record(_) => Kind::Record,
            Value::Ext(_) => return None,
        })
    }

    /// Wire tag.
    pub fn tag(&self) -> u16 {
        match self {
            Value::Ext(ext) => ext.tag(),
            _ => self.kind().map_or(0, Kind::tag),
        }
    }

    /// JSON type name.
    pub fn name(&self) -> &str {
        match self {
            Value::Ext(ext) => ext.name(),
            _ => self.kind().map_or("", Kind::name),
        }
    }

    /// Number of nested lists and records, 0 for leaf values.
    ///
    /// Extension values count as leaves.
    pub fn depth(&self) -> usize {
        match self {
            Value::List(list) => list.depth(),
            Value::Record(record) => record.depth(),
            _ => 0,
        }
    }

    /// Size of the payload alone, without the tag.
    pub fn payload_size_hint(&self) -> usize {
        with_core!(self, v => v.size_hint(), e => e.get().size_hint())
    }

    /// JSON payload alone, without the `[name, ...]` envelope.
    pub fn payload_to_json(&self) -> JsonValue {
        with_core!(self, v => v.to_json(), e => e.get().to_json())
    }

    /// Decode the payload of core kind `kind`.
    pub(crate) fn decode_payload(
        kind: Kind,
        src: &mut Cursor<'_>,
        budget: &mut Budget,
        codec: &Codec,
    ) -> Result<Self> {
        Ok(match kind {
            Kind::Bool => Value::Bool(Bool::decode_abi(src, budget, codec)?),
            Kind::U8 => Value::U8(U8::decode_abi(src, budget, codec)?),
            Kind::U16 => Value::U16(U16::decode_abi(src, budget, codec)?),
            Kind::U32 => Value::U32(U32::decode_abi(src, budget, codec)?),
            Kind::U64 => Value::U64(U64::decode_abi(src, budget, codec)?),
            Kind::U128 => Value::U128(U128::decode_abi(src, budget, codec)?),
            Kind::U256 => Value::U256(U256::decode_abi(src, budget, codec)?),
            Kind::String => Value::String(Str::decode_abi(src, budget, codec)?),
            Kind::Bytes => Value::Bytes(Bytes::decode_abi(src, budget, codec)?),
            Kind::Bytes32 => Value::Bytes32(Bytes32::decode_abi(src, budget, codec)?),
            Kind::Bytes65 => Value::Bytes65(Bytes65::decode_abi(src, budget, codec)?),
            Kind::List => Value::List(List::decode_abi(src, budget, codec)?),
            Kind::Record => Value::Record(Record::decode_abi(src, budget, codec)?),
        })
    }

    pub(crate) fn payload_from_json(kind: Kind, payload: &JsonValue, codec: &Codec) -> Result<Self> {
        Ok(match kind {
            Kind::Bool => Value::Bool(Bool::from_json(payload, codec)?),
            Kind::U8 => Value::U8(U8::from_json(payload, codec)?),
            Kind::U16 => Value::U16(U16::from_json(payload, codec)?),
            Kind::U32 => Value::U32(U32::from_json(payload, codec)?),
            Kind::U64 => Value::U64(U64::from_json(payload, codec)?),
            Kind::U128 => Value::U128(U128::from_json(payload, codec)?),
            Kind::U256 => Value::U256(U256::from_json(payload, codec)?),
            Kind::String => Value::String(Str::from_json(payload, codec)?),
            Kind::Bytes => Value::Bytes(Bytes::from_json(payload, codec)?),
            Kind::Bytes32 => Value::Bytes32(Bytes32::from_json(payload, codec)?),
            Kind::Bytes65 => Value::Bytes65(Bytes65::from_json(payload, codec)?),
            Kind::List => Value::List(List::from_json(payload, codec)?),
            Kind::Record => Value::Record(Record::from_json(payload, codec)?),
        })
    }

    /// Borrow an extension value as its concrete type.
    pub fn as_ext<E: Extension>(&self) -> Option<&E> {
        match self {
            Value::Ext(ext) => ext.downcast_ref(),
            _ => None,
        }
    }
}

impl AbiEncode for Value {
    fn size_hint(&self) -> usize {
        TAG_SIZE + self.payload_size_hint()
    }

    fn encode_abi(&self, dst: &mut Vec<u8>) -> Result<usize> {
        dst.extend_from_slice(&self.tag().to_be_bytes());
        let payload = with_core!(self, v => v.encode_abi(dst)?, e => e.get().encode_abi(dst)?);
        Ok(TAG_SIZE + payload)
    }

    fn to_json(&self) -> JsonValue {
        JsonValue::Array(vec![
            JsonValue::String(self.name().to_string()),
            self.payload_to_json(),
        ])
    }
}

impl AbiDecode for Value {
    fn decode_abi(src: &mut Cursor<'_>, budget: &mut Budget, codec: &Codec) -> Result<Self> {
        budget.consume(TAG_SIZE)?;
        let tag = src.read_u16_be()?;
        log::trace!("[abi] decode tag={} at offset {}", tag, src.offset() - TAG_SIZE);

        match TagClass::of(tag) {
            TagClass::Extension => match codec.extensions().lookup(tag) {
                Some(ext) => Ok(Value::Ext(ext.decode_abi(src, budget, codec)?)),
                None => {
                    log::debug!("[abi] no decoder installed for extension tag {}", tag);
                    Err(AbiError::UnrecognizedType { tag })
                }
            },
            class => match Kind::from_tag(tag) {
                Some(kind) => Value::decode_payload(kind, src, budget, codec),
                None => {
                    log::debug!("[abi] unassigned {:?} tag {}", class, tag);
                    Err(AbiError::UnrecognizedType { tag })
                }
            },
        }
    }

    fn from_json(json: &JsonValue, codec: &Codec) -> Result<Self> {
        let pair = json::as_array(json, "value")?;
        let [name, payload] = pair else {
            return Err(AbiError::UnexpectedJson {
                context: "value",
                expected: "[name, payload] pair",
            });
        };
        let name = json::as_str(name, "value name")?;

        if let Some(kind) = Kind::from_name(name) {
            return Value::payload_from_json(kind, payload, codec);
        }
        match codec.extensions().lookup_name(name) {
            Some(ext) => Ok(Value::Ext(ext.from_json(payload, codec)?)),
            None => {
                log::debug!("[abi] unrecognized type name {:?}", name);
                Err(AbiError::UnrecognizedTypeName(name.to_string()))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        with_core!(self, v => fmt::Display::fmt(v, f), e => fmt::Display::fmt(e, f))
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    /// Core kinds only; extension names need a [`Codec`] that knows them.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let json = JsonValue::deserialize(deserializer)?;
        codec::default_codec()
            .value_from_json(&json)
            .map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Conversions and accessors
// ---------------------------------------------------------------------------

macro_rules! impl_variant {
    ($($variant:ident($ty:ty) => $as:ident, $as_mut:ident;)+) => {
        $(
            impl From<$ty> for Value {
                fn from(x: $ty) -> Self {
                    Value::$variant(x)
                }
            }

            impl TryFrom<Value> for $ty {
                type Error = Value;

                /// Hands the value back unchanged if it is another kind.
                fn try_from(value: Value) -> std::result::Result<Self, Value> {
                    match value {
                        Value::$variant(x) => Ok(x),
                        other => Err(other),
                    }
                }
            }

            impl Value {
                pub fn $as(&self) -> Option<&$ty> {
                    match self {
                        Value::$variant(x) => Some(x),
                        _ => None,
                    }
                }

                pub fn $as_mut(&mut self) -> Option<&mut $ty> {
                    match self {
                        Value::$variant(x) => Some(x),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_variant! {
    Bool(Bool) => as_bool, as_bool_mut;
    U8(U8) => as_u8, as_u8_mut;
    U16(U16) => as_u16, as_u16_mut;
    U32(U32) => as_u32, as_u32_mut;
    U64(U64) => as_u64, as_u64_mut;
    U128(U128) => as_u128, as_u128_mut;
    U256(U256) => as_u256, as_u256_mut;
    String(Str) => as_str, as_str_mut;
    Bytes(Bytes) => as_bytes, as_bytes_mut;
    Bytes32(Bytes32) => as_bytes32, as_bytes32_mut;
    Bytes65(Bytes65) => as_bytes65, as_bytes65_mut;
    List(List) => as_list, as_list_mut;
    Record(Record) => as_record, as_record_mut;
    Ext(ExtValue) => as_ext_value, as_ext_value_mut;
}

macro_rules! impl_from_native {
    ($($native:ty => $variant:ident($ty:ident)),+ $(,)?) => {
        $(
            impl From<$native> for Value {
                fn from(x: $native) -> Self {
                    Value::$variant($ty::from(x))
                }
            }
        )+
    };
}

impl_from_native! {
    bool => Bool(Bool),
    u8 => U8(U8),
    u16 => U16(U16),
    u32 => U32(U32),
    u64 => U64(U64),
    u128 => U128(U128),
    String => String(Str),
    &str => String(Str),
    Vec<u8> => Bytes(Bytes),
    [u8; 32] => Bytes32(Bytes32),
    [u8; 65] => Bytes65(Bytes65),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        let mut inner = List::new();
        inner.append(1u8);
        inner.append("x");
        let mut record = Record::new();
        record.set("flag", true);
        record.set("items", inner);
        record.set("big", U256::max());
        record
    }

    #[test]
    fn test_tag_and_name() {
        assert_eq!(Value::from(7u16).tag(), 13);
        assert_eq!(Value::from("s").name(), "str");
        assert_eq!(Value::from(Record::new()).kind(), Some(Kind::Record));
        assert_eq!(Value::from(vec![1u8]).tag(), Kind::Bytes.tag());
    }

    #[test]
    fn test_tagged_binary_form() {
        let mut buf = Vec::new();
        let n = Value::from(0x0102u16).encode_abi(&mut buf).expect("encode");
        assert_eq!(n, 4);
        assert_eq!(buf, [0, 13, 1, 2]);
    }

    #[test]
    fn test_binary_roundtrip_preserves_tag() {
        let value = Value::from(sample_record());
        let mut buf = Vec::new();
        value.encode_abi(&mut buf).expect("encode");
        assert_eq!(buf.len(), value.size_hint());

        let mut cursor = Cursor::new(&buf);
        let mut budget = Budget::new(buf.len());
        let decoded = Value::decode_abi(&mut cursor, &mut budget, &Codec::default()).expect("decode");
        assert_eq!(decoded.tag(), value.tag());
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_unknown_tag_consumes_only_tag() {
        let buf = [0xFF, 0xFF, 0, 0, 0, 0];
        let mut cursor = Cursor::new(&buf);
        let mut budget = Budget::new(64);
        assert!(matches!(
            Value::decode_abi(&mut cursor, &mut budget, &Codec::default()),
            Err(AbiError::UnrecognizedType { tag: 0xFFFF })
        ));
        assert_eq!(cursor.offset(), 2);
        assert_eq!(budget.remaining(), 62);
    }

    #[test]
    fn test_unassigned_tags_in_every_range() {
        let codec = Codec::default();
        for tag in [0u16, 5, 18, 101, 999, 1000, 1402] {
            let buf = tag.to_be_bytes();
            let mut budget = Budget::new(64);
            assert!(
                matches!(
                    Value::decode_abi(&mut Cursor::new(&buf), &mut budget, &codec),
                    Err(AbiError::UnrecognizedType { tag: t }) if t == tag
                ),
                "tag={}",
                tag
            );
        }
    }

    #[test]
    fn test_depth() {
        assert_eq!(Value::from(1u8).depth(), 0);
        assert_eq!(Value::from(List::new()).depth(), 1);
        let mut outer = Record::new();
        outer.set("leaf", 1u8);
        outer.set("nested", sample_record());
        assert_eq!(Value::from(outer).depth(), 3);
    }

    #[test]
    fn test_json_envelope() {
        let codec = Codec::default();
        assert_eq!(Value::from(5u8).to_json(), serde_json::json!(["u8", "5"]));
        for bad in [
            serde_json::json!(["u8"]),
            serde_json::json!(["u8", "1", "2"]),
            serde_json::json!({"u8": "1"}),
            serde_json::json!([8, "1"]),
        ] {
            assert!(matches!(
                Value::from_json(&bad, &codec),
                Err(AbiError::UnexpectedJson { .. })
            ));
        }
        assert!(matches!(
            Value::from_json(&serde_json::json!(["u512", "1"]), &codec),
            Err(AbiError::UnrecognizedTypeName(name)) if name == "u512"
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let value = Value::from(sample_record());
        let text = serde_json::to_string(&value).expect("serialize");
        let back: Value = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, value);
    }

    #[test]
    fn test_accessors_and_conversions() {
        let mut value = Value::from(3u64);
        assert_eq!(value.as_u64(), Some(&U64::new(3)));
        assert_eq!(value.as_u8(), None);
        if let Some(x) = value.as_u64_mut() {
            x.try_add_assign(U64::new(1)).expect("add");
        }
        assert_eq!(U64::try_from(value).expect("u64"), U64::new(4));
        assert!(Str::try_from(Value::from(1u8)).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(U256::from(42u64)).to_string(), "42");
        assert_eq!(Value::from(vec![0u8, 0, 0]).to_string(), "AAAA");
    }
}
