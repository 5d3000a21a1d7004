// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Name-sorted mapping of tagged values.
//!
//! Fields are kept sorted by name at all times, so lookups are binary searches
//! and the binary encoding is deterministic.
//!
//! Binary: u32 LE field count, then per field a u32 BE name length, the UTF-8
//! name and the value as `[tag][payload]`.
//! JSON: object mapping each name to its `[name, payload]` pair.

use crate::codec::Codec;
use crate::error::{AbiError, Result};
use crate::registry::{Kind, TAG_SIZE};
use crate::ser::{
    json, prefix_len, read_count, write_count, AbiDecode, AbiEncode, Budget, Cursor,
    LEN_PREFIX_SIZE,
};
use crate::value::Value;
use crate::MAX_FIELD_NAME_LEN;
use serde_json::{Map, Value as JsonValue};
use std::fmt;

/// Sorted, unique-keyed record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record(Vec<(String, Value)>);

impl Record {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    fn position(&self, name: &str) -> std::result::Result<usize, usize> {
        self.0.binary_search_by(|(field, _)| field.as_str().cmp(name))
    }

    /// Insert or replace a field, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Ok(i) => Some(std::mem::replace(&mut self.0[i].1, value)),
            Err(i) => {
                self.0.insert(i, (name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.position(name).ok().map(|i| &self.0[i].1)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        match self.position(name) {
            Ok(i) => Some(&mut self.0[i].1),
            Err(_) => None,
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.position(name).ok().map(|i| self.0.remove(i).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Nesting depth: 1 plus the deepest field value.
    pub fn depth(&self) -> usize {
        1 + self.0.iter().map(|(_, v)| v.depth()).max().unwrap_or(0)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(name, _)| name.as_str())
    }

    /// Insert a decoded field, rejecting a name that is already present.
    fn insert_unique(&mut self, name: String, value: Value) -> Result<()> {
        match self.position(&name) {
            Ok(_) => {
                log::debug!("[abi] duplicate record field {:?}", name);
                Err(AbiError::DuplicateField(name))
            }
            Err(i) => {
                self.0.insert(i, (name, value));
                Ok(())
            }
        }
    }
}

fn check_name_len(name: &str) -> Result<()> {
    if name.len() > MAX_FIELD_NAME_LEN {
        log::debug!(
            "[abi] field name of {} bytes exceeds max {}",
            name.len(),
            MAX_FIELD_NAME_LEN
        );
        return Err(AbiError::FieldNameTooLong {
            len: name.len(),
            max: MAX_FIELD_NAME_LEN,
        });
    }
    Ok(())
}

fn read_field_name(src: &mut Cursor<'_>, budget: &mut Budget) -> Result<String> {
    budget.consume(LEN_PREFIX_SIZE)?;
    let len = src.read_u32_be()? as usize;
    if len > MAX_FIELD_NAME_LEN {
        log::debug!(
            "[abi] declared field name length {} exceeds max {}",
            len,
            MAX_FIELD_NAME_LEN
        );
        return Err(AbiError::FieldNameTooLong {
            len,
            max: MAX_FIELD_NAME_LEN,
        });
    }
    budget.consume(len)?;
    Ok(String::from_utf8(src.read_bytes(len)?.to_vec())?)
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Record {
    /// Later entries replace earlier ones with the same name.
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (name, value) in iter {
            record.set(name, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        f.write_str("}")
    }
}

impl AbiEncode for Record {
    fn size_hint(&self) -> usize {
        self.0.iter().fold(LEN_PREFIX_SIZE, |acc, (name, value)| {
            acc + LEN_PREFIX_SIZE + name.len() + value.size_hint()
        })
    }

    fn encode_abi(&self, dst: &mut Vec<u8>) -> Result<usize> {
        let mut written = write_count(dst, self.0.len())?;
        for (name, value) in &self.0 {
            check_name_len(name)?;
            dst.extend_from_slice(&prefix_len(name.len())?.to_be_bytes());
            dst.extend_from_slice(name.as_bytes());
            written += LEN_PREFIX_SIZE + name.len();
            written += value.encode_abi(dst)?;
        }
        Ok(written)
    }

    fn to_json(&self) -> JsonValue {
        let map: Map<String, JsonValue> = self
            .0
            .iter()
            .map(|(name, value)| (name.clone(), value.to_json()))
            .collect();
        JsonValue::Object(map)
    }
}

impl AbiDecode for Record {
    fn decode_abi(src: &mut Cursor<'_>, budget: &mut Budget, codec: &Codec) -> Result<Self> {
        budget.enter()?;
        let count = read_count(src, budget)?;
        // A field is at least a name prefix and a tag.
        let floor = LEN_PREFIX_SIZE + TAG_SIZE;
        let mut record = Record(Vec::with_capacity(count.min(src.remaining() / floor)));
        for _ in 0..count {
            let name = read_field_name(src, budget)?;
            let value = Value::decode_abi(src, budget, codec)?;
            record.insert_unique(name, value)?;
        }
        budget.leave();
        Ok(record)
    }

    fn from_json(json: &JsonValue, codec: &Codec) -> Result<Self> {
        let object = json::as_object(json, Kind::Record.name())?;
        let mut record = Record(Vec::with_capacity(object.len()));
        for (name, item) in object {
            check_name_len(name)?;
            record.insert_unique(name.clone(), Value::from_json(item, codec)?)?;
        }
        Ok(record)
    }
}
