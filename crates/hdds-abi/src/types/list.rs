// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Ordered sequence of tagged values.
//!
//! Binary: u32 LE element count, then each element as `[tag][payload]`.
//! JSON: array of `[name, payload]` pairs.

use crate::codec::Codec;
use crate::error::Result;
use crate::registry::{Kind, TAG_SIZE};
use crate::ser::{json, read_count, write_count, AbiDecode, AbiEncode, Budget, Cursor};
use crate::value::Value;
use serde_json::Value as JsonValue;
use std::fmt;

/// Heterogeneous, insertion-ordered list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct List(Vec<Value>);

impl List {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn append(&mut self, value: impl Into<Value>) {
        self.0.push(value.into());
    }

    pub fn extend<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        self.0.extend(values.into_iter().map(Into::into));
    }

    /// Insert at `index`, shifting later elements right.
    ///
    /// An index past the end appends.
    pub fn insert(&mut self, index: usize, value: impl Into<Value>) {
        let index = index.min(self.0.len());
        self.0.insert(index, value.into());
    }

    /// Remove and return the element at `index`, or `None` if out of range.
    pub fn remove(&mut self, index: usize) -> Option<Value> {
        (index < self.0.len()).then(|| self.0.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.0.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// Nesting depth: 1 plus the deepest element.
    pub fn depth(&self) -> usize {
        1 + self.0.iter().map(Value::depth).max().unwrap_or(0)
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for List {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl<V: Into<Value>> FromIterator<V> for List {
    fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str("]")
    }
}

impl AbiEncode for List {
    fn size_hint(&self) -> usize {
        self.0
            .iter()
            .fold(crate::ser::LEN_PREFIX_SIZE, |acc, v| acc + v.size_hint())
    }

    fn encode_abi(&self, dst: &mut Vec<u8>) -> Result<usize> {
        let mut written = write_count(dst, self.0.len())?;
        for value in &self.0 {
            written += value.encode_abi(dst)?;
        }
        Ok(written)
    }

    fn to_json(&self) -> JsonValue {
        JsonValue::Array(self.0.iter().map(AbiEncode::to_json).collect())
    }
}

impl AbiDecode for List {
    fn decode_abi(src: &mut Cursor<'_>, budget: &mut Budget, codec: &Codec) -> Result<Self> {
        budget.enter()?;
        let count = read_count(src, budget)?;
        // Each element needs at least a tag, so the input bounds the capacity.
        let mut values = Vec::with_capacity(count.min(src.remaining() / TAG_SIZE));
        for _ in 0..count {
            values.push(Value::decode_abi(src, budget, codec)?);
        }
        budget.leave();
        Ok(Self(values))
    }

    fn from_json(json: &JsonValue, codec: &Codec) -> Result<Self> {
        json::as_array(json, Kind::List.name())?
            .iter()
            .map(|item| Value::from_json(item, codec))
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }
}
