// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON parsing helpers.
//!
//! `serde_json::Value` silently keeps the last of two identical object keys.
//! Records and extension payloads must reject duplicates instead, so the
//! document is built with [`UniqueKeys`], which fails on the first repeated
//! key while it constructs the tree.

use crate::error::{AbiError, Result};
use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value as JsonValue};
use std::cell::RefCell;
use std::fmt;

/// Parse a JSON document, rejecting objects with duplicate keys.
pub fn parse(src: &[u8]) -> Result<JsonValue> {
    let duplicate = RefCell::new(None);
    let mut de = serde_json::Deserializer::from_slice(src);
    let parsed = UniqueKeys {
        duplicate: &duplicate,
    }
    .deserialize(&mut de);
    let json = match parsed {
        Ok(json) => json,
        Err(err) => {
            return Err(match duplicate.into_inner() {
                Some(name) => AbiError::DuplicateField(name),
                None => AbiError::Json(err),
            })
        }
    };
    de.end()?;
    Ok(json)
}

/// Builds any JSON value, failing on the first object with a repeated key.
#[derive(Clone, Copy)]
struct UniqueKeys<'a> {
    duplicate: &'a RefCell<Option<String>>,
}

impl<'de> DeserializeSeed<'de> for UniqueKeys<'_> {
    type Value = JsonValue;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<JsonValue, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for UniqueKeys<'_> {
    type Value = JsonValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<JsonValue, E> {
        Ok(Number::from_f64(v).map_or(JsonValue::Null, JsonValue::Number))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<JsonValue, E> {
        Ok(JsonValue::Null)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<JsonValue, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element_seed(self)? {
            items.push(item);
        }
        Ok(JsonValue::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<JsonValue, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut object = Map::new();
        while let Some(key) = map.next_key::<String>()? {
            if object.contains_key(&key) {
                let msg = format!("duplicate field `{}`", key);
                *self.duplicate.borrow_mut() = Some(key);
                return Err(de::Error::custom(msg));
            }
            let value = map.next_value_seed(self)?;
            object.insert(key, value);
        }
        Ok(JsonValue::Object(object))
    }
}

pub fn as_str<'a>(json: &'a JsonValue, context: &'static str) -> Result<&'a str> {
    json.as_str().ok_or(AbiError::UnexpectedJson {
        context,
        expected: "string",
    })
}

pub fn as_array<'a>(json: &'a JsonValue, context: &'static str) -> Result<&'a [JsonValue]> {
    json.as_array()
        .map(Vec::as_slice)
        .ok_or(AbiError::UnexpectedJson {
            context,
            expected: "array",
        })
}

pub fn as_object<'a>(
    json: &'a JsonValue,
    context: &'static str,
) -> Result<&'a Map<String, JsonValue>> {
    json.as_object().ok_or(AbiError::UnexpectedJson {
        context,
        expected: "object",
    })
}
