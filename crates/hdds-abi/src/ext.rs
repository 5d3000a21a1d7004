// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Extension kinds.
//!
//! Tags at or above [`EXT_TAG_BASE`] belong to externally defined kinds
//! (addresses, UTXOs, transaction envelopes, ...). The core never interprets
//! them; a [`Codec`] only decodes them once the matching [`ExtensionKind`] has
//! been installed in its [`ExtensionRegistry`]. Without one, an extension tag
//! is an ordinary "unrecognized type" failure.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = ExtensionRegistry::new();
//! registry.register(AddressKind)?;
//! let codec = Codec::with_extensions(AbiConfig::default(), registry);
//! let value = codec.decode_json(br#"["ethaddr", "0x..."]"#)?;
//! ```

use crate::codec::Codec;
use crate::error::{AbiError, Result};
use crate::registry::{is_extension_tag, Kind};
use crate::ser::{json, Budget, Cursor};
use serde_json::{Map, Value as JsonValue};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Reserved namespaces
// ---------------------------------------------------------------------------

/// First tag of the extension range.
pub const EXT_TAG_BASE: u16 = 1000;

/// Tags per namespace; each namespace owns `base + 1 ..= base + 99`.
pub const NAMESPACE_SIZE: u16 = 100;

/// Sentinel for an unrecognised extension. Never registrable.
pub const EXT_UNRECOGNIZED: u16 = 1000;
pub const EXT_CRYPTO: u16 = 1100;
pub const EXT_RENVM: u16 = 1200;
pub const EXT_ETHEREUM: u16 = 1300;
pub const EXT_BITCOIN: u16 = 1400;
pub const EXT_ZCASH: u16 = 1500;
pub const EXT_BCASH: u16 = 1600;
pub const EXT_LITECOIN: u16 = 1700;

/// Base tag of the namespace containing `tag`, `None` below the extension range.
pub const fn namespace_of(tag: u16) -> Option<u16> {
    if !is_extension_tag(tag) {
        return None;
    }
    Some(tag - tag % NAMESPACE_SIZE)
}

// ---------------------------------------------------------------------------
// Extension values
// ---------------------------------------------------------------------------

/// A decoded value of an extension kind.
pub trait Extension: fmt::Debug + Send + Sync + 'static {
    /// Wire tag (>= [`EXT_TAG_BASE`]).
    fn tag(&self) -> u16;

    /// JSON type name.
    fn name(&self) -> &str;

    /// Payload bytes [`Extension::encode_abi`] will write.
    fn size_hint(&self) -> usize;

    /// Append the binary payload (without the tag).
    fn encode_abi(&self, dst: &mut Vec<u8>) -> Result<usize>;

    /// JSON payload (without the `[name, ...]` envelope).
    fn to_json(&self) -> JsonValue;

    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to an extension value, stored in [`crate::Value::Ext`].
///
/// Two handles are equal when their tags and encoded payloads are equal.
#[derive(Debug, Clone)]
pub struct ExtValue(Arc<dyn Extension>);

impl ExtValue {
    pub fn new<E: Extension>(value: E) -> Self {
        Self(Arc::new(value))
    }

    pub fn tag(&self) -> u16 {
        self.0.tag()
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn get(&self) -> &dyn Extension {
        &*self.0
    }

    /// Borrow the concrete extension type, if it is `E`.
    pub fn downcast_ref<E: Extension>(&self) -> Option<&E> {
        self.0.as_any().downcast_ref::<E>()
    }

    fn payload(&self) -> Option<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.0.size_hint());
        self.0.encode_abi(&mut buf).ok().map(|_| buf)
    }
}

impl PartialEq for ExtValue {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        self.tag() == other.tag()
            && matches!((self.payload(), other.payload()), (Some(a), Some(b)) if a == b)
    }
}

impl Eq for ExtValue {}

impl fmt::Display for ExtValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.0.to_json())
    }
}

// ---------------------------------------------------------------------------
// Extension decoders
// ---------------------------------------------------------------------------

/// Decoder for one extension tag.
pub trait ExtensionKind: Send + Sync {
    fn tag(&self) -> u16;

    fn name(&self) -> &str;

    /// Decode the binary payload following the tag.
    ///
    /// Implementations must charge `budget` before reading, as core kinds do.
    fn decode_abi(&self, src: &mut Cursor<'_>, budget: &mut Budget, codec: &Codec)
        -> Result<ExtValue>;

    /// Decode the JSON payload following the name.
    fn from_json(&self, payload: &JsonValue, codec: &Codec) -> Result<ExtValue>;
}

/// Tag- and name-indexed set of installed extension decoders.
#[derive(Clone, Default)]
pub struct ExtensionRegistry {
    by_tag: HashMap<u16, Arc<dyn ExtensionKind>>,
    by_name: HashMap<String, u16>,
}

impl ExtensionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a decoder.
    ///
    /// Fails for tags below the extension range (and the sentinel), for a tag
    /// or name already taken, and for names shadowing a core kind.
    pub fn register<K: ExtensionKind + 'static>(&mut self, kind: K) -> Result<()> {
        let tag = kind.tag();
        let name = kind.name().to_string();

        if !is_extension_tag(tag) || tag == EXT_UNRECOGNIZED {
            return Err(AbiError::ReservedTag(tag));
        }
        if self.by_tag.contains_key(&tag)
            || self.by_name.contains_key(&name)
            || Kind::from_name(&name).is_some()
        {
            return Err(AbiError::DuplicateExtension { tag, name });
        }

        log::debug!("[abi] registered extension tag={} name={:?}", tag, name);
        self.by_name.insert(name, tag);
        self.by_tag.insert(tag, Arc::new(kind));
        Ok(())
    }

    pub fn lookup(&self, tag: u16) -> Option<&dyn ExtensionKind> {
        self.by_tag.get(&tag).map(|kind| &**kind)
    }

    pub fn lookup_name(&self, name: &str) -> Option<&dyn ExtensionKind> {
        self.by_name.get(name).and_then(|tag| self.lookup(*tag))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }

    /// Registered tags, ascending.
    pub fn tags(&self) -> Vec<u16> {
        let mut tags: Vec<u16> = self.by_tag.keys().copied().collect();
        tags.sort_unstable();
        tags
    }
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}

/// Check that an object payload has exactly the `required` keys.
///
/// Duplicate keys never reach this point: [`crate::ser::json::parse`] rejects
/// them while reading the document.
pub fn expect_fields<'a>(
    payload: &'a JsonValue,
    context: &'static str,
    required: &[&str],
) -> Result<&'a Map<String, JsonValue>> {
    let object = json::as_object(payload, context)?;
    if let Some(missing) = required.iter().find(|name| !object.contains_key(**name)) {
        return Err(AbiError::MissingField((*missing).to_string()));
    }
    if let Some(unknown) = object.keys().find(|key| !required.contains(&key.as_str())) {
        return Err(AbiError::UnknownField(unknown.clone()));
    }
    Ok(object)
}
