// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type tag registry.
//!
//! Every encoded value is prefixed with a 16-bit tag so that a receiver can
//! reconstruct it without knowing its kind ahead of time. Tags are partitioned
//! by numeric range:
//!
//! | Range       | Class            |
//! |-------------|------------------|
//! | `0`         | nil (never valid)|
//! | `1..=10`    | byte kinds       |
//! | `11..=100`  | scalar kinds     |
//! | `101..=999` | abstract kinds   |
//! | `>= 1000`   | extensions       |
//!
//! Extension tags are not interpreted here; see [`crate::ext`].

use crate::error::{AbiError, Result};
use crate::ext::EXT_TAG_BASE;
use std::fmt;

/// Size of a tag on the wire (big-endian u16).
pub const TAG_SIZE: usize = 2;

/// Nil tag. Reserved, never decodes.
pub const TAG_NIL: u16 = 0;

/// Core value kinds and their wire tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum Kind {
    // --- Bytes (1-10) ---
    /// Length-prefixed UTF-8 text
    String = 1,
    /// Length-prefixed raw bytes
    Bytes = 2,
    /// Fixed 32-byte array
    Bytes32 = 3,
    /// Fixed 65-byte array
    Bytes65 = 4,

    // --- Scalars (11-100) ---
    Bool = 11,
    U8 = 12,
    U16 = 13,
    U32 = 14,
    U64 = 15,
    U128 = 16,
    U256 = 17,

    // --- Abstract (101-999) ---
    // 101 was a "maybe" kind that never shipped; it stays unassigned.
    /// Ordered sequence of tagged values
    List = 102,
    /// Name-sorted mapping of tagged values
    Record = 103,
}

/// Range class of a raw tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    Nil,
    Bytes,
    Scalar,
    Abstract,
    Extension,
}

impl TagClass {
    /// Classify a raw tag by numeric range.
    pub const fn of(tag: u16) -> Self {
        match tag {
            TAG_NIL => TagClass::Nil,
            1..=10 => TagClass::Bytes,
            11..=100 => TagClass::Scalar,
            101..=999 => TagClass::Abstract,
            _ => TagClass::Extension,
        }
    }
}

impl Kind {
    /// All core kinds, in tag order.
    pub const ALL: [Kind; 13] = [
        Kind::String,
        Kind::Bytes,
        Kind::Bytes32,
        Kind::Bytes65,
        Kind::Bool,
        Kind::U8,
        Kind::U16,
        Kind::U32,
        Kind::U64,
        Kind::U128,
        Kind::U256,
        Kind::List,
        Kind::Record,
    ];

    /// Wire tag of this kind.
    pub const fn tag(self) -> u16 {
        self as u16
    }

    /// Resolve a wire tag. Unknown tags (including the extension range) fail.
    pub const fn from_tag(tag: u16) -> Option<Kind> {
        match tag {
            1 => Some(Kind::String),
            2 => Some(Kind::Bytes),
            3 => Some(Kind::Bytes32),
            4 => Some(Kind::Bytes65),
            11 => Some(Kind::Bool),
            12 => Some(Kind::U8),
            13 => Some(Kind::U16),
            14 => Some(Kind::U32),
            15 => Some(Kind::U64),
            16 => Some(Kind::U128),
            17 => Some(Kind::U256),
            102 => Some(Kind::List),
            103 => Some(Kind::Record),
            _ => None,
        }
    }

    /// Like [`Kind::from_tag`], but returns the "unrecognized type" error.
    pub fn try_from_tag(tag: u16) -> Result<Kind> {
        Kind::from_tag(tag).ok_or(AbiError::UnrecognizedType { tag })
    }

    /// Canonical short name used in the JSON form.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::String => "str",
            Kind::Bytes => "b",
            Kind::Bytes32 => "b32",
            Kind::Bytes65 => "b65",
            Kind::Bool => "bool",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::U128 => "u128",
            Kind::U256 => "u256",
            Kind::List => "list",
            Kind::Record => "record",
        }
    }

    /// Resolve a JSON type name.
    pub fn from_name(name: &str) -> Option<Kind> {
        Kind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Like [`Kind::from_name`], but returns the "unrecognized type" error.
    pub fn try_from_name(name: &str) -> Result<Kind> {
        Kind::from_name(name).ok_or_else(|| AbiError::UnrecognizedTypeName(name.to_string()))
    }

    /// Fixed payload size, `None` for variable-length kinds.
    pub const fn fixed_size(self) -> Option<usize> {
        match self {
            Kind::Bool | Kind::U8 => Some(1),
            Kind::U16 => Some(2),
            Kind::U32 => Some(4),
            Kind::U64 => Some(8),
            Kind::U128 => Some(16),
            Kind::U256 | Kind::Bytes32 => Some(32),
            Kind::Bytes65 => Some(65),
            Kind::String | Kind::Bytes | Kind::List | Kind::Record => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u16> for Kind {
    type Error = AbiError;

    fn try_from(tag: u16) -> Result<Self> {
        Kind::try_from_tag(tag)
    }
}

impl From<Kind> for u16 {
    fn from(kind: Kind) -> Self {
        kind.tag()
    }
}

/// Returns true if `tag` lies in the extension range.
pub const fn is_extension_tag(tag: u16) -> bool {
    tag >= EXT_TAG_BASE
}
