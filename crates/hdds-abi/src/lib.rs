// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! HDDS self-describing value encoding
//!
//! Every value carries a 16-bit type tag, so a receiver can decode it without
//! knowing its kind in advance. Values round-trip through a compact binary
//! form and a JSON form.
//!
//! # Features
//!
//! - **Closed kind set**: `Bool`, `U8`..`U256`, `Str`, `Bytes`, `Bytes32`,
//!   `Bytes65`, `List`, `Record`
//! - **Checked arithmetic**: `try_add`/`try_sub` report overflow and underflow
//! - **Budgeted decoding**: one byte budget bounds a whole nested value tree
//! - **Bounded nesting**: lists and records nest at most
//!   [`AbiConfig::max_depth`] levels. Both decoders enforce it, and so do
//!   both encoders, so hand-built values deeper than the limit are refused
//! - **Extensions**: externally defined kinds plug in by tag (>= 1000)
//!
//! # Wire Format
//!
//! ```text
//! binary: [tag: u16 BE][payload]
//! json:   ["<name>", <payload>]
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use hdds_abi::{List, Record, Value, U256};
//!
//! let mut record = Record::new();
//! record.set("amount", U256::from(1_000u64));
//! record.set("memo", "hello");
//!
//! let bytes = hdds_abi::to_bytes(&Value::from(record.clone()))?;
//! let decoded = hdds_abi::from_bytes(&bytes)?;
//! assert_eq!(decoded.as_record(), Some(&record));
//!
//! let text = hdds_abi::encode_json(&decoded)?;
//! // ["record",{"amount":["u256","1000"],"memo":["str","hello"]}]
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod ext;
pub mod registry;
pub mod ser;
pub mod types;
pub mod value;

pub use codec::{decode, decode_json, encode, encode_json, from_bytes, size_hint, to_bytes, Codec};
pub use config::{AbiConfig, ConfigError, DEFAULT_MAX_BYTES, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
pub use error::{AbiError, ArithmeticError, ErrorClass, Result};
pub use ext::{expect_fields, ExtValue, Extension, ExtensionKind, ExtensionRegistry};
pub use registry::{Kind, TagClass, TAG_SIZE};
pub use ser::{AbiDecode, AbiEncode, Budget, Cursor};
pub use types::{
    Bool, Bytes, Bytes32, Bytes65, List, Record, Str, U128, U16, U256, U32, U64, U8,
};
pub use value::Value;

/// Maximum length of a record field name, in bytes.
pub const MAX_FIELD_NAME_LEN: usize = 64;
