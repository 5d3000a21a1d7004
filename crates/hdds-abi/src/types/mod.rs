// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Core value kinds.
//!
//! - [`scalar`]: `Bool`, `U8`..`U64`
//! - [`wide`]: `U128`, `U256`
//! - [`bytes`]: `Str`, `Bytes`, `Bytes32`, `Bytes65`
//! - [`list`], [`record`]: abstract kinds holding tagged [`crate::Value`]s

pub mod bytes;
pub mod list;
pub mod record;
pub mod scalar;
pub mod wide;

pub use bytes::{Bytes, Bytes32, Bytes65, Str};
pub use list::List;
pub use record::Record;
pub use scalar::{Bool, U16, U32, U64, U8};
pub use wide::{U128, U256};

use crate::error::{AbiError, Result};
use crate::registry::Kind;

/// Validate a JSON integer literal: non-empty, ASCII digits only.
///
/// Signs, whitespace, exponents and radix prefixes are all rejected so that
/// every width parses the same language.
pub(crate) fn parse_decimal(kind: Kind, s: &str) -> Result<&str> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AbiError::InvalidInteger {
            kind,
            input: s.to_string(),
        });
    }
    Ok(s)
}
