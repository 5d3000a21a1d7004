// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-kind codec contract and shared framing helpers.
//!
//! Every value kind implements [`AbiEncode`] and [`AbiDecode`]: a binary
//! writer/reader pair threaded with a [`Budget`], and an independent JSON
//! writer/reader pair. The tag is not part of a kind's payload; it is written
//! and read by the dispatcher in [`crate::codec`].

pub mod budget;
pub mod cursor;
pub mod json;

pub use budget::Budget;
pub use cursor::Cursor;

use crate::codec::Codec;
use crate::error::{AbiError, Result};
use serde_json::Value as JsonValue;

/// Size of a length or count prefix on the wire.
pub const LEN_PREFIX_SIZE: usize = 4;

/// Binary and JSON encoding of one value kind.
pub trait AbiEncode {
    /// Number of payload bytes [`AbiEncode::encode_abi`] will write.
    fn size_hint(&self) -> usize;

    /// Append the binary payload to `dst`, returning the bytes written.
    fn encode_abi(&self, dst: &mut Vec<u8>) -> Result<usize>;

    /// JSON payload (without the `[name, ...]` envelope).
    fn to_json(&self) -> JsonValue;
}

/// Binary and JSON decoding of one value kind.
pub trait AbiDecode: Sized {
    /// Decode a binary payload, charging every byte read against `budget`.
    ///
    /// `codec` supplies the object-size limit and, for abstract kinds, the
    /// dispatcher used to decode nested tagged values.
    fn decode_abi(src: &mut Cursor<'_>, budget: &mut Budget, codec: &Codec) -> Result<Self>;

    /// Decode a JSON payload (without the `[name, ...]` envelope).
    fn from_json(json: &JsonValue, codec: &Codec) -> Result<Self>;
}

pub(crate) fn prefix_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| AbiError::LengthOverflow { len })
}

/// Write a 4-byte big-endian length followed by `data`.
pub(crate) fn write_len_prefixed(dst: &mut Vec<u8>, data: &[u8]) -> Result<usize> {
    let len = prefix_len(data.len())?;
    dst.extend_from_slice(&len.to_be_bytes());
    dst.extend_from_slice(data);
    Ok(LEN_PREFIX_SIZE + data.len())
}

/// Read a 4-byte big-endian length and that many bytes.
///
/// The declared length is checked against `max_len` and the budget before
/// the payload is touched.
pub(crate) fn read_len_prefixed<'a>(
    src: &mut Cursor<'a>,
    budget: &mut Budget,
    max_len: usize,
) -> Result<&'a [u8]> {
    budget.consume(LEN_PREFIX_SIZE)?;
    let len = src.read_u32_be()? as usize;
    if len > max_len {
        log::debug!("[abi] declared length {} exceeds max {}", len, max_len);
        return Err(AbiError::BudgetExceeded {
            needed: len,
            remaining: max_len,
        });
    }
    budget.consume(len)?;
    src.read_bytes(len)
}

/// Write a 4-byte little-endian element count.
pub(crate) fn write_count(dst: &mut Vec<u8>, count: usize) -> Result<usize> {
    dst.extend_from_slice(&prefix_len(count)?.to_le_bytes());
    Ok(LEN_PREFIX_SIZE)
}

/// Read a 4-byte little-endian element count and check it against the budget.
pub(crate) fn read_count(src: &mut Cursor<'_>, budget: &mut Budget) -> Result<usize> {
    budget.consume(LEN_PREFIX_SIZE)?;
    let count = src.read_u32_le()? as usize;
    budget.check_count(count)?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_prefixed_roundtrip() {
        let mut buf = Vec::new();
        let n = write_len_prefixed(&mut buf, b"abc").expect("write");
        assert_eq!(n, 7);
        assert_eq!(buf, [0, 0, 0, 3, b'a', b'b', b'c']);

        let mut cursor = Cursor::new(&buf);
        let mut budget = Budget::new(64);
        let data = read_len_prefixed(&mut cursor, &mut budget, 64).expect("read");
        assert_eq!(data, b"abc");
        assert_eq!(budget.remaining(), 57);
    }

    #[test]
    fn test_len_prefixed_rejects_before_reading_payload() {
        // Declares 1 MiB but carries nothing.
        let buf = (1u32 << 20).to_be_bytes();

        let mut cursor = Cursor::new(&buf);
        let mut budget = Budget::new(usize::MAX);
        assert!(matches!(
            read_len_prefixed(&mut cursor, &mut budget, 1024),
            Err(AbiError::BudgetExceeded { needed, remaining: 1024 }) if needed == 1 << 20
        ));

        let mut cursor = Cursor::new(&buf);
        let mut budget = Budget::new(100);
        assert!(matches!(
            read_len_prefixed(&mut cursor, &mut budget, usize::MAX),
            Err(AbiError::BudgetExceeded { remaining: 96, .. })
        ));
    }

    #[test]
    fn test_count_is_little_endian() {
        let mut buf = Vec::new();
        write_count(&mut buf, 0x0102).expect("write");
        assert_eq!(buf, [0x02, 0x01, 0, 0]);

        let mut cursor = Cursor::new(&buf);
        let mut budget = Budget::new(10);
        assert!(matches!(
            read_count(&mut cursor, &mut budget),
            Err(AbiError::BudgetExceeded { needed: 0x0102, remaining: 6 })
        ));
    }
}
