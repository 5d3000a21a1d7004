// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bool and fixed-width unsigned integers up to 64 bits.
//!
//! Binary: big-endian, fixed width, no prefix. JSON: native boolean for
//! [`Bool`], base-10 decimal strings for the integers.

use super::parse_decimal;
use crate::codec::Codec;
use crate::error::{AbiError, ArithmeticError, Result};
use crate::registry::Kind;
use crate::ser::{json, AbiDecode, AbiEncode, Budget, Cursor};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

/// Boolean value (one byte on the wire, `0x00` or `0x01`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bool(bool);

impl Bool {
    pub const fn new(x: bool) -> Self {
        Self(x)
    }

    pub const fn get(self) -> bool {
        self.0
    }
}

impl From<bool> for Bool {
    fn from(x: bool) -> Self {
        Self(x)
    }
}

impl From<Bool> for bool {
    fn from(x: Bool) -> Self {
        x.0
    }
}

impl fmt::Display for Bool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AbiEncode for Bool {
    fn size_hint(&self) -> usize {
        1
    }

    fn encode_abi(&self, dst: &mut Vec<u8>) -> Result<usize> {
        dst.push(u8::from(self.0));
        Ok(1)
    }

    fn to_json(&self) -> JsonValue {
        JsonValue::Bool(self.0)
    }
}

impl AbiDecode for Bool {
    fn decode_abi(src: &mut Cursor<'_>, budget: &mut Budget, _codec: &Codec) -> Result<Self> {
        budget.consume(1)?;
        match src.read_u8()? {
            0 => Ok(Self(false)),
            1 => Ok(Self(true)),
            other => Err(AbiError::InvalidBool(other)),
        }
    }

    fn from_json(json: &JsonValue, _codec: &Codec) -> Result<Self> {
        json.as_bool().map(Self).ok_or(AbiError::UnexpectedJson {
            context: "bool",
            expected: "boolean",
        })
    }
}

/// Generate a fixed-width unsigned integer wrapper with checked arithmetic.
macro_rules! impl_uint {
    ($(#[$meta:meta])* $name:ident, $inner:ty, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name($inner);

        impl $name {
            /// Encoded width in bytes.
            pub const SIZE: usize = std::mem::size_of::<$inner>();
            pub const MAX: $name = $name(<$inner>::MAX);
            pub const ZERO: $name = $name(0);

            pub const fn new(x: $inner) -> Self {
                Self(x)
            }

            pub const fn get(self) -> $inner {
                self.0
            }

            /// Sum of `self` and `other`, or an overflow error.
            pub fn try_add(self, other: Self) -> std::result::Result<Self, ArithmeticError> {
                self.0
                    .checked_add(other.0)
                    .map(Self)
                    .ok_or(ArithmeticError::Overflow { kind: $kind })
            }

            /// Difference of `self` and `other`, or an underflow error.
            pub fn try_sub(self, other: Self) -> std::result::Result<Self, ArithmeticError> {
                self.0
                    .checked_sub(other.0)
                    .map(Self)
                    .ok_or(ArithmeticError::Underflow { kind: $kind })
            }

            /// In-place [`Self::try_add`]; `self` is unchanged on failure.
            pub fn try_add_assign(&mut self, other: Self) -> std::result::Result<(), ArithmeticError> {
                *self = self.try_add(other)?;
                Ok(())
            }

            /// In-place [`Self::try_sub`]; `self` is unchanged on failure.
            pub fn try_sub_assign(&mut self, other: Self) -> std::result::Result<(), ArithmeticError> {
                *self = self.try_sub(other)?;
                Ok(())
            }
        }

        impl From<$inner> for $name {
            fn from(x: $inner) -> Self {
                Self(x)
            }
        }

        impl From<$name> for $inner {
            fn from(x: $name) -> Self {
                x.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = AbiError;

            fn from_str(s: &str) -> Result<Self> {
                let digits = parse_decimal($kind, s)?;
                digits
                    .parse::<$inner>()
                    .map(Self)
                    .map_err(|_| AbiError::IntegerOutOfRange {
                        kind: $kind,
                        input: s.to_string(),
                    })
            }
        }

        impl AbiEncode for $name {
            fn size_hint(&self) -> usize {
                Self::SIZE
            }

            fn encode_abi(&self, dst: &mut Vec<u8>) -> Result<usize> {
                dst.extend_from_slice(&self.0.to_be_bytes());
                Ok(Self::SIZE)
            }

            fn to_json(&self) -> JsonValue {
                JsonValue::String(self.0.to_string())
            }
        }

        impl AbiDecode for $name {
            fn decode_abi(
                src: &mut Cursor<'_>,
                budget: &mut Budget,
                _codec: &Codec,
            ) -> Result<Self> {
                budget.consume(Self::SIZE)?;
                let mut bytes = [0u8; std::mem::size_of::<$inner>()];
                bytes.copy_from_slice(src.read_bytes(Self::SIZE)?);
                Ok(Self(<$inner>::from_be_bytes(bytes)))
            }

            fn from_json(json: &JsonValue, _codec: &Codec) -> Result<Self> {
                json::as_str(json, $kind.name())?.parse()
            }
        }
    };
}

impl_uint!(
    /// 8-bit unsigned integer.
    U8,
    u8,
    Kind::U8
);
impl_uint!(
    /// 16-bit unsigned integer.
    U16,
    u16,
    Kind::U16
);
impl_uint!(
    /// 32-bit unsigned integer.
    U32,
    u32,
    Kind::U32
);
impl_uint!(
    /// 64-bit unsigned integer.
    U64,
    u64,
    Kind::U64
);

/// Lossless widening conversions between integer kinds.
macro_rules! impl_widen {
    ($to:ident: $($from:ident),+) => {
        $(
            impl From<$from> for $to {
                fn from(x: $from) -> Self {
                    Self(x.get().into())
                }
            }
        )+
    };
}

impl_widen!(U16: U8);
impl_widen!(U32: U8, U16);
impl_widen!(U64: U8, U16, U32);

#[cfg(test)]
mod tests {
    use super::*;

    fn encode<T: AbiEncode>(value: &T) -> Vec<u8> {
        let mut buf = Vec::new();
        let n = value.encode_abi(&mut buf).expect("encode");
        assert_eq!(n, buf.len());
        assert_eq!(n, value.size_hint());
        buf
    }

    fn decode<T: AbiDecode>(bytes: &[u8]) -> Result<T> {
        let mut cursor = Cursor::new(bytes);
        let mut budget = Budget::new(1024);
        T::decode_abi(&mut cursor, &mut budget, &Codec::default())
    }

    #[test]
    fn test_u8_arithmetic_boundaries() {
        assert_eq!(
            U8::new(255).try_add(U8::new(1)),
            Err(ArithmeticError::Overflow { kind: Kind::U8 })
        );
        assert_eq!(
            U8::new(0).try_sub(U8::new(1)),
            Err(ArithmeticError::Underflow { kind: Kind::U8 })
        );
        assert_eq!(U8::new(254).try_add(U8::new(1)), Ok(U8::MAX));
        assert_eq!(U8::new(1).try_sub(U8::new(1)), Ok(U8::ZERO));
    }

    #[test]
    fn test_assign_leaves_value_unchanged_on_failure() {
        let mut x = U64::new(u64::MAX - 1);
        x.try_add_assign(U64::new(1)).expect("add to max");
        assert_eq!(x, U64::MAX);
        assert!(x.try_add_assign(U64::new(1)).is_err());
        assert_eq!(x, U64::MAX);

        let mut y = U16::new(3);
        y.try_sub_assign(U16::new(3)).expect("sub to zero");
        assert!(y.try_sub_assign(U16::new(1)).is_err());
        assert_eq!(y, U16::ZERO);
    }

    #[test]
    fn test_binary_layout_is_big_endian() {
        assert_eq!(encode(&U16::new(0x0102)), [0x01, 0x02]);
        assert_eq!(encode(&U32::new(0x0102_0304)), [1, 2, 3, 4]);
        assert_eq!(
            encode(&U64::new(0x0102_0304_0506_0708)),
            [1, 2, 3, 4, 5, 6, 7, 8]
        );
        assert_eq!(encode(&Bool::new(true)), [1]);
        assert_eq!(encode(&Bool::new(false)), [0]);
    }

    #[test]
    fn test_binary_roundtrip() {
        for _ in 0..64 {
            let v = U64::new(fastrand::u64(..));
            assert_eq!(decode::<U64>(&encode(&v)).expect("decode"), v);
            let v = U32::new(fastrand::u32(..));
            assert_eq!(decode::<U32>(&encode(&v)).expect("decode"), v);
        }
        assert_eq!(decode::<U8>(&[0xFF]).expect("decode"), U8::MAX);
    }

    #[test]
    fn test_bool_rejects_non_canonical_byte() {
        assert!(matches!(decode::<Bool>(&[2]), Err(AbiError::InvalidBool(2))));
    }

    #[test]
    fn test_truncated_input() {
        assert!(matches!(
            decode::<U32>(&[0, 1, 2]),
            Err(AbiError::UnexpectedEof { needed: 4, .. })
        ));
    }

    #[test]
    fn test_decode_charges_budget() {
        let mut cursor = Cursor::new(&[0u8; 8]);
        let mut budget = Budget::new(7);
        assert!(matches!(
            U64::decode_abi(&mut cursor, &mut budget, &Codec::default()),
            Err(AbiError::BudgetExceeded { needed: 8, remaining: 7 })
        ));
    }

    #[test]
    fn test_json_decimal_strings() {
        let codec = Codec::default();
        assert_eq!(U64::MAX.to_json(), JsonValue::from("18446744073709551615"));
        assert_eq!(
            U64::from_json(&JsonValue::from("18446744073709551615"), &codec).expect("max"),
            U64::MAX
        );
        assert_eq!(Bool::new(true).to_json(), JsonValue::Bool(true));
        assert_eq!(
            Bool::from_json(&JsonValue::Bool(false), &codec).expect("bool"),
            Bool::new(false)
        );
    }

    #[test]
    fn test_json_rejects_bad_literals() {
        let codec = Codec::default();
        for bad in ["", "-1", "+1", "1.0", "0x10", " 1", "abc"] {
            assert!(
                matches!(
                    U32::from_json(&JsonValue::from(bad), &codec),
                    Err(AbiError::InvalidInteger { .. })
                ),
                "{:?} should be rejected",
                bad
            );
        }
        assert!(matches!(
            U8::from_json(&JsonValue::from("256"), &codec),
            Err(AbiError::IntegerOutOfRange { kind: Kind::U8, .. })
        ));
        // Native JSON numbers are not accepted for integers.
        assert!(matches!(
            U8::from_json(&JsonValue::from(1), &codec),
            Err(AbiError::UnexpectedJson { .. })
        ));
        assert!(Bool::from_json(&JsonValue::from("true"), &codec).is_err());
    }

    #[test]
    fn test_widening_conversions() {
        assert_eq!(U16::from(U8::MAX).get(), 255);
        assert_eq!(U32::from(U16::MAX).get(), 65535);
        assert_eq!(U64::from(U32::MAX).get(), u64::from(u32::MAX));
    }

    #[test]
    fn test_display_and_from_str() {
        assert_eq!(U16::new(513).to_string(), "513");
        assert_eq!("513".parse::<U16>().expect("parse"), U16::new(513));
        assert_eq!(Bool::new(true).to_string(), "true");
    }
}
