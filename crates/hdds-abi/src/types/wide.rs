// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! 128- and 256-bit unsigned integers.
//!
//! Backed by an arbitrary-precision magnitude that is checked against the
//! width ceiling at construction and after every operation, so a stored value
//! never exceeds `2^bits - 1`. A default-constructed value is zero; there is no
//! separate "uninitialized" state.

use super::parse_decimal;
use super::scalar::{U16, U32, U64, U8};
use crate::codec::Codec;
use crate::error::{AbiError, ArithmeticError, Result};
use crate::registry::Kind;
use crate::ser::{json, AbiDecode, AbiEncode, Budget, Cursor};
use num_bigint::BigUint;
use num_traits::One;
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

macro_rules! impl_wide_uint {
    ($(#[$meta:meta])* $name:ident, $size:expr, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(BigUint);

        impl $name {
            /// Encoded width in bytes.
            pub const SIZE: usize = $size;

            /// Largest representable magnitude, `2^bits - 1`.
            pub fn max_magnitude() -> &'static BigUint {
                static MAX: OnceLock<BigUint> = OnceLock::new();
                MAX.get_or_init(|| (BigUint::one() << (Self::SIZE * 8)) - BigUint::one())
            }

            pub fn max() -> Self {
                Self(Self::max_magnitude().clone())
            }

            pub fn zero() -> Self {
                Self::default()
            }

            /// Build from a big-endian fixed-width array (always in range).
            pub fn new(bytes: [u8; $size]) -> Self {
                Self(BigUint::from_bytes_be(&bytes))
            }

            /// Build from an arbitrary magnitude, failing above the maximum.
            pub fn from_biguint(x: BigUint) -> std::result::Result<Self, ArithmeticError> {
                if x > *Self::max_magnitude() {
                    return Err(ArithmeticError::Overflow { kind: $kind });
                }
                Ok(Self(x))
            }

            pub fn as_biguint(&self) -> &BigUint {
                &self.0
            }

            pub fn into_biguint(self) -> BigUint {
                self.0
            }

            /// Big-endian, left-padded to the full width.
            pub fn to_be_bytes(&self) -> [u8; $size] {
                let mut out = [0u8; $size];
                let bytes = self.0.to_bytes_be();
                // Invariant: magnitude <= max, so `bytes` fits.
                out[$size - bytes.len()..].copy_from_slice(&bytes);
                out
            }

            pub fn is_zero(&self) -> bool {
                self.0.bits() == 0
            }

            pub fn try_add(&self, other: &Self) -> std::result::Result<Self, ArithmeticError> {
                Self::from_biguint(&self.0 + &other.0)
            }

            pub fn try_sub(&self, other: &Self) -> std::result::Result<Self, ArithmeticError> {
                if other.0 > self.0 {
                    return Err(ArithmeticError::Underflow { kind: $kind });
                }
                Ok(Self(&self.0 - &other.0))
            }

            /// In-place [`Self::try_add`]; `self` is unchanged on failure.
            pub fn try_add_assign(&mut self, other: &Self) -> std::result::Result<(), ArithmeticError> {
                *self = self.try_add(other)?;
                Ok(())
            }

            /// In-place [`Self::try_sub`]; `self` is unchanged on failure.
            pub fn try_sub_assign(&mut self, other: &Self) -> std::result::Result<(), ArithmeticError> {
                *self = self.try_sub(other)?;
                Ok(())
            }
        }

        impl TryFrom<BigUint> for $name {
            type Error = ArithmeticError;

            fn try_from(x: BigUint) -> std::result::Result<Self, ArithmeticError> {
                Self::from_biguint(x)
            }
        }

        impl From<$name> for BigUint {
            fn from(x: $name) -> Self {
                x.0
            }
        }

        impl From<u64> for $name {
            fn from(x: u64) -> Self {
                Self(BigUint::from(x))
            }
        }

        impl From<u128> for $name {
            fn from(x: u128) -> Self {
                Self(BigUint::from(x))
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
                let magnitude = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| {
                    AbiError::InvalidInteger {
                        kind: $kind,
                        input: s.to_string(),
                    }
                })?;
                Self::from_biguint(magnitude).map_err(|_| AbiError::IntegerOutOfRange {
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
                dst.extend_from_slice(&self.to_be_bytes());
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
                Ok(Self::new(src.read_array::<{ $size }>()?))
            }

            fn from_json(json: &JsonValue, _codec: &Codec) -> Result<Self> {
                json::as_str(json, $kind.name())?.parse()
            }
        }

        impl From<U8> for $name {
            fn from(x: U8) -> Self {
                Self::from(u64::from(x.get()))
            }
        }

        impl From<U16> for $name {
            fn from(x: U16) -> Self {
                Self::from(u64::from(x.get()))
            }
        }

        impl From<U32> for $name {
            fn from(x: U32) -> Self {
                Self::from(u64::from(x.get()))
            }
        }

        impl From<U64> for $name {
            fn from(x: U64) -> Self {
                Self::from(x.get())
            }
        }
    };
}

impl_wide_uint!(
    /// 128-bit unsigned integer.
    U128,
    16,
    Kind::U128
);
impl_wide_uint!(
    /// 256-bit unsigned integer.
    U256,
    32,
    Kind::U256
);

impl From<U128> for U256 {
    fn from(x: U128) -> Self {
        Self(x.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX_U128: &str = "340282366920938463463374607431768211455";
    const MAX_U256: &str =
        "115792089237316195423570985008687907853269984665640564039457584007913129639935";

    #[test]
    fn test_max_values() {
        assert_eq!(U128::max().to_string(), MAX_U128);
        assert_eq!(U256::max().to_string(), MAX_U256);
        assert_eq!(U128::max(), U128::from(u128::MAX));
        assert_eq!(U256::max().to_be_bytes(), [0xFF; 32]);
    }

    #[test]
    fn test_u256_max_plus_zero() {
        let sum = U256::max().try_add(&U256::zero()).expect("max + 0");
        assert_eq!(sum, U256::max());
    }

    #[test]
    fn test_overflow_and_underflow() {
        assert_eq!(
            U256::max().try_add(&U256::from(1u64)),
            Err(ArithmeticError::Overflow { kind: Kind::U256 })
        );
        assert_eq!(
            U128::zero().try_sub(&U128::from(1u64)),
            Err(ArithmeticError::Underflow { kind: Kind::U128 })
        );
        // Exactly reaching the maximum is not an overflow.
        let almost = U128::from(u128::MAX - 1);
        assert_eq!(almost.try_add(&U128::from(1u64)), Ok(U128::max()));
    }

    #[test]
    fn test_assign_leaves_value_unchanged_on_failure() {
        let mut x = U128::max();
        assert!(x.try_add_assign(&U128::from(1u64)).is_err());
        assert_eq!(x, U128::max());

        let mut y = U256::from(5u64);
        y.try_sub_assign(&U256::from(2u64)).expect("5 - 2");
        assert_eq!(y, U256::from(3u64));
        assert!(y.try_sub_assign(&U256::from(4u64)).is_err());
        assert_eq!(y, U256::from(3u64));
    }

    #[test]
    fn test_from_biguint_rejects_above_max() {
        let over = U128::max_magnitude() + BigUint::one();
        assert_eq!(
            U128::from_biguint(over.clone()),
            Err(ArithmeticError::Overflow { kind: Kind::U128 })
        );
        assert!(U256::try_from(over).is_ok());
    }

    #[test]
    fn test_zero_normalization() {
        assert_eq!(U128::default(), U128::from(0u64));
        assert_eq!(U256::new([0; 32]), U256::zero());
        assert!(U256::default().is_zero());
        assert_eq!(U256::zero().to_be_bytes(), [0; 32]);
    }

    #[test]
    fn test_binary_layout_is_padded_big_endian() {
        let mut buf = Vec::new();
        U128::from(0x0102u64).encode_abi(&mut buf).expect("encode");
        let mut expected = [0u8; 16];
        expected[14] = 0x01;
        expected[15] = 0x02;
        assert_eq!(buf, expected);
    }

    #[test]
    fn test_binary_roundtrip() {
        let codec = Codec::default();
        for _ in 0..32 {
            let mut bytes = [0u8; 32];
            bytes.iter_mut().for_each(|b| *b = fastrand::u8(..));
            let v = U256::new(bytes);

            let mut buf = Vec::new();
            v.encode_abi(&mut buf).expect("encode");
            let mut cursor = Cursor::new(&buf);
            let mut budget = Budget::new(32);
            let decoded = U256::decode_abi(&mut cursor, &mut budget, &codec).expect("decode");
            assert_eq!(decoded, v);
            assert!(budget.is_exhausted());
        }
    }

    #[test]
    fn test_json_roundtrip_and_rejections() {
        let codec = Codec::default();
        let max = U256::max();
        assert_eq!(max.to_json(), JsonValue::from(MAX_U256));
        assert_eq!(U256::from_json(&max.to_json(), &codec).expect("max"), max);

        assert!(matches!(
            U128::from_json(&JsonValue::from(MAX_U256), &codec),
            Err(AbiError::IntegerOutOfRange { kind: Kind::U128, .. })
        ));
        for bad in ["", "-5", "12a", "1e3"] {
            assert!(matches!(
                U256::from_json(&JsonValue::from(bad), &codec),
                Err(AbiError::InvalidInteger { .. })
            ));
        }
    }

    #[test]
    fn test_widening_conversions() {
        assert_eq!(U128::from(U64::MAX), U128::from(u64::MAX));
        assert_eq!(U256::from(U128::max()).to_string(), MAX_U128);
        assert_eq!(U256::from(U8::new(7)), U256::from(7u64));
    }
}
