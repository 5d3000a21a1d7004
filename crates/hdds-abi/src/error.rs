// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for ABI encoding and decoding.

use crate::registry::Kind;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AbiError>;

/// Coarse classification of an [`AbiError`].
///
/// Callers that only care about the failure category (e.g. to decide whether
/// input was hostile or a value was misused) can match on this instead of the
/// full variant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// A numeric tag or JSON type name is not registered.
    UnrecognizedTag,
    /// Declared or actual size exceeds the remaining allocation budget, or
    /// nesting exceeds the depth limit.
    BudgetExceeded,
    /// Truncated input, wrong fixed length, bad base64, bad literal, ...
    Malformed,
    /// Checked arithmetic on a scalar left its representable range.
    Arithmetic,
    /// Duplicate, missing or unexpected field in a record or object payload.
    Field,
    /// A value cannot be represented in the wire format.
    Encode,
    /// Invalid codec or extension setup.
    Config,
}

/// Overflow/underflow raised by checked scalar arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("overflow: {kind}")]
    Overflow { kind: Kind },

    #[error("underflow: {kind}")]
    Underflow { kind: Kind },
}

/// Errors produced by the ABI codec.
#[derive(Debug, Error)]
pub enum AbiError {
    #[error("unrecognized type: tag={tag}")]
    UnrecognizedType { tag: u16 },

    #[error("unrecognized type: name={0:?}")]
    UnrecognizedTypeName(String),

    #[error("budget exceeded: need {needed} bytes, {remaining} remaining")]
    BudgetExceeded { needed: usize, remaining: usize },

    #[error("nesting depth exceeds maximum of {max}")]
    DepthExceeded { max: usize },

    #[error("unexpected end of input at offset {offset}: need {needed} bytes, have {available}")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("invalid {kind} length: expected {expected}, got {actual}")]
    InvalidLength {
        kind: Kind,
        expected: usize,
        actual: usize,
    },

    #[error("invalid bool byte: {0:#04x}")]
    InvalidBool(u8),

    #[error("invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("malformed {kind}: {input:?}")]
    InvalidInteger { kind: Kind, input: String },

    #[error("{kind} out of range: {input}")]
    IntegerOutOfRange { kind: Kind, input: String },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected JSON for {context}: expected {expected}")]
    UnexpectedJson {
        context: &'static str,
        expected: &'static str,
    },

    #[error("field name too long: len={len}, max={max}")]
    FieldNameTooLong { len: usize, max: usize },

    #[error("duplicate field: {0:?}")]
    DuplicateField(String),

    #[error("missing field: {0:?}")]
    MissingField(String),

    #[error("unknown field: {0:?}")]
    UnknownField(String),

    #[error("length {len} does not fit a u32 prefix")]
    LengthOverflow { len: usize },

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    #[error("tag {0} is reserved for core types")]
    ReservedTag(u16),

    #[error("extension already registered: tag={tag}, name={name:?}")]
    DuplicateExtension { tag: u16, name: String },

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

impl AbiError {
    /// Classify this error into the codec's failure taxonomy.
    pub fn class(&self) -> ErrorClass {
        match self {
            AbiError::UnrecognizedType { .. } | AbiError::UnrecognizedTypeName(_) => {
                ErrorClass::UnrecognizedTag
            }
            AbiError::BudgetExceeded { .. } | AbiError::DepthExceeded { .. } => {
                ErrorClass::BudgetExceeded
            }
            AbiError::UnexpectedEof { .. }
            | AbiError::InvalidLength { .. }
            | AbiError::InvalidBool(_)
            | AbiError::InvalidUtf8(_)
            | AbiError::InvalidBase64(_)
            | AbiError::InvalidInteger { .. }
            | AbiError::IntegerOutOfRange { .. }
            | AbiError::Json(_)
            | AbiError::UnexpectedJson { .. }
            | AbiError::FieldNameTooLong { .. }
            | AbiError::TrailingBytes(_) => ErrorClass::Malformed,
            AbiError::DuplicateField(_) | AbiError::MissingField(_) | AbiError::UnknownField(_) => {
                ErrorClass::Field
            }
            AbiError::LengthOverflow { .. } => ErrorClass::Encode,
            AbiError::ReservedTag(_) | AbiError::DuplicateExtension { .. } => ErrorClass::Config,
            AbiError::Arithmetic(_) => ErrorClass::Arithmetic,
        }
    }
}
