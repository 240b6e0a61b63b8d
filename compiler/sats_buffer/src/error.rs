//! Encode and decode failures.
//!
//! Both error kinds are fatal for the call that produced them. The codec has
//! no partial-success mode: a value either encodes completely or not at all.

use std::str::Utf8Error;

/// An error that occurred while decoding bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Not enough bytes remained for the next read.
    #[error("data too short for {for_type}: expected {expected} bytes, given {given}")]
    BufferLength {
        for_type: &'static str,
        expected: usize,
        given: usize,
    },
    /// A sum discriminant outside the declared variant range.
    #[error("unknown variant tag {tag} for sum with {variants} variants")]
    InvalidTag { tag: u8, variants: usize },
    /// A `String` payload that is not valid UTF-8.
    #[error("invalid utf-8 in string payload")]
    InvalidUtf8,
    /// A `Bool` byte other than 0 or 1.
    #[error("byte {0} is not a valid bool (must be 0 or 1)")]
    InvalidBool(u8),
    /// Input left over after a whole-buffer decode.
    #[error("{remaining} trailing bytes after value")]
    TrailingBytes { remaining: usize },
}

impl From<Utf8Error> for DecodeError {
    fn from(_: Utf8Error) -> Self {
        DecodeError::InvalidUtf8
    }
}

/// An error that occurred while encoding a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// A sum value whose tag names no declared variant.
    #[error("unknown variant `{tag}`")]
    UnknownVariant { tag: Box<str> },
    /// The value's shape does not match the type it is encoded against.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// A product value with the wrong number of fields.
    #[error("product arity mismatch: expected {expected} fields, found {found}")]
    ArityMismatch { expected: usize, found: usize },
    /// A length or element count that does not fit the `u32` prefix.
    #[error("length {len} exceeds u32::MAX")]
    LengthOverflow { len: usize },
    /// A variant past position 255, which the one-byte discriminant cannot address.
    #[error("variant index {index} does not fit a one-byte tag")]
    VariantIndexOverflow { index: usize },
}
