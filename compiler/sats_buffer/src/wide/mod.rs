//! 256-bit integers as four 64-bit words.
//!
//! Words are stored least significant first, which is also their wire order,
//! so `to_le_bytes` is a plain concatenation of each word's little-endian
//! bytes. `I256` is two's complement; only the top word carries the sign.
//!
//! Arithmetic is limited to what the codec and map keys need: conversion,
//! ordering, and decimal rendering.

use std::cmp::Ordering;
use std::fmt;

/// Largest power of ten that fits in a `u64`, used to render decimals in chunks.
const DECIMAL_CHUNK: u64 = 10_000_000_000_000_000_000;

fn words_from_le_bytes(bytes: [u8; 32]) -> [u64; 4] {
    let mut words = [0u64; 4];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(8)) {
        let mut le = [0u8; 8];
        le.copy_from_slice(chunk);
        *word = u64::from_le_bytes(le);
    }
    words
}

fn words_to_le_bytes(words: [u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (chunk, word) in bytes.chunks_exact_mut(8).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    bytes
}

/// Unsigned 256-bit integer.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct U256 {
    words: [u64; 4],
}

impl U256 {
    pub const ZERO: Self = Self { words: [0; 4] };
    pub const ONE: Self = Self {
        words: [1, 0, 0, 0],
    };
    pub const MAX: Self = Self {
        words: [u64::MAX; 4],
    };

    /// Build from words, least significant first.
    #[inline]
    pub const fn from_words(words: [u64; 4]) -> Self {
        Self { words }
    }

    /// The four words, least significant first.
    #[inline]
    pub const fn words(self) -> [u64; 4] {
        self.words
    }

    pub fn from_le_bytes(bytes: [u8; 32]) -> Self {
        Self::from_words(words_from_le_bytes(bytes))
    }

    pub fn to_le_bytes(self) -> [u8; 32] {
        words_to_le_bytes(self.words)
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.words == [0; 4]
    }

    /// Narrow to `u128`, or `None` if any of the top two words is set.
    pub fn checked_to_u128(self) -> Option<u128> {
        let [lo, hi, w2, w3] = self.words;
        (w2 == 0 && w3 == 0).then(|| u128::from(lo) | (u128::from(hi) << 64))
    }

    /// Long division by a single word.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "quotient and remainder of a 128/64 step each fit in a word"
    )]
    fn div_rem_word(self, divisor: u64) -> (Self, u64) {
        let divisor = u128::from(divisor);
        let mut quotient = [0u64; 4];
        let mut rem: u128 = 0;
        for i in (0..4).rev() {
            let cur = (rem << 64) | u128::from(self.words[i]);
            quotient[i] = (cur / divisor) as u64;
            rem = cur % divisor;
        }
        (Self::from_words(quotient), rem as u64)
    }

    fn wrapping_neg(self) -> Self {
        let mut out = [0u64; 4];
        let mut carry = true;
        for (dst, word) in out.iter_mut().zip(self.words) {
            let (sum, overflow) = (!word).overflowing_add(u64::from(carry));
            *dst = sum;
            carry = overflow;
        }
        Self::from_words(out)
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.words.iter().rev().cmp(other.words.iter().rev())
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<u128> for U256 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "splitting into low and high words"
    )]
    fn from(v: u128) -> Self {
        Self::from_words([v as u64, (v >> 64) as u64, 0, 0])
    }
}

macro_rules! u256_from_narrow {
    ($($int:ty),*) => {
        $(impl From<$int> for U256 {
            fn from(v: $int) -> Self {
                Self::from(u128::from(v))
            }
        })*
    };
}
u256_from_narrow!(u8, u16, u32, u64);

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.pad("0");
        }
        let mut chunks = Vec::with_capacity(4);
        let mut rest = *self;
        while !rest.is_zero() {
            let (q, r) = rest.div_rem_word(DECIMAL_CHUNK);
            chunks.push(r);
            rest = q;
        }
        let mut out = String::with_capacity(chunks.len() * 19);
        let mut iter = chunks.iter().rev();
        if let Some(first) = iter.next() {
            out.push_str(&first.to_string());
        }
        for chunk in iter {
            out.push_str(&format!("{chunk:019}"));
        }
        f.pad(&out)
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256({self})")
    }
}

/// Signed 256-bit integer in two's complement.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct I256 {
    words: [u64; 4],
}

impl I256 {
    pub const ZERO: Self = Self { words: [0; 4] };
    pub const MINUS_ONE: Self = Self {
        words: [u64::MAX; 4],
    };
    pub const MIN: Self = Self {
        words: [0, 0, 0, 1 << 63],
    };
    pub const MAX: Self = Self {
        words: [u64::MAX, u64::MAX, u64::MAX, u64::MAX >> 1],
    };

    /// Build from two's complement words, least significant first.
    #[inline]
    pub const fn from_words(words: [u64; 4]) -> Self {
        Self { words }
    }

    /// The four words, least significant first.
    #[inline]
    pub const fn words(self) -> [u64; 4] {
        self.words
    }

    pub fn from_le_bytes(bytes: [u8; 32]) -> Self {
        Self::from_words(words_from_le_bytes(bytes))
    }

    pub fn to_le_bytes(self) -> [u8; 32] {
        words_to_le_bytes(self.words)
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.words[3] >> 63 == 1
    }

    /// Magnitude as an unsigned value. `I256::MIN` maps to 2^255.
    pub fn unsigned_abs(self) -> U256 {
        let raw = U256::from_words(self.words);
        if self.is_negative() {
            raw.wrapping_neg()
        } else {
            raw
        }
    }

    /// Narrow to `i128`, or `None` if the value is out of range.
    #[allow(
        clippy::cast_possible_wrap,
        reason = "reassembling two's complement words"
    )]
    pub fn checked_to_i128(self) -> Option<i128> {
        let [lo, hi, w2, w3] = self.words;
        let v = (u128::from(lo) | (u128::from(hi) << 64)) as i128;
        let ext = if v < 0 { u64::MAX } else { 0 };
        (w2 == ext && w3 == ext).then_some(v)
    }
}

impl Ord for I256 {
    #[allow(
        clippy::cast_possible_wrap,
        reason = "top word is compared as signed"
    )]
    fn cmp(&self, other: &Self) -> Ordering {
        (self.words[3] as i64)
            .cmp(&(other.words[3] as i64))
            .then_with(|| self.words[..3].iter().rev().cmp(other.words[..3].iter().rev()))
    }
}

impl PartialOrd for I256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<i128> for I256 {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "splitting into two's complement words"
    )]
    fn from(v: i128) -> Self {
        let ext = if v < 0 { u64::MAX } else { 0 };
        Self::from_words([v as u64, (v >> 64) as u64, ext, ext])
    }
}

macro_rules! i256_from_narrow {
    ($($int:ty),*) => {
        $(impl From<$int> for I256 {
            fn from(v: $int) -> Self {
                Self::from(i128::from(v))
            }
        })*
    };
}
i256_from_narrow!(i8, i16, i32, i64);

impl fmt::Display for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            f.pad(&format!("-{}", self.unsigned_abs()))
        } else {
            fmt::Display::fmt(&self.unsigned_abs(), f)
        }
    }
}

impl fmt::Debug for I256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I256({self})")
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
