//! Forward-only cursor over an encoded byte slice.
//!
//! The reader never backtracks. A short read leaves the offset where it
//! was, so the error's `given` field reports exactly what remained.

use crate::{DecodeError, I256, U256};

macro_rules! read_le {
    ($name:ident, $int:ty) => {
        #[doc = concat!("Reads a little-endian `", stringify!($int), "`.")]
        #[inline]
        pub fn $name(&mut self) -> Result<$int, DecodeError> {
            self.array(stringify!($int)).map(<$int>::from_le_bytes)
        }
    };
}

/// Sequential reader over a borrowed buffer.
///
/// The lifetime `'de` lets decoded strings and byte runs borrow from the
/// input instead of copying.
#[derive(Clone, Debug)]
pub struct Reader<'de> {
    buf: &'de [u8],
    pos: usize,
}

impl<'de> Reader<'de> {
    /// Create a reader positioned at the start of `buf`.
    pub fn new(buf: &'de [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current read offset from the start of the buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Number of bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Returns `true` once every byte has been consumed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume exactly `n` bytes.
    ///
    /// `for_type` names what was being read, for the error message.
    #[inline]
    pub fn take(&mut self, n: usize, for_type: &'static str) -> Result<&'de [u8], DecodeError> {
        if n > self.remaining() {
            return Err(DecodeError::BufferLength {
                for_type,
                expected: n,
                given: self.remaining(),
            });
        }
        let chunk = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(chunk)
    }

    /// Consume exactly `N` bytes as an array.
    #[inline]
    fn array<const N: usize>(&mut self, for_type: &'static str) -> Result<[u8; N], DecodeError> {
        let chunk = self.take(N, for_type)?;
        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        Ok(out)
    }

    read_le!(read_u8, u8);
    read_le!(read_i8, i8);
    read_le!(read_u16, u16);
    read_le!(read_i16, i16);
    read_le!(read_u32, u32);
    read_le!(read_i32, i32);
    read_le!(read_u64, u64);
    read_le!(read_i64, i64);

    /// Reads a `bool`, rejecting any byte other than 0 or 1.
    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            b => Err(DecodeError::InvalidBool(b)),
        }
    }

    /// Reads a `u128` as two little-endian words, low word first.
    ///
    /// This is byte-identical to `u128::from_le_bytes`.
    pub fn read_u128(&mut self) -> Result<u128, DecodeError> {
        self.array("u128").map(u128::from_le_bytes)
    }

    /// Reads an `i128` as two little-endian words, low word first.
    pub fn read_i128(&mut self) -> Result<i128, DecodeError> {
        self.array("i128").map(i128::from_le_bytes)
    }

    /// Reads a `U256` as four little-endian words, low word first.
    pub fn read_u256(&mut self) -> Result<U256, DecodeError> {
        self.array("u256").map(U256::from_le_bytes)
    }

    /// Reads an `I256` as four little-endian words, low word first.
    pub fn read_i256(&mut self) -> Result<I256, DecodeError> {
        self.array("i256").map(I256::from_le_bytes)
    }

    /// Reads an IEEE-754 `f32` from its little-endian bit pattern.
    pub fn read_f32(&mut self) -> Result<f32, DecodeError> {
        self.array("f32").map(|b| f32::from_bits(u32::from_le_bytes(b)))
    }

    /// Reads an IEEE-754 `f64` from its little-endian bit pattern.
    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        self.array("f64").map(|b| f64::from_bits(u64::from_le_bytes(b)))
    }

    /// Reads a `u32` length or count prefix.
    #[inline]
    pub fn read_len(&mut self) -> Result<usize, DecodeError> {
        // u32 always fits in usize on the targets we support.
        self.read_u32().map(|n| n as usize)
    }

    /// Reads a length-prefixed run of raw bytes.
    pub fn read_bytes(&mut self) -> Result<&'de [u8], DecodeError> {
        let len = self.read_len()?;
        self.take(len, "[u8]")
    }

    /// Reads a length-prefixed UTF-8 string.
    pub fn read_str(&mut self) -> Result<&'de str, DecodeError> {
        let len = self.read_len()?;
        let bytes = self.take(len, "str")?;
        Ok(std::str::from_utf8(bytes)?)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
