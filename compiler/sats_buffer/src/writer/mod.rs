//! Growable little-endian output buffer.

use crate::{EncodeError, I256, U256};

macro_rules! write_le {
    ($name:ident, $int:ty) => {
        #[doc = concat!("Writes a little-endian `", stringify!($int), "`.")]
        #[inline]
        pub fn $name(&mut self, val: $int) {
            self.put_slice(&val.to_le_bytes());
        }
    };
}

/// Append-only byte buffer with a write offset.
///
/// The write offset is the buffer length. Growth is geometric: when a write
/// does not fit, capacity becomes the larger of double the old capacity and
/// the smallest size that fits the write.
#[derive(Clone, Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Create an empty writer. No allocation happens until the first write.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Current write offset.
    #[inline]
    pub fn offset(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written since creation or the last reset.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Current capacity of the backing storage.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Bytes written so far.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the writer, returning the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Rewind to offset 0, keeping the allocation for the next row.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Drop everything written after `offset`. Does nothing if `offset` is
    /// past the current write offset.
    pub fn truncate(&mut self, offset: usize) {
        self.buf.truncate(offset);
    }

    /// Make room for `additional` more bytes.
    #[inline]
    fn ensure(&mut self, additional: usize) {
        let needed = self.buf.len() + additional;
        if needed > self.buf.capacity() {
            let target = needed.max(self.buf.capacity() * 2);
            self.buf.reserve_exact(target - self.buf.len());
        }
    }

    /// Append raw bytes with no length prefix.
    #[inline]
    pub fn put_slice(&mut self, bytes: &[u8]) {
        self.ensure(bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    /// Append `n` zero bytes and return them for in-place writing.
    ///
    /// Fixed-layout products fill the returned region field by field
    /// instead of growing the buffer once per field.
    pub fn reserve_slice(&mut self, n: usize) -> &mut [u8] {
        self.ensure(n);
        let start = self.buf.len();
        self.buf.resize(start + n, 0);
        &mut self.buf[start..]
    }

    write_le!(write_u8, u8);
    write_le!(write_i8, i8);
    write_le!(write_u16, u16);
    write_le!(write_i16, i16);
    write_le!(write_u32, u32);
    write_le!(write_i32, i32);
    write_le!(write_u64, u64);
    write_le!(write_i64, i64);
    write_le!(write_u128, u128);
    write_le!(write_i128, i128);

    /// Writes a `bool` as a single 0 or 1 byte.
    #[inline]
    pub fn write_bool(&mut self, val: bool) {
        self.write_u8(u8::from(val));
    }

    /// Writes a `U256` as four little-endian words, low word first.
    pub fn write_u256(&mut self, val: U256) {
        for word in val.words() {
            self.write_u64(word);
        }
    }

    /// Writes an `I256` as four little-endian words, low word first.
    pub fn write_i256(&mut self, val: I256) {
        for word in val.words() {
            self.write_u64(word);
        }
    }

    /// Writes an `f32` as its little-endian bit pattern.
    #[inline]
    pub fn write_f32(&mut self, val: f32) {
        self.write_u32(val.to_bits());
    }

    /// Writes an `f64` as its little-endian bit pattern.
    #[inline]
    pub fn write_f64(&mut self, val: f64) {
        self.write_u64(val.to_bits());
    }

    /// Writes a `u32` length or count prefix.
    pub fn write_len(&mut self, len: usize) -> Result<(), EncodeError> {
        let len = u32::try_from(len).map_err(|_| EncodeError::LengthOverflow { len })?;
        self.write_u32(len);
        Ok(())
    }

    /// Writes a length-prefixed run of raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.write_len(bytes.len())?;
        self.put_slice(bytes);
        Ok(())
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_str(&mut self, s: &str) -> Result<(), EncodeError> {
        self.write_bytes(s.as_bytes())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
