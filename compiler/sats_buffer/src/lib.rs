//! Binary cursor pair for the SATS wire format.
//!
//! Every value on the wire is a sequence of little-endian scalars and
//! length-prefixed byte runs. This crate provides the two halves that move
//! those bytes:
//!
//! - [`Reader`]: a forward-only cursor over a borrowed byte slice. Each
//!   `read_*` consumes exactly the width of its scalar, or fails with
//!   [`DecodeError::BufferLength`] without advancing.
//! - [`Writer`]: a growable buffer that appends scalars in place. Capacity
//!   doubles on demand, so a writer reused across many rows settles at the
//!   size of the largest row.
//!
//! Wide integers (`I256`/`U256`) live here as well because their word layout
//! is part of the wire contract: four 64-bit little-endian words, least
//! significant word first.
//!
//! # Standalone
//!
//! This crate has no `sats_*` dependencies. It knows nothing about types or
//! values; the codec in `sats_codec` decides what to read and write.

mod error;
mod reader;
mod wide;
mod writer;

pub use error::{DecodeError, EncodeError};
pub use reader::Reader;
pub use wide::{I256, U256};
pub use writer::Writer;

/// Width in bytes of the `u32` length prefix in front of strings, byte
/// arrays and array element counts.
pub const LEN_PREFIX_WIDTH: usize = 4;
