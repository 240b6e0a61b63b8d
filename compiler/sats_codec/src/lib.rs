//! Type-directed binary codec for SATS values.
//!
//! Given an [`AlgebraicType`] (and the [`Typespace`] its `Ref`s point into),
//! the codec compiles a [`Codec`]: a flat table of plans that an encode and
//! a decode interpreter walk in lockstep with the value or the bytes.
//!
//! # Architecture
//!
//! ```text
//! AlgebraicType + Typespace
//!     │  compile (two-phase slots, memo by node address and by ref)
//!     ▼
//! Program [Plan; n]  ──►  encode: AlgebraicValue → Writer
//!                    ──►  decode: Reader → AlgebraicValue
//! ```
//!
//! - Recursive types compile to cycles of plan ids, so compilation
//!   terminates and the interpreters recurse only as deep as the value.
//! - Products made only of fixed-width scalars get a packed layout and
//!   move as one contiguous region.
//! - The optional and result sum shapes are recognized by variant names.
//!   Optionals decode to [`AlgebraicValue::Option`], results to a tagged sum.
//!
//! [`CodecCache`] shares compiled codecs between threads, and
//! [`into_map_key`] derives comparable keys from typed values.
//!
//! # Tracing
//!
//! Compilation emits `debug`/`trace` events under the `sats_codec` target.
//! Call [`init_tracing`] and set `RUST_LOG=sats_codec=debug` to see them.

mod cache;
mod codec;
mod compile;
mod config;
mod decode;
mod encode;
mod error;
mod map_key;
pub mod plan;
mod scalar;
mod stack;

use std::sync::Once;

pub use cache::CodecCache;
pub use codec::{Codec, Deserializer, Serializer};
pub use config::{CodecConfig, WrapperFields};
pub use error::CodecError;
pub use map_key::MapKey;

pub use sats_buffer::{DecodeError, EncodeError, Reader, Writer};
pub use sats_types::{AlgebraicType, AlgebraicValue, TypeRefError, Typespace};

/// Build the encoding half of the codec for `ty`.
pub fn make_serializer(
    ty: &AlgebraicType,
    typespace: Option<&Typespace>,
) -> Result<Serializer, TypeRefError> {
    Ok(Codec::new(ty, typespace)?.serializer())
}

/// Build the decoding half of the codec for `ty`.
pub fn make_deserializer(
    ty: &AlgebraicType,
    typespace: Option<&Typespace>,
) -> Result<Deserializer, TypeRefError> {
    Ok(Codec::new(ty, typespace)?.deserializer())
}

/// Compile a codec for `ty` and append the encoding of `value` to `w`.
///
/// For repeated use, keep a [`Codec`] or a [`CodecCache`] instead.
pub fn serialize_value(
    w: &mut Writer,
    ty: &AlgebraicType,
    value: &AlgebraicValue,
    typespace: Option<&Typespace>,
) -> Result<(), CodecError> {
    Ok(Codec::new(ty, typespace)?.encode(w, value)?)
}

/// Compile a codec for `ty` and decode one value from the front of `r`.
pub fn deserialize_value(
    r: &mut Reader<'_>,
    ty: &AlgebraicType,
    typespace: Option<&Typespace>,
) -> Result<AlgebraicValue, CodecError> {
    Ok(Codec::new(ty, typespace)?.decode(r)?)
}

/// Encode `value` into a fresh buffer.
pub fn to_vec(
    ty: &AlgebraicType,
    value: &AlgebraicValue,
    typespace: Option<&Typespace>,
) -> Result<Vec<u8>, CodecError> {
    Ok(Codec::new(ty, typespace)?.to_vec(value)?)
}

/// Decode a value that spans exactly `bytes`.
pub fn from_slice(
    ty: &AlgebraicType,
    bytes: &[u8],
    typespace: Option<&Typespace>,
) -> Result<AlgebraicValue, CodecError> {
    Ok(Codec::new(ty, typespace)?.from_slice(bytes)?)
}

/// Derive the map key of `value` with the default wrapper fields.
///
/// See [`MapKey`] for the derivation rules.
pub fn into_map_key(
    ty: &AlgebraicType,
    value: &AlgebraicValue,
    typespace: Option<&Typespace>,
) -> Result<MapKey, CodecError> {
    map_key::into_map_key(ty, value, typespace, &CodecConfig::default())
}

/// Like [`into_map_key`], with explicit wrapper fields.
pub fn into_map_key_with_config(
    ty: &AlgebraicType,
    value: &AlgebraicValue,
    typespace: Option<&Typespace>,
    config: &CodecConfig,
) -> Result<MapKey, CodecError> {
    map_key::into_map_key(ty, value, typespace, config)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Does nothing unless `RUST_LOG` is set.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
