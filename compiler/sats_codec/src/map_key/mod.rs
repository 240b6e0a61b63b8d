//! Comparable keys derived from typed values.
//!
//! A [`MapKey`] stands in for a value in ordered or hashed lookups. Keys
//! derived from the same type are equal exactly when the values are equal.
//! Keys derived from different types are not comparable in any meaningful
//! way.
//!
//! Derivation, first match wins:
//! 1. scalar type: the scalar itself, integers widened to 256 bits
//! 2. single-field product whose field name is a configured wrapper field
//!    and whose field type is a scalar: that field's scalar
//! 3. anything else: the full encoding, as base64 text

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use sats_buffer::{EncodeError, I256, U256};
use sats_types::{AlgebraicType, AlgebraicValue, ScalarKind, Typespace, F32, F64};

use crate::scalar::mismatch;
use crate::{Codec, CodecConfig, CodecError};

/// A totally ordered, hashable stand-in for a value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MapKey {
    Bool(bool),
    /// Any signed integer.
    Signed(I256),
    /// Any unsigned integer.
    Unsigned(U256),
    F32(F32),
    F64(F64),
    /// A `String` value, or the base64 encoding of a composite value.
    Text(Box<str>),
}

/// Derive the map key of `value`, which must be of type `ty`.
pub fn into_map_key(
    ty: &AlgebraicType,
    value: &AlgebraicValue,
    typespace: Option<&Typespace>,
    config: &CodecConfig,
) -> Result<MapKey, CodecError> {
    if let Some(key) = shortcut_key(ty, value, typespace, config)? {
        return Ok(key);
    }
    let codec = Codec::with_config(ty, typespace, config)?;
    Ok(encoded_key(&codec, value)?)
}

/// Rules 1 and 2. `Ok(None)` means the value needs the encoded fallback.
pub(crate) fn shortcut_key(
    ty: &AlgebraicType,
    value: &AlgebraicValue,
    typespace: Option<&Typespace>,
    config: &CodecConfig,
) -> Result<Option<MapKey>, CodecError> {
    let ty = ty.resolve(typespace)?;
    if let Some(kind) = ty.as_scalar() {
        return Ok(Some(scalar_key(kind, value)?));
    }
    let AlgebraicType::Product(product) = ty else {
        return Ok(None);
    };
    let [elem] = &*product.elements else {
        return Ok(None);
    };
    if !elem.name().is_some_and(|name| config.is_wrapper_field(name)) {
        return Ok(None);
    }
    let Some(kind) = elem.algebraic_type.resolve(typespace)?.as_scalar() else {
        return Ok(None);
    };
    match value {
        AlgebraicValue::Product(fields) => match &**fields {
            [inner] => Ok(Some(scalar_key(kind, inner)?)),
            _ => Err(EncodeError::ArityMismatch {
                expected: 1,
                found: fields.len(),
            }
            .into()),
        },
        other => Err(mismatch("product", other).into()),
    }
}

/// Rule 3.
pub(crate) fn encoded_key(codec: &Codec, value: &AlgebraicValue) -> Result<MapKey, EncodeError> {
    let bytes = codec.to_vec(value)?;
    Ok(MapKey::Text(STANDARD.encode(bytes).into_boxed_str()))
}

fn scalar_key(kind: ScalarKind, value: &AlgebraicValue) -> Result<MapKey, EncodeError> {
    use AlgebraicValue as V;
    Ok(match (kind, value) {
        (ScalarKind::Bool, V::Bool(v)) => MapKey::Bool(*v),
        (ScalarKind::I8, V::I8(v)) => MapKey::Signed(I256::from(*v)),
        (ScalarKind::I16, V::I16(v)) => MapKey::Signed(I256::from(*v)),
        (ScalarKind::I32, V::I32(v)) => MapKey::Signed(I256::from(*v)),
        (ScalarKind::I64, V::I64(v)) => MapKey::Signed(I256::from(*v)),
        (ScalarKind::I128, V::I128(v)) => MapKey::Signed(I256::from(*v)),
        (ScalarKind::I256, V::I256(v)) => MapKey::Signed(*v),
        (ScalarKind::U8, V::U8(v)) => MapKey::Unsigned(U256::from(*v)),
        (ScalarKind::U16, V::U16(v)) => MapKey::Unsigned(U256::from(*v)),
        (ScalarKind::U32, V::U32(v)) => MapKey::Unsigned(U256::from(*v)),
        (ScalarKind::U64, V::U64(v)) => MapKey::Unsigned(U256::from(*v)),
        (ScalarKind::U128, V::U128(v)) => MapKey::Unsigned(U256::from(*v)),
        (ScalarKind::U256, V::U256(v)) => MapKey::Unsigned(*v),
        (ScalarKind::F32, V::F32(v)) => MapKey::F32(*v),
        (ScalarKind::F64, V::F64(v)) => MapKey::F64(*v),
        (ScalarKind::String, V::String(s)) => MapKey::Text(s.clone()),
        (kind, other) => return Err(mismatch(kind.name(), other)),
    })
}
