//! Scalar leaves.
//!
//! Two ways to move a scalar: through the cursors one value at a time
//! ([`encode`]/[`decode`]), or into and out of a slice of a packed fixed
//! layout region ([`put_fixed`]/[`get_fixed`]). Both produce the same bytes.

use sats_buffer::{DecodeError, EncodeError, Reader, Writer, I256, U256};
use sats_types::{AlgebraicValue, ScalarKind, F32, F64};

#[cold]
pub(crate) fn mismatch(expected: &'static str, found: &AlgebraicValue) -> EncodeError {
    EncodeError::TypeMismatch {
        expected,
        found: found.kind_name(),
    }
}

pub(crate) fn encode(
    kind: ScalarKind,
    w: &mut Writer,
    value: &AlgebraicValue,
) -> Result<(), EncodeError> {
    use AlgebraicValue as V;
    match (kind, value) {
        (ScalarKind::Bool, V::Bool(v)) => w.write_bool(*v),
        (ScalarKind::I8, V::I8(v)) => w.write_i8(*v),
        (ScalarKind::U8, V::U8(v)) => w.write_u8(*v),
        (ScalarKind::I16, V::I16(v)) => w.write_i16(*v),
        (ScalarKind::U16, V::U16(v)) => w.write_u16(*v),
        (ScalarKind::I32, V::I32(v)) => w.write_i32(*v),
        (ScalarKind::U32, V::U32(v)) => w.write_u32(*v),
        (ScalarKind::I64, V::I64(v)) => w.write_i64(*v),
        (ScalarKind::U64, V::U64(v)) => w.write_u64(*v),
        (ScalarKind::I128, V::I128(v)) => w.write_i128(*v),
        (ScalarKind::U128, V::U128(v)) => w.write_u128(*v),
        (ScalarKind::I256, V::I256(v)) => w.write_i256(*v),
        (ScalarKind::U256, V::U256(v)) => w.write_u256(*v),
        (ScalarKind::F32, V::F32(v)) => w.write_f32(v.get()),
        (ScalarKind::F64, V::F64(v)) => w.write_f64(v.get()),
        (ScalarKind::String, V::String(s)) => return w.write_str(s),
        (kind, other) => return Err(mismatch(kind.name(), other)),
    }
    Ok(())
}

pub(crate) fn decode(kind: ScalarKind, r: &mut Reader<'_>) -> Result<AlgebraicValue, DecodeError> {
    use AlgebraicValue as V;
    Ok(match kind {
        ScalarKind::Bool => V::Bool(r.read_bool()?),
        ScalarKind::I8 => V::I8(r.read_i8()?),
        ScalarKind::U8 => V::U8(r.read_u8()?),
        ScalarKind::I16 => V::I16(r.read_i16()?),
        ScalarKind::U16 => V::U16(r.read_u16()?),
        ScalarKind::I32 => V::I32(r.read_i32()?),
        ScalarKind::U32 => V::U32(r.read_u32()?),
        ScalarKind::I64 => V::I64(r.read_i64()?),
        ScalarKind::U64 => V::U64(r.read_u64()?),
        ScalarKind::I128 => V::I128(r.read_i128()?),
        ScalarKind::U128 => V::U128(r.read_u128()?),
        ScalarKind::I256 => V::I256(r.read_i256()?),
        ScalarKind::U256 => V::U256(r.read_u256()?),
        ScalarKind::F32 => V::F32(F32::new(r.read_f32()?)),
        ScalarKind::F64 => V::F64(F64::new(r.read_f64()?)),
        ScalarKind::String => V::String(r.read_str()?.into()),
    })
}

/// Write a fixed-width scalar into `dst`, which is exactly its width.
pub(crate) fn put_fixed(
    kind: ScalarKind,
    dst: &mut [u8],
    value: &AlgebraicValue,
) -> Result<(), EncodeError> {
    use AlgebraicValue as V;
    match (kind, value) {
        (ScalarKind::Bool, V::Bool(v)) => dst[0] = u8::from(*v),
        (ScalarKind::I8, V::I8(v)) => dst.copy_from_slice(&v.to_le_bytes()),
        (ScalarKind::U8, V::U8(v)) => dst[0] = *v,
        (ScalarKind::I16, V::I16(v)) => dst.copy_from_slice(&v.to_le_bytes()),
        (ScalarKind::U16, V::U16(v)) => dst.copy_from_slice(&v.to_le_bytes()),
        (ScalarKind::I32, V::I32(v)) => dst.copy_from_slice(&v.to_le_bytes()),
        (ScalarKind::U32, V::U32(v)) => dst.copy_from_slice(&v.to_le_bytes()),
        (ScalarKind::I64, V::I64(v)) => dst.copy_from_slice(&v.to_le_bytes()),
        (ScalarKind::U64, V::U64(v)) => dst.copy_from_slice(&v.to_le_bytes()),
        (ScalarKind::I128, V::I128(v)) => dst.copy_from_slice(&v.to_le_bytes()),
        (ScalarKind::U128, V::U128(v)) => dst.copy_from_slice(&v.to_le_bytes()),
        (ScalarKind::I256, V::I256(v)) => dst.copy_from_slice(&v.to_le_bytes()),
        (ScalarKind::U256, V::U256(v)) => dst.copy_from_slice(&v.to_le_bytes()),
        (ScalarKind::F32, V::F32(v)) => dst.copy_from_slice(&v.to_bits().to_le_bytes()),
        (ScalarKind::F64, V::F64(v)) => dst.copy_from_slice(&v.to_bits().to_le_bytes()),
        (kind, other) => return Err(mismatch(kind.name(), other)),
    }
    Ok(())
}

#[inline]
fn array<const N: usize>(src: &[u8]) -> [u8; N] {
    let mut out = [0; N];
    out.copy_from_slice(src);
    out
}

/// Read a fixed-width scalar from `src`, which is exactly its width.
pub(crate) fn get_fixed(kind: ScalarKind, src: &[u8]) -> Result<AlgebraicValue, DecodeError> {
    use AlgebraicValue as V;
    Ok(match kind {
        ScalarKind::Bool => match src[0] {
            0 => V::Bool(false),
            1 => V::Bool(true),
            b => return Err(DecodeError::InvalidBool(b)),
        },
        ScalarKind::I8 => V::I8(i8::from_le_bytes(array(src))),
        ScalarKind::U8 => V::U8(src[0]),
        ScalarKind::I16 => V::I16(i16::from_le_bytes(array(src))),
        ScalarKind::U16 => V::U16(u16::from_le_bytes(array(src))),
        ScalarKind::I32 => V::I32(i32::from_le_bytes(array(src))),
        ScalarKind::U32 => V::U32(u32::from_le_bytes(array(src))),
        ScalarKind::I64 => V::I64(i64::from_le_bytes(array(src))),
        ScalarKind::U64 => V::U64(u64::from_le_bytes(array(src))),
        ScalarKind::I128 => V::I128(i128::from_le_bytes(array(src))),
        ScalarKind::U128 => V::U128(u128::from_le_bytes(array(src))),
        ScalarKind::I256 => V::I256(I256::from_le_bytes(array(src))),
        ScalarKind::U256 => V::U256(U256::from_le_bytes(array(src))),
        ScalarKind::F32 => V::F32(F32::from_bits(u32::from_le_bytes(array(src)))),
        ScalarKind::F64 => V::F64(F64::from_bits(u64::from_le_bytes(array(src)))),
        ScalarKind::String => unreachable!("fixed layouts never contain strings"),
    })
}
