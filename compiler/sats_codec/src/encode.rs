//! Plan interpreter: value to bytes.
//!
//! Values must be in the form the decoder produces: `Bytes` for `Array<U8>`
//! and the flattened `Option` for the optional shape. Any other shape is a
//! [`EncodeError::TypeMismatch`], so distinct values never share an encoding.

use sats_buffer::{EncodeError, Writer};
use sats_types::{AlgebraicValue, RESULT_ERR_TAG, RESULT_OK_TAG};

use crate::plan::{FixedLayout, Plan, PlanId, Program};
use crate::scalar::{self, mismatch};
use crate::stack::ensure_sufficient_stack;

/// Wire discriminants of the two canonical sum shapes.
pub(crate) const TAG_FIRST: u8 = 0;
pub(crate) const TAG_SECOND: u8 = 1;

pub(crate) fn encode(
    program: &Program,
    id: PlanId,
    w: &mut Writer,
    value: &AlgebraicValue,
) -> Result<(), EncodeError> {
    ensure_sufficient_stack(|| encode_plan(program, id, w, value))
}

fn encode_plan(
    program: &Program,
    id: PlanId,
    w: &mut Writer,
    value: &AlgebraicValue,
) -> Result<(), EncodeError> {
    match program.plan(id) {
        Plan::Scalar(kind) => scalar::encode(*kind, w, value),
        Plan::Bytes => encode_bytes(w, value),
        Plan::Array(elem) => {
            let AlgebraicValue::Array(elems) = value else {
                return Err(mismatch("array", value));
            };
            w.write_len(elems.len())?;
            for elem_value in elems.iter() {
                encode(program, *elem, w, elem_value)?;
            }
            Ok(())
        }
        Plan::Product(plan) => {
            let AlgebraicValue::Product(fields) = value else {
                return Err(mismatch("product", value));
            };
            if fields.len() != plan.elements.len() {
                return Err(EncodeError::ArityMismatch {
                    expected: plan.elements.len(),
                    found: fields.len(),
                });
            }
            if let Some(layout) = &plan.layout {
                return encode_fixed(layout, w, fields);
            }
            for (elem, field) in plan.elements.iter().zip(fields.iter()) {
                encode(program, *elem, w, field)?;
            }
            Ok(())
        }
        Plan::Option(some) => match value {
            AlgebraicValue::Option(Some(inner)) => {
                w.write_u8(TAG_FIRST);
                encode(program, *some, w, inner)
            }
            AlgebraicValue::Option(None) => {
                w.write_u8(TAG_SECOND);
                Ok(())
            }
            other => Err(mismatch("option", other)),
        },
        Plan::Result { ok, err } => {
            let AlgebraicValue::Sum(sum) = value else {
                return Err(mismatch("sum", value));
            };
            let (tag, plan) = match &*sum.tag {
                RESULT_OK_TAG => (TAG_FIRST, *ok),
                RESULT_ERR_TAG => (TAG_SECOND, *err),
                _ => {
                    return Err(EncodeError::UnknownVariant {
                        tag: sum.tag.clone(),
                    })
                }
            };
            w.write_u8(tag);
            encode(program, plan, w, &sum.value)
        }
        Plan::Sum(plan) => {
            let AlgebraicValue::Sum(sum) = value else {
                return Err(mismatch("sum", value));
            };
            let index = plan
                .variant_index(&sum.tag)
                .ok_or_else(|| EncodeError::UnknownVariant {
                    tag: sum.tag.clone(),
                })?;
            let tag =
                u8::try_from(index).map_err(|_| EncodeError::VariantIndexOverflow { index })?;
            w.write_u8(tag);
            encode(program, plan.variants[index].plan, w, &sum.value)
        }
        Plan::Pending => unreachable!("plan {id:?} used before it was filled"),
    }
}

fn encode_bytes(w: &mut Writer, value: &AlgebraicValue) -> Result<(), EncodeError> {
    match value {
        AlgebraicValue::Bytes(bytes) => w.write_bytes(bytes),
        other => Err(mismatch("bytes", other)),
    }
}

/// Write all fields of a packed product into one reserved region.
fn encode_fixed(
    layout: &FixedLayout,
    w: &mut Writer,
    fields: &[AlgebraicValue],
) -> Result<(), EncodeError> {
    let region = w.reserve_slice(layout.size);
    for (field, value) in layout.fields.iter().zip(fields) {
        scalar::put_fixed(field.kind, &mut region[field.range()], value)?;
    }
    Ok(())
}
