//! Plan interpreter: bytes to value.

use sats_buffer::{DecodeError, Reader};
use sats_types::{AlgebraicValue, SumValue, RESULT_ERR_TAG, RESULT_OK_TAG};

use crate::encode::{TAG_FIRST, TAG_SECOND};
use crate::plan::{FixedLayout, Plan, PlanId, Program};
use crate::scalar;
use crate::stack::ensure_sufficient_stack;

pub(crate) fn decode(
    program: &Program,
    id: PlanId,
    r: &mut Reader<'_>,
) -> Result<AlgebraicValue, DecodeError> {
    ensure_sufficient_stack(|| decode_plan(program, id, r))
}

fn decode_plan(
    program: &Program,
    id: PlanId,
    r: &mut Reader<'_>,
) -> Result<AlgebraicValue, DecodeError> {
    match program.plan(id) {
        Plan::Scalar(kind) => scalar::decode(*kind, r),
        Plan::Bytes => Ok(AlgebraicValue::Bytes(r.read_bytes()?.into())),
        Plan::Array(elem) => {
            let len = r.read_len()?;
            // A count is only a claim; don't let it size the allocation.
            let mut elems = Vec::with_capacity(len.min(r.remaining()));
            for _ in 0..len {
                elems.push(decode(program, *elem, r)?);
            }
            Ok(AlgebraicValue::Array(elems.into_boxed_slice()))
        }
        Plan::Product(plan) => {
            if let Some(layout) = &plan.layout {
                return decode_fixed(layout, r);
            }
            let fields = plan
                .elements
                .iter()
                .map(|elem| decode(program, *elem, r))
                .collect::<Result<Box<[_]>, _>>()?;
            Ok(AlgebraicValue::Product(fields))
        }
        Plan::Option(some) => match r.read_u8()? {
            TAG_FIRST => Ok(AlgebraicValue::some(decode(program, *some, r)?)),
            TAG_SECOND => Ok(AlgebraicValue::none()),
            tag => Err(DecodeError::InvalidTag { tag, variants: 2 }),
        },
        Plan::Result { ok, err } => {
            let (tag, plan) = match r.read_u8()? {
                TAG_FIRST => (RESULT_OK_TAG, *ok),
                TAG_SECOND => (RESULT_ERR_TAG, *err),
                tag => return Err(DecodeError::InvalidTag { tag, variants: 2 }),
            };
            Ok(AlgebraicValue::sum(tag, decode(program, plan, r)?))
        }
        Plan::Sum(plan) => {
            let tag = r.read_u8()?;
            let variant = plan
                .variants
                .get(usize::from(tag))
                .ok_or(DecodeError::InvalidTag {
                    tag,
                    variants: plan.variants.len(),
                })?;
            let payload = decode(program, variant.plan, r)?;
            Ok(AlgebraicValue::Sum(SumValue {
                tag: variant.tag.clone(),
                value: Box::new(payload),
            }))
        }
        Plan::Pending => unreachable!("plan {id:?} used before it was filled"),
    }
}

/// Read all fields of a packed product from one region.
fn decode_fixed(layout: &FixedLayout, r: &mut Reader<'_>) -> Result<AlgebraicValue, DecodeError> {
    let region = r.take(layout.size, "product")?;
    let fields = layout
        .fields
        .iter()
        .map(|field| scalar::get_fixed(field.kind, &region[field.range()]))
        .collect::<Result<Box<[_]>, _>>()?;
    Ok(AlgebraicValue::Product(fields))
}
