//! Structural algebraic type system (SATS) model.
//!
//! Types are described structurally, not nominally:
//! - `AlgebraicType`: products, sums, arrays, 16 scalar leaves, and `Ref`
//!   indirections into a [`Typespace`]
//! - `Typespace`: an append-only table of type definitions, the only way to
//!   express recursive or shared types
//! - `AlgebraicValue`: an untyped runtime value, meaningful only next to the
//!   type it is encoded against
//!
//! Type graphs are built once by the schema layer and are read-only after
//! that. The codec in `sats_codec` borrows them to build its plans.

mod algebraic_type;
mod scalar;
mod type_ref;
mod typespace;
mod value;
mod well_known;

pub use algebraic_type::{
    AlgebraicType, ArrayType, ProductType, ProductTypeElement, SumType, SumTypeVariant,
    OPTION_NONE_TAG, OPTION_SOME_TAG, RESULT_ERR_TAG, RESULT_OK_TAG,
};
pub use scalar::ScalarKind;
pub use type_ref::AlgebraicTypeRef;
pub use typespace::{Resolved, TypeRefError, Typespace};
pub use value::{AlgebraicValue, SumValue, F32, F64};
pub use well_known::{
    CONNECTION_ID_TAG, IDENTITY_TAG, TIMESTAMP_TAG, TIME_DURATION_TAG, UUID_TAG,
    WELL_KNOWN_WRAPPER_FIELDS,
};

// Wide integers are part of the value model; re-export so callers need only this crate.
pub use sats_buffer::{I256, U256};
