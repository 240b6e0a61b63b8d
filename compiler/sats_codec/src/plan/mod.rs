//! Compiled codec plans.
//!
//! A [`Program`] is a flat table of [`Plan`]s addressed by [`PlanId`]. Each
//! plan describes one node of the type graph with its children replaced by
//! ids, so recursion in the type graph becomes a cycle of ids in the table
//! and the interpreters never touch the type graph again.
//!
//! # Fixed Slots
//!
//! The first slots of every program are fixed:
//!
//! | Id | Plan |
//! |----|------|
//! | 0-15 | `Scalar(kind)`, id = `kind as u32` |
//! | 16 | `Bytes` |
//! | 17.. | products, sums and arrays, in compile order |
//!
//! Scalars and byte arrays therefore never allocate a slot.

use std::fmt;

use sats_types::ScalarKind;

/// Index of a plan inside a [`Program`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct PlanId(u32);

#[allow(
    clippy::cast_possible_truncation,
    reason = "ScalarKind::COUNT is 16, far below u32::MAX"
)]
impl PlanId {
    /// `Array<U8>` as a length-prefixed byte run.
    pub const BYTES: PlanId = PlanId(ScalarKind::COUNT as u32);

    /// First id handed out for compiled composites.
    pub const FIRST_DYNAMIC: u32 = ScalarKind::COUNT as u32 + 1;

    #[inline]
    pub const fn scalar(kind: ScalarKind) -> Self {
        PlanId(kind as u32)
    }

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        PlanId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The scalar kind for ids in the fixed scalar range.
    #[inline]
    pub fn as_scalar(self) -> Option<ScalarKind> {
        ScalarKind::ALL.get(self.index()).copied()
    }
}

impl fmt::Debug for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_scalar() {
            Some(kind) => write!(f, "PlanId({kind})"),
            None if *self == Self::BYTES => write!(f, "PlanId(bytes)"),
            None => write!(f, "PlanId({})", self.0),
        }
    }
}

/// One node of a compiled codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Scalar(ScalarKind),
    /// Length-prefixed raw bytes.
    Bytes,
    /// Count-prefixed sequence of the element plan.
    Array(PlanId),
    Product(ProductPlan),
    /// The optional shape; carries the `some` payload plan.
    Option(PlanId),
    /// The result shape.
    Result { ok: PlanId, err: PlanId },
    /// Any other sum.
    Sum(SumPlan),
    /// Slot reserved but not yet filled. Never present in a finished program.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductPlan {
    pub elements: Box<[PlanId]>,
    /// Present when every element is a fixed-width scalar and packing is enabled.
    pub layout: Option<FixedLayout>,
}

/// Packed layout of an all-fixed-width product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLayout {
    /// Total width in bytes.
    pub size: usize,
    pub fields: Box<[FixedField]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedField {
    pub offset: usize,
    pub width: usize,
    pub kind: ScalarKind,
}

impl FixedField {
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.width
    }
}

impl FixedLayout {
    /// Lay out `kinds` back to back. `None` if any kind is variable-width.
    pub fn pack(kinds: impl IntoIterator<Item = ScalarKind>) -> Option<Self> {
        let mut size = 0;
        let mut fields = Vec::new();
        for kind in kinds {
            let width = kind.fixed_width()?;
            fields.push(FixedField {
                offset: size,
                width,
                kind,
            });
            size += width;
        }
        Some(Self {
            size,
            fields: fields.into_boxed_slice(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SumPlan {
    pub variants: Box<[VariantPlan]>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantPlan {
    /// Tag that addresses the variant: the name, or the decimal position.
    pub tag: Box<str>,
    pub plan: PlanId,
}

impl SumPlan {
    /// Position of the variant a value tag addresses.
    pub fn variant_index(&self, tag: &str) -> Option<usize> {
        self.variants.iter().position(|v| *v.tag == *tag)
    }
}

/// A finished table of plans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    plans: Box<[Plan]>,
}

impl Program {
    pub(crate) fn new(plans: Vec<Plan>) -> Self {
        debug_assert!(plans.len() >= PlanId::FIRST_DYNAMIC as usize);
        debug_assert!(!plans.iter().any(|p| matches!(p, Plan::Pending)));
        Self {
            plans: plans.into_boxed_slice(),
        }
    }

    /// The fixed slots every program starts with.
    pub(crate) fn builtin_plans() -> Vec<Plan> {
        let mut plans = Vec::with_capacity(PlanId::FIRST_DYNAMIC as usize + 8);
        plans.extend(ScalarKind::ALL.into_iter().map(Plan::Scalar));
        plans.push(Plan::Bytes);
        plans
    }

    #[inline]
    pub fn plan(&self, id: PlanId) -> &Plan {
        &self.plans[id.index()]
    }

    /// Number of plans, fixed slots included.
    #[inline]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}
