//! Type graph to [`Program`] compilation.
//!
//! # Two-Phase Slots
//!
//! Products, sums and arrays get a slot in the plan table *before* their
//! children are compiled:
//!
//! 1. reserve a `Plan::Pending` slot and record it in the memo
//! 2. compile the children, which may reach this node again and get the
//!    reserved id back
//! 3. overwrite the slot with the finished plan
//!
//! A program is only handed out once every slot is filled, so the
//! interpreters never see `Pending`.
//!
//! # Memo Keys
//!
//! - Products and sums are keyed by address. The compiler borrows the type
//!   graph (and typespace) for its whole run, so an address names exactly
//!   one node, and two equal-looking nodes in different places each get
//!   their own slot.
//! - Every `Ref` on a resolved chain is keyed by its index and aliased to the
//!   slot of the type it resolves to. This is what closes cycles that pass
//!   through arrays only.

use rustc_hash::FxHashMap;
use sats_types::{
    AlgebraicType, AlgebraicTypeRef, ArrayType, ProductType, Resolved, ScalarKind, SumType,
    TypeRefError, Typespace,
};
use tracing::{debug, trace};

use crate::plan::{FixedLayout, Plan, PlanId, Program, ProductPlan, SumPlan, VariantPlan};
use crate::stack::ensure_sufficient_stack;
use crate::CodecConfig;

/// Compile `ty` into a program and the id of its root plan.
#[tracing::instrument(level = "debug", skip_all, fields(
    typespace_len = typespace.map_or(0, Typespace::len),
    fixed_layouts = config.fixed_layouts,
))]
pub(crate) fn compile(
    ty: &AlgebraicType,
    typespace: Option<&Typespace>,
    config: &CodecConfig,
) -> Result<(Program, PlanId), TypeRefError> {
    let mut compiler = Compiler::new(typespace, config);
    let root = compiler.compile(ty)?;
    debug!(root = ?root, plans = compiler.plans.len(), "compiled codec");
    Ok((Program::new(compiler.plans), root))
}

struct Compiler<'a> {
    typespace: Option<&'a Typespace>,
    config: &'a CodecConfig,
    plans: Vec<Plan>,
    products: FxHashMap<*const ProductType, PlanId>,
    sums: FxHashMap<*const SumType, PlanId>,
    refs: FxHashMap<AlgebraicTypeRef, PlanId>,
}

impl<'a> Compiler<'a> {
    fn new(typespace: Option<&'a Typespace>, config: &'a CodecConfig) -> Self {
        Self {
            typespace,
            config,
            plans: Program::builtin_plans(),
            products: FxHashMap::default(),
            sums: FxHashMap::default(),
            refs: FxHashMap::default(),
        }
    }

    fn compile(&mut self, ty: &'a AlgebraicType) -> Result<PlanId, TypeRefError> {
        ensure_sufficient_stack(|| match ty {
            AlgebraicType::Ref(r) => self.compile_ref(*r),
            _ => self.compile_resolved(ty, &[]),
        })
    }

    fn compile_ref(&mut self, r: AlgebraicTypeRef) -> Result<PlanId, TypeRefError> {
        if let Some(&id) = self.refs.get(&r) {
            return Ok(id);
        }
        let typespace = self.typespace.ok_or(TypeRefError::MissingTypespace(r))?;
        let Resolved { ty, chain } = typespace.resolve(r)?;
        self.compile_resolved(ty, &chain)
    }

    /// Compile a non-`Ref` type reached through `aliases`.
    fn compile_resolved(
        &mut self,
        ty: &'a AlgebraicType,
        aliases: &[AlgebraicTypeRef],
    ) -> Result<PlanId, TypeRefError> {
        if let Some(kind) = ty.as_scalar() {
            let id = PlanId::scalar(kind);
            self.alias(aliases, id);
            return Ok(id);
        }
        match ty {
            AlgebraicType::Product(product) => self.compile_product(product, aliases),
            AlgebraicType::Sum(sum) => self.compile_sum(sum, aliases),
            AlgebraicType::Array(array) => self.compile_array(array, aliases),
            AlgebraicType::Ref(r) => {
                let id = self.compile_ref(*r)?;
                self.alias(aliases, id);
                Ok(id)
            }
            _ => unreachable!("scalars are handled above"),
        }
    }

    fn compile_product(
        &mut self,
        product: &'a ProductType,
        aliases: &[AlgebraicTypeRef],
    ) -> Result<PlanId, TypeRefError> {
        let key: *const ProductType = product;
        if let Some(&id) = self.products.get(&key) {
            self.alias(aliases, id);
            return Ok(id);
        }
        let id = self.reserve();
        self.products.insert(key, id);
        self.alias(aliases, id);

        let elements = product
            .elements
            .iter()
            .map(|elem| self.compile(&elem.algebraic_type))
            .collect::<Result<Box<[_]>, _>>()?;
        let layout = self.fixed_layout(&elements);
        if let Some(layout) = &layout {
            debug!(?id, size = layout.size, "fixed layout");
        }
        self.fill(id, Plan::Product(ProductPlan { elements, layout }));
        Ok(id)
    }

    fn fixed_layout(&self, elements: &[PlanId]) -> Option<FixedLayout> {
        if !self.config.fixed_layouts || elements.is_empty() {
            return None;
        }
        let kinds = elements
            .iter()
            .map(|id| id.as_scalar())
            .collect::<Option<Vec<ScalarKind>>>()?;
        FixedLayout::pack(kinds)
    }

    fn compile_sum(
        &mut self,
        sum: &'a SumType,
        aliases: &[AlgebraicTypeRef],
    ) -> Result<PlanId, TypeRefError> {
        let key: *const SumType = sum;
        if let Some(&id) = self.sums.get(&key) {
            self.alias(aliases, id);
            return Ok(id);
        }
        let id = self.reserve();
        self.sums.insert(key, id);
        self.alias(aliases, id);

        let plan = if let Some(some) = sum.as_option() {
            Plan::Option(self.compile(some)?)
        } else if let Some((ok, err)) = sum.as_result() {
            let ok = self.compile(ok)?;
            let err = self.compile(err)?;
            Plan::Result { ok, err }
        } else {
            let variants = sum
                .variants
                .iter()
                .enumerate()
                .map(|(i, variant)| {
                    Ok(VariantPlan {
                        tag: variant.tag(i),
                        plan: self.compile(&variant.algebraic_type)?,
                    })
                })
                .collect::<Result<Box<[_]>, TypeRefError>>()?;
            Plan::Sum(SumPlan { variants })
        };
        self.fill(id, plan);
        Ok(id)
    }

    fn compile_array(
        &mut self,
        array: &'a ArrayType,
        aliases: &[AlgebraicTypeRef],
    ) -> Result<PlanId, TypeRefError> {
        if *array.elem_ty.resolve(self.typespace)? == AlgebraicType::U8 {
            self.alias(aliases, PlanId::BYTES);
            return Ok(PlanId::BYTES);
        }
        let id = self.reserve();
        self.alias(aliases, id);
        let elem = self.compile(&array.elem_ty)?;
        self.fill(id, Plan::Array(elem));
        Ok(id)
    }

    fn reserve(&mut self) -> PlanId {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "one slot per type node; a graph with u32::MAX nodes does not fit in memory"
        )]
        let id = PlanId::from_raw(self.plans.len() as u32);
        trace!(?id, "reserve plan slot");
        self.plans.push(Plan::Pending);
        id
    }

    fn fill(&mut self, id: PlanId, plan: Plan) {
        debug_assert!(matches!(self.plans[id.index()], Plan::Pending));
        self.plans[id.index()] = plan;
    }

    fn alias(&mut self, aliases: &[AlgebraicTypeRef], id: PlanId) {
        for &r in aliases {
            self.refs.insert(r, id);
        }
    }
}
