//! The algebraic type graph.
//!
//! # Structural Typing
//!
//! Two products with the same element types in the same order are
//! wire-compatible whatever their field names. Names exist for ergonomics
//! and for the two places the codec does look at them:
//! - sum values are addressed by variant name
//! - the optional (`some | none`) and result (`ok | err`) shapes are
//!   recognized by their variant names and count
//!
//! # Recursion
//!
//! A type can only refer to itself through a [`Typespace`] entry:
//!
//! ```text
//! &0 = (value: U32, next: (some: &0 | none: ()))
//! ```
//!
//! The graph itself is a tree; `Ref` edges close the cycles.

use crate::{AlgebraicTypeRef, ScalarKind, TypeRefError, Typespace};

/// Name of the present variant of the optional shape.
pub const OPTION_SOME_TAG: &str = "some";
/// Name of the absent variant of the optional shape.
pub const OPTION_NONE_TAG: &str = "none";
/// Name of the success variant of the result shape.
pub const RESULT_OK_TAG: &str = "ok";
/// Name of the failure variant of the result shape.
pub const RESULT_ERR_TAG: &str = "err";

/// A structural type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgebraicType {
    /// Indirection into the typespace.
    Ref(AlgebraicTypeRef),
    /// Tagged union. The variant's position is its wire discriminant.
    Sum(SumType),
    /// Record. Elements encode in declared order with no tags.
    Product(ProductType),
    /// Homogeneous sequence.
    Array(ArrayType),
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    I128,
    U128,
    I256,
    U256,
    F32,
    F64,
    /// UTF-8 text.
    String,
}

impl AlgebraicType {
    /// The scalar kind of a leaf type, or `None` for `Ref`, `Sum`, `Product` and `Array`.
    pub const fn as_scalar(&self) -> Option<ScalarKind> {
        Some(match self {
            AlgebraicType::Bool => ScalarKind::Bool,
            AlgebraicType::I8 => ScalarKind::I8,
            AlgebraicType::U8 => ScalarKind::U8,
            AlgebraicType::I16 => ScalarKind::I16,
            AlgebraicType::U16 => ScalarKind::U16,
            AlgebraicType::I32 => ScalarKind::I32,
            AlgebraicType::U32 => ScalarKind::U32,
            AlgebraicType::I64 => ScalarKind::I64,
            AlgebraicType::U64 => ScalarKind::U64,
            AlgebraicType::I128 => ScalarKind::I128,
            AlgebraicType::U128 => ScalarKind::U128,
            AlgebraicType::I256 => ScalarKind::I256,
            AlgebraicType::U256 => ScalarKind::U256,
            AlgebraicType::F32 => ScalarKind::F32,
            AlgebraicType::F64 => ScalarKind::F64,
            AlgebraicType::String => ScalarKind::String,
            AlgebraicType::Ref(_)
            | AlgebraicType::Sum(_)
            | AlgebraicType::Product(_)
            | AlgebraicType::Array(_) => return None,
        })
    }

    #[inline]
    pub const fn is_scalar(&self) -> bool {
        self.as_scalar().is_some()
    }

    /// Returns `true` for the empty product `()`.
    pub fn is_unit(&self) -> bool {
        matches!(self, AlgebraicType::Product(p) if p.is_unit())
    }

    /// Returns `true` for `Array<U8>`, which encodes as a raw byte run.
    pub fn is_bytes(&self) -> bool {
        matches!(self, AlgebraicType::Array(a) if *a.elem_ty == AlgebraicType::U8)
    }

    /// Follow `Ref`s until a non-`Ref` type is reached.
    ///
    /// Non-`Ref` types resolve to themselves without touching the typespace.
    pub fn resolve<'a>(
        &'a self,
        typespace: Option<&'a Typespace>,
    ) -> Result<&'a AlgebraicType, TypeRefError> {
        match self {
            AlgebraicType::Ref(r) => {
                let typespace = typespace.ok_or(TypeRefError::MissingTypespace(*r))?;
                Ok(typespace.resolve(*r)?.ty)
            }
            other => Ok(other),
        }
    }

    // === Constructors ===

    /// A product of the given elements.
    pub fn product<E: Into<ProductTypeElement>>(elements: impl IntoIterator<Item = E>) -> Self {
        AlgebraicType::Product(ProductType::new(
            elements.into_iter().map(Into::into).collect::<Box<[_]>>(),
        ))
    }

    /// A sum of the given variants.
    pub fn sum<V: Into<SumTypeVariant>>(variants: impl IntoIterator<Item = V>) -> Self {
        AlgebraicType::Sum(SumType::new(
            variants.into_iter().map(Into::into).collect::<Box<[_]>>(),
        ))
    }

    /// `Array<elem>`.
    pub fn array(elem: AlgebraicType) -> Self {
        AlgebraicType::Array(ArrayType {
            elem_ty: Box::new(elem),
        })
    }

    /// `Array<U8>`.
    pub fn bytes() -> Self {
        Self::array(AlgebraicType::U8)
    }

    /// The empty product, `()`.
    pub fn unit() -> Self {
        AlgebraicType::Product(ProductType::unit())
    }

    /// The empty sum, which has no values.
    pub fn never() -> Self {
        AlgebraicType::Sum(SumType::default())
    }

    /// The optional shape `(some: some | none: ())`.
    pub fn option(some: AlgebraicType) -> Self {
        Self::sum([
            SumTypeVariant::named(OPTION_SOME_TAG, some),
            SumTypeVariant::named(OPTION_NONE_TAG, Self::unit()),
        ])
    }

    /// The result shape `(ok: ok | err: err)`.
    pub fn result(ok: AlgebraicType, err: AlgebraicType) -> Self {
        Self::sum([
            SumTypeVariant::named(RESULT_OK_TAG, ok),
            SumTypeVariant::named(RESULT_ERR_TAG, err),
        ])
    }

    /// A sum whose variants all carry `()`.
    pub fn simple_enum<'n>(names: impl IntoIterator<Item = &'n str>) -> Self {
        Self::sum(
            names
                .into_iter()
                .map(|name| SumTypeVariant::named(name, Self::unit())),
        )
    }
}

impl From<ScalarKind> for AlgebraicType {
    fn from(kind: ScalarKind) -> Self {
        match kind {
            ScalarKind::Bool => AlgebraicType::Bool,
            ScalarKind::I8 => AlgebraicType::I8,
            ScalarKind::U8 => AlgebraicType::U8,
            ScalarKind::I16 => AlgebraicType::I16,
            ScalarKind::U16 => AlgebraicType::U16,
            ScalarKind::I32 => AlgebraicType::I32,
            ScalarKind::U32 => AlgebraicType::U32,
            ScalarKind::I64 => AlgebraicType::I64,
            ScalarKind::U64 => AlgebraicType::U64,
            ScalarKind::I128 => AlgebraicType::I128,
            ScalarKind::U128 => AlgebraicType::U128,
            ScalarKind::I256 => AlgebraicType::I256,
            ScalarKind::U256 => AlgebraicType::U256,
            ScalarKind::F32 => AlgebraicType::F32,
            ScalarKind::F64 => AlgebraicType::F64,
            ScalarKind::String => AlgebraicType::String,
        }
    }
}

impl From<AlgebraicTypeRef> for AlgebraicType {
    fn from(r: AlgebraicTypeRef) -> Self {
        AlgebraicType::Ref(r)
    }
}

/// A record type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductType {
    /// Elements in wire order.
    pub elements: Box<[ProductTypeElement]>,
}

impl ProductType {
    pub fn new(elements: impl Into<Box<[ProductTypeElement]>>) -> Self {
        Self {
            elements: elements.into(),
        }
    }

    /// The empty product.
    pub fn unit() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_unit(&self) -> bool {
        self.elements.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// One field of a [`ProductType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductTypeElement {
    pub name: Option<Box<str>>,
    pub algebraic_type: AlgebraicType,
}

impl ProductTypeElement {
    pub fn new(algebraic_type: AlgebraicType, name: Option<&str>) -> Self {
        Self {
            name: name.map(Into::into),
            algebraic_type,
        }
    }

    pub fn named(name: &str, algebraic_type: AlgebraicType) -> Self {
        Self::new(algebraic_type, Some(name))
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn has_name(&self, name: &str) -> bool {
        self.name() == Some(name)
    }
}

impl From<AlgebraicType> for ProductTypeElement {
    fn from(algebraic_type: AlgebraicType) -> Self {
        Self::new(algebraic_type, None)
    }
}

impl From<(&str, AlgebraicType)> for ProductTypeElement {
    fn from((name, algebraic_type): (&str, AlgebraicType)) -> Self {
        Self::named(name, algebraic_type)
    }
}

/// A tagged union type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SumType {
    /// Variants in discriminant order.
    pub variants: Box<[SumTypeVariant]>,
}

impl SumType {
    pub fn new(variants: impl Into<Box<[SumTypeVariant]>>) -> Self {
        Self {
            variants: variants.into(),
        }
    }

    /// The payload type if this is the optional shape `(some: T | none: ())`.
    pub fn as_option(&self) -> Option<&AlgebraicType> {
        match &*self.variants {
            [some, none]
                if some.has_name(OPTION_SOME_TAG)
                    && none.has_name(OPTION_NONE_TAG)
                    && none.algebraic_type.is_unit() =>
            {
                Some(&some.algebraic_type)
            }
            _ => None,
        }
    }

    /// The `(ok, err)` payload types if this is the result shape `(ok: T | err: E)`.
    pub fn as_result(&self) -> Option<(&AlgebraicType, &AlgebraicType)> {
        match &*self.variants {
            [ok, err] if ok.has_name(RESULT_OK_TAG) && err.has_name(RESULT_ERR_TAG) => {
                Some((&ok.algebraic_type, &err.algebraic_type))
            }
            _ => None,
        }
    }

    /// The tag a value of variant `index` carries.
    pub fn variant_tag(&self, index: usize) -> Option<Box<str>> {
        Some(self.variants.get(index)?.tag(index))
    }
}

/// One variant of a [`SumType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SumTypeVariant {
    pub name: Option<Box<str>>,
    pub algebraic_type: AlgebraicType,
}

impl SumTypeVariant {
    pub fn new(algebraic_type: AlgebraicType, name: Option<&str>) -> Self {
        Self {
            name: name.map(Into::into),
            algebraic_type,
        }
    }

    pub fn named(name: &str, algebraic_type: AlgebraicType) -> Self {
        Self::new(algebraic_type, Some(name))
    }

    /// A variant carrying `()`.
    pub fn unit(name: &str) -> Self {
        Self::named(name, AlgebraicType::unit())
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn has_name(&self, name: &str) -> bool {
        self.name() == Some(name)
    }

    /// The tag that addresses this variant at position `index`: its name,
    /// or for an unnamed variant the decimal position, e.g. `"2"` (never `"02"`).
    pub fn tag(&self, index: usize) -> Box<str> {
        match self.name() {
            Some(name) => name.into(),
            None => index.to_string().into_boxed_str(),
        }
    }
}

impl From<AlgebraicType> for SumTypeVariant {
    fn from(algebraic_type: AlgebraicType) -> Self {
        Self::new(algebraic_type, None)
    }
}

impl From<(&str, AlgebraicType)> for SumTypeVariant {
    fn from((name, algebraic_type): (&str, AlgebraicType)) -> Self {
        Self::named(name, algebraic_type)
    }
}

/// Element type of an array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayType {
    pub elem_ty: Box<AlgebraicType>,
}
