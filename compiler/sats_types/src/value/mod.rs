//! Runtime values.
//!
//! An [`AlgebraicValue`] carries no type. The same value can be valid for
//! several types (a `U8` array and `Bytes`, say), and the codec decides how
//! to read it from the type it is compiled against.

mod float;

pub use float::{F32, F64};

use crate::{I256, U256};

/// A runtime value of some algebraic type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AlgebraicValue {
    Bool(bool),
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    I128(i128),
    U128(u128),
    I256(I256),
    U256(U256),
    F32(F32),
    F64(F64),
    String(Box<str>),
    /// Contents of an `Array<U8>`.
    Bytes(Box<[u8]>),
    Array(Box<[AlgebraicValue]>),
    Product(Box<[AlgebraicValue]>),
    Sum(SumValue),
    /// Value of an optional-shaped sum.
    Option(Option<Box<AlgebraicValue>>),
}

/// A sum value: which variant, and its payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SumValue {
    /// Variant name, or decimal position for unnamed variants.
    pub tag: Box<str>,
    pub value: Box<AlgebraicValue>,
}

impl SumValue {
    pub fn new(tag: impl Into<Box<str>>, value: AlgebraicValue) -> Self {
        Self {
            tag: tag.into(),
            value: Box::new(value),
        }
    }
}

impl AlgebraicValue {
    /// The empty product, `()`.
    pub fn unit() -> Self {
        AlgebraicValue::Product(Box::default())
    }

    pub fn product(fields: impl IntoIterator<Item = AlgebraicValue>) -> Self {
        AlgebraicValue::Product(fields.into_iter().collect())
    }

    pub fn array(elems: impl IntoIterator<Item = AlgebraicValue>) -> Self {
        AlgebraicValue::Array(elems.into_iter().collect())
    }

    pub fn bytes(bytes: impl Into<Box<[u8]>>) -> Self {
        AlgebraicValue::Bytes(bytes.into())
    }

    pub fn string(s: impl Into<Box<str>>) -> Self {
        AlgebraicValue::String(s.into())
    }

    pub fn sum(tag: impl Into<Box<str>>, value: AlgebraicValue) -> Self {
        AlgebraicValue::Sum(SumValue::new(tag, value))
    }

    /// A variant of a payload-less enum.
    pub fn enum_tag(tag: impl Into<Box<str>>) -> Self {
        Self::sum(tag, Self::unit())
    }

    pub fn some(value: AlgebraicValue) -> Self {
        AlgebraicValue::Option(Some(Box::new(value)))
    }

    pub fn none() -> Self {
        AlgebraicValue::Option(None)
    }

    pub fn ok(value: AlgebraicValue) -> Self {
        Self::sum(crate::RESULT_OK_TAG, value)
    }

    pub fn err(value: AlgebraicValue) -> Self {
        Self::sum(crate::RESULT_ERR_TAG, value)
    }

    /// Returns `true` for `()`.
    pub fn is_unit(&self) -> bool {
        matches!(self, AlgebraicValue::Product(fields) if fields.is_empty())
    }

    /// Short name of the value's shape, for error messages.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            AlgebraicValue::Bool(_) => "bool",
            AlgebraicValue::I8(_) => "i8",
            AlgebraicValue::U8(_) => "u8",
            AlgebraicValue::I16(_) => "i16",
            AlgebraicValue::U16(_) => "u16",
            AlgebraicValue::I32(_) => "i32",
            AlgebraicValue::U32(_) => "u32",
            AlgebraicValue::I64(_) => "i64",
            AlgebraicValue::U64(_) => "u64",
            AlgebraicValue::I128(_) => "i128",
            AlgebraicValue::U128(_) => "u128",
            AlgebraicValue::I256(_) => "i256",
            AlgebraicValue::U256(_) => "u256",
            AlgebraicValue::F32(_) => "f32",
            AlgebraicValue::F64(_) => "f64",
            AlgebraicValue::String(_) => "string",
            AlgebraicValue::Bytes(_) => "bytes",
            AlgebraicValue::Array(_) => "array",
            AlgebraicValue::Product(_) => "product",
            AlgebraicValue::Sum(_) => "sum",
            AlgebraicValue::Option(_) => "option",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AlgebraicValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_product(&self) -> Option<&[AlgebraicValue]> {
        match self {
            AlgebraicValue::Product(fields) => Some(fields),
            _ => None,
        }
    }

    pub fn as_sum(&self) -> Option<&SumValue> {
        match self {
            AlgebraicValue::Sum(sum) => Some(sum),
            _ => None,
        }
    }
}

macro_rules! impl_from_prim {
    ($($prim:ty => $variant:ident),* $(,)?) => {
        $(impl From<$prim> for AlgebraicValue {
            #[inline]
            fn from(v: $prim) -> Self {
                AlgebraicValue::$variant(v.into())
            }
        })*
    };
}

impl_from_prim! {
    bool => Bool,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    i128 => I128,
    u128 => U128,
    I256 => I256,
    U256 => U256,
    f32 => F32,
    f64 => F64,
    F32 => F32,
    F64 => F64,
    &str => String,
    String => String,
    Box<str> => String,
    SumValue => Sum,
}

impl From<Option<AlgebraicValue>> for AlgebraicValue {
    fn from(v: Option<AlgebraicValue>) -> Self {
        AlgebraicValue::Option(v.map(Box::new))
    }
}
