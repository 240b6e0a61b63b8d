//! The sixteen scalar leaves of the type graph.

use std::fmt;

/// Scalar type kind.
///
/// The discriminant doubles as the fixed plan slot of the scalar in a
/// compiled codec, so the order is load-bearing.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ScalarKind {
    Bool = 0,
    I8 = 1,
    U8 = 2,
    I16 = 3,
    U16 = 4,
    I32 = 5,
    U32 = 6,
    I64 = 7,
    U64 = 8,
    I128 = 9,
    U128 = 10,
    I256 = 11,
    U256 = 12,
    F32 = 13,
    F64 = 14,
    /// Length-prefixed UTF-8 text. The only scalar without a fixed width.
    String = 15,
}

impl ScalarKind {
    /// Number of scalar kinds.
    pub const COUNT: usize = 16;

    /// Every kind, in discriminant order.
    pub const ALL: [ScalarKind; Self::COUNT] = [
        ScalarKind::Bool,
        ScalarKind::I8,
        ScalarKind::U8,
        ScalarKind::I16,
        ScalarKind::U16,
        ScalarKind::I32,
        ScalarKind::U32,
        ScalarKind::I64,
        ScalarKind::U64,
        ScalarKind::I128,
        ScalarKind::U128,
        ScalarKind::I256,
        ScalarKind::U256,
        ScalarKind::F32,
        ScalarKind::F64,
        ScalarKind::String,
    ];

    /// Encoded width in bytes, or `None` for `String`.
    #[inline]
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            ScalarKind::Bool | ScalarKind::I8 | ScalarKind::U8 => Some(1),
            ScalarKind::I16 | ScalarKind::U16 => Some(2),
            ScalarKind::I32 | ScalarKind::U32 | ScalarKind::F32 => Some(4),
            ScalarKind::I64 | ScalarKind::U64 | ScalarKind::F64 => Some(8),
            ScalarKind::I128 | ScalarKind::U128 => Some(16),
            ScalarKind::I256 | ScalarKind::U256 => Some(32),
            ScalarKind::String => None,
        }
    }

    /// Lower-case name, as used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::U8 => "u8",
            ScalarKind::I16 => "i16",
            ScalarKind::U16 => "u16",
            ScalarKind::I32 => "i32",
            ScalarKind::U32 => "u32",
            ScalarKind::I64 => "i64",
            ScalarKind::U64 => "u64",
            ScalarKind::I128 => "i128",
            ScalarKind::U128 => "u128",
            ScalarKind::I256 => "i256",
            ScalarKind::U256 => "u256",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::String => "string",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
