//! Index of a type definition inside a `Typespace`.

use std::fmt;

/// A 32-bit reference to the `n`-th entry of a [`Typespace`](crate::Typespace).
///
/// A `Ref` on its own means nothing; it has to be resolved against the
/// typespace it was created for.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct AlgebraicTypeRef(pub u32);

impl AlgebraicTypeRef {
    /// The raw index.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The index as a `usize`, for slice access.
    #[inline]
    pub const fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for AlgebraicTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "&{}", self.0)
    }
}

impl fmt::Display for AlgebraicTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "&{}", self.0)
    }
}

const _: () = assert!(std::mem::size_of::<AlgebraicTypeRef>() == 4);
