//! Append-only table of type definitions.
//!
//! A [`Typespace`] is the only place a [`AlgebraicTypeRef`] can point into.
//! Entries can be added but never removed or changed, so a ref handed out
//! once stays valid for the life of the typespace.

use smallvec::SmallVec;

use crate::{AlgebraicType, AlgebraicTypeRef};

/// Failure to resolve a [`AlgebraicTypeRef`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TypeRefError {
    /// A `Ref` was reached but no typespace was supplied.
    #[error("type reference {0} cannot be resolved without a typespace")]
    MissingTypespace(AlgebraicTypeRef),
    /// The ref indexes past the end of the typespace.
    #[error("type reference {0} is out of bounds")]
    InvalidTypeRef(AlgebraicTypeRef),
    /// Following the ref leads back to itself without passing through a
    /// product, sum or array, so the type has no finite shape.
    #[error("type reference {0} resolves to itself")]
    RecursiveTypeRef(AlgebraicTypeRef),
}

/// Outcome of [`Typespace::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// The first non-`Ref` type on the chain.
    pub ty: &'a AlgebraicType,
    /// Every ref passed through, starting with the one resolved.
    pub chain: SmallVec<[AlgebraicTypeRef; 4]>,
}

/// Ordered collection of type definitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Typespace {
    types: Vec<AlgebraicType>,
}

impl Typespace {
    pub fn new(types: Vec<AlgebraicType>) -> Self {
        Self { types }
    }

    /// Append a definition and return the ref that names it.
    ///
    /// # Panics
    ///
    /// Panics if the typespace already holds `u32::MAX` entries.
    pub fn add(&mut self, ty: AlgebraicType) -> AlgebraicTypeRef {
        let r = self.next_ref();
        self.types.push(ty);
        r
    }

    /// The ref the next [`add`](Self::add) will return.
    ///
    /// Lets recursive definitions mention themselves before they exist.
    ///
    /// # Panics
    ///
    /// Panics if the typespace already holds `u32::MAX` entries.
    pub fn next_ref(&self) -> AlgebraicTypeRef {
        let idx = u32::try_from(self.types.len())
            .unwrap_or_else(|_| panic!("typespace exceeded u32::MAX entries"));
        AlgebraicTypeRef(idx)
    }

    /// The definition `r` names, without following further refs.
    pub fn get(&self, r: AlgebraicTypeRef) -> Option<&AlgebraicType> {
        self.types.get(r.idx())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn types(&self) -> &[AlgebraicType] {
        &self.types
    }

    pub fn iter(&self) -> impl Iterator<Item = (AlgebraicTypeRef, &AlgebraicType)> {
        self.types.iter().enumerate().map(|(i, ty)| {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "add() rejects more than u32::MAX entries"
            )]
            let r = AlgebraicTypeRef(i as u32);
            (r, ty)
        })
    }

    /// Follow `r` through any chain of ref-to-ref definitions.
    ///
    /// Fails with [`TypeRefError::InvalidTypeRef`] on a dangling ref and with
    /// [`TypeRefError::RecursiveTypeRef`] if the chain loops. Cycles through
    /// a product, sum or array are fine; those are ordinary recursive types.
    pub fn resolve(&self, r: AlgebraicTypeRef) -> Result<Resolved<'_>, TypeRefError> {
        let mut chain: SmallVec<[AlgebraicTypeRef; 4]> = SmallVec::new();
        let mut cur = r;
        loop {
            if chain.contains(&cur) {
                return Err(TypeRefError::RecursiveTypeRef(cur));
            }
            chain.push(cur);
            match self.get(cur) {
                None => return Err(TypeRefError::InvalidTypeRef(cur)),
                Some(AlgebraicType::Ref(next)) => cur = *next,
                Some(ty) => return Ok(Resolved { ty, chain }),
            }
        }
    }
}

impl std::ops::Index<AlgebraicTypeRef> for Typespace {
    type Output = AlgebraicType;

    fn index(&self, r: AlgebraicTypeRef) -> &AlgebraicType {
        &self.types[r.idx()]
    }
}

impl FromIterator<AlgebraicType> for Typespace {
    fn from_iter<I: IntoIterator<Item = AlgebraicType>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
