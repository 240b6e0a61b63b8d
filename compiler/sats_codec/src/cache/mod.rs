//! Shared get-or-build cache of compiled codecs.
//!
//! One cache serves one typespace. Codecs for typespace entries live in a
//! dense table indexed by ref; codecs for inline types are keyed by the type
//! itself. Under a fixed typespace a codec is a pure function of its type,
//! so structurally equal inline types can share an entry.
//!
//! Entries are never evicted. Building happens under the lock, so two
//! threads asking for the same type at once compile it once.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use sats_buffer::{Reader, Writer};
use sats_types::{AlgebraicType, AlgebraicTypeRef, AlgebraicValue, TypeRefError, Typespace};
use tracing::debug;

use crate::map_key::{encoded_key, shortcut_key, MapKey};
use crate::{Codec, CodecConfig, CodecError};

/// Thread-safe memo of compiled codecs for one typespace.
pub struct CodecCache {
    typespace: Option<Arc<Typespace>>,
    config: CodecConfig,
    codecs: Mutex<CodecTable>,
}

#[derive(Default)]
struct CodecTable {
    by_ref: Vec<Option<Codec>>,
    by_type: FxHashMap<AlgebraicType, Codec>,
}

impl CodecTable {
    fn len(&self) -> usize {
        self.by_ref.iter().flatten().count() + self.by_type.len()
    }
}

impl CodecCache {
    pub fn new(typespace: Arc<Typespace>) -> Self {
        Self::build(Some(typespace), CodecConfig::default())
    }

    /// A cache for types that contain no `Ref`s.
    pub fn without_typespace() -> Self {
        Self::build(None, CodecConfig::default())
    }

    #[must_use]
    pub fn with_config(self, config: CodecConfig) -> Self {
        Self::build(self.typespace, config)
    }

    fn build(typespace: Option<Arc<Typespace>>, config: CodecConfig) -> Self {
        let by_ref = typespace
            .as_deref()
            .map_or_else(Vec::new, |ts| vec![None; ts.len()]);
        Self {
            typespace,
            config,
            codecs: Mutex::new(CodecTable {
                by_ref,
                by_type: FxHashMap::default(),
            }),
        }
    }

    pub fn typespace(&self) -> Option<&Typespace> {
        self.typespace.as_deref()
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// The codec for `ty`, compiling it on first use.
    pub fn codec(&self, ty: &AlgebraicType) -> Result<Codec, TypeRefError> {
        if let AlgebraicType::Ref(r) = ty {
            return self.codec_for_ref(*r);
        }
        let mut table = self.codecs.lock();
        if let Some(codec) = table.by_type.get(ty) {
            return Ok(codec.clone());
        }
        debug!("codec cache miss for inline type");
        let codec = Codec::with_config(ty, self.typespace(), &self.config)?;
        table.by_type.insert(ty.clone(), codec.clone());
        Ok(codec)
    }

    /// The codec for typespace entry `r`, compiling it on first use.
    pub fn codec_for_ref(&self, r: AlgebraicTypeRef) -> Result<Codec, TypeRefError> {
        let typespace = self
            .typespace()
            .ok_or(TypeRefError::MissingTypespace(r))?;
        let mut table = self.codecs.lock();
        let slot = table
            .by_ref
            .get_mut(r.idx())
            .ok_or(TypeRefError::InvalidTypeRef(r))?;
        if let Some(codec) = slot.as_ref() {
            return Ok(codec.clone());
        }
        debug!(%r, "codec cache miss");
        let codec = Codec::with_config(&AlgebraicType::Ref(r), Some(typespace), &self.config)?;
        *slot = Some(codec.clone());
        Ok(codec)
    }

    pub fn serialize(
        &self,
        w: &mut Writer,
        ty: &AlgebraicType,
        value: &AlgebraicValue,
    ) -> Result<(), CodecError> {
        Ok(self.codec(ty)?.encode(w, value)?)
    }

    pub fn deserialize(
        &self,
        r: &mut Reader<'_>,
        ty: &AlgebraicType,
    ) -> Result<AlgebraicValue, CodecError> {
        Ok(self.codec(ty)?.decode(r)?)
    }

    /// Map key of `value`, reusing the cached codec when the value has to be encoded.
    pub fn map_key(&self, ty: &AlgebraicType, value: &AlgebraicValue) -> Result<MapKey, CodecError> {
        if let Some(key) = shortcut_key(ty, value, self.typespace(), &self.config)? {
            return Ok(key);
        }
        Ok(encoded_key(&self.codec(ty)?, value)?)
    }

    /// Number of compiled codecs held.
    pub fn len(&self) -> usize {
        self.codecs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for CodecCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodecCache")
            .field("typespace_len", &self.typespace().map_or(0, Typespace::len))
            .field("codecs", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests use unwrap to panic on unexpected state")]
mod tests;
