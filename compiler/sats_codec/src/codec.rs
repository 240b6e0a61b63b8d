//! Compiled codec handles.

use std::sync::Arc;

use sats_buffer::{DecodeError, EncodeError, Reader, Writer};
use sats_types::{AlgebraicType, AlgebraicValue, TypeRefError, Typespace};

use crate::plan::{Plan, PlanId, Program};
use crate::{compile, decode, encode, CodecConfig};

/// An encode/decode pair for one type.
///
/// Cloning is cheap: the compiled program is shared. A codec holds no
/// borrow of the type graph it was built from.
#[derive(Debug, Clone)]
pub struct Codec {
    program: Arc<Program>,
    root: PlanId,
}

impl Codec {
    /// Compile `ty` with the default config.
    pub fn new(ty: &AlgebraicType, typespace: Option<&Typespace>) -> Result<Self, TypeRefError> {
        Self::with_config(ty, typespace, &CodecConfig::default())
    }

    pub fn with_config(
        ty: &AlgebraicType,
        typespace: Option<&Typespace>,
        config: &CodecConfig,
    ) -> Result<Self, TypeRefError> {
        let (program, root) = compile::compile(ty, typespace, config)?;
        Ok(Self {
            program: Arc::new(program),
            root,
        })
    }

    /// Append the encoding of `value` to `w`.
    ///
    /// On error `w` is rewound to where it was before the call.
    pub fn encode(&self, w: &mut Writer, value: &AlgebraicValue) -> Result<(), EncodeError> {
        let start = w.offset();
        let result = encode::encode(&self.program, self.root, w, value);
        if result.is_err() {
            w.truncate(start);
        }
        result
    }

    /// Decode one value from the front of `r`.
    pub fn decode(&self, r: &mut Reader<'_>) -> Result<AlgebraicValue, DecodeError> {
        decode::decode(&self.program, self.root, r)
    }

    pub fn to_vec(&self, value: &AlgebraicValue) -> Result<Vec<u8>, EncodeError> {
        let mut w = Writer::with_capacity(self.fixed_size().unwrap_or(64));
        self.encode(&mut w, value)?;
        Ok(w.into_bytes())
    }

    /// Decode exactly one value that spans all of `bytes`.
    pub fn from_slice(&self, bytes: &[u8]) -> Result<AlgebraicValue, DecodeError> {
        let mut r = Reader::new(bytes);
        let value = self.decode(&mut r)?;
        match r.remaining() {
            0 => Ok(value),
            remaining => Err(DecodeError::TrailingBytes { remaining }),
        }
    }

    /// Encoded width, when the root is a packed fixed-width product.
    pub fn fixed_size(&self) -> Option<usize> {
        match self.program.plan(self.root) {
            Plan::Product(plan) => plan.layout.as_ref().map(|layout| layout.size),
            _ => None,
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn root(&self) -> PlanId {
        self.root
    }

    pub fn serializer(&self) -> Serializer {
        Serializer(self.clone())
    }

    pub fn deserializer(&self) -> Deserializer {
        Deserializer(self.clone())
    }
}

/// The encoding half of a [`Codec`].
#[derive(Debug, Clone)]
pub struct Serializer(Codec);

impl Serializer {
    #[inline]
    pub fn serialize(&self, w: &mut Writer, value: &AlgebraicValue) -> Result<(), EncodeError> {
        self.0.encode(w, value)
    }
}

/// The decoding half of a [`Codec`].
#[derive(Debug, Clone)]
pub struct Deserializer(Codec);

impl Deserializer {
    #[inline]
    pub fn deserialize(&self, r: &mut Reader<'_>) -> Result<AlgebraicValue, DecodeError> {
        self.0.decode(r)
    }
}

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Codec>();
};
