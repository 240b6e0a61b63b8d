//! Unified error for the one-shot API.

use sats_buffer::{DecodeError, EncodeError};
use sats_types::TypeRefError;

/// Any failure of a one-shot codec call.
///
/// Compiled [`Codec`](crate::Codec)s report the narrower error of the step
/// that failed; this type only appears where compilation and use happen in
/// one call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The type graph could not be compiled.
    #[error(transparent)]
    Schema(#[from] TypeRefError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
