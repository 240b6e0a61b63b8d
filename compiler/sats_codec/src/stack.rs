//! Stack growth for walks over deep type graphs and values.
//!
//! Compilation recurses once per type node and the interpreters once per
//! value node, so a long linked list encoded through a recursive `Ref` is as
//! deep as it is long. Every recursive step goes through
//! [`ensure_sufficient_stack`].
//!
//! - **Native**: `stacker::maybe_grow` adds a segment when the red zone is hit
//! - **WASM**: plain call

/// Grow when less than this much stack remains (100KB).
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
#[cfg(not(target_arch = "wasm32"))]
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
