//! Stack growth guard for recursive value algorithms.
//!
//! Rendering, equality, deep copy, owner transfer and conformance checking all
//! recurse over the value graph. A deeply nested array of arrays (or a long
//! chain of composites) would otherwise overflow the native stack long before
//! any storage limit is reached.
//!
//! # Platform Support
//!
//! - **Native targets**: Uses the `stacker` crate to grow the stack on demand.
//! - **WASM targets**: No-op passthrough (WASM has its own stack management).
//!
//! # Usage
//!
//! ```text
//! fn equal(&self, other: &Value) -> bool {
//!     ensure_sufficient_stack(|| {
//!         // ... recursive comparison of children ...
//!     })
//! }
//! ```

/// Minimum stack space to keep available (128KB red zone).
///
/// Value algorithms keep a `SeenReferences` set and a few formatting buffers
/// per frame, so the red zone is slightly larger than a parser would need.
const RED_ZONE: usize = 128 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone threshold, additional stack
/// space is allocated before calling `f`.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
