//! Stack growth for deeply nested calls.
//!
//! Each user-level call recurses through several evaluator frames, so a few
//! thousand nested calls can exhaust a default thread stack. On native
//! targets `stacker` allocates a new segment when the red zone is reached;
//! on WASM the closure runs directly.

#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Grow when less than this remains (128KB).
    const RED_ZONE: usize = 128 * 1024;

    /// Size of each new stack segment (2MB).
    const SEGMENT: usize = 2 * 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
