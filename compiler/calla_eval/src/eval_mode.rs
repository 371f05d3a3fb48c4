//! Evaluation modes.
//!
//! The mode decides what a plain call (`f()`, no container) receives as its
//! receiver, and what an assignment to an undeclared name does.

/// Evaluation mode, chosen once per interpreter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EvalMode {
    /// Plain calls receive the global object; assigning an undeclared name
    /// creates a property on it.
    #[default]
    Sloppy,
    /// Plain calls receive `undefined`; assigning an undeclared name is an
    /// error.
    Strict,
}

impl EvalMode {
    #[inline]
    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }

    /// Whether a plain call binds the global object as receiver.
    #[inline]
    pub fn plain_call_uses_global(self) -> bool {
        !self.is_strict()
    }

    /// Whether assigning an undeclared name creates a global property.
    #[inline]
    pub fn allows_implicit_globals(self) -> bool {
        !self.is_strict()
    }

    /// Default call-depth limit before `StackOverflow`.
    ///
    /// Native builds grow the stack with `stacker`, so the limit only guards
    /// against runaway recursion.
    #[inline]
    pub fn max_call_depth(self) -> usize {
        #[cfg(target_arch = "wasm32")]
        {
            200
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            10_000
        }
    }
}
