//! Live call stack tracking.
//!
//! Each invocation pushes a [`CallFrame`]; the depth check is part of
//! [`CallStack::push`]. When an error escapes a function, the frames are
//! snapshotted into the error's backtrace.

use calla_ir::{Name, StringInterner};

use crate::errors::{stack_overflow, BacktraceFrame, EvalError};

/// A single frame in the live call stack.
#[derive(Clone, Copy, Debug)]
pub struct CallFrame {
    /// Function name, `None` for anonymous functions.
    pub name: Option<Name>,
}

/// Live call stack for the interpreter.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: usize,
}

impl CallStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a frame, failing with `StackOverflow` if the limit is reached.
    /// The frame is not pushed on overflow.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if self.frames.len() >= self.max_depth {
            return Err(stack_overflow(self.max_depth));
        }
        self.frames.push(frame);
        Ok(())
    }

    pub fn pop(&mut self) {
        debug_assert!(!self.frames.is_empty(), "CallStack::pop on empty stack");
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Snapshot the stack, innermost frame first.
    pub fn capture(&self, interner: &StringInterner) -> Vec<BacktraceFrame> {
        self.frames
            .iter()
            .rev()
            .map(|frame| BacktraceFrame {
                function: frame.name.map(|n| interner.lookup(n).to_owned()),
            })
            .collect()
    }

    /// Attach a backtrace to `error` unless an inner frame already did.
    pub fn attach_backtrace(&self, error: &mut EvalError, interner: &StringInterner) {
        if error.backtrace.is_empty() {
            error.backtrace = self.capture(interner);
        }
    }
}
