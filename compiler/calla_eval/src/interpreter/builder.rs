//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use calla_ir::{SharedArena, SharedInterner};

use super::{Interpreter, WellKnownNames};
use crate::builtins::create_global;
use crate::diagnostics::CallStack;
use crate::environment::Environment;
use crate::eval_mode::EvalMode;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::Value;

/// Builder for creating Interpreter instances.
///
/// Defaults: sloppy mode, output to stdout, the mode's call-depth limit.
pub struct InterpreterBuilder {
    interner: SharedInterner,
    mode: EvalMode,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
}

impl InterpreterBuilder {
    /// Create a builder. Programs run on the result must be built with the
    /// same interner.
    pub fn new(interner: SharedInterner) -> Self {
        Self {
            interner,
            mode: EvalMode::default(),
            print_handler: None,
            max_call_depth: None,
        }
    }

    /// Set the evaluation mode.
    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set where `console.log` output goes.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Override the call-depth limit.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    pub fn build(self) -> Interpreter {
        let names = WellKnownNames::new(&self.interner);
        let global = create_global(&names);
        let max_depth = self
            .max_call_depth
            .unwrap_or_else(|| self.mode.max_call_depth());
        tracing::debug!(mode = ?self.mode, max_depth, "building interpreter");

        Interpreter {
            interner: self.interner,
            arena: SharedArena::default(),
            env: Environment::new(),
            // Top-level code runs with the global object as receiver.
            this: Value::Object(global.clone()),
            global,
            names,
            mode: self.mode,
            call_stack: CallStack::new(max_depth),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
        }
    }
}
