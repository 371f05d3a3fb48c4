//! Calla Eval - the call evaluator.
//!
//! Tree-walking interpreter for JavaScript function-call semantics over the
//! `calla_ir` program tree.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Environment`: lexical scopes captured by reference in closures
//! - `CallForm`: the call-site shape that decides a call's receiver
//! - `evaluate_binary` / `evaluate_unary`: enum-based operator dispatch
//! - `CallStack`: depth limit and error backtraces
//! - `PrintHandlerImpl`: destination for `console.log` output
//!
//! # Example
//!
//! ```text
//! let interner = SharedInterner::new();
//! let program = build_program(&interner);
//! let mut interp = InterpreterBuilder::new(interner)
//!     .print_handler(buffer_handler())
//!     .build();
//! interp.run(&program)?;
//! ```

mod builtins;
mod diagnostics;
mod environment;
pub mod errors;
mod eval_mode;
mod format;
pub mod interpreter;
mod operators;
mod print_handler;
mod stack;
mod value;

#[cfg(test)]
mod tests;

pub use diagnostics::{CallFrame, CallStack};
pub use environment::{AssignError, Environment, Mutability, Scope, ScopeRef};
pub use errors::{
    Access, BacktraceFrame, ControlAction, EvalError, EvalErrorKind, EvalResult,
};
pub use eval_mode::EvalMode;
pub use format::{display_args, inspect, number_to_string, to_js_string};
pub use interpreter::{CallForm, Interpreter, InterpreterBuilder, MAX_ARRAY_LENGTH};
pub use operators::{evaluate_binary, evaluate_unary, to_number};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use stack::ensure_sufficient_stack;
pub use value::{
    Closure, FunctionValue, NativeFn, NativeFunction, ObjectData, ObjectValue, PropertyMap,
    Shared, Value,
};
