//! Interpreter tests, grouped by the behavior under test.
//!
//! Programs are assembled with `ProgramBuilder` and run against a buffer
//! print handler so both the result and the printed lines can be checked.

mod error_tests;
mod receiver_tests;

use calla_ir::{ProgramBuilder, SharedInterner, StmtId};

use crate::{buffer_handler, EvalError, EvalMode, Interpreter, InterpreterBuilder, Value};

/// Result of running one program.
pub(crate) struct Outcome {
    pub(crate) result: Result<Value, EvalError>,
    pub(crate) output: Vec<String>,
    pub(crate) interp: Interpreter,
}

impl Outcome {
    /// The completion value; `undefined` if the run failed.
    pub(crate) fn value(&self) -> Value {
        self.result.clone().unwrap_or_default()
    }

    pub(crate) fn error(&self) -> Option<&EvalError> {
        self.result.as_ref().err()
    }

    pub(crate) fn error_code(&self) -> Option<&'static str> {
        self.error().map(EvalError::code)
    }

    pub(crate) fn error_message(&self) -> Option<String> {
        self.error().map(ToString::to_string)
    }
}

/// Build and run a program on an interpreter configured by `configure`.
pub(crate) fn run_configured(
    configure: impl FnOnce(InterpreterBuilder) -> InterpreterBuilder,
    build: impl FnOnce(&mut ProgramBuilder) -> Vec<StmtId>,
) -> Outcome {
    let interner = SharedInterner::new();
    let mut b = ProgramBuilder::new(interner.clone());
    let body = build(&mut b);
    let program = b.finish(body);

    let handler = buffer_handler();
    let mut interp = configure(InterpreterBuilder::new(interner).print_handler(handler.clone()))
        .build();
    let result = interp.run(&program);
    Outcome {
        result,
        output: handler.lines(),
        interp,
    }
}

/// Run in sloppy mode.
pub(crate) fn run(build: impl FnOnce(&mut ProgramBuilder) -> Vec<StmtId>) -> Outcome {
    run_configured(|b| b, build)
}

pub(crate) fn run_strict(build: impl FnOnce(&mut ProgramBuilder) -> Vec<StmtId>) -> Outcome {
    run_configured(|b| b.mode(EvalMode::Strict), build)
}
