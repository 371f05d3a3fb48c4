//! Calla CLI library.
//!
//! Holds the built-in demo programs and the pieces the `calla` binary is
//! made of: demo lookup, running a demo on a fresh interpreter, rendering
//! runtime errors, and tracing setup.

pub mod demos;

use std::fmt::Write as _;
use std::sync::Once;

use calla_eval::{EvalError, EvalMode, InterpreterBuilder, SharedPrintHandler, Value};
use calla_ir::SharedInterner;

pub use demos::{demos, find_demo, Demo};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debugging.
///
/// Only installs a subscriber when `CALLA_LOG` or `RUST_LOG` is set;
/// `CALLA_LOG` takes precedence. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let filter = match std::env::var("CALLA_LOG") {
            Ok(directives) => EnvFilter::new(directives),
            Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
            Err(_) => return,
        };
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init();
    });
}

/// Run one demo on a fresh interpreter.
///
/// Printed lines go to `handler`; the result is the program's completion
/// value.
pub fn run_demo(
    demo: &Demo,
    mode: EvalMode,
    handler: SharedPrintHandler,
) -> Result<Value, EvalError> {
    let interner = SharedInterner::new();
    let program = demo.program(interner.clone());
    let mut interp = InterpreterBuilder::new(interner)
        .mode(mode)
        .print_handler(handler)
        .build();
    tracing::debug!(demo = demo.name, ?mode, "running demo");
    interp.run(&program)
}

/// Render a runtime error the way the CLI reports it.
///
/// ```text
/// error[E6001]: x is not a function
///   --> demo `sum`
///   = at inner
///   = at outer
/// ```
pub fn render_diagnostic(demo: &str, error: &EvalError) -> String {
    let mut out = format!("error[{}]: {error}\n  --> demo `{demo}`\n", error.code());
    for frame in &error.backtrace {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "  = {frame}");
    }
    out
}
