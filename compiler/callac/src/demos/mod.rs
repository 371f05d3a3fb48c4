//! Built-in demo programs.
//!
//! Each demo reproduces one teaching snippet about function semantics,
//! assembled with `ProgramBuilder` since there is no source parser.

mod arrows;
mod functions;
mod parameters;
mod receivers;

use calla_ir::{Program, ProgramBuilder, SharedInterner, StmtId};

/// A named, runnable demo program.
pub struct Demo {
    pub name: &'static str,
    pub description: &'static str,
    build: fn(&mut ProgramBuilder) -> Vec<StmtId>,
}

impl Demo {
    /// Assemble the demo's program against `interner`.
    pub fn program(&self, interner: SharedInterner) -> Program {
        let mut b = ProgramBuilder::new(interner);
        let body = (self.build)(&mut b);
        b.finish(body)
    }
}

static DEMOS: &[Demo] = &[
    Demo {
        name: "sum",
        description: "function expression bound to a const, called with two numbers",
        build: functions::sum,
    },
    Demo {
        name: "enclosing",
        description: "nested function declaration called before its position",
        build: functions::enclosing,
    },
    Demo {
        name: "hello",
        description: "anonymous function expression takes its binding's name",
        build: functions::hello,
    },
    Demo {
        name: "callback",
        description: "function expression passed as an argument and called back",
        build: functions::callback,
    },
    Demo {
        name: "iife",
        description: "immediately-invoked function expressions, plain and unary",
        build: functions::iife,
    },
    Demo {
        name: "sort",
        description: "arrow comparator sorts an array in place",
        build: arrows::sort,
    },
    Demo {
        name: "arrow-this",
        description: "arrow keeps the receiver of the invocation that created it",
        build: arrows::arrow_this,
    },
    Demo {
        name: "defaults",
        description: "default parameters apply to absent and undefined arguments only",
        build: parameters::defaults,
    },
    Demo {
        name: "rest",
        description: "rest parameter collects the remaining arguments",
        build: parameters::rest,
    },
    Demo {
        name: "arguments",
        description: "arguments object sees every passed argument",
        build: parameters::arguments,
    },
    Demo {
        name: "method",
        description: "method receiver is the container, bound at call time",
        build: receivers::method,
    },
    Demo {
        name: "plain-this",
        description: "receiver of a plain call (try with --strict)",
        build: receivers::plain_this,
    },
    Demo {
        name: "constructor",
        description: "new creates a fresh record per construction",
        build: receivers::constructor,
    },
];

/// Every demo, in presentation order.
pub fn demos() -> &'static [Demo] {
    DEMOS
}

pub fn find_demo(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.name == name)
}
