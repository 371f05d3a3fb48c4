//! Tree-walking interpreter for Calla programs.
//!
//! # Architecture
//!
//! Statements go through `exec_block`/`exec_stmt`, expressions through
//! `eval_expr`. Call handling (receiver resolution, parameter binding,
//! construction) lives in `function_call.rs`; property access in
//! `property.rs`.
//!
//! # Receiver threading
//!
//! The receiver of the running invocation is held in `this`. Every call
//! site resolves a receiver from its [`CallForm`] and passes it explicitly
//! into the invocation, which swaps it in for the duration of the body and
//! restores the caller's afterwards. Arrows never consult the call form:
//! their receiver was fixed when they were created.
//!
//! # Arena Threading Pattern
//!
//! Function values carry the arena their definition lives in. An
//! invocation swaps `arena` to the callee's for the duration of the body,
//! because an `ExprId` is only meaningful in the arena that allocated it.

mod builder;
mod function_call;
mod property;

pub use builder::InterpreterBuilder;
pub use function_call::CallForm;
pub use property::MAX_ARRAY_LENGTH;

use calla_ir::{
    Expr, ExprId, Literal, LogicalOp, Name, Program, SharedArena, SharedInterner, Stmt, StmtId,
    StringInterner, TemplatePart, UnaryOp,
};

use crate::diagnostics::CallStack;
use crate::environment::{AssignError, Environment, Mutability};
use crate::errors::{
    const_assignment, invalid_assignment_target, undefined_variable, ControlAction, EvalError,
    EvalResult,
};
use crate::eval_mode::EvalMode;
use crate::format::to_js_string;
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::print_handler::SharedPrintHandler;
use crate::value::ObjectValue;
use crate::Value;

/// Names the interpreter compares against on hot paths, interned once at
/// construction.
#[derive(Clone, Copy)]
pub(crate) struct WellKnownNames {
    pub(crate) arguments: Name,
    pub(crate) length: Name,
    pub(crate) name: Name,
    pub(crate) undefined: Name,
    pub(crate) global_this: Name,
    pub(crate) console: Name,
    pub(crate) log: Name,
}

impl WellKnownNames {
    fn new(interner: &StringInterner) -> Self {
        WellKnownNames {
            arguments: interner.intern("arguments"),
            length: interner.intern("length"),
            name: interner.intern("name"),
            undefined: interner.intern("undefined"),
            global_this: interner.intern("globalThis"),
            console: interner.intern("console"),
            log: interner.intern("log"),
        }
    }
}

/// Tree-walking interpreter.
///
/// Programs must be built with the same interner the interpreter was
/// built with.
pub struct Interpreter {
    pub(crate) interner: SharedInterner,
    /// Arena of the code currently executing.
    pub(crate) arena: SharedArena,
    pub(crate) env: Environment,
    /// Receiver of the running invocation.
    pub(crate) this: Value,
    pub(crate) global: ObjectValue,
    pub(crate) names: WellKnownNames,
    pub(crate) mode: EvalMode,
    pub(crate) call_stack: CallStack,
    pub(crate) print_handler: SharedPrintHandler,
}

impl Interpreter {
    /// Run a program's top-level statements.
    ///
    /// Returns the value of the last expression statement, or the value of
    /// a top-level `return`. Bindings persist across runs on the same
    /// interpreter.
    pub fn run(&mut self, program: &Program) -> Result<Value, EvalError> {
        tracing::debug!(statements = program.body.len(), "running program");
        self.arena = program.arena.clone();
        finish(self.exec_block(&program.body))
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// The global object (`globalThis`).
    pub fn global(&self) -> &ObjectValue {
        &self.global
    }

    /// Current value of a variable visible at top level, falling back to
    /// global-object properties.
    pub fn lookup_variable(&self, name: &str) -> Option<Value> {
        self.resolve_identifier(self.interner.intern(name))
    }

    // Statements

    /// Execute a statement list in the current scope, hoisting function
    /// declarations first. Yields the value of the last expression
    /// statement.
    pub(crate) fn exec_block(&mut self, stmts: &[StmtId]) -> EvalResult {
        let arena = self.arena.clone();
        self.hoist_functions(stmts)?;

        let mut completion = Value::Undefined;
        for &id in stmts {
            let value = self.exec_stmt(id)?;
            if matches!(arena.stmt(id), Stmt::Expr(_)) {
                completion = value;
            }
        }
        Ok(completion)
    }

    /// Bind every function declaration in `stmts` before any statement
    /// runs, so declarations can be called before they appear.
    fn hoist_functions(&mut self, stmts: &[StmtId]) -> Result<(), ControlAction> {
        let arena = self.arena.clone();
        for &id in stmts {
            let Stmt::Function(func) = arena.stmt(id) else {
                continue;
            };
            let value = self.make_function(*func, None)?;
            if let Some(name) = arena.function(*func).name {
                tracing::debug!(function = self.interner.lookup(name), "hoisted declaration");
                self.env.define(name, value, Mutability::Mutable);
            }
        }
        Ok(())
    }

    fn exec_stmt(&mut self, id: StmtId) -> EvalResult {
        let arena = self.arena.clone();
        let stmt = arena.stmt(id);
        tracing::trace!(?stmt, "exec");
        match stmt {
            Stmt::Expr(expr) => self.eval_expr(*expr),
            Stmt::Decl { kind, name, init } => {
                let value = match init {
                    Some(init) => self.eval_named(*init, *name)?,
                    None => Value::Undefined,
                };
                self.env.define(*name, value, (*kind).into());
                Ok(Value::Undefined)
            }
            // Bound by `hoist_functions`.
            Stmt::Function(_) => Ok(Value::Undefined),
            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(*expr)?,
                    None => Value::Undefined,
                };
                Err(ControlAction::Return(value))
            }
        }
    }

    // Expressions

    pub(crate) fn eval_expr(&mut self, id: ExprId) -> EvalResult {
        let arena = self.arena.clone();
        match arena.expr(id) {
            Expr::Literal(lit) => Ok(self.eval_literal(*lit)),
            Expr::Ident(name) => self
                .resolve_identifier(*name)
                .ok_or_else(|| undefined_variable(self.interner.lookup(*name)).into()),
            Expr::This => Ok(self.this.clone()),
            Expr::Template(parts) => {
                let mut out = String::new();
                for part in parts {
                    match part {
                        TemplatePart::Text(text) => out.push_str(self.interner.lookup(*text)),
                        TemplatePart::Expr(expr) => {
                            let value = self.eval_expr(*expr)?;
                            out.push_str(&to_js_string(&value, &self.interner));
                        }
                    }
                }
                Ok(Value::string(&out))
            }
            Expr::Array(items) => {
                let items = self.eval_args(items)?;
                Ok(Value::array(items))
            }
            Expr::Object(props) => {
                let object = ObjectValue::new();
                for prop in props {
                    let value = self.eval_named(prop.value, prop.key)?;
                    object.set(prop.key, value);
                }
                Ok(Value::Object(object))
            }
            Expr::Function(func) => self.make_function(*func, None),
            Expr::Member { object, property } => {
                let object = self.eval_expr(*object)?;
                self.get_property(&object, *property)
            }
            Expr::Index { object, index } => {
                let object = self.eval_expr(*object)?;
                let index = self.eval_expr(*index)?;
                self.get_index(&object, &index)
            }
            Expr::Call { callee, args } => self.eval_call(*callee, args),
            Expr::New { callee, args } => self.eval_new(*callee, args),
            Expr::Unary { op, operand } => {
                // `typeof` tolerates undeclared names.
                if *op == UnaryOp::Typeof {
                    if let Expr::Ident(name) = arena.expr(*operand) {
                        let value = self.resolve_identifier(*name).unwrap_or_default();
                        return Ok(Value::string(value.type_of()));
                    }
                }
                let value = self.eval_expr(*operand)?;
                Ok(evaluate_unary(*op, &value, &self.interner))
            }
            Expr::Binary { op, left, right } => {
                let left = self.eval_expr(*left)?;
                let right = self.eval_expr(*right)?;
                Ok(evaluate_binary(*op, &left, &right, &self.interner))
            }
            Expr::Logical { op, left, right } => {
                let left = self.eval_expr(*left)?;
                let short_circuit = match op {
                    LogicalOp::And => !left.is_truthy(),
                    LogicalOp::Or => left.is_truthy(),
                };
                if short_circuit {
                    Ok(left)
                } else {
                    self.eval_expr(*right)
                }
            }
            Expr::Conditional {
                test,
                consequent,
                alternate,
            } => {
                if self.eval_expr(*test)?.is_truthy() {
                    self.eval_expr(*consequent)
                } else {
                    self.eval_expr(*alternate)
                }
            }
            Expr::Assign { target, value } => self.eval_assign(*target, *value),
        }
    }

    /// Evaluate an expression bound to `name`: an anonymous function or
    /// arrow takes the binding's name.
    pub(crate) fn eval_named(&mut self, id: ExprId, name: Name) -> EvalResult {
        let arena = self.arena.clone();
        match arena.expr(id) {
            Expr::Function(func) if arena.function(*func).name.is_none() => {
                self.make_function(*func, Some(name))
            }
            _ => self.eval_expr(id),
        }
    }

    /// Evaluate expressions left to right.
    pub(crate) fn eval_args(&mut self, args: &[ExprId]) -> Result<Vec<Value>, ControlAction> {
        args.iter().map(|&arg| self.eval_expr(arg)).collect()
    }

    fn eval_literal(&self, lit: Literal) -> Value {
        match lit {
            Literal::Undefined => Value::Undefined,
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(b),
            Literal::Number(n) => Value::Number(n),
            Literal::Str(s) => Value::string(self.interner.lookup(s)),
        }
    }

    /// Scope chain, then global-object properties. `undefined` resolves
    /// even though the global object does not hold it.
    fn resolve_identifier(&self, name: Name) -> Option<Value> {
        self.env
            .lookup(name)
            .or_else(|| self.global.get(name))
            .or_else(|| (name == self.names.undefined).then_some(Value::Undefined))
    }

    fn eval_assign(&mut self, target: ExprId, value: ExprId) -> EvalResult {
        let arena = self.arena.clone();
        match arena.expr(target) {
            Expr::Ident(name) => {
                let value = self.eval_named(value, *name)?;
                self.assign_variable(*name, value.clone())?;
                Ok(value)
            }
            Expr::Member { object, property } => {
                let object = self.eval_expr(*object)?;
                let value = self.eval_expr(value)?;
                self.set_property(&object, *property, value.clone())?;
                Ok(value)
            }
            Expr::Index { object, index } => {
                let object = self.eval_expr(*object)?;
                let index = self.eval_expr(*index)?;
                let value = self.eval_expr(value)?;
                self.set_index(&object, &index, value.clone())?;
                Ok(value)
            }
            _ => Err(invalid_assignment_target().into()),
        }
    }

    /// Assign to an existing binding. An undeclared name becomes a global
    /// property in sloppy mode and is an error in strict mode.
    fn assign_variable(&mut self, name: Name, value: Value) -> Result<(), EvalError> {
        match self.env.assign(name, value.clone()) {
            Ok(()) => Ok(()),
            Err(AssignError::Immutable) => Err(const_assignment(self.interner.lookup(name))),
            Err(AssignError::Undefined) => {
                if self.global.has(name) || self.mode.allows_implicit_globals() {
                    self.global.set(name, value);
                    Ok(())
                } else {
                    Err(undefined_variable(self.interner.lookup(name)))
                }
            }
        }
    }
}

/// Convert a signal that reached the outermost boundary into a public
/// result. A top-level `return` ends the program with its value.
pub(crate) fn finish(result: EvalResult) -> Result<Value, EvalError> {
    match result {
        Ok(value) | Err(ControlAction::Return(value)) => Ok(value),
        Err(ControlAction::Error(err)) => Err(*err),
    }
}
