//! Call evaluation: receiver resolution, parameter binding, construction.

use calla_ir::{Expr, ExprId, FunctionBody, FunctionId, FunctionKind, Name};

use super::{finish, Interpreter};
use crate::diagnostics::CallFrame;
use crate::environment::{Environment, Mutability};
use crate::errors::{
    invalid_parameter_list, not_callable, not_constructor, ControlAction, EvalError, EvalResult,
};
use crate::format::inspect;
use crate::stack::ensure_sufficient_stack;
use crate::value::{FunctionValue, ObjectValue};
use crate::Value;

/// How a callable is being invoked. Decides the receiver for every callable
/// except arrows, which keep the receiver captured at creation.
#[derive(Clone, Debug)]
pub enum CallForm {
    /// `f(...)`: the global object in sloppy mode, `undefined` in strict.
    Plain,
    /// `container.method(...)`: the container, looked up at call time.
    Method(Value),
}

impl Interpreter {
    /// Call `callee` from host code with an explicit call form.
    pub fn call(
        &mut self,
        callee: &Value,
        form: CallForm,
        args: Vec<Value>,
    ) -> Result<Value, EvalError> {
        finish(self.call_function(callee, form, args))
    }

    /// `new callee(...args)` from host code.
    pub fn construct(&mut self, callee: &Value, args: Vec<Value>) -> Result<Value, EvalError> {
        let description = inspect(callee, &self.interner);
        finish(self.construct_value(callee, &description, args))
    }

    /// `callee(args)` or `object.method(args)`.
    ///
    /// The callee (and its container) is evaluated before the arguments;
    /// callability is checked after both.
    pub(crate) fn eval_call(&mut self, callee: ExprId, args: &[ExprId]) -> EvalResult {
        let arena = self.arena.clone();
        let (function, form) = match arena.expr(callee) {
            Expr::Member { object, property } => {
                let container = self.eval_expr(*object)?;
                let function = self.get_property(&container, *property)?;
                (function, CallForm::Method(container))
            }
            Expr::Index { object, index } => {
                let container = self.eval_expr(*object)?;
                let key = self.eval_expr(*index)?;
                let function = self.get_index(&container, &key)?;
                (function, CallForm::Method(container))
            }
            _ => (self.eval_expr(callee)?, CallForm::Plain),
        };
        let args = self.eval_args(args)?;
        if !function.is_callable() {
            return Err(not_callable(self.describe_expr(callee)).into());
        }
        self.call_function(&function, form, args)
    }

    /// `new callee(args)`
    pub(crate) fn eval_new(&mut self, callee: ExprId, args: &[ExprId]) -> EvalResult {
        let constructor = self.eval_expr(callee)?;
        let args = self.eval_args(args)?;
        let description = self.describe_expr(callee);
        self.construct_value(&constructor, &description, args)
    }

    /// Invoke any callable value.
    pub(crate) fn call_function(
        &mut self,
        callee: &Value,
        form: CallForm,
        args: Vec<Value>,
    ) -> EvalResult {
        match callee {
            Value::Function(func) => {
                let this = self.resolve_receiver(func, form);
                self.invoke(func, this, args)
            }
            Value::Native(native) => {
                // Built-ins never receive the global object implicitly.
                let this = match form {
                    CallForm::Method(container) => container,
                    CallForm::Plain => Value::Undefined,
                };
                (native.func)(self, &this, &args)
            }
            other => Err(not_callable(inspect(other, &self.interner)).into()),
        }
    }

    /// Receiver for one invocation, in priority order: an arrow's captured
    /// receiver, the method container, the plain-call default.
    fn resolve_receiver(&self, func: &FunctionValue, form: CallForm) -> Value {
        if let Some(bound) = func.bound_this() {
            tracing::debug!("arrow keeps captured receiver");
            return bound.clone();
        }
        match form {
            CallForm::Method(container) => {
                tracing::debug!(receiver = container.type_name(), "method receiver");
                container
            }
            CallForm::Plain if self.mode.plain_call_uses_global() => {
                tracing::debug!("plain call receives global object");
                Value::Object(self.global.clone())
            }
            CallForm::Plain => Value::Undefined,
        }
    }

    /// `new`: a fresh record becomes the receiver and is the result unless
    /// the body returns a composite value.
    fn construct_value(
        &mut self,
        callee: &Value,
        description: &str,
        args: Vec<Value>,
    ) -> EvalResult {
        let func = match callee {
            Value::Function(func) if !func.is_arrow() => func,
            _ => return Err(not_constructor(description).into()),
        };
        let instance = ObjectValue::with_class(func.name());
        tracing::debug!(constructor = description, "constructing record");
        let result = self.invoke(func, Value::Object(instance.clone()), args)?;
        if result.is_composite() {
            Ok(result)
        } else {
            Ok(Value::Object(instance))
        }
    }

    /// Run a user function with an already-resolved receiver.
    #[tracing::instrument(level = "debug", skip_all)]
    fn invoke(&mut self, func: &FunctionValue, this: Value, args: Vec<Value>) -> EvalResult {
        self.call_stack.push(CallFrame { name: func.name() })?;
        let result = ensure_sufficient_stack(|| self.invoke_body(func, this, args));
        let result = match result {
            Err(ControlAction::Error(mut err)) => {
                self.call_stack.attach_backtrace(&mut err, &self.interner);
                Err(ControlAction::Error(err))
            }
            other => other,
        };
        self.call_stack.pop();
        result
    }

    /// Swap in the callee's scope, receiver and arena, run the body and
    /// restore the caller's state.
    fn invoke_body(&mut self, func: &FunctionValue, this: Value, args: Vec<Value>) -> EvalResult {
        let env = Environment::for_call(func.scope().clone());
        let caller_env = std::mem::replace(&mut self.env, env);
        let caller_this = std::mem::replace(&mut self.this, this);
        let caller_arena = std::mem::replace(&mut self.arena, func.arena().clone());

        let result = self.run_function(func, args);

        self.env = caller_env;
        self.this = caller_this;
        self.arena = caller_arena;
        result
    }

    fn run_function(&mut self, func: &FunctionValue, args: Vec<Value>) -> EvalResult {
        let def = func.def();
        // A named function expression can refer to itself; parameters
        // defined below shadow the name.
        if def.kind == FunctionKind::Expression {
            if let Some(name) = def.name {
                self.env
                    .define(name, Value::Function(func.clone()), Mutability::Mutable);
            }
        }
        // Arrows see the enclosing invocation's `arguments` through scope.
        if !def.kind.is_arrow() {
            self.env.define(
                self.names.arguments,
                Value::arguments(args.clone()),
                Mutability::Mutable,
            );
        }
        self.bind_parameters(func, &args)?;

        match &def.body {
            FunctionBody::Expr(expr) => self.eval_expr(*expr),
            FunctionBody::Block(stmts) => match self.exec_block(stmts) {
                Ok(_) => Ok(Value::Undefined),
                Err(ControlAction::Return(value)) => Ok(value),
                Err(err) => Err(err),
            },
        }
    }

    /// Bind every positional parameter, then the rest parameter.
    ///
    /// A parameter takes its argument unless the argument is missing or
    /// `undefined`; then its default (evaluated now, in the parameter scope,
    /// so it sees earlier parameters and the receiver) or `undefined`. The
    /// rest parameter takes every argument from its position on.
    ///
    /// Later parameters are not bound yet while a default runs, so a default
    /// naming one resolves through the enclosing scopes. There is no
    /// temporal dead zone.
    fn bind_parameters(&mut self, func: &FunctionValue, args: &[Value]) -> Result<(), ControlAction> {
        let params = &func.def().params;
        let positional = params.positional();
        for (index, param) in positional.iter().enumerate() {
            let value = match args.get(index) {
                Some(arg) if !arg.is_undefined() => arg.clone(),
                _ => match param.default {
                    Some(default) => self.eval_named(default, param.name)?,
                    None => Value::Undefined,
                },
            };
            self.env.define(param.name, value, Mutability::Mutable);
        }
        if let Some(rest) = params.rest_param() {
            let collected = args.get(positional.len()..).unwrap_or_default().to_vec();
            self.env
                .define(rest.name, Value::array(collected), Mutability::Mutable);
        }
        Ok(())
    }

    /// Create a closure over the current scope. Arrows also capture the
    /// current receiver. The parameter list is checked here, so a malformed
    /// one fails when the definition is evaluated rather than when called.
    pub(crate) fn make_function(&self, id: FunctionId, inferred: Option<Name>) -> EvalResult {
        let def = self.arena.function(id);
        let name = def.name.or(inferred);
        if let Err(err) = def.params.validate() {
            let function = name.map_or("<anonymous>", |n| self.interner.lookup(n));
            let param = self.interner.lookup(err.param_name());
            return Err(invalid_parameter_list(function, param, err).into());
        }
        let bound_this = def.kind.is_arrow().then(|| self.this.clone());
        Ok(Value::Function(FunctionValue::new(
            id,
            self.arena.clone(),
            name,
            self.env.current_scope(),
            bound_this,
        )))
    }

    /// Source-like description of a callee for error messages.
    fn describe_expr(&self, id: ExprId) -> String {
        match self.arena.expr(id) {
            Expr::Ident(name) => self.interner.lookup(*name).to_owned(),
            Expr::This => "this".to_owned(),
            Expr::Member { object, property } => format!(
                "{}.{}",
                self.describe_expr(*object),
                self.interner.lookup(*property)
            ),
            Expr::Index { object, .. } => format!("{}[...]", self.describe_expr(*object)),
            Expr::Call { callee, .. } => format!("{}(...)", self.describe_expr(*callee)),
            _ => "(intermediate value)".to_owned(),
        }
    }
}
