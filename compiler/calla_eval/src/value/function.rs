//! Function values: user closures and native built-ins.

use std::rc::Rc;

use calla_ir::{FunctionDef, FunctionId, FunctionKind, Name, SharedArena};

use super::Value;
use crate::environment::ScopeRef;
use crate::errors::EvalResult;
use crate::Interpreter;

/// A user-defined function closed over the scope it was created in.
///
/// The scope is captured by reference: later assignments to outer variables
/// are visible inside the function.
pub struct Closure {
    id: FunctionId,
    /// Arena holding the definition (see the arena threading note on
    /// [`Interpreter`]).
    arena: SharedArena,
    /// Declared name, or the name inferred from the binding it was assigned to.
    name: Option<Name>,
    scope: ScopeRef,
    /// Receiver captured at creation. Only arrows have one.
    bound_this: Option<Value>,
}

/// Reference-counted handle to a [`Closure`]. Two handles are the same
/// function only if they share the allocation.
#[derive(Clone)]
pub struct FunctionValue(Rc<Closure>);

impl FunctionValue {
    pub fn new(
        id: FunctionId,
        arena: SharedArena,
        name: Option<Name>,
        scope: ScopeRef,
        bound_this: Option<Value>,
    ) -> Self {
        FunctionValue(Rc::new(Closure {
            id,
            arena,
            name,
            scope,
            bound_this,
        }))
    }

    #[inline]
    pub fn id(&self) -> FunctionId {
        self.0.id
    }

    #[inline]
    pub fn arena(&self) -> &SharedArena {
        &self.0.arena
    }

    #[inline]
    pub fn def(&self) -> &FunctionDef {
        self.0.arena.function(self.0.id)
    }

    #[inline]
    pub fn kind(&self) -> FunctionKind {
        self.def().kind
    }

    #[inline]
    pub fn is_arrow(&self) -> bool {
        self.kind().is_arrow()
    }

    #[inline]
    pub fn name(&self) -> Option<Name> {
        self.0.name
    }

    #[inline]
    pub fn scope(&self) -> &ScopeRef {
        &self.0.scope
    }

    #[inline]
    pub fn bound_this(&self) -> Option<&Value> {
        self.0.bound_this.as_ref()
    }

    /// Number of parameters before the first default or rest parameter
    /// (the `length` property).
    pub fn arity(&self) -> usize {
        self.def()
            .params
            .iter()
            .take_while(|p| p.default.is_none() && !p.rest)
            .count()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Signature of a built-in: interpreter, receiver, arguments.
pub type NativeFn = fn(&mut Interpreter, &Value, &[Value]) -> EvalResult;

/// A built-in function such as `console.log` or `Array.prototype.sort`.
#[derive(Clone, Copy)]
pub struct NativeFunction {
    pub name: &'static str,
    pub func: NativeFn,
}

impl NativeFunction {
    pub const fn new(name: &'static str, func: NativeFn) -> Self {
        NativeFunction { name, func }
    }
}
