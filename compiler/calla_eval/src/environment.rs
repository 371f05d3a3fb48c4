//! Lexical scopes.
//!
//! Scopes form a parent chain. A closure keeps a handle to the scope it was
//! created in, and each invocation runs in a fresh [`Environment`] whose
//! scope's parent is that captured scope.

use rustc_hash::FxHashMap;

use calla_ir::{DeclKind, Name};

use crate::value::Shared;
use crate::Value;

/// Handle to a scope shared between an environment and the closures
/// created in it.
pub type ScopeRef = Shared<Scope>;

/// Whether a variable binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// `let`, `var`, parameters, function declarations.
    Mutable,
    /// `const`.
    Immutable,
}

impl Mutability {
    #[inline]
    pub fn is_mutable(self) -> bool {
        matches!(self, Mutability::Mutable)
    }
}

impl From<DeclKind> for Mutability {
    fn from(kind: DeclKind) -> Self {
        if kind.is_reassignable() {
            Mutability::Mutable
        } else {
            Mutability::Immutable
        }
    }
}

/// Error returned by `Scope::assign`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// Variable exists but is `const`.
    Immutable,
    /// Variable not found in any scope.
    Undefined,
}

#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

/// A single scope containing variable bindings.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, Binding>,
    parent: Option<ScopeRef>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: ScopeRef) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Define (or redefine) a variable in this scope.
    #[inline]
    pub fn define(&mut self, name: Name, value: Value, mutability: Mutability) {
        self.bindings.insert(name, Binding { value, mutability });
    }

    /// Look up a variable through the parent chain.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        if let Some(binding) = self.bindings.get(&name) {
            return Some(binding.value.clone());
        }
        self.parent.as_ref().and_then(|p| p.borrow().lookup(name))
    }

    /// Assign to the nearest binding of `name`.
    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        if let Some(binding) = self.bindings.get_mut(&name) {
            if !binding.mutability.is_mutable() {
                return Err(AssignError::Immutable);
            }
            binding.value = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(AssignError::Undefined),
        }
    }
}

/// The innermost scope of one invocation (or of the top level).
pub struct Environment {
    scope: ScopeRef,
}

impl Environment {
    /// Create a top-level environment with an empty global scope.
    pub fn new() -> Self {
        Environment {
            scope: ScopeRef::new(Scope::new()),
        }
    }

    /// Create a call environment: a fresh scope whose parent is the
    /// closure's captured scope.
    pub fn for_call(captured: ScopeRef) -> Self {
        Environment {
            scope: ScopeRef::new(Scope::with_parent(captured)),
        }
    }

    /// Handle to the innermost scope, for closures to capture.
    #[inline]
    pub fn current_scope(&self) -> ScopeRef {
        self.scope.clone()
    }

    #[inline]
    pub fn define(&mut self, name: Name, value: Value, mutability: Mutability) {
        self.scope.borrow_mut().define(name, value, mutability);
    }

    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.scope.borrow().lookup(name)
    }

    pub fn assign(&mut self, name: Name, value: Value) -> Result<(), AssignError> {
        self.scope.borrow_mut().assign(name, value)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
