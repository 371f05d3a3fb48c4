//! Runtime values for the Calla interpreter.
//!
//! Primitives are stored inline. Arrays, `arguments` objects, object records
//! and functions are reference types: cloning a `Value` aliases them, and
//! `===` compares them by identity.

mod function;
mod object;
mod shared;

use std::fmt;
use std::rc::Rc;

pub use function::{Closure, FunctionValue, NativeFn, NativeFunction};
pub use object::{ObjectData, ObjectValue, PropertyMap};
pub use shared::Shared;

/// Runtime value.
#[derive(Clone, Default)]
pub enum Value {
    /// `undefined`. Also the absent-argument sentinel: a parameter whose
    /// argument is `Undefined` takes its default.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Array(Shared<Vec<Value>>),
    /// The array-like `arguments` object of an invocation.
    Arguments(Shared<Vec<Value>>),
    Object(ObjectValue),
    Function(FunctionValue),
    Native(NativeFunction),
}

// Factory methods

impl Value {
    #[inline]
    pub fn number(n: impl Into<f64>) -> Self {
        Value::Number(n.into())
    }

    #[inline]
    pub fn string(s: &str) -> Self {
        Value::Str(Rc::from(s))
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Shared::new(items))
    }

    pub fn arguments(items: Vec<Value>) -> Self {
        Value::Arguments(Shared::new(items))
    }

    /// A `length` or index as a number.
    #[allow(
        clippy::cast_precision_loss,
        reason = "collection sizes stay far below 2^53"
    )]
    #[inline]
    pub fn from_len(len: usize) -> Self {
        Value::Number(len as f64)
    }
}

// Predicates

impl Value {
    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// `null` or `undefined`.
    #[inline]
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Arrays, objects and functions: the values a constructor may return
    /// in place of the fresh record.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            Value::Array(_)
                | Value::Arguments(_)
                | Value::Object(_)
                | Value::Function(_)
                | Value::Native(_)
        )
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Native(_))
    }

    /// JavaScript truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Result of `typeof`.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Function(_) | Value::Native(_) => "function",
            Value::Null | Value::Array(_) | Value::Arguments(_) | Value::Object(_) => "object",
        }
    }

    /// Short description used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Arguments(_) => "arguments",
            Value::Object(_) => "object",
            Value::Function(_) | Value::Native(_) => "function",
        }
    }

    /// `===`: primitives by value (`NaN !== NaN`), everything else by identity.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) | (Value::Arguments(a), Value::Arguments(b)) => {
                a.ptr_eq(b)
            }
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            (Value::Native(a), Value::Native(b)) => a.name == b.name,
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Snapshot of an array or `arguments` object's elements.
    pub fn as_list(&self) -> Option<Vec<Value>> {
        match self {
            Value::Array(items) | Value::Arguments(items) => Some(items.borrow().clone()),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

// Debug is shallow for reference types: records can contain themselves.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Array(items) => write!(f, "Array(len={})", items.borrow().len()),
            Value::Arguments(items) => write!(f, "Arguments(len={})", items.borrow().len()),
            Value::Object(o) => write!(f, "Object(props={})", o.len()),
            Value::Function(func) => write!(f, "Function({:?})", func.id()),
            Value::Native(n) => write!(f, "Native({})", n.name),
        }
    }
}

#[cfg(test)]
mod tests;
