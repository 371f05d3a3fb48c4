//! Evaluation errors and control-flow signals.
//!
//! `EvalErrorKind` carries typed error data; the free functions at the bottom
//! of this module are the single place errors are constructed, so message
//! wording and error codes stay consistent.

use std::fmt;

use crate::Value;

/// Result of evaluating an expression or statement inside the interpreter.
pub type EvalResult = Result<Value, ControlAction>;

/// Which kind of property access failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Read => write!(f, "read"),
            Access::Write => write!(f, "set"),
        }
    }
}

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("{callee} is not a function")]
    NotCallable { callee: String },

    #[error("invalid parameter list for {function}: {reason}")]
    InvalidParameterList {
        function: String,
        param: String,
        reason: String,
    },

    #[error("{callee} is not a constructor")]
    NotConstructor { callee: String },

    #[error("{name} is not defined")]
    UndefinedVariable { name: String },

    #[error("assignment to constant variable '{name}'")]
    ConstAssignment { name: String },

    #[error("cannot {access} properties of {base} (property '{property}')")]
    PropertyOfNullish {
        base: &'static str,
        property: String,
        access: Access,
    },

    #[error("maximum call stack size exceeded (depth {depth})")]
    StackOverflow { depth: usize },

    #[error("invalid assignment target")]
    InvalidAssignmentTarget,

    #[error("{method} called on incompatible receiver {receiver}")]
    IncompatibleReceiver {
        method: &'static str,
        receiver: &'static str,
    },

    #[error("invalid array length {requested} (limit {limit})")]
    InvalidArrayLength { requested: String, limit: usize },
}

impl EvalErrorKind {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotCallable { .. } => "E6001",
            Self::InvalidParameterList { .. } => "E6002",
            Self::NotConstructor { .. } => "E6003",
            Self::UndefinedVariable { .. } => "E6004",
            Self::ConstAssignment { .. } => "E6005",
            Self::PropertyOfNullish { .. } => "E6006",
            Self::StackOverflow { .. } => "E6007",
            Self::InvalidAssignmentTarget => "E6008",
            Self::IncompatibleReceiver { .. } => "E6009",
            Self::InvalidArrayLength { .. } => "E6010",
        }
    }
}

/// One frame of the call stack at the point an error was raised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Function name, or `None` for anonymous functions.
    pub function: Option<String>,
}

impl fmt::Display for BacktraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.function {
            Some(name) => write!(f, "at {name}"),
            None => write!(f, "at <anonymous>"),
        }
    }
}

/// A fatal evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Innermost frame first. Empty when raised at top level.
    pub backtrace: Vec<BacktraceFrame>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            backtrace: Vec::new(),
        }
    }

    #[inline]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for EvalError {}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::new(kind)
    }
}

/// Non-local exits from statement evaluation.
///
/// `return` travels up to the nearest function boundary as `Return`;
/// errors travel to the top level.
#[derive(Debug)]
pub enum ControlAction {
    Return(Value),
    Error(Box<EvalError>),
}

impl ControlAction {
    /// Convert a signal that escaped every function boundary into an error.
    /// A top-level `return` is not an error; the caller handles it first.
    pub fn into_eval_error(self) -> Option<EvalError> {
        match self {
            ControlAction::Error(e) => Some(*e),
            ControlAction::Return(_) => None,
        }
    }
}

impl From<EvalError> for ControlAction {
    fn from(e: EvalError) -> Self {
        ControlAction::Error(Box::new(e))
    }
}

impl From<EvalErrorKind> for ControlAction {
    fn from(kind: EvalErrorKind) -> Self {
        ControlAction::Error(Box::new(EvalError::new(kind)))
    }
}

// Constructors

pub fn not_callable(callee: impl Into<String>) -> EvalError {
    EvalErrorKind::NotCallable {
        callee: callee.into(),
    }
    .into()
}

pub fn invalid_parameter_list(
    function: impl Into<String>,
    param: impl Into<String>,
    reason: impl fmt::Display,
) -> EvalError {
    EvalErrorKind::InvalidParameterList {
        function: function.into(),
        param: param.into(),
        reason: reason.to_string(),
    }
    .into()
}

pub fn not_constructor(callee: impl Into<String>) -> EvalError {
    EvalErrorKind::NotConstructor {
        callee: callee.into(),
    }
    .into()
}

pub fn undefined_variable(name: impl Into<String>) -> EvalError {
    EvalErrorKind::UndefinedVariable { name: name.into() }.into()
}

pub fn const_assignment(name: impl Into<String>) -> EvalError {
    EvalErrorKind::ConstAssignment { name: name.into() }.into()
}

/// Reading or writing a property of `null`/`undefined`.
pub fn property_of_nullish(base: &Value, property: impl Into<String>, access: Access) -> EvalError {
    EvalErrorKind::PropertyOfNullish {
        base: base.type_name(),
        property: property.into(),
        access,
    }
    .into()
}

pub fn stack_overflow(depth: usize) -> EvalError {
    EvalErrorKind::StackOverflow { depth }.into()
}

pub fn invalid_assignment_target() -> EvalError {
    EvalErrorKind::InvalidAssignmentTarget.into()
}

pub fn incompatible_receiver(method: &'static str, receiver: &Value) -> EvalError {
    EvalErrorKind::IncompatibleReceiver {
        method,
        receiver: receiver.type_name(),
    }
    .into()
}

/// An array length (or index write) past `limit`, or not a valid length.
pub fn invalid_array_length(requested: impl Into<String>, limit: usize) -> EvalError {
    EvalErrorKind::InvalidArrayLength {
        requested: requested.into(),
        limit,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn not_callable_message() {
        assert_eq!(not_callable("greeting").to_string(), "greeting is not a function");
    }

    #[test]
    fn property_of_nullish_message_names_access() {
        let read = property_of_nullish(&Value::Undefined, "name", Access::Read);
        assert_eq!(
            read.to_string(),
            "cannot read properties of undefined (property 'name')"
        );
        let write = property_of_nullish(&Value::Null, "name", Access::Write);
        assert_eq!(
            write.to_string(),
            "cannot set properties of null (property 'name')"
        );
    }

    #[test]
    fn codes_are_distinct() {
        let kinds = [
            not_callable("f").kind,
            invalid_parameter_list("f", "x", "bad").kind,
            not_constructor("f").kind,
            undefined_variable("x").kind,
            const_assignment("x").kind,
            property_of_nullish(&Value::Null, "p", Access::Read).kind,
            stack_overflow(1).kind,
            invalid_assignment_target().kind,
            incompatible_receiver("push", &Value::Null).kind,
            invalid_array_length("-1", 8).kind,
        ];
        let mut codes: Vec<&str> = kinds.iter().map(EvalErrorKind::code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }

    #[test]
    fn top_level_return_is_not_an_error() {
        assert!(ControlAction::Return(Value::Null).into_eval_error().is_none());
        let err = ControlAction::from(undefined_variable("x"));
        assert_eq!(
            err.into_eval_error().map(|e| e.code()),
            Some("E6004")
        );
    }

    #[test]
    fn backtrace_frame_display() {
        let named = BacktraceFrame {
            function: Some("multiply".to_string()),
        };
        let anon = BacktraceFrame { function: None };
        assert_eq!(named.to_string(), "at multiply");
        assert_eq!(anon.to_string(), "at <anonymous>");
    }
}
