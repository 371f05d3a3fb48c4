//! Function definitions and parameter lists.

use crate::{ExprId, Name, StmtId};

/// How a function was written. Determines receiver handling and
/// constructibility.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FunctionKind {
    /// `function name() {}` statement.
    Declaration,
    /// `function () {}` or `function name() {}` in expression position.
    Expression,
    /// `() => ...`
    Arrow,
}

impl FunctionKind {
    #[inline]
    pub fn is_arrow(self) -> bool {
        matches!(self, FunctionKind::Arrow)
    }
}

/// Function body: a statement block, or a single expression for
/// concise arrows.
#[derive(Clone, Debug, PartialEq)]
pub enum FunctionBody {
    Block(Vec<StmtId>),
    Expr(ExprId),
}

/// A declared parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Name,
    pub default: Option<ExprId>,
    pub rest: bool,
}

impl Param {
    pub fn new(name: Name) -> Self {
        Param {
            name,
            default: None,
            rest: false,
        }
    }

    pub fn with_default(name: Name, default: ExprId) -> Self {
        Param {
            name,
            default: Some(default),
            rest: false,
        }
    }

    pub fn rest(name: Name) -> Self {
        Param {
            name,
            default: None,
            rest: true,
        }
    }
}

/// Why a parameter list is malformed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParamListError {
    #[error("rest parameter at position {position} must be the last parameter")]
    RestNotLast { name: Name, position: usize },
    #[error("rest parameter at position {position} cannot have a default value")]
    RestWithDefault { name: Name, position: usize },
}

impl ParamListError {
    /// The offending parameter.
    pub fn param_name(self) -> Name {
        match self {
            Self::RestNotLast { name, .. } | Self::RestWithDefault { name, .. } => name,
        }
    }
}

/// Ordered parameter list.
///
/// Construction never fails; [`validate`](Self::validate) is called when the
/// definition is evaluated so the error surfaces at definition time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamList {
    params: Vec<Param>,
}

impl ParamList {
    pub fn new(params: Vec<Param>) -> Self {
        ParamList { params }
    }

    /// Check that at most one rest parameter exists, that it is last, and
    /// that it has no default.
    pub fn validate(&self) -> Result<(), ParamListError> {
        let last = self.params.len().saturating_sub(1);
        for (position, param) in self.params.iter().enumerate() {
            if !param.rest {
                continue;
            }
            if param.default.is_some() {
                return Err(ParamListError::RestWithDefault {
                    name: param.name,
                    position,
                });
            }
            if position != last {
                return Err(ParamListError::RestNotLast {
                    name: param.name,
                    position,
                });
            }
        }
        Ok(())
    }

    /// Parameters bound positionally (everything except a trailing rest).
    pub fn positional(&self) -> &[Param] {
        match self.params.split_last() {
            Some((last, init)) if last.rest => init,
            _ => &self.params,
        }
    }

    /// The trailing rest parameter, if any.
    pub fn rest_param(&self) -> Option<&Param> {
        self.params.last().filter(|p| p.rest)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// A function definition.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDef {
    pub name: Option<Name>,
    pub kind: FunctionKind,
    pub params: ParamList,
    pub body: FunctionBody,
}
