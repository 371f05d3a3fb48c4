//! Expression and statement nodes.
//!
//! The tree is flat: children are referenced by [`ExprId`] / [`StmtId`] /
//! [`FunctionId`] indices into an [`ExprArena`](crate::ExprArena) rather than
//! boxed.

use std::fmt;

use crate::Name;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Create a new id from a raw arena index.
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Get the index into the arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

arena_id!(
    /// Index of an expression in the arena.
    ExprId
);
arena_id!(
    /// Index of a statement in the arena.
    StmtId
);
arena_id!(
    /// Index of a function definition in the arena.
    FunctionId
);

/// Literal values.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Literal {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    /// Interned string contents.
    Str(Name),
}

/// One piece of a template string.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TemplatePart {
    Text(Name),
    Expr(ExprId),
}

/// A `key: value` entry in an object literal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObjectProp {
    pub key: Name,
    pub value: ExprId,
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// `+x`, numeric conversion.
    Plus,
    /// `-x`
    Neg,
    /// `!x`
    Not,
    /// `typeof x`
    Typeof,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Neg => "-",
            Self::Not => "!",
            Self::Typeof => "typeof",
        }
    }
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Rem,

    // Comparison
    StrictEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    /// Returns the source-level symbol for this operator.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::StrictEq => "===",
            Self::StrictNotEq => "!==",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
        }
    }
}

/// Short-circuiting operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LogicalOp {
    And,
    Or,
}

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Ident(Name),
    This,
    Template(Vec<TemplatePart>),
    Array(Vec<ExprId>),
    Object(Vec<ObjectProp>),
    /// Function expression or arrow function.
    Function(FunctionId),
    /// `object.property`
    Member {
        object: ExprId,
        property: Name,
    },
    /// `object[index]`
    Index {
        object: ExprId,
        index: ExprId,
    },
    /// A call. When `callee` is a `Member` or `Index` expression the call is
    /// method-style and the container becomes the receiver.
    Call {
        callee: ExprId,
        args: Vec<ExprId>,
    },
    /// `new callee(args)`
    New {
        callee: ExprId,
        args: Vec<ExprId>,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Logical {
        op: LogicalOp,
        left: ExprId,
        right: ExprId,
    },
    /// `test ? consequent : alternate`
    Conditional {
        test: ExprId,
        consequent: ExprId,
        alternate: ExprId,
    },
    /// `target = value`, where target is an identifier, member or index.
    Assign {
        target: ExprId,
        value: ExprId,
    },
}

/// Declaration keyword.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclKind {
    Var,
    Let,
    Const,
}

impl DeclKind {
    #[inline]
    pub fn is_reassignable(self) -> bool {
        !matches!(self, DeclKind::Const)
    }
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Expr(ExprId),
    Decl {
        kind: DeclKind,
        name: Name,
        init: Option<ExprId>,
    },
    /// Function declaration, hoisted to the top of its enclosing body.
    Function(FunctionId),
    Return(Option<ExprId>),
}
