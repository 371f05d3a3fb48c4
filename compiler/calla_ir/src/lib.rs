//! Calla IR - program representation for the Calla call evaluator.
//!
//! This crate contains the data structures the evaluator walks:
//! - Names for interned identifiers
//! - Expression, statement and function nodes in a flat arena
//! - Parameter lists with definition-time validation
//! - `ProgramBuilder` for assembling programs without a parser
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: identifiers and string literals are `Name(u32)`
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId(u32)` indices

mod arena;
pub mod ast;
mod builder;
mod function;
mod interner;
mod name;

pub use arena::{ExprArena, SharedArena};
pub use ast::{
    BinaryOp, DeclKind, Expr, ExprId, FunctionId, Literal, LogicalOp, ObjectProp, Stmt, StmtId,
    TemplatePart, UnaryOp,
};
pub use builder::{Program, ProgramBuilder};
pub use function::{FunctionBody, FunctionDef, FunctionKind, Param, ParamList, ParamListError};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
