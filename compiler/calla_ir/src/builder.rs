//! Programmatic construction of programs.
//!
//! There is no source parser; programs are assembled node by node:
//!
//! ```text
//! let mut b = ProgramBuilder::new(SharedInterner::new());
//! let greeting = b.str("Hello");
//! let log = b.log(vec![greeting]);
//! let program = b.finish(vec![log]);
//! ```

use crate::{
    BinaryOp, DeclKind, Expr, ExprArena, ExprId, FunctionBody, FunctionDef, FunctionId,
    FunctionKind, Literal, LogicalOp, Name, ObjectProp, Param, ParamList, SharedArena,
    SharedInterner, Stmt, StmtId, TemplatePart, UnaryOp,
};

/// A complete program: its arena, top-level statements and interner.
#[derive(Clone)]
pub struct Program {
    pub arena: SharedArena,
    pub body: Vec<StmtId>,
    pub interner: SharedInterner,
}

/// Builder that allocates nodes into a fresh arena.
pub struct ProgramBuilder {
    arena: ExprArena,
    interner: SharedInterner,
}

impl ProgramBuilder {
    pub fn new(interner: SharedInterner) -> Self {
        ProgramBuilder {
            arena: ExprArena::new(),
            interner,
        }
    }

    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    fn expr(&mut self, expr: Expr) -> ExprId {
        self.arena.alloc_expr(expr)
    }

    fn stmt(&mut self, stmt: Stmt) -> StmtId {
        self.arena.alloc_stmt(stmt)
    }

    // Literals

    pub fn undefined(&mut self) -> ExprId {
        self.expr(Expr::Literal(Literal::Undefined))
    }

    pub fn null(&mut self) -> ExprId {
        self.expr(Expr::Literal(Literal::Null))
    }

    pub fn bool(&mut self, value: bool) -> ExprId {
        self.expr(Expr::Literal(Literal::Bool(value)))
    }

    pub fn num(&mut self, value: f64) -> ExprId {
        self.expr(Expr::Literal(Literal::Number(value)))
    }

    pub fn str(&mut self, value: &str) -> ExprId {
        let name = self.name(value);
        self.expr(Expr::Literal(Literal::Str(name)))
    }

    /// Literal text piece for [`template`](Self::template).
    pub fn text(&self, value: &str) -> TemplatePart {
        TemplatePart::Text(self.name(value))
    }

    pub fn template(&mut self, parts: Vec<TemplatePart>) -> ExprId {
        self.expr(Expr::Template(parts))
    }

    // Names and access

    pub fn ident(&mut self, name: &str) -> ExprId {
        let name = self.name(name);
        self.expr(Expr::Ident(name))
    }

    pub fn this(&mut self) -> ExprId {
        self.expr(Expr::This)
    }

    pub fn member(&mut self, object: ExprId, property: &str) -> ExprId {
        let property = self.name(property);
        self.expr(Expr::Member { object, property })
    }

    pub fn index(&mut self, object: ExprId, index: ExprId) -> ExprId {
        self.expr(Expr::Index { object, index })
    }

    pub fn array(&mut self, items: Vec<ExprId>) -> ExprId {
        self.expr(Expr::Array(items))
    }

    pub fn object(&mut self, props: Vec<(&str, ExprId)>) -> ExprId {
        let props = props
            .into_iter()
            .map(|(key, value)| ObjectProp {
                key: self.name(key),
                value,
            })
            .collect();
        self.expr(Expr::Object(props))
    }

    // Calls

    pub fn call(&mut self, callee: ExprId, args: Vec<ExprId>) -> ExprId {
        self.expr(Expr::Call { callee, args })
    }

    /// `object.method(args)`
    pub fn method_call(&mut self, object: ExprId, method: &str, args: Vec<ExprId>) -> ExprId {
        let callee = self.member(object, method);
        self.call(callee, args)
    }

    /// `name(args)`
    pub fn call_named(&mut self, name: &str, args: Vec<ExprId>) -> ExprId {
        let callee = self.ident(name);
        self.call(callee, args)
    }

    /// `new callee(args)`
    pub fn construct(&mut self, callee: ExprId, args: Vec<ExprId>) -> ExprId {
        self.expr(Expr::New { callee, args })
    }

    // Operators

    pub fn unary(&mut self, op: UnaryOp, operand: ExprId) -> ExprId {
        self.expr(Expr::Unary { op, operand })
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.expr(Expr::Binary { op, left, right })
    }

    pub fn logical(&mut self, op: LogicalOp, left: ExprId, right: ExprId) -> ExprId {
        self.expr(Expr::Logical { op, left, right })
    }

    pub fn conditional(&mut self, test: ExprId, consequent: ExprId, alternate: ExprId) -> ExprId {
        self.expr(Expr::Conditional {
            test,
            consequent,
            alternate,
        })
    }

    pub fn assign(&mut self, target: ExprId, value: ExprId) -> ExprId {
        self.expr(Expr::Assign { target, value })
    }

    // Parameters

    pub fn param(&self, name: &str) -> Param {
        Param::new(self.name(name))
    }

    pub fn param_default(&self, name: &str, default: ExprId) -> Param {
        Param::with_default(self.name(name), default)
    }

    pub fn rest(&self, name: &str) -> Param {
        Param::rest(self.name(name))
    }

    // Functions

    fn function_def(
        &mut self,
        name: Option<&str>,
        kind: FunctionKind,
        params: Vec<Param>,
        body: FunctionBody,
    ) -> FunctionId {
        let name = name.map(|n| self.name(n));
        self.arena.alloc_function(FunctionDef {
            name,
            kind,
            params: ParamList::new(params),
            body,
        })
    }

    /// `function name?(params) { body }` in expression position.
    pub fn function_expr(
        &mut self,
        name: Option<&str>,
        params: Vec<Param>,
        body: Vec<StmtId>,
    ) -> ExprId {
        let id = self.function_def(
            name,
            FunctionKind::Expression,
            params,
            FunctionBody::Block(body),
        );
        self.expr(Expr::Function(id))
    }

    /// `(params) => { body }`
    pub fn arrow(&mut self, params: Vec<Param>, body: Vec<StmtId>) -> ExprId {
        let id = self.function_def(None, FunctionKind::Arrow, params, FunctionBody::Block(body));
        self.expr(Expr::Function(id))
    }

    /// `(params) => expr`
    pub fn arrow_expr(&mut self, params: Vec<Param>, body: ExprId) -> ExprId {
        let id = self.function_def(None, FunctionKind::Arrow, params, FunctionBody::Expr(body));
        self.expr(Expr::Function(id))
    }

    /// `function name(params) { body }` statement.
    pub fn function_decl(&mut self, name: &str, params: Vec<Param>, body: Vec<StmtId>) -> StmtId {
        let id = self.function_def(
            Some(name),
            FunctionKind::Declaration,
            params,
            FunctionBody::Block(body),
        );
        self.stmt(Stmt::Function(id))
    }

    // Statements

    pub fn expr_stmt(&mut self, expr: ExprId) -> StmtId {
        self.stmt(Stmt::Expr(expr))
    }

    pub fn decl(&mut self, kind: DeclKind, name: &str, init: Option<ExprId>) -> StmtId {
        let name = self.name(name);
        self.stmt(Stmt::Decl { kind, name, init })
    }

    pub fn let_(&mut self, name: &str, init: ExprId) -> StmtId {
        self.decl(DeclKind::Let, name, Some(init))
    }

    pub fn const_(&mut self, name: &str, init: ExprId) -> StmtId {
        self.decl(DeclKind::Const, name, Some(init))
    }

    pub fn var(&mut self, name: &str, init: ExprId) -> StmtId {
        self.decl(DeclKind::Var, name, Some(init))
    }

    pub fn ret(&mut self, value: ExprId) -> StmtId {
        self.stmt(Stmt::Return(Some(value)))
    }

    pub fn ret_void(&mut self) -> StmtId {
        self.stmt(Stmt::Return(None))
    }

    /// `console.log(args)` as a statement.
    pub fn log(&mut self, args: Vec<ExprId>) -> StmtId {
        let console = self.ident("console");
        let call = self.method_call(console, "log", args);
        self.expr_stmt(call)
    }

    /// Freeze the arena and produce a runnable program.
    pub fn finish(self, body: Vec<StmtId>) -> Program {
        Program {
            arena: SharedArena::new(self.arena),
            body,
            interner: self.interner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn log_builds_console_method_call() {
        let mut b = ProgramBuilder::new(SharedInterner::new());
        let hello = b.str("hello");
        let stmt = b.log(vec![hello]);
        let program = b.finish(vec![stmt]);

        let Stmt::Expr(call) = program.arena.stmt(stmt) else {
            panic!("expected expression statement");
        };
        let Expr::Call { callee, args } = program.arena.expr(*call) else {
            panic!("expected call");
        };
        assert_eq!(args, &vec![hello]);
        let Expr::Member { property, .. } = program.arena.expr(*callee) else {
            panic!("expected member callee");
        };
        assert_eq!(program.interner.lookup(*property), "log");
    }

    #[test]
    fn function_decl_records_kind_and_params() {
        let mut b = ProgramBuilder::new(SharedInterner::new());
        let first = b.param("first");
        let rest = b.rest("rest");
        let body_expr = b.ident("first");
        let ret = b.ret(body_expr);
        let decl = b.function_decl("multiply", vec![first, rest], vec![ret]);
        let program = b.finish(vec![decl]);

        let Stmt::Function(id) = program.arena.stmt(decl) else {
            panic!("expected function declaration");
        };
        let def = program.arena.function(*id);
        assert_eq!(def.kind, FunctionKind::Declaration);
        assert_eq!(def.params.len(), 2);
        assert!(def.params.rest_param().is_some());
        assert_eq!(def.name.map(|n| program.interner.lookup(n)), Some("multiply"));
    }

    #[test]
    fn arrow_expr_has_expression_body() {
        let mut b = ProgramBuilder::new(SharedInterner::new());
        let a = b.param("a");
        let body = b.ident("a");
        let arrow = b.arrow_expr(vec![a], body);
        let program = b.finish(vec![]);

        let Expr::Function(id) = program.arena.expr(arrow) else {
            panic!("expected function expression");
        };
        let def = program.arena.function(*id);
        assert!(def.kind.is_arrow());
        assert_eq!(def.body, FunctionBody::Expr(body));
        assert_eq!(def.name, None);
    }
}
