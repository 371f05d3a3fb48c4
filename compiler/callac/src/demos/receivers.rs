//! Receiver (`this`) binding: methods, plain calls and constructors.

use calla_ir::{BinaryOp, ProgramBuilder, StmtId, TemplatePart, UnaryOp};

/// ```text
/// const ada = {
///   name: "Ada",
///   greet: function () { return `Hi, I'm ${this.name}`; },
/// };
/// const bob = { name: "Bob" };
/// bob.greet = ada.greet;
/// console.log(ada.greet());
/// console.log(bob.greet());
/// ```
pub(super) fn method(b: &mut ProgramBuilder) -> Vec<StmtId> {
    let this = b.this();
    let name = b.member(this, "name");
    let parts = vec![b.text("Hi, I'm "), TemplatePart::Expr(name)];
    let greeting = b.template(parts);
    let ret = b.ret(greeting);
    let greet = b.function_expr(None, vec![], vec![ret]);
    let label = b.str("Ada");
    let ada = b.object(vec![("name", label), ("greet", greet)]);
    let ada = b.const_("ada", ada);

    let label = b.str("Bob");
    let bob = b.object(vec![("name", label)]);
    let bob = b.const_("bob", bob);

    let bob_ref = b.ident("bob");
    let target = b.member(bob_ref, "greet");
    let ada_ref = b.ident("ada");
    let source = b.member(ada_ref, "greet");
    let assign = b.assign(target, source);
    let borrow = b.expr_stmt(assign);

    let ada_ref = b.ident("ada");
    let call = b.method_call(ada_ref, "greet", vec![]);
    let log_ada = b.log(vec![call]);
    let bob_ref = b.ident("bob");
    let call = b.method_call(bob_ref, "greet", vec![]);
    let log_bob = b.log(vec![call]);
    vec![ada, bob, borrow, log_ada, log_bob]
}

/// ```text
/// function describeThis() { return typeof this; }
/// console.log(describeThis());
/// console.log(this === globalThis);
/// ```
///
/// Prints `object` in sloppy mode and `undefined` in strict mode.
pub(super) fn plain_this(b: &mut ProgramBuilder) -> Vec<StmtId> {
    let this = b.this();
    let kind = b.unary(UnaryOp::Typeof, this);
    let ret = b.ret(kind);
    let decl = b.function_decl("describeThis", vec![], vec![ret]);

    let call = b.call_named("describeThis", vec![]);
    let log_call = b.log(vec![call]);

    let this = b.this();
    let global = b.ident("globalThis");
    let same = b.binary(BinaryOp::StrictEq, this, global);
    let log_top = b.log(vec![same]);
    vec![decl, log_call, log_top]
}

/// ```text
/// function Person(name, age) {
///   this.name = name;
///   this.age = age;
/// }
/// const ada = new Person("Ada", 36);
/// const bob = new Person("Bob", 40);
/// console.log(ada);
/// console.log(bob);
/// console.log(ada === bob);
/// ```
pub(super) fn constructor(b: &mut ProgramBuilder) -> Vec<StmtId> {
    let mut params = Vec::new();
    let mut body = Vec::new();
    for field in ["name", "age"] {
        params.push(b.param(field));
        let this = b.this();
        let target = b.member(this, field);
        let value = b.ident(field);
        let assign = b.assign(target, value);
        body.push(b.expr_stmt(assign));
    }
    let decl = b.function_decl("Person", params, body);

    let mut stmts = vec![decl];
    for (binding, name, age) in [("ada", "Ada", 36.0), ("bob", "Bob", 40.0)] {
        let ctor = b.ident("Person");
        let name = b.str(name);
        let age = b.num(age);
        let made = b.construct(ctor, vec![name, age]);
        stmts.push(b.const_(binding, made));
    }
    for binding in ["ada", "bob"] {
        let value = b.ident(binding);
        stmts.push(b.log(vec![value]));
    }
    let ada = b.ident("ada");
    let bob = b.ident("bob");
    let same = b.binary(BinaryOp::StrictEq, ada, bob);
    stmts.push(b.log(vec![same]));
    stmts
}
