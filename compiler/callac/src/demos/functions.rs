//! Function declarations and function expressions.

use calla_ir::{BinaryOp, ProgramBuilder, StmtId, UnaryOp};

/// ```text
/// const sum = function (a, b) { return a + b; };
/// console.log(sum(10, 45));
/// ```
pub(super) fn sum(b: &mut ProgramBuilder) -> Vec<StmtId> {
    let a = b.param("a");
    let second = b.param("b");
    let a_ref = b.ident("a");
    let b_ref = b.ident("b");
    let total = b.binary(BinaryOp::Add, a_ref, b_ref);
    let ret = b.ret(total);
    let func = b.function_expr(None, vec![a, second], vec![ret]);
    let decl = b.const_("sum", func);

    let ten = b.num(10.0);
    let forty_five = b.num(45.0);
    let call = b.call_named("sum", vec![ten, forty_five]);
    let log = b.log(vec![call]);
    vec![decl, log]
}

/// ```text
/// function enclosingFunction() {
///   return inside();
///   function inside() { return "Hello world"; }
/// }
/// console.log(enclosingFunction());
/// ```
///
/// `inside` is called before its declaration; declarations are hoisted.
pub(super) fn enclosing(b: &mut ProgramBuilder) -> Vec<StmtId> {
    let call = b.call_named("inside", vec![]);
    let early_return = b.ret(call);
    let greeting = b.str("Hello world");
    let ret = b.ret(greeting);
    let inside = b.function_decl("inside", vec![], vec![ret]);
    let outer = b.function_decl("enclosingFunction", vec![], vec![early_return, inside]);

    let call = b.call_named("enclosingFunction", vec![]);
    let log = b.log(vec![call]);
    vec![outer, log]
}

/// ```text
/// const hello = function () { return "Hello" };
/// console.log(hello);
/// console.log(hello());
/// ```
pub(super) fn hello(b: &mut ProgramBuilder) -> Vec<StmtId> {
    let greeting = b.str("Hello");
    let ret = b.ret(greeting);
    let func = b.function_expr(None, vec![], vec![ret]);
    let decl = b.const_("hello", func);

    let hello_ref = b.ident("hello");
    let log_value = b.log(vec![hello_ref]);
    let call = b.call_named("hello", vec![]);
    let log_call = b.log(vec![call]);
    vec![decl, log_value, log_call]
}

/// ```text
/// function myOutsideFunction(inside) { return inside(); }
/// myOutsideFunction(function () { console.log("Hello world again"); });
/// ```
pub(super) fn callback(b: &mut ProgramBuilder) -> Vec<StmtId> {
    let inside = b.param("inside");
    let call = b.call_named("inside", vec![]);
    let ret = b.ret(call);
    let outside = b.function_decl("myOutsideFunction", vec![inside], vec![ret]);

    let message = b.str("Hello world again");
    let log = b.log(vec![message]);
    let func = b.function_expr(None, vec![], vec![log]);
    let call = b.call_named("myOutsideFunction", vec![func]);
    let stmt = b.expr_stmt(call);
    vec![outside, stmt]
}

/// ```text
/// (function () { console.log('Hello from a function expression'); })();
/// +function () { console.log('IIFE with a unary operator'); }();
/// ```
pub(super) fn iife(b: &mut ProgramBuilder) -> Vec<StmtId> {
    let message = b.str("Hello from a function expression");
    let log = b.log(vec![message]);
    let func = b.function_expr(None, vec![], vec![log]);
    let call = b.call(func, vec![]);
    let grouped = b.expr_stmt(call);

    let message = b.str("IIFE with a unary operator");
    let log = b.log(vec![message]);
    let func = b.function_expr(None, vec![], vec![log]);
    let call = b.call(func, vec![]);
    let plus = b.unary(UnaryOp::Plus, call);
    let unary = b.expr_stmt(plus);
    vec![grouped, unary]
}
