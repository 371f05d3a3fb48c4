use calla_ir::{BinaryOp, ProgramBuilder, StmtId};
use pretty_assertions::assert_eq;

use super::{run, run_configured, run_strict};
use crate::Value;

#[test]
fn calling_a_number_is_not_callable() {
    let out = run(|b| {
        let five = b.num(5.0);
        let decl = b.const_("x", five);
        let before = b.str("before");
        let log_before = b.log(vec![before]);
        let call = b.call_named("x", vec![]);
        let call = b.expr_stmt(call);
        let after = b.str("after");
        let log_after = b.log(vec![after]);
        vec![decl, log_before, call, log_after]
    });
    assert_eq!(out.error_code(), Some("E6001"));
    assert_eq!(out.error_message().as_deref(), Some("x is not a function"));
    assert_eq!(out.output, vec!["before"]);
}

#[test]
fn missing_method_names_the_member_path() {
    let out = run(|b| {
        let obj = b.object(vec![]);
        let decl = b.const_("o", obj);
        let o = b.ident("o");
        let call = b.method_call(o, "missing", vec![]);
        let stmt = b.expr_stmt(call);
        vec![decl, stmt]
    });
    assert_eq!(
        out.error_message().as_deref(),
        Some("o.missing is not a function")
    );
}

#[test]
fn undeclared_identifier_is_an_error() {
    let out = run(|b| {
        let nope = b.ident("nope");
        let log = b.log(vec![nope]);
        vec![log]
    });
    assert_eq!(out.error_code(), Some("E6004"));
    assert_eq!(out.error_message().as_deref(), Some("nope is not defined"));
}

#[test]
fn const_bindings_cannot_be_reassigned() {
    let out = run(|b| {
        let one = b.num(1.0);
        let decl = b.const_("a", one);
        let target = b.ident("a");
        let two = b.num(2.0);
        let assign = b.assign(target, two);
        let stmt = b.expr_stmt(assign);
        vec![decl, stmt]
    });
    assert_eq!(out.error_code(), Some("E6005"));
    assert_eq!(out.interp.lookup_variable("a"), Some(Value::number(1)));
}

#[test]
fn undeclared_assignment_depends_on_mode() {
    let build = |b: &mut ProgramBuilder| {
        let target = b.ident("implicit");
        let five = b.num(5.0);
        let assign = b.assign(target, five);
        let stmt = b.expr_stmt(assign);
        let global = b.ident("globalThis");
        let read = b.member(global, "implicit");
        let read = b.expr_stmt(read);
        vec![stmt, read]
    };
    assert_eq!(run(build).value(), Value::number(5));
    assert_eq!(run_strict(build).error_code(), Some("E6004"));
}

#[test]
fn property_access_on_nullish_values() {
    let read = run(|b| {
        let undef = b.undefined();
        let decl = b.const_("u", undef);
        let u = b.ident("u");
        let x = b.member(u, "x");
        let stmt = b.expr_stmt(x);
        vec![decl, stmt]
    });
    assert_eq!(read.error_code(), Some("E6006"));
    assert_eq!(
        read.error_message().as_deref(),
        Some("cannot read properties of undefined (property 'x')")
    );

    let write = run(|b| {
        let null = b.null();
        let target = b.member(null, "x");
        let one = b.num(1.0);
        let assign = b.assign(target, one);
        let stmt = b.expr_stmt(assign);
        vec![stmt]
    });
    assert_eq!(
        write.error_message().as_deref(),
        Some("cannot set properties of null (property 'x')")
    );
}

#[test]
fn runaway_recursion_overflows_the_call_stack() {
    let out = run_configured(
        |b| b.max_call_depth(50),
        |b| {
            let call = b.call_named("spin", vec![]);
            let ret = b.ret(call);
            let decl = b.function_decl("spin", vec![], vec![ret]);
            let call = b.call_named("spin", vec![]);
            let stmt = b.expr_stmt(call);
            vec![decl, stmt]
        },
    );
    assert_eq!(out.error_code(), Some("E6007"));
    let backtrace = out.error().map(|e| e.backtrace.clone()).unwrap_or_default();
    assert_eq!(backtrace.len(), 50);
    assert!(backtrace.iter().all(|f| f.function.as_deref() == Some("spin")));
}

#[test]
fn deep_recursion_within_the_limit_succeeds() {
    let out = run(|b| {
        // function depth(n) { return n === 0 ? 0 : 1 + depth(n - 1); }
        let n = b.param("n");
        let n_ref = b.ident("n");
        let zero = b.num(0.0);
        let test = b.binary(BinaryOp::StrictEq, n_ref, zero);
        let base = b.num(0.0);
        let n_ref = b.ident("n");
        let one = b.num(1.0);
        let next = b.binary(BinaryOp::Sub, n_ref, one);
        let recurse = b.call_named("depth", vec![next]);
        let one = b.num(1.0);
        let step = b.binary(BinaryOp::Add, one, recurse);
        let body = b.conditional(test, base, step);
        let ret = b.ret(body);
        let decl = b.function_decl("depth", vec![n], vec![ret]);
        let start = b.num(5000.0);
        let call = b.call_named("depth", vec![start]);
        let stmt = b.expr_stmt(call);
        vec![decl, stmt]
    });
    assert_eq!(out.value(), Value::number(5000));
}

#[test]
fn errors_carry_a_backtrace_innermost_first() {
    let out = run(|b| {
        let missing = b.ident("missing");
        let ret = b.ret(missing);
        let inner = b.function_decl("inner", vec![], vec![ret]);
        let call = b.call_named("inner", vec![]);
        let ret = b.ret(call);
        let outer = b.function_decl("outer", vec![], vec![ret]);
        let call = b.call_named("outer", vec![]);
        let stmt = b.expr_stmt(call);
        vec![inner, outer, stmt]
    });
    let frames: Vec<String> = out
        .error()
        .map(|e| e.backtrace.iter().map(ToString::to_string).collect())
        .unwrap_or_default();
    assert_eq!(frames, vec!["at inner", "at outer"]);
}

#[test]
fn literal_is_not_an_assignment_target() {
    let out = run(|b| {
        let one = b.num(1.0);
        let two = b.num(2.0);
        let assign = b.assign(one, two);
        let stmt = b.expr_stmt(assign);
        vec![stmt]
    });
    assert_eq!(out.error_code(), Some("E6008"));
}

#[test]
fn detached_array_method_rejects_receiver() {
    let out = run(|b| {
        let arr = b.array(vec![]);
        let push = b.member(arr, "push");
        let decl = b.const_("push", push);
        let one = b.num(1.0);
        let call = b.call_named("push", vec![one]);
        let stmt = b.expr_stmt(call);
        vec![decl, stmt]
    });
    assert_eq!(out.error_code(), Some("E6009"));
    assert_eq!(
        out.error_message().as_deref(),
        Some("push called on incompatible receiver undefined")
    );
}

#[test]
fn comparator_errors_abort_the_sort() {
    let out = run(|b| {
        let two = b.num(2.0);
        let one = b.num(1.0);
        let arr = b.array(vec![two, one]);
        let decl = b.const_("arr", arr);
        let nope = b.ident("nope");
        let cmp = b.arrow_expr(vec![], nope);
        let arr_ref = b.ident("arr");
        let sort = b.method_call(arr_ref, "sort", vec![cmp]);
        let stmt = b.expr_stmt(sort);
        vec![decl, stmt]
    });
    assert_eq!(out.error_code(), Some("E6004"));
    // The array is left as it was.
    let arr = out.interp.lookup_variable("arr").and_then(|v| v.as_list());
    assert_eq!(arr, Some(vec![Value::number(2), Value::number(1)]));
}

#[test]
fn far_index_write_is_an_invalid_length() {
    let out = run(|b| {
        let arr = b.array(vec![]);
        let decl = b.const_("arr", arr);
        let arr_ref = b.ident("arr");
        let far = b.num(4_294_967_294.0);
        let target = b.index(arr_ref, far);
        let one = b.num(1.0);
        let assign = b.assign(target, one);
        let stmt = b.expr_stmt(assign);
        vec![decl, stmt]
    });
    assert_eq!(out.error_code(), Some("E6010"));
    assert_eq!(
        out.error_message().as_deref(),
        Some("invalid array length 4294967295 (limit 16777216)")
    );
    let arr = out.interp.lookup_variable("arr").and_then(|v| v.as_list());
    assert_eq!(arr, Some(vec![]));
}

/// `const arr = [1]; arr.length = <length>;`
fn assign_length(length: f64) -> impl FnOnce(&mut ProgramBuilder) -> Vec<StmtId> {
    move |b| {
        let one = b.num(1.0);
        let arr = b.array(vec![one]);
        let decl = b.const_("arr", arr);
        let arr_ref = b.ident("arr");
        let target = b.member(arr_ref, "length");
        let length = b.num(length);
        let assign = b.assign(target, length);
        let stmt = b.expr_stmt(assign);
        vec![decl, stmt]
    }
}

#[test]
fn oversized_length_assignment_is_an_invalid_length() {
    let huge = run(assign_length(4e9));
    assert_eq!(huge.error_code(), Some("E6010"));
    assert_eq!(
        huge.error_message().as_deref(),
        Some("invalid array length 4000000000 (limit 16777216)")
    );
    let arr = huge.interp.lookup_variable("arr").and_then(|v| v.as_list());
    assert_eq!(arr, Some(vec![Value::number(1)]));

    assert_eq!(run(assign_length(-1.0)).error_code(), Some("E6010"));

    let truncate = run(assign_length(0.0));
    assert!(truncate.result.is_ok());
    let arr = truncate.interp.lookup_variable("arr").and_then(|v| v.as_list());
    assert_eq!(arr, Some(vec![]));
}
