use calla_ir::{BinaryOp, ProgramBuilder, SharedInterner, StmtId, UnaryOp};
use pretty_assertions::assert_eq;

use super::{run, run_strict};
use crate::{buffer_handler, CallForm, InterpreterBuilder, ObjectValue, Value};

/// `const name = { name: label, say: function () { return this.name; } };`
fn speaker(b: &mut ProgramBuilder, binding: &str, label: &str) -> StmtId {
    let this = b.this();
    let name = b.member(this, "name");
    let ret = b.ret(name);
    let say = b.function_expr(None, vec![], vec![ret]);
    let label = b.str(label);
    let obj = b.object(vec![("name", label), ("say", say)]);
    b.const_(binding, obj)
}

#[test]
fn method_receiver_is_the_container() {
    let out = run(|b| {
        let this = b.this();
        let ret = b.ret(this);
        let who = b.function_expr(None, vec![], vec![ret]);
        let obj = b.object(vec![("whoAmI", who)]);
        let decl = b.const_("person", obj);

        let person = b.ident("person");
        let call = b.method_call(person, "whoAmI", vec![]);
        let person = b.ident("person");
        let same = b.binary(BinaryOp::StrictEq, call, person);
        let stmt = b.expr_stmt(same);
        vec![decl, stmt]
    });
    assert_eq!(out.value(), Value::Bool(true));
}

#[test]
fn receiver_is_bound_late() {
    let out = run(|b| {
        let a = speaker(b, "a", "A");
        let label = b.str("B");
        let obj = b.object(vec![("name", label)]);
        let other = b.const_("b", obj);

        // b.say = a.say
        let target_obj = b.ident("b");
        let target = b.member(target_obj, "say");
        let source_obj = b.ident("a");
        let source = b.member(source_obj, "say");
        let assign = b.assign(target, source);
        let borrow = b.expr_stmt(assign);

        let a_ref = b.ident("a");
        let call_a = b.method_call(a_ref, "say", vec![]);
        let b_ref = b.ident("b");
        let call_b = b.method_call(b_ref, "say", vec![]);
        let log = b.log(vec![call_a, call_b]);
        vec![a, other, borrow, log]
    });
    assert_eq!(out.output, vec!["A B"]);
}

#[test]
fn computed_member_call_is_method_style() {
    let out = run(|b| {
        let a = speaker(b, "a", "A");
        let a_ref = b.ident("a");
        let key = b.str("say");
        let callee = b.index(a_ref, key);
        let call = b.call(callee, vec![]);
        let stmt = b.expr_stmt(call);
        vec![a, stmt]
    });
    assert_eq!(out.value(), Value::string("A"));
}

#[test]
fn plain_call_receives_global_object_in_sloppy_mode() {
    let build = |b: &mut ProgramBuilder| {
        let this = b.this();
        let ret = b.ret(this);
        let decl = b.function_decl("f", vec![], vec![ret]);
        let call = b.call_named("f", vec![]);
        let global = b.ident("globalThis");
        let same = b.binary(BinaryOp::StrictEq, call, global);
        let stmt = b.expr_stmt(same);
        vec![decl, stmt]
    };
    assert_eq!(run(build).value(), Value::Bool(true));
    assert_eq!(run_strict(build).value(), Value::Bool(false));
}

#[test]
fn plain_call_receives_undefined_in_strict_mode() {
    let out = run_strict(|b| {
        let this = b.this();
        let ty = b.unary(UnaryOp::Typeof, this);
        let ret = b.ret(ty);
        let decl = b.function_decl("f", vec![], vec![ret]);
        let call = b.call_named("f", vec![]);
        let stmt = b.expr_stmt(call);
        vec![decl, stmt]
    });
    assert_eq!(out.value(), Value::string("undefined"));
}

#[test]
fn detached_method_loses_its_container() {
    let build = |b: &mut ProgramBuilder| {
        let a = speaker(b, "a", "A");
        let a_ref = b.ident("a");
        let method = b.member(a_ref, "say");
        let detached = b.const_("say", method);
        let call = b.call_named("say", vec![]);
        let stmt = b.expr_stmt(call);
        vec![a, detached, stmt]
    };
    // Sloppy: `this` is the global object, which has no `name`.
    let sloppy = run(build);
    assert!(sloppy.result.is_ok());
    assert!(sloppy.value().is_undefined());

    let strict = run_strict(build);
    assert_eq!(strict.error_code(), Some("E6006"));
    assert_eq!(
        strict.error_message().as_deref(),
        Some("cannot read properties of undefined (property 'name')")
    );
}

#[test]
fn arrow_keeps_receiver_of_enclosing_invocation() {
    let out = run_strict(|b| {
        // const obj = { name: "Obj", make: function () { return () => this.name; } };
        let this = b.this();
        let name = b.member(this, "name");
        let arrow = b.arrow_expr(vec![], name);
        let ret = b.ret(arrow);
        let make = b.function_expr(None, vec![], vec![ret]);
        let label = b.str("Obj");
        let obj = b.object(vec![("name", label), ("make", make)]);
        let decl = b.const_("obj", obj);

        let obj_ref = b.ident("obj");
        let made = b.method_call(obj_ref, "make", vec![]);
        let arrow_decl = b.const_("arrow", made);

        // Standalone, and as a method of a different object.
        let standalone = b.call_named("arrow", vec![]);
        let label = b.str("Other");
        let arrow_ref = b.ident("arrow");
        let other = b.object(vec![("name", label), ("arrow", arrow_ref)]);
        let other_decl = b.const_("other", other);
        let other_ref = b.ident("other");
        let as_method = b.method_call(other_ref, "arrow", vec![]);
        let log = b.log(vec![standalone, as_method]);
        vec![decl, arrow_decl, other_decl, log]
    });
    assert!(out.result.is_ok(), "{:?}", out.result);
    assert_eq!(out.output, vec!["Obj Obj"]);
}

#[test]
fn top_level_arrow_captures_global_object_in_both_modes() {
    let build = |b: &mut ProgramBuilder| {
        let this = b.this();
        let arrow = b.arrow_expr(vec![], this);
        let call = b.call(arrow, vec![]);
        let global = b.ident("globalThis");
        let same = b.binary(BinaryOp::StrictEq, call, global);
        let stmt = b.expr_stmt(same);
        vec![stmt]
    };
    assert_eq!(run(build).value(), Value::Bool(true));
    assert_eq!(run_strict(build).value(), Value::Bool(true));
}

#[test]
fn callbacks_are_plain_calls() {
    let build = |b: &mut ProgramBuilder| {
        let this = b.this();
        let ty = b.unary(UnaryOp::Typeof, this);
        let log = b.log(vec![ty]);
        let callback = b.function_expr(None, vec![], vec![log]);
        let one = b.num(1.0);
        let arr = b.array(vec![one]);
        let call = b.method_call(arr, "forEach", vec![callback]);
        let stmt = b.expr_stmt(call);
        vec![stmt]
    };
    assert_eq!(run(build).output, vec!["object"]);
    assert_eq!(run_strict(build).output, vec!["undefined"]);
}

#[test]
fn host_call_threads_explicit_receiver() {
    let interner = SharedInterner::new();
    let mut b = ProgramBuilder::new(interner.clone());
    let this = b.this();
    let ret = b.ret(this);
    let decl = b.function_decl("getThis", vec![], vec![ret]);
    let program = b.finish(vec![decl]);

    let mut interp = InterpreterBuilder::new(interner)
        .print_handler(buffer_handler())
        .build();
    assert!(interp.run(&program).is_ok());
    let get_this = interp.lookup_variable("getThis").unwrap_or_default();

    let container = Value::Object(ObjectValue::new());
    let as_method = interp.call(&get_this, CallForm::Method(container.clone()), vec![]);
    assert_eq!(as_method.ok(), Some(container));

    let global = Value::Object(interp.global().clone());
    let plain = interp.call(&get_this, CallForm::Plain, vec![]);
    assert_eq!(plain.ok(), Some(global));
}
