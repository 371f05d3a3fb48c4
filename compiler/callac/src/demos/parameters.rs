//! Default and rest parameters, and the `arguments` object.

use calla_ir::{ProgramBuilder, StmtId, TemplatePart};

/// ```text
/// function greetingTwo(salutation = "Hello", name = "sir") {
///   return `${salutation}, ${name}`;
/// }
/// console.log(greetingTwo());
/// console.log(greetingTwo(undefined, "Estelle"));
/// console.log(greetingTwo(null, "Estelle"));
/// ```
pub(super) fn defaults(b: &mut ProgramBuilder) -> Vec<StmtId> {
    let hello = b.str("Hello");
    let salutation = b.param_default("salutation", hello);
    let sir = b.str("sir");
    let name = b.param_default("name", sir);
    let salutation_ref = b.ident("salutation");
    let name_ref = b.ident("name");
    let parts = vec![
        TemplatePart::Expr(salutation_ref),
        b.text(", "),
        TemplatePart::Expr(name_ref),
    ];
    let greeting = b.template(parts);
    let ret = b.ret(greeting);
    let decl = b.function_decl("greetingTwo", vec![salutation, name], vec![ret]);

    let no_args = b.call_named("greetingTwo", vec![]);
    let log_defaults = b.log(vec![no_args]);

    let undef = b.undefined();
    let estelle = b.str("Estelle");
    let with_undefined = b.call_named("greetingTwo", vec![undef, estelle]);
    let log_undefined = b.log(vec![with_undefined]);

    let null = b.null();
    let estelle = b.str("Estelle");
    let with_null = b.call_named("greetingTwo", vec![null, estelle]);
    let log_null = b.log(vec![with_null]);
    vec![decl, log_defaults, log_undefined, log_null]
}

/// ```text
/// function multiply(first, ...rest) {
///   console.log(first);
///   console.log(rest);
/// }
/// multiply(1, 2, 3, 4, 5);
/// multiply(6);
/// ```
pub(super) fn rest(b: &mut ProgramBuilder) -> Vec<StmtId> {
    let first = b.param("first");
    let rest = b.rest("rest");
    let first_ref = b.ident("first");
    let log_first = b.log(vec![first_ref]);
    let rest_ref = b.ident("rest");
    let log_rest = b.log(vec![rest_ref]);
    let decl = b.function_decl("multiply", vec![first, rest], vec![log_first, log_rest]);

    let args = [1.0, 2.0, 3.0, 4.0, 5.0]
        .into_iter()
        .map(|n| b.num(n))
        .collect();
    let call = b.call_named("multiply", args);
    let many = b.expr_stmt(call);

    let six = b.num(6.0);
    let call = b.call_named("multiply", vec![six]);
    let single = b.expr_stmt(call);
    vec![decl, many, single]
}

/// ```text
/// function logArguments(a) {
///   console.log(a, arguments.length);
///   console.log(arguments);
///   console.log(arguments[2]);
/// }
/// logArguments("x", "y", "z");
/// ```
pub(super) fn arguments(b: &mut ProgramBuilder) -> Vec<StmtId> {
    let a = b.param("a");
    let a_ref = b.ident("a");
    let args_ref = b.ident("arguments");
    let length = b.member(args_ref, "length");
    let log_length = b.log(vec![a_ref, length]);
    let args_ref = b.ident("arguments");
    let log_all = b.log(vec![args_ref]);
    let args_ref = b.ident("arguments");
    let two = b.num(2.0);
    let third = b.index(args_ref, two);
    let log_third = b.log(vec![third]);
    let decl = b.function_decl("logArguments", vec![a], vec![log_length, log_all, log_third]);

    let x = b.str("x");
    let y = b.str("y");
    let z = b.str("z");
    let call = b.call_named("logArguments", vec![x, y, z]);
    let stmt = b.expr_stmt(call);
    vec![decl, stmt]
}
