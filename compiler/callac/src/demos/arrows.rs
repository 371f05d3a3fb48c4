//! Arrow functions.

use calla_ir::{BinaryOp, ProgramBuilder, StmtId};

/// ```text
/// var values = [0, 3, 2, 5, 7, 4, 8, 1];
/// console.log(values);
/// values.sort((value1, value2) => value1 - value2);
/// console.log(values);
/// ```
pub(super) fn sort(b: &mut ProgramBuilder) -> Vec<StmtId> {
    let items = [0.0, 3.0, 2.0, 5.0, 7.0, 4.0, 8.0, 1.0]
        .into_iter()
        .map(|n| b.num(n))
        .collect();
    let values = b.array(items);
    let decl = b.var("values", values);
    let values_ref = b.ident("values");
    let log_before = b.log(vec![values_ref]);

    let first = b.param("value1");
    let second = b.param("value2");
    let v1 = b.ident("value1");
    let v2 = b.ident("value2");
    let diff = b.binary(BinaryOp::Sub, v1, v2);
    let comparator = b.arrow_expr(vec![first, second], diff);
    let values_ref = b.ident("values");
    let sort = b.method_call(values_ref, "sort", vec![comparator]);
    let sort = b.expr_stmt(sort);

    let values_ref = b.ident("values");
    let log_after = b.log(vec![values_ref]);
    vec![decl, log_before, sort, log_after]
}

/// ```text
/// const counter = {
///   label: "counter",
///   reader: function () { return () => this.label; },
/// };
/// const read = counter.reader();
/// console.log(read());
/// const other = { label: "other", read };
/// console.log(other.read());
/// ```
pub(super) fn arrow_this(b: &mut ProgramBuilder) -> Vec<StmtId> {
    let this = b.this();
    let label = b.member(this, "label");
    let arrow = b.arrow_expr(vec![], label);
    let ret = b.ret(arrow);
    let reader = b.function_expr(None, vec![], vec![ret]);
    let name = b.str("counter");
    let counter = b.object(vec![("label", name), ("reader", reader)]);
    let counter = b.const_("counter", counter);

    let counter_ref = b.ident("counter");
    let made = b.method_call(counter_ref, "reader", vec![]);
    let read = b.const_("read", made);
    let call = b.call_named("read", vec![]);
    let log_standalone = b.log(vec![call]);

    let name = b.str("other");
    let read_ref = b.ident("read");
    let other = b.object(vec![("label", name), ("read", read_ref)]);
    let other = b.const_("other", other);
    let other_ref = b.ident("other");
    let call = b.method_call(other_ref, "read", vec![]);
    let log_method = b.log(vec![call]);
    vec![counter, read, log_standalone, other, log_method]
}
