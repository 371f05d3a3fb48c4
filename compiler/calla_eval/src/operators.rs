//! Unary and binary operator implementations.
//!
//! Operators never fail: mismatched operands convert (to string for `+`
//! with a non-numeric side, to number otherwise), so dispatch is a plain
//! match over the fixed operator set.

use std::cmp::Ordering;

use calla_ir::{BinaryOp, StringInterner, UnaryOp};

use crate::format::to_js_string;
use crate::Value;

/// Evaluate a binary operation on two already-evaluated operands.
pub fn evaluate_binary(
    op: BinaryOp,
    left: &Value,
    right: &Value,
    interner: &StringInterner,
) -> Value {
    match op {
        BinaryOp::Add => add(left, right, interner),
        BinaryOp::Sub => Value::Number(to_number(left, interner) - to_number(right, interner)),
        BinaryOp::Mul => Value::Number(to_number(left, interner) * to_number(right, interner)),
        BinaryOp::Div => Value::Number(to_number(left, interner) / to_number(right, interner)),
        // f64 `%` truncates toward zero and keeps the dividend's sign.
        BinaryOp::Rem => Value::Number(to_number(left, interner) % to_number(right, interner)),
        BinaryOp::StrictEq => Value::Bool(left.strict_equals(right)),
        BinaryOp::StrictNotEq => Value::Bool(!left.strict_equals(right)),
        BinaryOp::Lt => compare(left, right, interner, Ordering::is_lt),
        BinaryOp::LtEq => compare(left, right, interner, Ordering::is_le),
        BinaryOp::Gt => compare(left, right, interner, Ordering::is_gt),
        BinaryOp::GtEq => compare(left, right, interner, Ordering::is_ge),
    }
}

/// Evaluate a unary operation. `typeof` of an undeclared name is handled by
/// the interpreter before the operand is evaluated.
pub fn evaluate_unary(op: UnaryOp, operand: &Value, interner: &StringInterner) -> Value {
    match op {
        UnaryOp::Plus => Value::Number(to_number(operand, interner)),
        UnaryOp::Neg => Value::Number(-to_number(operand, interner)),
        UnaryOp::Not => Value::Bool(!operand.is_truthy()),
        UnaryOp::Typeof => Value::string(operand.type_of()),
    }
}

/// `+`: string concatenation when either side is a string or converts to
/// one, numeric addition otherwise.
fn add(left: &Value, right: &Value, interner: &StringInterner) -> Value {
    if converts_to_string(left) || converts_to_string(right) {
        let mut out = to_js_string(left, interner);
        out.push_str(&to_js_string(right, interner));
        return Value::string(&out);
    }
    Value::Number(to_number(left, interner) + to_number(right, interner))
}

/// Strings and reference types: their primitive form is a string.
fn converts_to_string(value: &Value) -> bool {
    matches!(value, Value::Str(_)) || value.is_composite()
}

/// Relational comparison. Two string-like operands compare by code unit,
/// anything else numerically; a `NaN` side makes every comparison false.
fn compare(
    left: &Value,
    right: &Value,
    interner: &StringInterner,
    accept: fn(Ordering) -> bool,
) -> Value {
    let ordering = if converts_to_string(left) && converts_to_string(right) {
        let l = to_js_string(left, interner);
        let r = to_js_string(right, interner);
        Some(l.encode_utf16().cmp(r.encode_utf16()))
    } else {
        to_number(left, interner).partial_cmp(&to_number(right, interner))
    };
    Value::Bool(ordering.is_some_and(accept))
}

/// Numeric conversion (`Number(value)`).
pub fn to_number(value: &Value, interner: &StringInterner) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => *n,
        Value::Str(s) => string_to_number(s),
        Value::Array(_) => string_to_number(&to_js_string(value, interner)),
        Value::Arguments(_) | Value::Object(_) | Value::Function(_) | Value::Native(_) => f64::NAN,
    }
}

/// String to number: surrounding whitespace is ignored, the empty string is
/// `0`, and anything that isn't a complete numeric literal is `NaN`.
fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        #[allow(
            clippy::cast_precision_loss,
            reason = "hex literals above 2^53 round like Number()"
        )]
        let value = u64::from_str_radix(hex, 16).map_or(f64::NAN, |n| n as f64);
        return value;
    }
    // Rust's float parser also accepts `inf` and `nan`, which are not
    // numeric literals here.
    let is_decimal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !is_decimal {
        return f64::NAN;
    }
    trimmed.parse().unwrap_or(f64::NAN)
}
