//! Textual rendering of values.
//!
//! Two renderings exist:
//! - [`to_js_string`]: the language-level string conversion used by `+`,
//!   template strings and `join`.
//! - [`inspect`]: the `console.log` form, modeled on Node's inspector
//!   (`[ 1, 2 ]`, `{ name: 'Ada' }`, `[Function: hello]`).

use calla_ir::{Name, StringInterner};

use crate::Value;

/// Objects nested deeper than this print as `[Object]` / `[Array]`.
const MAX_INSPECT_DEPTH: usize = 2;

/// Number to string, following the JavaScript `Number::toString` rules.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n == 0.0 {
        return "0".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{n}");
    }
    // Exponent form: Rust writes `1e21`, JavaScript writes `1e+21`.
    let formatted = format!("{n:e}");
    match formatted.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => formatted,
    }
}

/// Language-level string conversion (`String(value)`).
pub fn to_js_string(value: &Value, interner: &StringInterner) -> String {
    let mut seen = Vec::new();
    to_js_string_inner(value, interner, &mut seen)
}

fn to_js_string_inner(value: &Value, interner: &StringInterner, seen: &mut Vec<usize>) -> String {
    match value {
        Value::Undefined => "undefined".to_owned(),
        Value::Null => "null".to_owned(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(*n),
        Value::Str(s) => s.to_string(),
        Value::Array(items) => {
            // A cyclic array joins to the empty string at the cycle.
            if seen.contains(&items.addr()) {
                return String::new();
            }
            seen.push(items.addr());
            let snapshot = items.borrow().clone();
            let joined = snapshot
                .iter()
                .map(|item| {
                    if item.is_nullish() {
                        String::new()
                    } else {
                        to_js_string_inner(item, interner, seen)
                    }
                })
                .collect::<Vec<_>>()
                .join(",");
            seen.pop();
            joined
        }
        Value::Arguments(_) => "[object Arguments]".to_owned(),
        Value::Object(_) => "[object Object]".to_owned(),
        Value::Function(f) => {
            if f.is_arrow() {
                "() => { [code] }".to_owned()
            } else {
                let name = f.name().map_or("", |n| interner.lookup(n));
                format!("function {name}() {{ [code] }}")
            }
        }
        Value::Native(n) => format!("function {}() {{ [native code] }}", n.name),
    }
}

/// `console.log` arguments: top-level strings print raw, everything else is
/// inspected; arguments are separated by one space.
pub fn display_args(args: &[Value], interner: &StringInterner) -> String {
    args.iter()
        .map(|arg| match arg {
            Value::Str(s) => s.to_string(),
            other => inspect(other, interner),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Inspector rendering of a single value.
pub fn inspect(value: &Value, interner: &StringInterner) -> String {
    Inspector {
        interner,
        seen: Vec::new(),
    }
    .render(value, 0)
}

struct Inspector<'a> {
    interner: &'a StringInterner,
    /// Addresses of the containers currently being rendered.
    seen: Vec<usize>,
}

impl Inspector<'_> {
    fn render(&mut self, value: &Value, depth: usize) -> String {
        match value {
            Value::Str(s) => quote(s),
            Value::Number(n) if *n == 0.0 && n.is_sign_negative() => "-0".to_owned(),
            Value::Undefined | Value::Null | Value::Bool(_) | Value::Number(_) => {
                to_js_string(value, self.interner)
            }
            Value::Function(f) => match f.name() {
                Some(name) if name != Name::EMPTY => {
                    format!("[Function: {}]", self.interner.lookup(name))
                }
                _ => "[Function (anonymous)]".to_owned(),
            },
            Value::Native(n) => format!("[Function: {}]", n.name),
            Value::Array(items) => self.render_list("", items.addr(), &items.borrow(), depth),
            Value::Arguments(items) => {
                self.render_list("[Arguments] ", items.addr(), &items.borrow(), depth)
            }
            Value::Object(obj) => {
                let class = obj.class_name().map(|n| self.interner.lookup(n));
                let addr = obj.addr();
                if self.seen.contains(&addr) {
                    return "[Circular]".to_owned();
                }
                let prefix = class.map(|c| format!("{c} ")).unwrap_or_default();
                let entries = obj.entries();
                if entries.is_empty() {
                    return format!("{prefix}{{}}");
                }
                if depth > MAX_INSPECT_DEPTH {
                    return format!("[{}]", class.unwrap_or("Object"));
                }
                self.seen.push(addr);
                let body = entries
                    .iter()
                    .map(|(key, v)| {
                        format!(
                            "{}: {}",
                            format_key(self.interner.lookup(*key)),
                            self.render(v, depth + 1)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                self.seen.pop();
                format!("{prefix}{{ {body} }}")
            }
        }
    }

    fn render_list(&mut self, prefix: &str, addr: usize, items: &[Value], depth: usize) -> String {
        if self.seen.contains(&addr) {
            return "[Circular]".to_owned();
        }
        if items.is_empty() {
            return format!("{prefix}[]");
        }
        if depth > MAX_INSPECT_DEPTH {
            return "[Array]".to_owned();
        }
        self.seen.push(addr);
        let body = items
            .iter()
            .map(|item| self.render(item, depth + 1))
            .collect::<Vec<_>>()
            .join(", ");
        self.seen.pop();
        format!("{prefix}[ {body} ]")
    }
}

/// Quote a nested string: single quotes unless the text contains one and no
/// double quote.
fn quote(s: &str) -> String {
    let delim = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(delim);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c if c == delim => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(delim);
    out
}

/// Property keys print bare when they are valid identifiers.
fn format_key(key: &str) -> String {
    let mut chars = key.chars();
    let is_ident = chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$');
    if is_ident {
        key.to_owned()
    } else {
        quote(key)
    }
}
