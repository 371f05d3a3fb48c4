//! Built-in functions: the global object, `console.log` and the array
//! methods.
//!
//! Built-ins are plain `fn` pointers ([`NativeFn`](crate::NativeFn)). They
//! receive their receiver explicitly and are never constructible.

use std::cmp::Ordering;

use crate::errors::{incompatible_receiver, not_callable, ControlAction, EvalResult};
use crate::format::{display_args, inspect, to_js_string};
use crate::interpreter::{CallForm, WellKnownNames};
use crate::operators::to_number;
use crate::value::{NativeFunction, ObjectValue, Shared};
use crate::{Interpreter, Value};

const CONSOLE_LOG: NativeFunction = NativeFunction::new("log", console_log);

const ARRAY_METHODS: &[NativeFunction] = &[
    NativeFunction::new("push", array_push),
    NativeFunction::new("pop", array_pop),
    NativeFunction::new("join", array_join),
    NativeFunction::new("map", array_map),
    NativeFunction::new("forEach", array_for_each),
    NativeFunction::new("sort", array_sort),
];

/// Build the global object: `console` and a `globalThis` self-reference.
pub(crate) fn create_global(names: &WellKnownNames) -> ObjectValue {
    let console = ObjectValue::new();
    console.set(names.log, Value::Native(CONSOLE_LOG));

    let global = ObjectValue::new();
    global.set(names.console, Value::Object(console));
    global.set(names.global_this, Value::Object(global.clone()));
    global
}

/// Array method by property name.
pub(crate) fn array_method(name: &str) -> Option<NativeFunction> {
    ARRAY_METHODS.iter().find(|m| m.name == name).copied()
}

fn console_log(interp: &mut Interpreter, _this: &Value, args: &[Value]) -> EvalResult {
    let line = display_args(args, interp.interner());
    interp.print_handler().println(&line);
    Ok(Value::Undefined)
}

/// The receiver's element storage, or `IncompatibleReceiver`.
fn receiver_items(method: &'static str, this: &Value) -> Result<Shared<Vec<Value>>, ControlAction> {
    match this {
        Value::Array(items) => Ok(items.clone()),
        other => Err(incompatible_receiver(method, other).into()),
    }
}

/// The callback argument of `map`/`forEach`/`sort`.
fn callback_arg(interp: &Interpreter, args: &[Value]) -> Result<Value, ControlAction> {
    let callback = args.first().cloned().unwrap_or_default();
    if callback.is_callable() {
        Ok(callback)
    } else {
        Err(not_callable(inspect(&callback, interp.interner())).into())
    }
}

fn array_push(_interp: &mut Interpreter, this: &Value, args: &[Value]) -> EvalResult {
    let items = receiver_items("push", this)?;
    let mut items = items.borrow_mut();
    items.extend_from_slice(args);
    Ok(Value::from_len(items.len()))
}

fn array_pop(_interp: &mut Interpreter, this: &Value, _args: &[Value]) -> EvalResult {
    let items = receiver_items("pop", this)?;
    let popped = items.borrow_mut().pop();
    Ok(popped.unwrap_or_default())
}

fn array_join(interp: &mut Interpreter, this: &Value, args: &[Value]) -> EvalResult {
    let items = receiver_items("join", this)?;
    let separator = match args.first() {
        None | Some(Value::Undefined) => ",".to_owned(),
        Some(sep) => to_js_string(sep, interp.interner()),
    };
    let snapshot = items.borrow().clone();
    let joined = snapshot
        .iter()
        .map(|item| {
            if item.is_nullish() {
                String::new()
            } else {
                to_js_string(item, interp.interner())
            }
        })
        .collect::<Vec<_>>()
        .join(&separator);
    Ok(Value::string(&joined))
}

fn array_map(interp: &mut Interpreter, this: &Value, args: &[Value]) -> EvalResult {
    let items = receiver_items("map", this)?;
    let callback = callback_arg(interp, args)?;
    // Callbacks may mutate the array; iterate over the elements present at
    // the start.
    let snapshot = items.borrow().clone();
    let mut mapped = Vec::with_capacity(snapshot.len());
    for (index, item) in snapshot.into_iter().enumerate() {
        let args = vec![item, Value::from_len(index), this.clone()];
        mapped.push(interp.call_function(&callback, CallForm::Plain, args)?);
    }
    Ok(Value::array(mapped))
}

fn array_for_each(interp: &mut Interpreter, this: &Value, args: &[Value]) -> EvalResult {
    let items = receiver_items("forEach", this)?;
    let callback = callback_arg(interp, args)?;
    let snapshot = items.borrow().clone();
    for (index, item) in snapshot.into_iter().enumerate() {
        let args = vec![item, Value::from_len(index), this.clone()];
        interp.call_function(&callback, CallForm::Plain, args)?;
    }
    Ok(Value::Undefined)
}

/// In-place stable sort. `undefined` elements always go last; the
/// comparator never sees them.
fn array_sort(interp: &mut Interpreter, this: &Value, args: &[Value]) -> EvalResult {
    let items = receiver_items("sort", this)?;
    let comparator = match args.first() {
        None | Some(Value::Undefined) => None,
        Some(_) => Some(callback_arg(interp, args)?),
    };
    let snapshot = items.borrow().clone();

    let mut compare = |a: &Value, b: &Value| -> Result<Ordering, ControlAction> {
        match (a.is_undefined(), b.is_undefined()) {
            (true, true) => return Ok(Ordering::Equal),
            (true, false) => return Ok(Ordering::Greater),
            (false, true) => return Ok(Ordering::Less),
            (false, false) => {}
        }
        match &comparator {
            Some(f) => {
                let result =
                    interp.call_function(f, CallForm::Plain, vec![a.clone(), b.clone()])?;
                let n = to_number(&result, interp.interner());
                // NaN compares equal.
                Ok(n.partial_cmp(&0.0).unwrap_or(Ordering::Equal))
            }
            None => {
                let a = to_js_string(a, interp.interner());
                let b = to_js_string(b, interp.interner());
                Ok(a.encode_utf16().cmp(b.encode_utf16()))
            }
        }
    };
    let sorted = merge_sort(snapshot, &mut compare)?;
    *items.borrow_mut() = sorted;
    Ok(this.clone())
}

/// Stable merge sort with a fallible comparator. The first comparator
/// error aborts the sort and leaves the input untouched.
fn merge_sort<F>(mut items: Vec<Value>, compare: &mut F) -> Result<Vec<Value>, ControlAction>
where
    F: FnMut(&Value, &Value) -> Result<Ordering, ControlAction>,
{
    if items.len() <= 1 {
        return Ok(items);
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, compare)?;
    let right = merge_sort(right, compare)?;

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        // Ties take from the left run.
        if compare(r, l)?.is_lt() {
            merged.extend(right.next());
        } else {
            merged.extend(left.next());
        }
    }
    merged.extend(left);
    merged.extend(right);
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn numbers(values: &[f64]) -> Vec<Value> {
        values.iter().copied().map(Value::from).collect()
    }

    #[test]
    fn array_methods_are_found_by_name() {
        assert_eq!(array_method("sort").map(|m| m.name), Some("sort"));
        assert_eq!(array_method("forEach").map(|m| m.name), Some("forEach"));
        assert!(array_method("reduce").is_none());
    }

    #[test]
    fn merge_sort_orders_numbers() {
        let mut compare = |a: &Value, b: &Value| -> Result<Ordering, ControlAction> {
            let (a, b) = (a.as_number().unwrap_or(0.0), b.as_number().unwrap_or(0.0));
            Ok(a.partial_cmp(&b).unwrap_or(Ordering::Equal))
        };
        let sorted = merge_sort(numbers(&[0.0, 3.0, 2.0, 5.0, 7.0, 4.0, 8.0, 1.0]), &mut compare);
        assert_eq!(
            sorted.ok(),
            Some(numbers(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 7.0, 8.0]))
        );
    }

    #[test]
    fn merge_sort_is_stable() {
        // Sort pairs by their first element only; second records input order.
        let pairs: Vec<Value> = [(1.0, 0.0), (0.0, 1.0), (1.0, 2.0), (0.0, 3.0)]
            .iter()
            .map(|&(k, i)| Value::array(vec![Value::Number(k), Value::Number(i)]))
            .collect();
        let key = |v: &Value| {
            v.as_list()
                .and_then(|l| l.first().and_then(Value::as_number))
                .unwrap_or(0.0)
        };
        let mut compare = |a: &Value, b: &Value| -> Result<Ordering, ControlAction> {
            Ok(key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal))
        };
        let sorted = merge_sort(pairs, &mut compare).ok().unwrap_or_default();
        let order: Vec<f64> = sorted
            .iter()
            .filter_map(|v| v.as_list().and_then(|l| l.get(1).and_then(Value::as_number)))
            .collect();
        assert_eq!(order, vec![1.0, 3.0, 0.0, 2.0]);
    }

    #[test]
    fn merge_sort_propagates_comparator_error() {
        let mut calls = 0;
        let mut compare = |_: &Value, _: &Value| -> Result<Ordering, ControlAction> {
            calls += 1;
            Err(not_callable("cmp").into())
        };
        let result = merge_sort(numbers(&[2.0, 1.0, 3.0]), &mut compare);
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }

    #[test]
    fn non_array_receiver_is_rejected() {
        let err = receiver_items("push", &Value::Null)
            .err()
            .and_then(ControlAction::into_eval_error)
            .map(|e| e.code());
        assert_eq!(err, Some("E6009"));
    }
}
