//! Property and index access.

use calla_ir::Name;

use super::Interpreter;
use crate::builtins::array_method;
use crate::errors::{invalid_array_length, property_of_nullish, Access, EvalError, EvalResult};
use crate::format::{number_to_string, to_js_string};
use crate::Value;

/// Arrays are stored densely; growing one past this many elements is an
/// `InvalidArrayLength` error rather than an allocation.
pub const MAX_ARRAY_LENGTH: usize = 1 << 24;

/// An integral, non-negative numeric key (`a[2]`, `a["2"]`).
fn array_index(key: &Value) -> Option<usize> {
    match key {
        Value::Number(n) if *n >= 0.0 && n.fract() == 0.0 && *n < f64::from(u32::MAX) => {
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "range checked above"
            )]
            let index = *n as usize;
            Some(index)
        }
        Value::Str(s) => s
            .parse::<usize>()
            .ok()
            .filter(|index| index.to_string() == **s),
        _ => None,
    }
}

impl Interpreter {
    /// `object.property`
    pub(crate) fn get_property(&self, object: &Value, property: Name) -> EvalResult {
        let value = match object {
            Value::Undefined | Value::Null => {
                return Err(property_of_nullish(
                    object,
                    self.interner.lookup(property),
                    Access::Read,
                )
                .into());
            }
            Value::Object(obj) => obj.get(property).unwrap_or_default(),
            Value::Array(items) => {
                if property == self.names.length {
                    Value::from_len(items.borrow().len())
                } else {
                    array_method(self.interner.lookup(property))
                        .map(Value::Native)
                        .unwrap_or_default()
                }
            }
            Value::Arguments(items) if property == self.names.length => {
                Value::from_len(items.borrow().len())
            }
            Value::Str(s) if property == self.names.length => {
                Value::from_len(s.encode_utf16().count())
            }
            Value::Function(f) if property == self.names.name => {
                Value::string(f.name().map_or("", |n| self.interner.lookup(n)))
            }
            Value::Function(f) if property == self.names.length => Value::from_len(f.arity()),
            Value::Native(n) if property == self.names.name => Value::string(n.name),
            _ => Value::Undefined,
        };
        Ok(value)
    }

    /// `object[index]`
    pub(crate) fn get_index(&self, object: &Value, index: &Value) -> EvalResult {
        match (object, array_index(index)) {
            (Value::Array(items) | Value::Arguments(items), Some(i)) => {
                Ok(items.borrow().get(i).cloned().unwrap_or_default())
            }
            // Indexed by UTF-16 unit, like `length`. Half of a surrogate
            // pair cannot be held in a Rust string and reads as U+FFFD.
            (Value::Str(s), Some(i)) => Ok(s
                .encode_utf16()
                .nth(i)
                .map(|unit| Value::string(&String::from_utf16_lossy(&[unit])))
                .unwrap_or_default()),
            _ => {
                let key = self.property_key(index);
                self.get_property(object, key)
            }
        }
    }

    /// `object.property = value`. Writes to primitives are ignored.
    pub(crate) fn set_property(
        &self,
        object: &Value,
        property: Name,
        value: Value,
    ) -> Result<(), EvalError> {
        match object {
            Value::Undefined | Value::Null => {
                return Err(property_of_nullish(
                    object,
                    self.interner.lookup(property),
                    Access::Write,
                ));
            }
            Value::Object(obj) => obj.set(property, value),
            Value::Array(items) if property == self.names.length => {
                if let Value::Number(n) = value {
                    match array_index(&value) {
                        Some(len) if len <= MAX_ARRAY_LENGTH => {
                            items.borrow_mut().resize(len, Value::Undefined);
                        }
                        _ => {
                            let requested = number_to_string(n);
                            return Err(invalid_array_length(requested, MAX_ARRAY_LENGTH));
                        }
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// `object[index] = value`. Writing past the end of an array fills the
    /// gap with `undefined`, up to `MAX_ARRAY_LENGTH`.
    pub(crate) fn set_index(
        &self,
        object: &Value,
        index: &Value,
        value: Value,
    ) -> Result<(), EvalError> {
        match (object, array_index(index)) {
            (Value::Array(items) | Value::Arguments(items), Some(i)) => {
                let mut items = items.borrow_mut();
                if i >= items.len() {
                    if i >= MAX_ARRAY_LENGTH {
                        return Err(invalid_array_length((i + 1).to_string(), MAX_ARRAY_LENGTH));
                    }
                    items.resize(i + 1, Value::Undefined);
                }
                items[i] = value;
                Ok(())
            }
            _ => {
                let key = self.property_key(index);
                self.set_property(object, key, value)
            }
        }
    }

    fn property_key(&self, index: &Value) -> Name {
        self.interner.intern(&to_js_string(index, &self.interner))
    }
}
