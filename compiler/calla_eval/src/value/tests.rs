use super::*;
use calla_ir::Name;

#[test]
fn undefined_is_the_default_value() {
    assert!(Value::default().is_undefined());
}

#[test]
fn null_is_nullish_but_not_undefined() {
    assert!(Value::Null.is_nullish());
    assert!(!Value::Null.is_undefined());
}

#[test]
fn truthiness_follows_javascript() {
    assert!(!Value::number(0).is_truthy());
    assert!(!Value::Number(f64::NAN).is_truthy());
    assert!(!Value::string("").is_truthy());
    assert!(!Value::Null.is_truthy());
    assert!(Value::string("0").is_truthy());
    assert!(Value::array(vec![]).is_truthy());
    assert!(Value::Object(ObjectValue::new()).is_truthy());
}

#[test]
fn typeof_null_is_object() {
    assert_eq!(Value::Null.type_of(), "object");
    assert_eq!(Value::Undefined.type_of(), "undefined");
    assert_eq!(Value::array(vec![]).type_of(), "object");
}

#[test]
fn strict_equality_compares_records_by_identity() {
    let a = ObjectValue::new();
    let b = ObjectValue::new();
    assert!(Value::Object(a.clone()).strict_equals(&Value::Object(a)));
    assert!(!Value::Object(ObjectValue::new()).strict_equals(&Value::Object(b)));
}

#[test]
fn strict_equality_nan_is_not_equal_to_itself() {
    let nan = Value::Number(f64::NAN);
    assert!(!nan.strict_equals(&nan));
}

#[test]
fn strict_equality_does_not_coerce() {
    assert!(!Value::number(1).strict_equals(&Value::string("1")));
    assert!(!Value::Null.strict_equals(&Value::Undefined));
}

#[test]
fn array_clones_alias_storage() {
    let arr = Value::array(vec![Value::number(1)]);
    let alias = arr.clone();
    if let Value::Array(items) = &alias {
        items.borrow_mut().push(Value::number(2));
    }
    assert_eq!(arr.as_list().map(|l| l.len()), Some(2));
}

#[test]
fn object_properties_keep_insertion_order() {
    let obj = ObjectValue::new();
    let (b, a) = (Name::from_raw(20), Name::from_raw(10));
    obj.set(b, Value::number(1));
    obj.set(a, Value::number(2));
    obj.set(b, Value::number(3));
    let keys: Vec<Name> = obj.entries().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![b, a]);
    assert_eq!(obj.get(b), Some(Value::number(3)));
    assert!(obj.has(a));
}

#[test]
fn composite_values() {
    assert!(Value::array(vec![]).is_composite());
    assert!(Value::Object(ObjectValue::new()).is_composite());
    assert!(!Value::string("x").is_composite());
    assert!(!Value::Null.is_composite());
}
