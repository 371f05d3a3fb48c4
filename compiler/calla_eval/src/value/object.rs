//! Object records.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use calla_ir::Name;

use super::{Shared, Value};

/// Property storage. Insertion order is kept for rendering only; lookup
/// semantics do not depend on it.
pub type PropertyMap = IndexMap<Name, Value, FxBuildHasher>;

/// Contents of an object record.
#[derive(Default)]
pub struct ObjectData {
    /// Name of the constructor that created this record, if any.
    pub class_name: Option<Name>,
    pub props: PropertyMap,
}

/// A mutable object record with reference identity.
#[derive(Clone, Default)]
pub struct ObjectValue(Shared<ObjectData>);

impl ObjectValue {
    /// Create an empty plain object (`{}`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record produced by `new ClassName(...)`.
    pub fn with_class(class_name: Option<Name>) -> Self {
        ObjectValue(Shared::new(ObjectData {
            class_name,
            props: PropertyMap::default(),
        }))
    }

    pub fn get(&self, key: Name) -> Option<Value> {
        self.0.borrow().props.get(&key).cloned()
    }

    pub fn set(&self, key: Name, value: Value) {
        self.0.borrow_mut().props.insert(key, value);
    }

    pub fn has(&self, key: Name) -> bool {
        self.0.borrow().props.contains_key(&key)
    }

    pub fn class_name(&self) -> Option<Name> {
        self.0.borrow().class_name
    }

    /// Snapshot of the properties in insertion order.
    pub fn entries(&self) -> Vec<(Name, Value)> {
        self.0
            .borrow()
            .props
            .iter()
            .map(|(k, v)| (*k, v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().props.is_empty()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.0.ptr_eq(&other.0)
    }

    #[inline]
    pub fn addr(&self) -> usize {
        self.0.addr()
    }
}
