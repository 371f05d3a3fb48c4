//! String interner for identifiers and property keys.
//!
//! Every identifier, property key and string literal in a program is interned
//! once by the [`ProgramBuilder`](crate::ProgramBuilder); the evaluator works
//! with [`Name`] values and only resolves them back to text when rendering.

use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use super::Name;

/// Error when interning a string fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InternError {
    /// The table exceeded `u32` capacity.
    #[error("interner exceeded capacity: {count} strings")]
    Overflow { count: usize },
}

#[derive(Default)]
struct InternTable {
    map: FxHashMap<&'static str, u32>,
    strings: Vec<&'static str>,
}

/// String interner with O(1) lookup in both directions.
///
/// Interned strings are leaked and live for the rest of the process, so
/// [`lookup`](Self::lookup) can hand out `&'static str`.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the empty string and the well-known
    /// identifiers pre-interned.
    pub fn new() -> Self {
        let interner = Self {
            table: RwLock::new(InternTable::default()),
        };
        interner.intern("");
        interner.pre_intern_well_known();
        interner
    }

    /// Try to intern a string, returning its Name or an error on overflow.
    pub fn try_intern(&self, s: &str) -> Result<Name, InternError> {
        {
            let guard = self.table.read();
            if let Some(&index) = guard.map.get(s) {
                return Ok(Name::from_raw(index));
            }
        }

        let mut guard = self.table.write();
        if let Some(&index) = guard.map.get(s) {
            return Ok(Name::from_raw(index));
        }

        let index = u32::try_from(guard.strings.len()).map_err(|_| InternError::Overflow {
            count: guard.strings.len(),
        })?;
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        guard.strings.push(leaked);
        guard.map.insert(leaked, index);
        Ok(Name::from_raw(index))
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if the interner exceeds `u32` capacity.
    /// Use `try_intern` for fallible interning.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        self.try_intern(s).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Look up the string for a Name.
    ///
    /// Unknown names resolve to the empty string.
    pub fn lookup(&self, name: Name) -> &'static str {
        let guard = self.table.read();
        guard.strings.get(name.index()).copied().unwrap_or("")
    }

    fn pre_intern_well_known(&self) {
        const WELL_KNOWN: &[&str] = &[
            "arguments",
            "length",
            "name",
            "undefined",
            "globalThis",
            "console",
            "log",
        ];
        for name in WELL_KNOWN {
            self.intern(name);
        }
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Check if only the empty string has been interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared interner handle, cloned into every program and interpreter.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn interning_is_idempotent() {
        let interner = StringInterner::new();
        let a = interner.intern("greeting");
        let b = interner.intern("greeting");
        assert_eq!(a, b);
        assert_eq!(interner.lookup(a), "greeting");
    }

    #[test]
    fn distinct_strings_get_distinct_names() {
        let interner = StringInterner::new();
        assert_ne!(interner.intern("first"), interner.intern("rest"));
    }

    #[test]
    fn empty_string_is_name_zero() {
        let interner = StringInterner::new();
        assert_eq!(interner.intern(""), Name::EMPTY);
        assert_eq!(interner.lookup(Name::EMPTY), "");
    }

    #[test]
    fn well_known_names_are_pre_interned() {
        let interner = StringInterner::new();
        let before = interner.len();
        interner.intern("arguments");
        interner.intern("globalThis");
        assert_eq!(interner.len(), before);
        assert!(!interner.is_empty());
    }

    #[test]
    fn unknown_name_looks_up_empty() {
        let interner = StringInterner::new();
        assert_eq!(interner.lookup(Name::from_raw(u32::MAX)), "");
    }

    #[test]
    fn shared_interner_clones_share_table() {
        let shared = SharedInterner::new();
        let other = shared.clone();
        let name = shared.intern("salutation");
        assert_eq!(other.lookup(name), "salutation");
    }
}
