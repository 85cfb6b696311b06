//! The interpreter's variable store (spec §3 "Lifecycle", §4.6).
//!
//! A flat `name -> Tree` map, initialized with the input binding and mutated
//! only by assignment commands. WHILE has no declarations and no nested
//! scopes, so unlike the teacher's `Environment` this never chains to a
//! parent: referencing an unset variable simply yields `nil` (spec §3
//! invariant (c)).

use std::collections::HashMap;

use crate::tree::Tree;

pub(super) struct Store {
    values: HashMap<String, Tree>,
}

impl Store {
    pub(super) fn new(input_name: &str, input_tree: Tree) -> Self {
        let mut values = HashMap::new();
        values.insert(input_name.to_string(), input_tree);
        Self { values }
    }

    /// The reserved name `nil` always evaluates to `nil`; any other name
    /// resolves to its binding or `nil` if unset (spec §4.6).
    pub(super) fn get(&self, name: &str) -> Tree {
        if name == "nil" {
            return Tree::Nil;
        }
        self.values.get(name).cloned().unwrap_or(Tree::Nil)
    }

    pub(super) fn set(&mut self, name: &str, value: Tree) {
        self.values.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_yields_nil() {
        let store = Store::new("X", Tree::Nil);
        assert_eq!(store.get("Y"), Tree::Nil);
    }

    #[test]
    fn nil_name_is_reserved_even_if_shadowed() {
        let mut store = Store::new("X", Tree::Nil);
        store.set("nil", Tree::encode_number(1));
        assert_eq!(store.get("nil"), Tree::Nil);
    }

    #[test]
    fn assignment_overwrites_binding() {
        let mut store = Store::new("X", Tree::Nil);
        store.set("X", Tree::encode_number(2));
        assert_eq!(store.get("X"), Tree::encode_number(2));
    }
}
