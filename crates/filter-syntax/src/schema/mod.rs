use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::BuildHasher;

pub mod search_schema;

pub use search_schema::{FieldDefinition, FieldType, SearchSchema};

/// Registry of fields a filter may reference.
///
/// Only existence is needed to compile filters. Definitions are exposed for
/// backends that want type information when translating the tree.
pub trait FieldSchema {
    fn has_field(&self, name: &str) -> bool;

    fn definition(&self, _name: &str) -> Option<&FieldDefinition> {
        None
    }
}

impl<S: BuildHasher> FieldSchema for HashSet<String, S> {
    fn has_field(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl FieldSchema for BTreeSet<String> {
    fn has_field(&self, name: &str) -> bool {
        self.contains(name)
    }
}

impl<V, S: BuildHasher> FieldSchema for HashMap<String, V, S> {
    fn has_field(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl<V> FieldSchema for BTreeMap<String, V> {
    fn has_field(&self, name: &str) -> bool {
        self.contains_key(name)
    }
}

impl FieldSchema for [&str] {
    fn has_field(&self, name: &str) -> bool {
        self.contains(&name)
    }
}
