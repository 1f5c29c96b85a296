use crate::ast::Combinator;
use serde_json::{Map, Value};

/// Shape of a raw filter value, decided once per recursive step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    Scalar(&'a Value),
    Mapping(&'a Map<String, Value>),
    Sequence(&'a [Value]),
}

impl<'a> Shape<'a> {
    /// Classify a value nested inside a filter. `null` and empty strings are
    /// ordinary scalars here.
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => Shape::Mapping(map),
            Value::Array(items) => Shape::Sequence(items),
            scalar => Shape::Scalar(scalar),
        }
    }

    /// Classify the whole filter input. `null`, `""`, `{}` and `[]` mean
    /// "no filter" and yield `None`.
    pub fn of_root(value: &'a Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::Object(map) if map.is_empty() => None,
            Value::Array(items) if items.is_empty() => None,
            other => Some(Shape::of(other)),
        }
    }
}

/// A key of a filter mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey<'a> {
    Combinator(Combinator),
    UnknownOperator(&'a str),
    /// Field name with one leading `$` already stripped from `$$` escapes
    Field(&'a str),
}

impl<'a> FilterKey<'a> {
    pub fn classify(key: &'a str) -> Self {
        if key.starts_with("$$") {
            return FilterKey::Field(unescape_field(key));
        }

        if key.starts_with('$') {
            return match Combinator::from_key(key) {
                Some(kind) => FilterKey::Combinator(kind),
                None => FilterKey::UnknownOperator(key),
            };
        }

        FilterKey::Field(key)
    }
}

/// Strip the escape from a `$$`-prefixed field name; `$$name` is the literal field `$name`.
pub fn unescape_field(key: &str) -> &str {
    if key.starts_with("$$") { &key[1..] } else { key }
}
