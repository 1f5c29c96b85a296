use crate::{
    ast::{combinator::Combinator, visitor::FilterVisitor},
    errors::AstError,
};
use serde::{
    Deserialize, Serialize, Serializer,
    ser::SerializeStruct,
};
use serde_json::Value;
use std::fmt;

/// A node of the compiled filter tree.
///
/// A node is either a comparison on one named field or a boolean combinator
/// over child nodes; the two shapes never mix. Trees are built once and are
/// not mutated afterwards, so every field is reachable only through accessors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawFilterOp")]
pub enum FilterOp {
    Field(FieldFilter),
    Combinator(CombinatorFilter),
}

/// Comparison of a single field against a literal value
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    field: String,
    op: String,
    value: Value,
}

impl FieldFilter {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn op(&self) -> &str {
        &self.op
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// `$and` / `$or` over two or more children
#[derive(Debug, Clone, PartialEq)]
pub struct CombinatorFilter {
    kind: Combinator,
    children: Vec<FilterOp>,
}

impl CombinatorFilter {
    pub fn kind(&self) -> Combinator {
        self.kind
    }

    pub fn children(&self) -> &[FilterOp] {
        &self.children
    }
}

impl FilterOp {
    pub const EQ: &'static str = "eq";
    pub const IN: &'static str = "in";

    /// Comparison node. The operator name is taken literally.
    pub fn field(field: impl Into<String>, op: impl Into<String>, value: Value) -> Self {
        FilterOp::Field(FieldFilter {
            field: field.into(),
            op: op.into(),
            value,
        })
    }

    pub fn eq(field: impl Into<String>, value: Value) -> Self {
        Self::field(field, Self::EQ, value)
    }

    pub fn is_in(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::field(field, Self::IN, Value::Array(values))
    }

    /// Combine `children` under `kind`.
    ///
    /// Children of the same kind are spliced into the new node, so an `$and`
    /// never holds another `$and` directly. No children yields `None`, and a
    /// single child is returned as-is instead of being wrapped.
    pub fn combine(kind: Combinator, children: Vec<FilterOp>) -> Option<FilterOp> {
        let mut flat = Vec::with_capacity(children.len());
        for child in children {
            match child {
                FilterOp::Combinator(inner) if inner.kind == kind => flat.extend(inner.children),
                other => flat.push(other),
            }
        }

        match flat.len() {
            0 => None,
            1 => flat.pop(),
            _ => Some(FilterOp::Combinator(CombinatorFilter {
                kind,
                children: flat,
            })),
        }
    }

    pub fn and(children: Vec<FilterOp>) -> Option<FilterOp> {
        Self::combine(Combinator::And, children)
    }

    pub fn or(children: Vec<FilterOp>) -> Option<FilterOp> {
        Self::combine(Combinator::Or, children)
    }

    /// Symbolic operator: `$and`/`$or` for combinators, the comparison name otherwise.
    pub fn op(&self) -> &str {
        match self {
            FilterOp::Field(f) => &f.op,
            FilterOp::Combinator(c) => c.kind.as_str(),
        }
    }

    pub fn field_name(&self) -> Option<&str> {
        match self {
            FilterOp::Field(f) => Some(&f.field),
            FilterOp::Combinator(_) => None,
        }
    }

    pub fn literal(&self) -> Option<&Value> {
        match self {
            FilterOp::Field(f) => Some(&f.value),
            FilterOp::Combinator(_) => None,
        }
    }

    pub fn children(&self) -> Option<&[FilterOp]> {
        match self {
            FilterOp::Field(_) => None,
            FilterOp::Combinator(c) => Some(&c.children),
        }
    }

    pub fn combinator(&self) -> Option<Combinator> {
        match self {
            FilterOp::Field(_) => None,
            FilterOp::Combinator(c) => Some(c.kind),
        }
    }

    pub fn is_combinator(&self) -> bool {
        matches!(self, FilterOp::Combinator(_))
    }

    /// Walk the tree depth-first, parents before children.
    pub fn accept<V: FilterVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            FilterOp::Field(f) => visitor.visit_field(f),
            FilterOp::Combinator(c) => {
                visitor.enter_combinator(c);
                for child in &c.children {
                    child.accept(visitor);
                }
                visitor.leave_combinator(c);
            }
        }
    }

    /// Sorted, deduplicated list of every field referenced in this tree.
    pub fn fields(&self) -> Vec<String> {
        struct Collect(Vec<String>);

        impl FilterVisitor for Collect {
            fn visit_field(&mut self, filter: &FieldFilter) {
                self.0.push(filter.field.clone());
            }
        }

        let mut collect = Collect(Vec::new());
        self.accept(&mut collect);
        collect.0.sort_unstable();
        collect.0.dedup();
        collect.0
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            FilterOp::Field(_) => 1,
            FilterOp::Combinator(c) => c.children.iter().map(FilterOp::leaf_count).sum(),
        }
    }

    /// Number of node levels; a bare comparison has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            FilterOp::Field(_) => 1,
            FilterOp::Combinator(c) => {
                1 + c.children.iter().map(FilterOp::depth).max().unwrap_or(0)
            }
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOp::Field(leaf) => write!(f, "{} {} {}", leaf.field, leaf.op, leaf.value),
            FilterOp::Combinator(c) => {
                let separator = format!(" {} ", c.kind);
                let parts = c.children.iter().map(|child| child.to_string()).collect::<Vec<_>>();
                write!(f, "({})", parts.join(separator.as_str()))
            }
        }
    }
}

impl Serialize for FilterOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FilterOp::Field(leaf) => {
                let mut state = serializer.serialize_struct("FilterOp", 3)?;
                state.serialize_field("op", &leaf.op)?;
                state.serialize_field("field", &leaf.field)?;
                state.serialize_field("value", &leaf.value)?;
                state.end()
            }
            FilterOp::Combinator(c) => {
                let mut state = serializer.serialize_struct("FilterOp", 2)?;
                state.serialize_field("op", c.kind.as_str())?;
                state.serialize_field("value", &c.children)?;
                state.end()
            }
        }
    }
}

/// Wire form of a node before its invariants are checked
#[derive(Deserialize)]
struct RawFilterOp {
    op: String,
    #[serde(default)]
    field: Option<String>,
    #[serde(default)]
    value: Value,
}

impl TryFrom<RawFilterOp> for FilterOp {
    type Error = AstError;

    fn try_from(raw: RawFilterOp) -> Result<Self, Self::Error> {
        if let Some(field) = raw.field {
            if let Some(kind) = Combinator::from_key(&raw.op) {
                return Err(AstError::CombinatorAsComparison(field, kind.as_str()));
            }
            return Ok(FilterOp::field(field, raw.op, raw.value));
        }

        let kind = Combinator::from_key(&raw.op).ok_or(AstError::MissingField(raw.op))?;
        let Value::Array(items) = raw.value else {
            return Err(AstError::ChildrenNotAList(kind.as_str()));
        };

        let children = items
            .into_iter()
            .map(serde_json::from_value::<FilterOp>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| AstError::InvalidChild(e.to_string()))?;

        FilterOp::combine(kind, children).ok_or(AstError::EmptyCombinator(kind.as_str()))
    }
}
