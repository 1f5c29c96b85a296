use crate::ast::filter_op::{CombinatorFilter, FieldFilter};

/// Visitor trait for filter tree traversal
pub trait FilterVisitor {
    fn visit_field(&mut self, _filter: &FieldFilter) {}
    fn enter_combinator(&mut self, _filter: &CombinatorFilter) {}
    fn leave_combinator(&mut self, _filter: &CombinatorFilter) {}
}
