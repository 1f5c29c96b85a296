pub mod combinator;
pub mod filter_op;
pub mod visitor;

pub use combinator::Combinator;
pub use filter_op::{CombinatorFilter, FieldFilter, FilterOp};
pub use visitor::FilterVisitor;
