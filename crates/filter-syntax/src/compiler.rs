use crate::{ast::FilterOp, schema::FieldSchema};

/// A trait for compiling filter trees into a backend-specific query.
pub trait FilterCompiler {
    /// The query fragment this compiler produces.
    type Query;

    /// Compile the tree, using the schema for field metadata.
    fn compile<S: FieldSchema + ?Sized>(filter: &FilterOp, schema: &S) -> Self::Query;
}
