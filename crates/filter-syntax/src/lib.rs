//! Compiles loosely structured JSON filter expressions into a validated
//! [`FilterOp`] tree that search backends translate into their own queries.

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod input;
pub mod limits;
pub mod parser;
pub mod path;
pub mod schema;

pub use ast::{Combinator, FilterOp};
pub use compiler::FilterCompiler;
pub use errors::{FilterError, FilterIssue, FilterIssueKind, FilterIssues, LimitError};
pub use limits::ParserLimits;
pub use parser::{FilterParser, ParseResult, parse_filters, parse_filters_str};
pub use schema::{FieldSchema, SearchSchema};
