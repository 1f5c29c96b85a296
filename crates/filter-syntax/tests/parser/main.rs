//! Parser integration tests
//!
//! These tests drive the public parsing API end to end: shorthand
//! resolution, combinator flattening, error aggregation and limits.

mod helpers;

mod compiler;
mod errors;
mod limits;
