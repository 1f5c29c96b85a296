use filter_syntax::{FilterOp, ParseResult, ParserLimits, parse_filters};
use serde_json::Value;
use std::collections::HashSet;

/// Schema with the field names used across these tests
pub fn schema() -> HashSet<String> {
    ["field1", "field2", "field3", "$x", "size", "tags"]
        .into_iter()
        .map(String::from)
        .collect()
}

pub fn parse(input: Value) -> ParseResult {
    parse_filters(&input, &schema(), ParserLimits::default())
}

/// Parse input that is expected to be valid and non-empty
pub fn parse_ok(input: Value) -> FilterOp {
    match parse(input) {
        Ok(Some(filter)) => filter,
        other => panic!("Expected a filter, got {other:?}"),
    }
}

pub fn parse_errors(input: Value) -> Vec<String> {
    match parse(input) {
        Err(err) => err.messages(),
        other => panic!("Expected errors, got {other:?}"),
    }
}
