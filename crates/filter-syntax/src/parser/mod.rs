use crate::{
    ast::{Combinator, FilterOp},
    errors::{FilterError, LimitError},
    input::Shape,
    limits::{ParseContext, ParserLimits},
    path::FilterPath,
    schema::FieldSchema,
};
use serde_json::{Map, Value};
use tracing::debug;

pub mod field;
pub mod members;

use members::process_mapping;

pub type ParseResult = Result<Option<FilterOp>, FilterError>;

/// Compiles filter input into a [`FilterOp`] tree against a field schema.
pub struct FilterParser<'a, S: FieldSchema + ?Sized> {
    schema: &'a S,
    limits: ParserLimits,
}

impl<'a, S: FieldSchema + ?Sized> FilterParser<'a, S> {
    pub fn new(schema: &'a S) -> Self {
        Self {
            schema,
            limits: ParserLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: ParserLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> ParserLimits {
        self.limits
    }

    /// Parse already-decoded filter input.
    ///
    /// Empty input (`null`, `""`, `{}`, `[]`) yields `Ok(None)`. A value that
    /// is neither a mapping nor a list of mappings fails immediately, as does
    /// crossing a limit. Every other problem is collected over the whole
    /// input and returned together, never alongside a tree.
    pub fn parse(&self, input: &Value) -> ParseResult {
        let mut ctx = ParseContext::new(self.schema, self.limits);

        let Some(shape) = Shape::of_root(input) else {
            return Ok(None);
        };

        let result = match shape {
            Shape::Mapping(mapping) => parse_mapping(&mut ctx, mapping, &FilterPath::root())?,
            Shape::Sequence(items) => {
                let mappings = items
                    .iter()
                    .map(Value::as_object)
                    .collect::<Option<Vec<_>>>()
                    .ok_or(FilterError::InvalidShape)?;
                parse_sequence(&mut ctx, &mappings)?
            }
            Shape::Scalar(_) => return Err(FilterError::InvalidShape),
        };

        debug!(
            "Parsed filters: {} operations, has errors: {}",
            ctx.operations(),
            ctx.has_errors()
        );

        if ctx.has_errors() {
            return Err(FilterError::Validation(ctx.into_issues()));
        }

        Ok(result)
    }

    /// Parse filters that may arrive JSON-encoded in a string.
    ///
    /// Blank strings mean no filter. Strings that are not valid JSON are
    /// treated as plain string values and so fail the shape check.
    pub fn parse_str(&self, source: &str) -> ParseResult {
        if source.trim().is_empty() {
            return Ok(None);
        }

        match serde_json::from_str::<Value>(source) {
            Ok(value) => self.parse(&value),
            Err(e) => {
                debug!("Filters are not valid JSON, treating them as a string: {e}");
                self.parse(&Value::String(source.to_string()))
            }
        }
    }
}

fn parse_mapping<S: FieldSchema + ?Sized>(
    ctx: &mut ParseContext<'_, S>,
    mapping: &Map<String, Value>,
    path: &FilterPath,
) -> Result<Option<FilterOp>, LimitError> {
    let nodes = process_mapping(ctx, mapping, path)?;
    ctx.combine(Combinator::And, nodes)
}

/// A top-level list is an implicit `$or` of its elements, each element an
/// implicit `$and` of its keys.
fn parse_sequence<S: FieldSchema + ?Sized>(
    ctx: &mut ParseContext<'_, S>,
    mappings: &[&Map<String, Value>],
) -> Result<Option<FilterOp>, LimitError> {
    ctx.check_width(mappings.len())?;

    let root = FilterPath::root();
    let mut branches = Vec::with_capacity(mappings.len());
    for (index, mapping) in mappings.iter().enumerate() {
        branches.extend(parse_mapping(ctx, mapping, &root.index(index))?);
    }

    ctx.combine(Combinator::Or, branches)
}

/// Parse `input` against `schema` with the given limits.
pub fn parse_filters<S: FieldSchema + ?Sized>(
    input: &Value,
    schema: &S,
    limits: ParserLimits,
) -> ParseResult {
    FilterParser::new(schema).with_limits(limits).parse(input)
}

/// Parse possibly JSON-encoded `source` against `schema` with the given limits.
pub fn parse_filters_str<S: FieldSchema + ?Sized>(
    source: &str,
    schema: &S,
    limits: ParserLimits,
) -> ParseResult {
    FilterParser::new(schema).with_limits(limits).parse_str(source)
}
