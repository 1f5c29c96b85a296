use crate::{
    ast::{Combinator, FilterOp},
    errors::{FilterIssueKind, LimitError},
    input::Shape,
    limits::ParseContext,
    path::FilterPath,
    schema::FieldSchema,
};
use serde_json::{Map, Value};
use tracing::trace;

/// Resolve one `field: value` pair into a comparison node, or an `$and`/`$or`
/// of comparisons for the shorthand forms.
///
/// `field` must already be unescaped. Unknown fields are reported and produce
/// no node.
pub fn resolve_field<S: FieldSchema + ?Sized>(
    ctx: &mut ParseContext<'_, S>,
    field: &str,
    value: &Value,
    path: &FilterPath,
) -> Result<Option<FilterOp>, LimitError> {
    if !ctx.schema().has_field(field) {
        ctx.report(
            FilterIssueKind::UnknownField {
                field: field.to_string(),
            },
            path.clone(),
        );
        return Ok(None);
    }

    trace!("Resolving filter on field '{field}' at {path}");

    match Shape::of(value) {
        Shape::Scalar(scalar) => Ok(Some(ctx.leaf(field, FilterOp::EQ, scalar.clone())?)),
        Shape::Mapping(operators) => resolve_operators(ctx, field, operators, path),
        Shape::Sequence(items) => resolve_list(ctx, field, items, path),
    }
}

/// `{op: value}` becomes a single node; several operators are AND-ed.
fn resolve_operators<S: FieldSchema + ?Sized>(
    ctx: &mut ParseContext<'_, S>,
    field: &str,
    operators: &Map<String, Value>,
    path: &FilterPath,
) -> Result<Option<FilterOp>, LimitError> {
    ctx.check_width(operators.len())?;

    if operators.is_empty() {
        ctx.report(
            FilterIssueKind::EmptyFieldOperators {
                field: field.to_string(),
            },
            path.clone(),
        );
        return Ok(None);
    }

    // TODO: validate operator names and value formats against the field type
    let mut leaves = Vec::with_capacity(operators.len());
    for (op, operand) in operators {
        // `$and`/`$or` only ever name combinators, never comparisons
        if Combinator::from_key(op).is_some() {
            ctx.report(
                FilterIssueKind::CombinatorAsFieldOperator {
                    field: field.to_string(),
                    op: op.to_string(),
                },
                path.key(op),
            );
            continue;
        }
        leaves.push(ctx.leaf(field, op, operand.clone())?);
    }

    ctx.combine(Combinator::And, leaves)
}

/// Plain list elements become one `in` node; mapping elements are resolved
/// as operator mappings and OR-ed with it.
fn resolve_list<S: FieldSchema + ?Sized>(
    ctx: &mut ParseContext<'_, S>,
    field: &str,
    items: &[Value],
    path: &FilterPath,
) -> Result<Option<FilterOp>, LimitError> {
    let (mappings, plain): (Vec<&Value>, Vec<&Value>) =
        items.iter().partition(|item| item.is_object());

    if mappings.is_empty() {
        return Ok(Some(ctx.leaf(field, FilterOp::IN, Value::Array(items.to_vec()))?));
    }

    let mut branches = Vec::with_capacity(mappings.len() + 1);
    for (index, item) in items.iter().enumerate() {
        if let Value::Object(operators) = item {
            let item_path = path.index(index);
            branches.extend(resolve_operators(ctx, field, operators, &item_path)?);
        }
    }

    if !plain.is_empty() {
        let values = plain.into_iter().cloned().collect();
        branches.push(ctx.leaf(field, FilterOp::IN, Value::Array(values))?);
    }

    ctx.combine(Combinator::Or, branches)
}
