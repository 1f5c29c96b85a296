use super::field::resolve_field;
use crate::{
    ast::{Combinator, FilterOp},
    errors::{FilterIssueKind, LimitError},
    input::{FilterKey, Shape},
    limits::ParseContext,
    path::FilterPath,
    schema::FieldSchema,
};
use serde_json::{Map, Value};

/// Process every key of a filter mapping.
///
/// Returns the nodes that are implicitly AND-ed together: one per field key,
/// one per `$or` key, and the members of any `$and` key spliced in directly.
pub fn process_mapping<S: FieldSchema + ?Sized>(
    ctx: &mut ParseContext<'_, S>,
    mapping: &Map<String, Value>,
    path: &FilterPath,
) -> Result<Vec<FilterOp>, LimitError> {
    ctx.check_width(mapping.len())?;

    let mut nodes = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let key_path = path.key(key);

        match FilterKey::classify(key) {
            FilterKey::Combinator(kind) => {
                let Some(members) = process_operator(ctx, kind, value, &key_path)? else {
                    continue;
                };
                match kind {
                    Combinator::And => nodes.extend(members),
                    Combinator::Or => nodes.extend(ctx.combine(Combinator::Or, members)?),
                }
            }
            FilterKey::UnknownOperator(key) => {
                ctx.report(
                    FilterIssueKind::UnknownOperator {
                        key: key.to_string(),
                    },
                    key_path,
                );
            }
            FilterKey::Field(field) => {
                nodes.extend(resolve_field(ctx, field, value, &key_path)?);
            }
        }
    }

    Ok(nodes)
}

/// Process the member list of an `$and`/`$or` key.
///
/// Each member must be a mapping with exactly one key. Returns `None` when
/// the value itself is malformed; member problems are reported and the
/// remaining members are still checked.
pub fn process_operator<S: FieldSchema + ?Sized>(
    ctx: &mut ParseContext<'_, S>,
    kind: Combinator,
    value: &Value,
    path: &FilterPath,
) -> Result<Option<Vec<FilterOp>>, LimitError> {
    let members = match Shape::of(value) {
        Shape::Sequence(members) => members,
        Shape::Scalar(_) | Shape::Mapping(_) => {
            ctx.report(
                FilterIssueKind::OperatorValueNotList {
                    value: value.to_string(),
                },
                path.clone(),
            );
            return Ok(None);
        }
    };

    if members.is_empty() {
        ctx.report(
            FilterIssueKind::EmptyOperator {
                key: kind.as_str().to_string(),
            },
            path.clone(),
        );
        return Ok(None);
    }

    ctx.descend()?;
    ctx.check_width(members.len())?;

    let mut nodes = Vec::with_capacity(members.len());
    for (index, member) in members.iter().enumerate() {
        let member_path = path.index(index);

        let Value::Object(mapping) = member else {
            ctx.report(
                FilterIssueKind::MemberNotMapping {
                    value: member.to_string(),
                },
                member_path,
            );
            continue;
        };

        match mapping.len() {
            0 => ctx.report(FilterIssueKind::EmptyMember, member_path),
            1 => {
                let children = process_mapping(ctx, mapping, &member_path)?;
                nodes.extend(ctx.combine(Combinator::And, children)?);
            }
            _ => ctx.report(
                FilterIssueKind::MemberMultipleKeys {
                    keys: mapping.keys().cloned().collect(),
                },
                member_path,
            ),
        }
    }

    ctx.ascend();
    Ok(Some(nodes))
}
