use filter_syntax::{
    FieldSchema, FilterCompiler, FilterOp, ParserLimits, SearchSchema, parse_filters,
    schema::FieldType,
};
use serde_json::{Value, json};

/// Renders filters as `field:value` clauses, quoting text fields
struct ClauseCompiler;

impl FilterCompiler for ClauseCompiler {
    type Query = String;

    fn compile<S: FieldSchema + ?Sized>(filter: &FilterOp, schema: &S) -> Self::Query {
        if let Some(children) = filter.children() {
            let joiner = match filter.op() {
                "$or" => " OR ",
                _ => " AND ",
            };
            let parts = children
                .iter()
                .map(|child| Self::compile(child, schema))
                .collect::<Vec<_>>();
            return format!("({})", parts.join(joiner));
        }

        let field = filter.field_name().unwrap_or_default();
        let quoted = schema
            .definition(field)
            .is_some_and(|def| def.field_type == FieldType::Text);
        let render = |value: &Value| match value {
            Value::String(s) if quoted => format!("\"{s}\""),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        let value = filter.literal().cloned().unwrap_or(Value::Null);
        match (filter.op(), &value) {
            ("in", Value::Array(items)) => {
                let items = items.iter().map(render).collect::<Vec<_>>();
                format!("{field}:({})", items.join(" OR "))
            }
            ("gte", v) => format!("{field}:[{} TO *]", render(v)),
            ("lt", v) => format!("{field}:[* TO {}}}", render(v)),
            (_, v) => format!("{field}:{}", render(v)),
        }
    }
}

#[test]
fn test_compiler_consumes_parsed_tree() {
    let schema = SearchSchema::dataset();
    let filter = parse_filters(
        &json!({
            "title": "water data",
            "tags": ["rivers", "lakes"],
            "$or": [
                {"metadata_modified": {"gte": "2024-01-01"}},
                {"private": false}
            ]
        }),
        &schema,
        ParserLimits::default(),
    )
    .unwrap()
    .unwrap();

    assert_eq!(
        ClauseCompiler::compile(&filter, &schema),
        "(title:\"water data\" AND tags:(rivers OR lakes) AND \
         (metadata_modified:[2024-01-01 TO *] OR private:false))"
    );
}

#[test]
fn test_dataset_schema_rejects_organization_fields() {
    let schema = SearchSchema::dataset();
    let result = parse_filters(&json!({"description": "x"}), &schema, ParserLimits::default());

    assert_eq!(result.unwrap_err().messages(), vec!["Unknown field: description"]);
}
