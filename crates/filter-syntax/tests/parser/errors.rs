use filter_syntax::{FilterError, FilterIssueKind, errors::ERROR_KEY};
use serde_json::json;

use super::helpers::*;

const SHAPE_ERROR: &str = "Filters must be defined as a dict or a list of dicts";

#[test]
fn test_invalid_top_level_shapes() {
    let inputs = [
        json!(1),
        json!("a"),
        json!("a,b"),
        json!(r#"{"a": "b"}"#),
        json!(["a"]),
        json!(["a", "b"]),
        json!([{"a": "b"}, "c"]),
        json!(true),
    ];

    for input in inputs {
        let result = parse(input.clone());
        assert_eq!(result, Err(FilterError::InvalidShape), "input: {input}");
    }
}

#[test]
fn test_shape_error_ignores_schema() {
    // Unknown field inside is never looked at
    assert_eq!(parse_errors(json!([{"nope": 1}, 2])), vec![SHAPE_ERROR]);
}

#[test]
fn test_unknown_top_operator() {
    assert_eq!(
        parse_errors(json!({"$maybe": [{"field1": "value1"}]})),
        vec!["Unknown operators (must be one of $or, $and): $maybe"]
    );
}

#[test]
fn test_operator_values_must_be_lists_of_dicts() {
    let cases = [
        (json!(1), "1"),
        (json!("a"), r#""a""#),
        (json!({"field2": "b"}), r#"{"field2":"b"}"#),
    ];

    for (value, rendered) in cases {
        let errors = parse_errors(json!({"field1": "value1", "$or": value}));
        assert_eq!(
            errors,
            vec![format!(
                "Filter operations must be defined as a list of dicts: {rendered}"
            )]
        );
    }
}

#[test]
fn test_non_mapping_members_are_reported() {
    let errors = parse_errors(json!({"field1": "value1", "$or": [{"field2": "b"}, "c"]}));
    assert_eq!(
        errors,
        vec![r#"Filter operation members must be dictionaries: "c""#]
    );
}

#[test]
fn test_members_with_several_keys_are_reported() {
    let errors = parse_errors(json!({"$and": [{"field1": 1, "field2": 2}]}));
    assert_eq!(
        errors,
        vec!["Filter operation members can only have one key: field1, field2"]
    );
}

#[test]
fn test_empty_operator_list_is_reported() {
    assert_eq!(
        parse_errors(json!({"$or": []})),
        vec!["Filter operations cannot be empty: $or"]
    );
}

#[test]
fn test_unknown_field() {
    assert_eq!(parse_errors(json!({"nope": 1})), vec!["Unknown field: nope"]);
}

#[test]
fn test_combinator_keys_are_not_field_operators() {
    let result = parse(json!({"field1": {"$and": [{"field2": 1}]}}));

    let Err(FilterError::Validation(issues)) = result else {
        panic!("Expected validation errors, got {result:?}");
    };
    assert_eq!(
        issues.messages(),
        vec!["Operator $and cannot be used on field: field1"]
    );
    assert_eq!(issues.errors[0].path.to_string(), "filters.field1.$and");

    // Inside a field list as well
    assert_eq!(
        parse_errors(json!({"size": [{"$or": [1, 2]}, 3]})),
        vec!["Operator $or cannot be used on field: size"]
    );
}

#[test]
fn test_escaped_unknown_field_reports_unescaped_name() {
    assert_eq!(parse_errors(json!({"$$y": 1})), vec!["Unknown field: $y"]);
}

#[test]
fn test_errors_are_aggregated_across_branches() {
    let result = parse(json!({
        "$or": [
            {"unknown1": "v"},
            {"$and": [{"unknown2": "v"}, {"$or": ["bad"]}]}
        ]
    }));

    let Err(FilterError::Validation(issues)) = result else {
        panic!("Expected validation errors, got {result:?}");
    };

    assert_eq!(
        issues.messages(),
        vec![
            "Unknown field: unknown1",
            "Unknown field: unknown2",
            r#"Filter operation members must be dictionaries: "bad""#,
        ]
    );
    assert!(matches!(
        issues.errors[2].kind,
        FilterIssueKind::MemberNotMapping { .. }
    ));
    assert_eq!(
        issues.errors[1].path.to_string(),
        "filters.$or[1].$and[0].unknown2"
    );
}

#[test]
fn test_errors_in_top_level_list_elements() {
    let errors = parse_errors(json!([{"nope": 1}, {"field1": 1, "$what": []}]));
    assert_eq!(
        errors,
        vec![
            "Unknown field: nope",
            "Unknown operators (must be one of $or, $and): $what",
        ]
    );
}

#[test]
fn test_valid_branches_do_not_leak_partial_tree() {
    let result = parse(json!({"field1": 1, "nope": 2}));
    assert!(matches!(result, Err(FilterError::Validation(_))));
}

#[test]
fn test_error_dict_bucket() {
    let err = parse(json!({"nope": 1})).unwrap_err();

    assert!(!err.is_fatal());
    let report = err.error_dict();
    assert_eq!(report.len(), 1);
    assert_eq!(report[ERROR_KEY], vec!["Unknown field: nope"]);
}
