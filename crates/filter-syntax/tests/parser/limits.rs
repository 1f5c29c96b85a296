use filter_syntax::{
    FilterError, FilterParser, LimitError, ParseResult, ParserLimits, parse_filters,
};
use serde_json::{Map, Value, json};
use std::{collections::HashSet, thread};

use super::helpers::*;

/// `levels` nested `$or`/`$and` lists around a single field filter
fn nested(levels: usize) -> Value {
    let mut value = json!({"field1": 1});
    for level in 0..levels {
        let key = if level % 2 == 0 { "$or" } else { "$and" };
        let mut wrapper = Map::new();
        wrapper.insert(key.to_string(), json!([value, {"field2": level}]));
        value = Value::Object(wrapper);
    }
    value
}

#[test]
fn test_depth_within_limit() {
    let limits = ParserLimits::default().with_max_depth(4);
    let result = parse_filters(&nested(4), &schema(), limits);

    let filter = result.unwrap().unwrap();
    assert_eq!(filter.leaf_count(), 5);
}

#[test]
fn test_depth_over_limit_is_fatal() {
    let limits = ParserLimits::default().with_max_depth(4);
    let result = parse_filters(&nested(5), &schema(), limits);

    assert_eq!(
        result,
        Err(FilterError::Limit(LimitError::NestingTooDeep { max: 4 }))
    );
    assert!(result.unwrap_err().is_fatal());
}

#[test]
fn test_limit_error_wins_over_collected_errors() {
    let mut value = nested(3);
    value["nope"] = json!(1);

    let limits = ParserLimits::default().with_max_depth(2);
    let errors = parse_filters(&value, &schema(), limits).unwrap_err();

    assert_eq!(
        errors.messages(),
        vec!["Filters exceed the maximum nesting depth of 2"]
    );
}

#[test]
fn test_operation_count_over_limit() {
    let values: Vec<Value> = (0..4).map(|i| json!({"gt": i})).collect();
    let input = json!({"size": values});

    let ok = parse_filters(&input, &schema(), ParserLimits::default().with_max_operations(5));
    assert!(ok.is_ok());

    let result = parse_filters(&input, &schema(), ParserLimits::default().with_max_operations(4));
    assert_eq!(
        result,
        Err(FilterError::Limit(LimitError::TooManyOperations { max: 4 }))
    );
}

#[test]
fn test_mapping_width_over_limit() {
    let mut mapping = Map::new();
    for i in 0..6 {
        mapping.insert(format!("k{i}"), json!(i));
    }
    let input = json!({"size": Value::Object(mapping)});

    let result = parse_filters(&input, &schema(), ParserLimits::default().with_max_operations(5));
    assert_eq!(
        result,
        Err(FilterError::Limit(LimitError::TooManyMembers { count: 6, max: 5 }))
    );
}

#[test]
fn test_top_level_sequence_over_limit() {
    let input = Value::Array((0..3).map(|i| json!({"field1": i})).collect());

    let result = parse_filters(&input, &schema(), ParserLimits::default().with_max_operations(2));
    assert_eq!(
        result,
        Err(FilterError::Limit(LimitError::TooManyMembers { count: 3, max: 2 }))
    );
}

#[test]
fn test_large_in_list_is_not_a_member_limit() {
    let input = json!({"tags": (0..50).collect::<Vec<_>>()});

    let result = parse_filters(&input, &schema(), ParserLimits::default().with_max_operations(2));
    assert!(result.unwrap().is_some());
}

#[test]
fn test_limits_are_per_call() {
    let limits = ParserLimits::new(2, 3);
    let input = json!({"field1": 1, "field2": 2});

    for _ in 0..5 {
        assert!(parse_filters(&input, &schema(), limits).is_ok());
    }
}

#[test]
fn test_flattened_combinators_count_once() {
    // Flattens to a single `$or` over three leaves: four nodes
    let input = json!({
        "$or": [
            {"$or": [{"field1": 1}, {"field2": 2}]},
            {"field3": 3}
        ]
    });

    let filter = parse_filters(&input, &schema(), ParserLimits::default().with_max_operations(4))
        .unwrap()
        .unwrap();
    assert_eq!(filter.children().map(<[_]>::len), Some(3));

    let result = parse_filters(&input, &schema(), ParserLimits::default().with_max_operations(3));
    assert_eq!(
        result,
        Err(FilterError::Limit(LimitError::TooManyOperations { max: 3 }))
    );
}

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_parser_shared_across_threads() {
    assert_send_sync::<FilterParser<'static, HashSet<String>>>();

    let schema = schema();
    let parser = FilterParser::new(&schema).with_limits(ParserLimits::default().with_max_depth(2));
    let inputs = [
        json!({"field1": 1, "$or": [{"field2": 2}, {"field3": 3}]}),
        json!({"nope": 1, "$or": [{"field2": "x"}, "bad"]}),
        nested(3),
    ];

    let expected: Vec<ParseResult> = inputs.iter().map(|input| parser.parse(input)).collect();
    assert!(matches!(expected[0], Ok(Some(_))));
    assert!(matches!(expected[1], Err(FilterError::Validation(_))));
    assert_eq!(
        expected[2],
        Err(FilterError::Limit(LimitError::NestingTooDeep { max: 2 }))
    );

    thread::scope(|scope| {
        let handles = (0..8)
            .map(|worker| {
                let parser = &parser;
                let inputs = &inputs;
                scope.spawn(move || {
                    (0..60)
                        .map(|round| {
                            let index = (worker + round) % inputs.len();
                            (index, parser.parse(&inputs[index]))
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect::<Vec<_>>();

        for handle in handles {
            for (index, result) in handle.join().unwrap() {
                assert_eq!(result, expected[index], "input {index}");
            }
        }
    });
}
