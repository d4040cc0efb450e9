use gql_metrics::tags::{
    DEFAULT_ERROR_DETAIL, DEFAULT_ERROR_TYPE, ErrorTags, path_signature, sanitize_error_paths,
    sanitize_result,
};
use gql_metrics::types::{
    ExecutionError, ExecutionResult, GraphQLError, ResultPath, ValidationError,
    ValidationErrorType,
};
use serde_json::json;

fn execution_error(path: serde_json::Value, error_type: &str) -> GraphQLError {
    let segments = path.as_array().cloned().unwrap_or_default();
    ExecutionError::new("failed")
        .path(segments)
        .extension("errorType", error_type)
        .into()
}

// ============================================================================
// Deduplication
// ============================================================================

#[test]
fn batched_errors_collapse_to_one_entry() {
    let errors = vec![
        execution_error(json!(["items", 0, "price"]), "NOT_FOUND"),
        execution_error(json!(["items", 1, "price"]), "NOT_FOUND"),
    ];

    let sanitized = sanitize_error_paths(&errors);

    assert_eq!(sanitized.len(), 1);
    let entry = &sanitized[&path_signature(["items", "number", "price"])];
    assert_eq!(entry.error_type, "NOT_FOUND");
    assert_eq!(entry.error_detail, "none");
}

#[test]
fn first_occurrence_wins() {
    let errors: Vec<GraphQLError> = vec![
        ExecutionError::new("first")
            .path([json!("user"), json!(3)])
            .extension("errorType", "UNAUTHENTICATED")
            .extension("errorDetail", "EXPIRED_TOKEN")
            .into(),
        ExecutionError::new("second")
            .path([json!("user"), json!(7)])
            .extension("errorType", "INTERNAL")
            .extension("errorDetail", "SERVICE_ERROR")
            .into(),
    ];

    let sanitized = sanitize_error_paths(&errors);

    assert_eq!(
        sanitized.get(r#"["user","number"]"#),
        Some(&ErrorTags {
            error_type: "UNAUTHENTICATED".to_string(),
            error_detail: "EXPIRED_TOKEN".to_string(),
        })
    );
}

#[test]
fn distinct_paths_are_kept_apart() {
    let errors = vec![
        execution_error(json!(["items", 0, "price"]), "NOT_FOUND"),
        execution_error(json!(["items", 0, "title"]), "NOT_FOUND"),
        execution_error(json!(["reviews"]), "INTERNAL"),
    ];

    let sanitized = sanitize_error_paths(&errors);

    assert_eq!(sanitized.len(), 3);
    assert!(sanitized.contains_key(r#"["items","number","title"]"#));
    assert_eq!(sanitized[r#"["reviews"]"#].error_type, "INTERNAL");
}

#[test]
fn empty_errors_yield_empty_map() {
    assert!(sanitize_error_paths(&[]).is_empty());
    assert!(sanitize_result(&ExecutionResult::new(json!({"ok": true}))).is_empty());
}

// ============================================================================
// Path normalization
// ============================================================================

#[test]
fn numeric_string_segments_are_normalized() {
    // validation paths are strings only, indices included
    let errors: Vec<GraphQLError> = vec![
        ValidationError::new("bad")
            .query_path(["orders", "42", "title"])
            .into(),
    ];

    let sanitized = sanitize_error_paths(&errors);

    assert!(sanitized.contains_key(r#"["orders","number","title"]"#));
}

#[test]
fn out_of_range_numeric_segments_stay_verbatim() {
    let errors = vec![
        execution_error(json!(["orders", "4294967296", "title"]), "NOT_FOUND"),
        execution_error(json!(["orders", "2147483647", "title"]), "NOT_FOUND"),
    ];

    let sanitized = sanitize_error_paths(&errors);

    assert_eq!(sanitized.len(), 2);
    assert!(sanitized.contains_key(r#"["orders","4294967296","title"]"#));
    assert!(sanitized.contains_key(r#"["orders","number","title"]"#));
}

#[test]
fn response_paths_from_result_path() {
    let path = ResultPath::root().field("items").index(5).field("price");
    let errors: Vec<GraphQLError> = vec![
        ExecutionError::new("failed")
            .path(path.to_response_path())
            .into(),
    ];

    let sanitized = sanitize_error_paths(&errors);

    assert!(sanitized.contains_key(r#"["items","number","price"]"#));
}

#[test]
fn missing_and_empty_paths_share_a_signature() {
    let errors: Vec<GraphQLError> = vec![
        ExecutionError::new("no path")
            .extension("errorType", "INTERNAL")
            .into(),
        ExecutionError::new("empty path")
            .path(Vec::<serde_json::Value>::new())
            .extension("errorType", "BAD_REQUEST")
            .into(),
    ];

    let sanitized = sanitize_error_paths(&errors);

    assert_eq!(sanitized.len(), 1);
    assert_eq!(sanitized["[]"].error_type, "INTERNAL");
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
fn error_without_extensions_uses_defaults() {
    let errors: Vec<GraphQLError> = vec![ExecutionError::new("bare").into()];

    let sanitized = sanitize_error_paths(&errors);
    let entry = &sanitized["[]"];

    assert_eq!(entry.error_type, DEFAULT_ERROR_TYPE);
    assert_eq!(entry.error_type, "");
    assert_eq!(entry.error_detail, DEFAULT_ERROR_DETAIL);
    assert_eq!(entry.error_detail, "none");
}

#[test]
fn validation_error_uses_explicit_type() {
    let errors: Vec<GraphQLError> = vec![
        ValidationError::new("Field 'nope' in type 'Query' is undefined")
            .query_path(["nope"])
            .error_type(ValidationErrorType::FieldUndefined)
            // errorType in extensions is ignored for validation errors
            .extension("errorType", "SHOULD_NOT_BE_USED")
            .extension("errorDetail", "UNKNOWN_FIELD")
            .into(),
    ];

    let sanitized = sanitize_error_paths(&errors);

    assert_eq!(
        sanitized[r#"["nope"]"#],
        ErrorTags {
            error_type: "FieldUndefined".to_string(),
            error_detail: "UNKNOWN_FIELD".to_string(),
        }
    );
}

#[test]
fn validation_error_without_type_or_path() {
    let errors: Vec<GraphQLError> = vec![ValidationError::new("invalid").into()];

    let sanitized = sanitize_error_paths(&errors);

    assert_eq!(sanitized["[]"].error_type, "");
    assert_eq!(sanitized["[]"].error_detail, "none");
}

#[test]
fn errors_deserialize_from_json() {
    let result: ExecutionResult = serde_json::from_value(json!({
        "data": null,
        "errors": [
            {
                "kind": "execution",
                "message": "not found",
                "path": ["items", 0, "price"],
                "extensions": { "errorType": "NOT_FOUND" }
            },
            {
                "kind": "validation",
                "message": "bad",
                "error_type": "InvalidSyntax"
            }
        ]
    }))
    .unwrap();

    let sanitized = sanitize_result(&result);

    assert_eq!(sanitized.len(), 2);
    assert_eq!(sanitized[r#"["items","number","price"]"#].error_type, "NOT_FOUND");
    assert_eq!(sanitized["[]"].error_type, "InvalidSyntax");
}
