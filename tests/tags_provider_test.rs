use gql_metrics::tags::{DefaultTagsProvider, TagsProvider, outcome_tags};
use gql_metrics::types::{
    ExecutionError, ExecutionParameters, ExecutionResult, ExecutionStepInfo, FieldFetchParameters,
    ResultPath, TypeRef,
};
use gql_metrics::{GqlMetricsError, telemetry};
use metrics::Label;
use serde_json::json;

fn pairs(labels: &[Label]) -> Vec<(String, String)> {
    labels
        .iter()
        .map(|l| (l.key().to_string(), l.value().to_string()))
        .collect()
}

fn not_found(index: u64, field: &str) -> ExecutionError {
    ExecutionError::new("not found")
        .path([json!("items"), json!(index), json!(field)])
        .extension("errorType", "NOT_FOUND")
}

#[test]
fn success_yields_single_outcome_tag() {
    let provider = DefaultTagsProvider::new();
    let result = ExecutionResult::new(json!({"hello": "world"}));

    let tags = provider.execution_tags(&ExecutionParameters::new("{ hello }"), &result, None);

    assert_eq!(tags, vec![Label::new(telemetry::OUTCOME, telemetry::OUTCOME_SUCCESS)]);
}

#[test]
fn errors_yield_outcome_plus_triple_per_signature() {
    let result = ExecutionResult::default()
        .error(not_found(0, "price"))
        .error(not_found(1, "price"))
        .error(not_found(0, "title"));

    let tags = pairs(&outcome_tags(&result));

    assert_eq!(tags.len(), 1 + 2 * 3);
    assert_eq!(tags[0], ("outcome".to_string(), "ERROR".to_string()));
    assert!(tags.contains(&(
        "gql.path".to_string(),
        r#"["items","number","price"]"#.to_string()
    )));
    assert!(tags.contains(&(
        "gql.path".to_string(),
        r#"["items","number","title"]"#.to_string()
    )));
    assert_eq!(
        tags.iter()
            .filter(|(k, v)| k == "gql.errorType" && v == "NOT_FOUND")
            .count(),
        2
    );
    assert_eq!(
        tags.iter()
            .filter(|(k, v)| k == "gql.errorDetail" && v == "none")
            .count(),
        2
    );
}

#[test]
fn exception_without_errors_is_a_success_outcome() {
    // the outcome follows the result's errors, not the engine exception
    let provider = DefaultTagsProvider::new();
    let err = GqlMetricsError::Execution("engine aborted".into());

    let tags = provider.execution_tags(
        &ExecutionParameters::new("{ hello }"),
        &ExecutionResult::default(),
        Some(&err),
    );

    assert_eq!(tags, vec![Label::new("outcome", "SUCCESS")]);
}

#[test]
fn exception_with_errors_keeps_error_triples() {
    let err = GqlMetricsError::Execution("engine aborted".into());
    let result = ExecutionResult::default().error(not_found(0, "price"));

    let tags = pairs(&DefaultTagsProvider::new().execution_tags(
        &ExecutionParameters::new("{ items { price } }"),
        &result,
        Some(&err),
    ));

    assert_eq!(tags.len(), 4);
    assert_eq!(tags[0], ("outcome".to_string(), "ERROR".to_string()));
}

#[test]
fn default_provider_environment_tags() {
    let provider = DefaultTagsProvider::new()
        .with_environment_tag("service", "catalog")
        .with_environment_tags([("region", "eu")]);

    assert_eq!(
        pairs(&provider.environment_tags()),
        vec![
            ("service".to_string(), "catalog".to_string()),
            ("region".to_string(), "eu".to_string()),
        ]
    );
    let params = FieldFetchParameters::new(ExecutionStepInfo::new(
        TypeRef::named("Query"),
        ResultPath::root().field("hello"),
    ));
    assert!(provider.field_fetch_tags(&params).is_empty());
}

struct ClientTags;

impl TagsProvider for ClientTags {
    fn execution_tags(
        &self,
        params: &ExecutionParameters,
        result: &ExecutionResult,
        _exception: Option<&GqlMetricsError>,
    ) -> Vec<Label> {
        let mut tags = outcome_tags(result);
        if let Some(name) = &params.operation_name {
            tags.push(Label::new("operation", name.clone()));
        }
        tags
    }
}

#[test]
fn custom_provider_extends_execution_tags() {
    let provider = ClientTags;
    let params = ExecutionParameters::new("query Shows { shows { title } }").operation_name("Shows");

    let tags = pairs(&provider.execution_tags(&params, &ExecutionResult::default(), None));

    assert_eq!(
        tags,
        vec![
            ("outcome".to_string(), "SUCCESS".to_string()),
            ("operation".to_string(), "Shows".to_string()),
        ]
    );
    assert!(provider.environment_tags().is_empty());
}
