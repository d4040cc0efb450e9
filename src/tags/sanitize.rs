//! Error sanitization for metric tags.
//!
//! Raw GraphQL errors carry unbounded data: list indices in their paths,
//! free-form extension values. Tagging metrics with them verbatim would
//! create a new time series per list position. [`sanitize_error_paths`]
//! collapses numeric path segments to a placeholder and keeps one entry
//! per resulting path signature.
//!
//! ```rust
//! use gql_metrics::tags::sanitize_error_paths;
//! use gql_metrics::types::{ExecutionError, GraphQLError};
//! use serde_json::json;
//!
//! let errors: Vec<GraphQLError> = vec![
//!     ExecutionError::new("boom").path([json!("items"), json!(0), json!("price")]).into(),
//!     ExecutionError::new("boom").path([json!("items"), json!(1), json!("price")]).into(),
//! ];
//! let sanitized = sanitize_error_paths(&errors);
//! assert_eq!(sanitized.len(), 1);
//! assert!(sanitized.contains_key(r#"["items","number","price"]"#));
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde_json::{Map, Value};

use crate::types::{ExecutionResult, GraphQLError};

/// Placeholder replacing integer path segments.
pub const NUMBER_SEGMENT: &str = "number";
/// Error type used when an error carries no classification.
pub const DEFAULT_ERROR_TYPE: &str = "";
/// Error detail used when an error carries none.
pub const DEFAULT_ERROR_DETAIL: &str = "none";

const ERROR_TYPE_KEY: &str = "errorType";
const ERROR_DETAIL_KEY: &str = "errorDetail";

/// Classification of one sanitized error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorTags {
    pub error_type: String,
    pub error_detail: String,
}

/// Path signature → tags of the first error seen with that signature.
pub type SanitizedErrors = BTreeMap<String, ErrorTags>;

/// Sanitize the errors of a finished execution.
pub fn sanitize_result(result: &ExecutionResult) -> SanitizedErrors {
    sanitize_error_paths(&result.errors)
}

/// Build the deduplicated signature → tags map for `errors`.
///
/// The first error with a given signature wins; later ones are dropped, not
/// merged. Missing paths, types and details fall back to defaults, so this
/// never fails.
pub fn sanitize_error_paths(errors: &[GraphQLError]) -> SanitizedErrors {
    let mut deduped = SanitizedErrors::new();
    for error in errors {
        let signature = match error {
            GraphQLError::Validation(e) => {
                let path = e.query_path.as_deref().unwrap_or_default();
                path_signature(path.iter().map(String::as_str))
            }
            GraphQLError::Execution(e) => {
                let path = e.path.as_deref().unwrap_or_default();
                path_signature(path.iter().map(segment_string))
            }
        };

        // batched resolvers report the same failure once per list index
        if let Entry::Vacant(slot) = deduped.entry(signature) {
            slot.insert(error_tags(error));
        }
    }
    deduped
}

/// Normalized signature of a path: integer segments become
/// [`NUMBER_SEGMENT`], then the segments are rendered as a JSON array.
pub fn path_signature<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let normalized = segments
        .into_iter()
        .map(|segment| Value::String(normalize_segment(segment.as_ref()).to_owned()))
        .collect();
    Value::Array(normalized).to_string()
}

/// Replace a segment with [`NUMBER_SEGMENT`] if it parses as a 32-bit
/// integer. Wider numbers are kept verbatim.
pub fn normalize_segment(segment: &str) -> &str {
    if segment.parse::<i32>().is_ok() {
        NUMBER_SEGMENT
    } else {
        segment
    }
}

fn error_tags(error: &GraphQLError) -> ErrorTags {
    let extensions = error.extensions();
    let error_type = match error {
        GraphQLError::Validation(e) => e
            .error_type
            .map(|t| t.to_string())
            .unwrap_or_else(|| DEFAULT_ERROR_TYPE.to_string()),
        GraphQLError::Execution(_) => {
            extension_string(extensions, ERROR_TYPE_KEY, DEFAULT_ERROR_TYPE)
        }
    };
    ErrorTags {
        error_type,
        error_detail: extension_string(extensions, ERROR_DETAIL_KEY, DEFAULT_ERROR_DETAIL),
    }
}

fn extension_string(extensions: Option<&Map<String, Value>>, key: &str, default: &str) -> String {
    match extensions.and_then(|ext| ext.get(key)) {
        None | Some(Value::Null) => default.to_string(),
        Some(value) => segment_string(value),
    }
}

/// String form of a JSON value: strings unquoted, everything else compact
/// JSON.
fn segment_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
