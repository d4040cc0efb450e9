//! Resolver identity for field-level metrics.

use crate::types::{ExecutionStepInfo, TypeRef};

/// Substrings marking introspection fields, which are never instrumented.
pub const INSTRUMENTATION_IGNORES: &[&str] = &["__typename", "__Schema", "__Type"];

/// Tag identifying the resolver for `step`: `"<ParentType>.<fieldName>"`.
///
/// A non-null parent is unwrapped once to reach the object type.
pub fn field_tag(step: &ExecutionStepInfo) -> String {
    let parent = match step.parent_type.unwrap_non_null() {
        TypeRef::Named(name) => name.clone(),
        wrapped => wrapped.to_string(),
    };
    format!("{parent}.{}", step.path.segment_name())
}

/// Whether a field tag belongs to introspection and should be skipped.
pub fn should_ignore(tag: &str) -> bool {
    INSTRUMENTATION_IGNORES
        .iter()
        .any(|ignored| tag.contains(ignored))
}
