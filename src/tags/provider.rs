//! Tag providers.
//!
//! [`TagsProvider`] is the single extension point of the instrumentation:
//! embedders implement it to attach their own tags (deployment, client
//! name, ...) without touching the timing and counting logic. Every method
//! has a default, so an implementation only overrides what it needs.
//!
//! # Example
//!
//! ```rust
//! use gql_metrics::tags::TagsProvider;
//! use gql_metrics::types::FieldFetchParameters;
//! use metrics::Label;
//!
//! struct RegionTags;
//!
//! impl TagsProvider for RegionTags {
//!     fn environment_tags(&self) -> Vec<Label> {
//!         vec![Label::new("region", "eu-west-1")]
//!     }
//!
//!     fn field_fetch_tags(&self, params: &FieldFetchParameters) -> Vec<Label> {
//!         let depth = params.step_info.path.segments().len();
//!         vec![Label::new("depth", depth.to_string())]
//!     }
//! }
//! ```

use std::sync::Arc;

use metrics::Label;

use super::sanitize::sanitize_result;
use crate::GqlMetricsError;
use crate::telemetry;
use crate::types::{ExecutionParameters, ExecutionResult, FieldFetchParameters};

/// Source of the tags attached to every metric emission.
pub trait TagsProvider: Send + Sync {
    /// Tags describing the outcome of a finished request.
    ///
    /// Default: [`outcome_tags`], which looks at the result's errors only;
    /// `exception` is available to providers that want to tag aborts.
    fn execution_tags(
        &self,
        _params: &ExecutionParameters,
        result: &ExecutionResult,
        _exception: Option<&GqlMetricsError>,
    ) -> Vec<Label> {
        outcome_tags(result)
    }

    /// Static tags shared by every emission.
    fn environment_tags(&self) -> Vec<Label> {
        Vec::new()
    }

    /// Extra tags for one resolver invocation.
    fn field_fetch_tags(&self, _params: &FieldFetchParameters) -> Vec<Label> {
        Vec::new()
    }
}

impl<T: TagsProvider + ?Sized> TagsProvider for Arc<T> {
    fn execution_tags(
        &self,
        params: &ExecutionParameters,
        result: &ExecutionResult,
        exception: Option<&GqlMetricsError>,
    ) -> Vec<Label> {
        (**self).execution_tags(params, result, exception)
    }

    fn environment_tags(&self) -> Vec<Label> {
        (**self).environment_tags()
    }

    fn field_fetch_tags(&self, params: &FieldFetchParameters) -> Vec<Label> {
        (**self).field_fetch_tags(params)
    }
}

/// Outcome and sanitized error tags for a finished request.
///
/// `outcome=SUCCESS` when the result has no errors; otherwise
/// `outcome=ERROR` followed by one error-type / path / detail triple per
/// sanitized error signature.
pub fn outcome_tags(result: &ExecutionResult) -> Vec<Label> {
    if !result.has_errors() {
        return vec![Label::new(telemetry::OUTCOME, telemetry::OUTCOME_SUCCESS)];
    }

    sanitize_result(result).into_iter().fold(
        vec![Label::new(telemetry::OUTCOME, telemetry::OUTCOME_ERROR)],
        |mut tags, (path, error)| {
            tags.push(Label::new(telemetry::TAG_ERROR_TYPE, error.error_type));
            tags.push(Label::new(telemetry::TAG_PATH, path));
            tags.push(Label::new(telemetry::TAG_ERROR_DETAIL, error.error_detail));
            tags
        },
    )
}

/// Provider with the default outcome tagging and a fixed set of
/// environment tags.
#[derive(Debug, Clone, Default)]
pub struct DefaultTagsProvider {
    environment: Vec<Label>,
}

impl DefaultTagsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag attached to every emission.
    pub fn with_environment_tag(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let (key, value): (String, String) = (key.into(), value.into());
        self.environment.push(Label::new(key, value));
        self
    }

    pub fn with_environment_tags<I, K, V>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in tags {
            self = self.with_environment_tag(key, value);
        }
        self
    }
}

impl TagsProvider for DefaultTagsProvider {
    fn environment_tags(&self) -> Vec<Label> {
        self.environment.clone()
    }
}
