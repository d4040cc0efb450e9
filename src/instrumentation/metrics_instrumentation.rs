//! The metrics-recording [`Instrumentation`].

use std::sync::Arc;

use async_trait::async_trait;
use metrics::Label;
use tracing::{debug, trace};

use super::Instrumentation;
use super::resolver::InstrumentedResolver;
use super::state::MetricsInstrumentationState;
use crate::GqlMetricsError;
use crate::config::AutoTimeConfig;
use crate::tags::{DefaultTagsProvider, TagsProvider, field_tag, sanitize_result, should_ignore};
use crate::telemetry;
use crate::types::{ExecutionParameters, ExecutionResult, FieldFetchParameters, FieldResolver};

/// Records request and resolver metrics through the `metrics` facade.
///
/// Per request:
/// - `gql.query`: request duration, tagged with execution ∪ environment tags
/// - `gql.error`: one increment per distinct sanitized error signature
///
/// Per non-trivial, non-introspection resolver invocation:
/// - `gql.resolver.count`: incremented before the resolver runs
/// - `gql.resolver.time`: duration until the value is available
///
/// ```rust
/// use gql_metrics::instrumentation::MetricsInstrumentation;
/// use gql_metrics::tags::DefaultTagsProvider;
///
/// let instrumentation = MetricsInstrumentation::new(
///     DefaultTagsProvider::new().with_environment_tag("service", "catalog"),
/// );
/// ```
pub struct MetricsInstrumentation<P = DefaultTagsProvider> {
    tags_provider: Arc<P>,
    autotime: AutoTimeConfig,
}

impl<P: TagsProvider> MetricsInstrumentation<P> {
    pub fn new(tags_provider: P) -> Self {
        Self::from_shared(Arc::new(tags_provider))
    }

    /// Use a provider that is shared with other components.
    pub fn from_shared(tags_provider: Arc<P>) -> Self {
        Self {
            tags_provider,
            autotime: AutoTimeConfig::default(),
        }
    }

    pub fn with_autotime(mut self, autotime: AutoTimeConfig) -> Self {
        self.autotime = autotime;
        self
    }

    pub fn tags_provider(&self) -> &P {
        &self.tags_provider
    }

    pub fn autotime(&self) -> &AutoTimeConfig {
        &self.autotime
    }

    /// Execution tags followed by environment tags.
    fn request_labels(
        &self,
        params: &ExecutionParameters,
        result: &ExecutionResult,
        exception: Option<&GqlMetricsError>,
    ) -> Vec<Label> {
        let mut labels = self.tags_provider.execution_tags(params, result, exception);
        labels.extend(self.tags_provider.environment_tags());
        labels
    }
}

impl Default for MetricsInstrumentation<DefaultTagsProvider> {
    fn default() -> Self {
        Self::new(DefaultTagsProvider::default())
    }
}

#[async_trait]
impl<P: TagsProvider + 'static> Instrumentation for MetricsInstrumentation<P> {
    type State = MetricsInstrumentationState;

    fn create_state(&self) -> Self::State {
        MetricsInstrumentationState::new()
    }

    fn begin_execution(&self, _params: &ExecutionParameters, state: &mut Self::State) {
        state.start_timer();
    }

    fn execution_completed(
        &self,
        params: &ExecutionParameters,
        state: &mut Self::State,
        result: &ExecutionResult,
        exception: Option<&GqlMetricsError>,
    ) {
        let Some(sample) = state.complete() else {
            return;
        };
        if !self.autotime.enabled {
            trace!("request timer disabled, dropping sample");
            return;
        }
        let labels = self.request_labels(params, result, exception);
        let elapsed = sample.stop(telemetry::QUERY_TIME, labels);
        trace!(
            operation = params.operation_name.as_deref().unwrap_or(""),
            elapsed_us = elapsed.as_micros() as u64,
            "request time recorded"
        );
    }

    async fn instrument_execution_result(
        &self,
        params: &ExecutionParameters,
        result: ExecutionResult,
    ) -> ExecutionResult {
        let distinct = sanitize_result(&result).len();
        if distinct > 0 {
            // environment ∪ execution, one increment per distinct signature
            let mut labels = self.tags_provider.environment_tags();
            labels.extend(self.tags_provider.execution_tags(params, &result, None));
            metrics::counter!(telemetry::ERRORS_TOTAL, labels).increment(distinct as u64);
            debug!(
                errors = result.errors.len(),
                distinct, "recorded GraphQL errors"
            );
        }
        result
    }

    fn instrument_field_resolver(
        &self,
        resolver: Arc<dyn FieldResolver>,
        params: &FieldFetchParameters,
    ) -> Arc<dyn FieldResolver> {
        if params.trivial {
            return resolver;
        }
        let field = field_tag(&params.step_info);
        if should_ignore(&field) {
            trace!(field = %field, "introspection field not instrumented");
            return resolver;
        }
        Arc::new(InstrumentedResolver::new(
            resolver,
            field,
            params.clone(),
            Arc::clone(&self.tags_provider),
        ))
    }
}
