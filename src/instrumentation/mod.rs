//! Engine-facing instrumentation hooks.
//!
//! A GraphQL engine drives an [`Instrumentation`] through the lifecycle of
//! each request:
//!
//! ```text
//! create_state ─► begin_execution ─► (resolvers run, each wrapped by
//!                                     instrument_field_resolver)
//!                                  ─► execution_completed
//!                                  ─► instrument_execution_result
//! ```
//!
//! [`execute`] runs that sequence around an async request body, for engines
//! that do not have hook points of their own.

mod metrics_instrumentation;
mod resolver;
mod state;

use std::sync::Arc;

use async_trait::async_trait;

use crate::types::{ExecutionParameters, ExecutionResult, FieldFetchParameters, FieldResolver};
use crate::{GqlMetricsError, Result};

pub use metrics_instrumentation::MetricsInstrumentation;
pub use resolver::{FieldTimer, InstrumentedResolver, TimedResolution};
pub use state::{MetricsInstrumentationState, RequestPhase, TimerSample};

/// Hooks invoked by the engine during request execution.
///
/// All hooks but [`create_state`](Self::create_state) default to no-ops.
#[async_trait]
pub trait Instrumentation: Send + Sync {
    /// Per-request state, threaded by `&mut` through the request hooks.
    type State: Send;

    fn create_state(&self) -> Self::State;

    /// Request execution is about to start.
    fn begin_execution(&self, _params: &ExecutionParameters, _state: &mut Self::State) {}

    /// Request execution finished, successfully or not. Called exactly once
    /// per request; `exception` is set when the engine aborted.
    fn execution_completed(
        &self,
        _params: &ExecutionParameters,
        _state: &mut Self::State,
        _result: &ExecutionResult,
        _exception: Option<&GqlMetricsError>,
    ) {
    }

    /// Post-processing of the finalized result.
    async fn instrument_execution_result(
        &self,
        _params: &ExecutionParameters,
        result: ExecutionResult,
    ) -> ExecutionResult {
        result
    }

    /// Wrap a resolver before the engine invokes it.
    fn instrument_field_resolver(
        &self,
        resolver: Arc<dyn FieldResolver>,
        _params: &FieldFetchParameters,
    ) -> Arc<dyn FieldResolver> {
        resolver
    }
}

/// Run `body` as one request, driving `instrumentation` through its hooks.
///
/// On `Err` the completion hook receives an empty result and the error,
/// which is then returned unchanged; the result hook is skipped.
pub async fn execute<I, F>(
    instrumentation: &I,
    params: &ExecutionParameters,
    body: F,
) -> Result<ExecutionResult>
where
    I: Instrumentation + ?Sized,
    F: Future<Output = Result<ExecutionResult>>,
{
    let mut state = instrumentation.create_state();
    instrumentation.begin_execution(params, &mut state);

    match body.await {
        Ok(result) => {
            instrumentation.execution_completed(params, &mut state, &result, None);
            Ok(instrumentation
                .instrument_execution_result(params, result)
                .await)
        }
        Err(err) => {
            instrumentation.execution_completed(
                params,
                &mut state,
                &ExecutionResult::default(),
                Some(&err),
            );
            Err(err)
        }
    }
}
