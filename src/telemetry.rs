//! Telemetry metric and label name constants.
//!
//! Centralised metric names for GraphQL instrumentation. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! Names follow the dotted `gql.*` scheme so dashboards built against other
//! GraphQL servers keep working. Timers are histograms recorded in seconds.
//!
//! # Common labels
//!
//! - `outcome`: request outcome: "SUCCESS" or "ERROR"
//! - `gql.field`: resolver identity, `"ParentType.fieldName"`
//! - `gql.errorType` / `gql.path` / `gql.errorDetail`: sanitized error tags

use metrics::Unit;

/// Request duration in seconds, one observation per completed request.
///
/// Labels: `outcome`, sanitized error tags, environment tags.
pub const QUERY_TIME: &str = "gql.query";

/// Total distinct errors per request, one increment per sanitized path
/// signature.
///
/// Labels: `outcome`, sanitized error tags, environment tags.
pub const ERRORS_TOTAL: &str = "gql.error";

/// Total resolver invocations.
///
/// Labels: `gql.field`, field-fetch tags, environment tags.
pub const RESOLVER_COUNT: &str = "gql.resolver.count";

/// Resolver duration in seconds, measured until the value is available.
///
/// Labels: `gql.field`, field-fetch tags, environment tags.
pub const RESOLVER_TIME: &str = "gql.resolver.time";

/// Outcome label key.
pub const OUTCOME: &str = "outcome";
/// Outcome label value for requests without errors.
pub const OUTCOME_SUCCESS: &str = "SUCCESS";
/// Outcome label value for requests with at least one error.
pub const OUTCOME_ERROR: &str = "ERROR";

pub const TAG_FIELD: &str = "gql.field";
pub const TAG_ERROR_TYPE: &str = "gql.errorType";
pub const TAG_PATH: &str = "gql.path";
pub const TAG_ERROR_DETAIL: &str = "gql.errorDetail";

/// Register units and descriptions for every metric emitted by this crate.
///
/// Optional: recorders accept observations for undescribed metrics too.
pub fn describe_metrics() {
    metrics::describe_histogram!(QUERY_TIME, Unit::Seconds, "GraphQL request duration");
    metrics::describe_counter!(
        ERRORS_TOTAL,
        Unit::Count,
        "distinct GraphQL errors per request"
    );
    metrics::describe_counter!(RESOLVER_COUNT, Unit::Count, "field resolver invocations");
    metrics::describe_histogram!(
        RESOLVER_TIME,
        Unit::Seconds,
        "field resolver duration, including deferred completion"
    );
}
