//! gql-metrics - low-cardinality metrics for GraphQL execution
//!
//! This crate plugs into a GraphQL engine's instrumentation hooks and emits
//! per-request and per-resolver metrics through the [`metrics`] facade.
//! Error information is folded into a bounded set of tags: list indices in
//! error paths collapse to a placeholder and duplicate errors from batched
//! resolvers count once.
//!
//! Consumers install their own `metrics` recorder; without one, every
//! emission is a no-op.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use gql_metrics::instrumentation::{Instrumentation, execute};
//! use gql_metrics::types::{
//!     ExecutionParameters, ExecutionResult, ExecutionStepInfo, FieldEnvironment,
//!     FieldFetchParameters, FieldResolver, FieldValue, ResultPath, TypeRef,
//! };
//! use gql_metrics::MetricsConfig;
//! use serde_json::json;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> gql_metrics::Result<()> {
//! let instrumentation = MetricsConfig::default()
//!     .instrumentation()
//!     .expect("enabled by default");
//!
//! let step = ExecutionStepInfo::new(TypeRef::named("Query"), ResultPath::root().field("hello"));
//! let hello: Arc<dyn FieldResolver> =
//!     Arc::new(|_env: &FieldEnvironment| -> gql_metrics::Result<FieldValue> {
//!         Ok(FieldValue::ready("world"))
//!     });
//! let hello = instrumentation.instrument_field_resolver(hello, &FieldFetchParameters::new(step.clone()));
//!
//! let params = ExecutionParameters::new("{ hello }");
//! let result = execute(&instrumentation, &params, async {
//!     let value = hello.resolve(&FieldEnvironment::new(step))?.resolve().await?;
//!     Ok::<_, gql_metrics::GqlMetricsError>(ExecutionResult::new(json!({ "hello": value })))
//! })
//! .await?;
//! assert!(!result.has_errors());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod instrumentation;
pub mod tags;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use config::{AutoTimeConfig, MetricsConfig};
pub use error::{GqlMetricsError, Result};
pub use instrumentation::{Instrumentation, MetricsInstrumentation};
pub use tags::{DefaultTagsProvider, TagsProvider};
