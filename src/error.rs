//! gql-metrics error types

/// gql-metrics error types
#[derive(Debug, thiserror::Error)]
pub enum GqlMetricsError {
    /// A field resolver failed. Propagated unchanged through instrumented
    /// resolvers.
    #[error("resolver error: {0}")]
    Resolver(String),

    /// The engine aborted execution of a request.
    #[error("execution error: {0}")]
    Execution(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GqlMetricsError {
    /// Convenience constructor for resolver failures.
    pub fn resolver(message: impl Into<String>) -> Self {
        GqlMetricsError::Resolver(message.into())
    }
}

/// Result type alias for gql-metrics operations
pub type Result<T> = std::result::Result<T, GqlMetricsError>;
