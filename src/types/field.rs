//! Field-level execution types: step metadata, resolver values and the
//! resolver trait itself.

use std::fmt;

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;

/// Reference to a schema type, possibly wrapped in list / non-null
/// modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn non_null(inner: TypeRef) -> Self {
        TypeRef::NonNull(Box::new(inner))
    }

    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    /// Strip a single non-null modifier, if present.
    pub fn unwrap_non_null(&self) -> &TypeRef {
        match self {
            TypeRef::NonNull(inner) => inner,
            other => other,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::List(inner) => write!(f, "[{inner}]"),
            TypeRef::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// One step of a response path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Field(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "{i}"),
            PathSegment::Field(name) => f.write_str(name),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// Position of a field in the response tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultPath(Vec<PathSegment>);

impl ResultPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Child path for a field selected below this one.
    pub fn field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name.into()));
        Self(segments)
    }

    /// Child path for a list element below this one.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        Self(segments)
    }

    /// Name of the last segment; empty at the root.
    pub fn segment_name(&self) -> String {
        self.0.last().map(ToString::to_string).unwrap_or_default()
    }

    /// The path in response form, as carried by [`ExecutionError::path`](super::ExecutionError).
    pub fn to_response_path(&self) -> Vec<Value> {
        self.0
            .iter()
            .map(|segment| match segment {
                PathSegment::Index(i) => Value::from(*i),
                PathSegment::Field(name) => Value::from(name.as_str()),
            })
            .collect()
    }
}

impl<S: Into<PathSegment>> FromIterator<S> for ResultPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ResultPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Where a resolver invocation sits in the execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionStepInfo {
    /// Type declaring the field being resolved.
    pub parent_type: TypeRef,
    pub path: ResultPath,
}

impl ExecutionStepInfo {
    pub fn new(parent_type: TypeRef, path: ResultPath) -> Self {
        Self { parent_type, path }
    }
}

/// What the engine knows about a field before its resolver is wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFetchParameters {
    pub step_info: ExecutionStepInfo,
    /// Set for resolvers that run no user logic (property pass-through).
    #[serde(default)]
    pub trivial: bool,
}

impl FieldFetchParameters {
    pub fn new(step_info: ExecutionStepInfo) -> Self {
        Self {
            step_info,
            trivial: false,
        }
    }

    pub fn trivial(mut self, trivial: bool) -> Self {
        self.trivial = trivial;
        self
    }
}

/// Input handed to a resolver on each invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEnvironment {
    pub step_info: ExecutionStepInfo,
    pub arguments: Map<String, Value>,
    /// Value resolved for the parent field.
    pub source: Option<Value>,
}

impl FieldEnvironment {
    pub fn new(step_info: ExecutionStepInfo) -> Self {
        Self {
            step_info,
            arguments: Map::new(),
            source: None,
        }
    }

    pub fn argument(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn source(mut self, source: Value) -> Self {
        self.source = Some(source);
        self
    }
}

/// Value produced by a resolver: available now, or once a future settles.
pub enum FieldValue {
    Ready(Value),
    Deferred(BoxFuture<'static, Result<Value>>),
}

impl FieldValue {
    pub fn ready(value: impl Into<Value>) -> Self {
        FieldValue::Ready(value.into())
    }

    pub fn deferred<F>(future: F) -> Self
    where
        F: Future<Output = Result<Value>> + Send + 'static,
    {
        FieldValue::Deferred(Box::pin(future))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, FieldValue::Deferred(_))
    }

    /// Wait for the value, whichever shape it has.
    pub async fn resolve(self) -> Result<Value> {
        match self {
            FieldValue::Ready(value) => Ok(value),
            FieldValue::Deferred(future) => future.await,
        }
    }
}

impl fmt::Debug for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            FieldValue::Deferred(_) => f.debug_tuple("Deferred").finish_non_exhaustive(),
        }
    }
}

/// A field resolver, as registered with the engine.
///
/// Returning `Err` signals a synchronous failure; a deferred value may
/// still settle with an error later.
pub trait FieldResolver: Send + Sync {
    fn resolve(&self, env: &FieldEnvironment) -> Result<FieldValue>;
}

impl<F> FieldResolver for F
where
    F: Fn(&FieldEnvironment) -> Result<FieldValue> + Send + Sync,
{
    fn resolve(&self, env: &FieldEnvironment) -> Result<FieldValue> {
        self(env)
    }
}
