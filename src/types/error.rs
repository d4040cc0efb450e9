//! GraphQL error shapes as reported in an execution result.
//!
//! Two shapes reach the instrumentation: validation errors, produced before
//! execution with a structured query path and an explicit classification,
//! and execution errors, produced by resolvers with a free-form response
//! path and their classification carried in `extensions`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Classification of a validation failure.
///
/// Displayed as the variant name, which is what ends up in the
/// `gql.errorType` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ValidationErrorType {
    DefaultForNonNullArgument,
    WrongType,
    UnknownType,
    SubselectionRequired,
    SubselectionNotAllowed,
    InvalidSyntax,
    BadValueForDefaultArg,
    FieldUndefined,
    InlineFragmentTypeConditionInvalid,
    FragmentTypeConditionInvalid,
    UnknownArgument,
    UndefinedFragment,
    NonInputTypeOnVariable,
    UnusedFragment,
    MissingFieldArgument,
    MissingDirectiveArgument,
    VariableTypeMismatch,
    UnknownDirective,
    MisplacedDirective,
    UndefinedVariable,
    UnusedVariable,
    FragmentCycle,
    FieldsConflict,
    InvalidFragmentType,
    LoneAnonymousOperationViolation,
    NullValueForNonNullArgument,
    DuplicateFragmentName,
    DuplicateOperationName,
    DuplicateArgumentNames,
    DuplicateVariableName,
    SubscriptionMultipleRootFields,
}

impl fmt::Display for ValidationErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Debug output of a fieldless variant is exactly its name.
        fmt::Debug::fmt(self, f)
    }
}

/// Error raised while validating a document against the schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub message: String,
    /// Field names leading to the offending selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_path: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ValidationErrorType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn query_path<I, S>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query_path = Some(path.into_iter().map(Into::into).collect());
        self
    }

    pub fn error_type(mut self, error_type: ValidationErrorType) -> Self {
        self.error_type = Some(error_type);
        self
    }

    pub fn extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Error raised while executing resolvers.
///
/// `path` follows the response shape: field names as JSON strings, list
/// positions as JSON numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl ExecutionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn path<I, V>(mut self, path: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.path = Some(path.into_iter().map(Into::into).collect());
        self
    }

    pub fn extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }
}

/// One entry of an execution result's `errors` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphQLError {
    Validation(ValidationError),
    Execution(ExecutionError),
}

impl GraphQLError {
    pub fn message(&self) -> &str {
        match self {
            GraphQLError::Validation(e) => &e.message,
            GraphQLError::Execution(e) => &e.message,
        }
    }

    pub fn extensions(&self) -> Option<&Map<String, Value>> {
        match self {
            GraphQLError::Validation(e) => e.extensions.as_ref(),
            GraphQLError::Execution(e) => e.extensions.as_ref(),
        }
    }
}

impl From<ValidationError> for GraphQLError {
    fn from(err: ValidationError) -> Self {
        GraphQLError::Validation(err)
    }
}

impl From<ExecutionError> for GraphQLError {
    fn from(err: ExecutionError) -> Self {
        GraphQLError::Execution(err)
    }
}
