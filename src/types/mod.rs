//! Public types shared between the engine hooks and the tagging logic.

mod error;
mod execution;
mod field;

pub use error::{ExecutionError, GraphQLError, ValidationError, ValidationErrorType};
pub use execution::{ExecutionParameters, ExecutionResult};
pub use field::{
    ExecutionStepInfo, FieldEnvironment, FieldFetchParameters, FieldResolver, FieldValue,
    PathSegment, ResultPath, TypeRef,
};
