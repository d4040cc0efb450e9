//! Tag derivation: error sanitization, resolver identity and the pluggable
//! [`TagsProvider`].

mod field;
mod provider;
mod sanitize;

pub use field::{INSTRUMENTATION_IGNORES, field_tag, should_ignore};
pub use provider::{DefaultTagsProvider, TagsProvider, outcome_tags};
pub use sanitize::{
    DEFAULT_ERROR_DETAIL, DEFAULT_ERROR_TYPE, ErrorTags, NUMBER_SEGMENT, SanitizedErrors,
    normalize_segment, path_signature, sanitize_error_paths, sanitize_result,
};
