use gql_metrics::tags::{field_tag, should_ignore};
use gql_metrics::types::{ExecutionStepInfo, ResultPath, TypeRef};

fn step(parent: TypeRef, path: ResultPath) -> ExecutionStepInfo {
    ExecutionStepInfo::new(parent, path)
}

#[test]
fn tag_is_parent_type_and_field_name() {
    let info = step(TypeRef::named("Query"), ResultPath::root().field("hello"));
    assert_eq!(field_tag(&info), "Query.hello");
}

#[test]
fn non_null_parent_is_unwrapped() {
    let info = step(
        TypeRef::non_null(TypeRef::named("Show")),
        ResultPath::root().field("shows").index(2).field("title"),
    );
    assert_eq!(field_tag(&info), "Show.title");
}

#[test]
fn only_one_non_null_level_is_unwrapped() {
    let info = step(
        TypeRef::non_null(TypeRef::list(TypeRef::named("Show"))),
        ResultPath::root().field("title"),
    );
    assert_eq!(field_tag(&info), "[Show].title");
}

#[test]
fn introspection_tags_are_ignored() {
    assert!(should_ignore("Query.__typename"));
    assert!(should_ignore("__Schema.types"));
    assert!(should_ignore("__Type.fields"));
    assert!(!should_ignore("Query.hello"));
    assert!(!should_ignore("Query.typename"));
}

#[test]
fn typename_field_is_ignored_via_tag() {
    let info = step(
        TypeRef::named("Show"),
        ResultPath::root().field("shows").index(0).field("__typename"),
    );
    assert!(should_ignore(&field_tag(&info)));
}

#[test]
fn type_ref_display() {
    let t = TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named("Int"))));
    assert_eq!(t.to_string(), "[Int!]!");
}

#[test]
fn result_path_display_and_segment_name() {
    let path: ResultPath = ["shows"].into_iter().collect();
    let path = path.index(1).field("title");
    assert_eq!(path.to_string(), "/shows/1/title");
    assert_eq!(path.segment_name(), "title");
    assert_eq!(ResultPath::root().segment_name(), "");
}
