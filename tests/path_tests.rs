use proptest::prelude::*;
use screen_keys::path::context::{PathContext, identifiers};
use screen_keys::path::identifier::{Identifier, derive};
use screen_keys::path::key_path::{KeyPath, PathSegment};
use screen_keys::path::type_name::TypeName;

fn seg(field: &str, declaring: &str) -> PathSegment {
    PathSegment::new(field, TypeName::parse(declaring))
}

fn ids(paths: &[KeyPath]) -> Vec<String> {
    identifiers(paths).into_iter().map(String::from).collect()
}

// ============================================================================
// Type names
// ============================================================================

#[test]
fn type_name_strips_module_path() {
    let name = TypeName::parse("my_app::screens::Listing");
    assert_eq!(name.display_name(), "Listing");
    assert_eq!(name.depth(), 1);
    assert!(!name.is_nested());
}

#[test]
fn type_name_keeps_nesting_chain() {
    let name = TypeName::parse("my_app::UserList.Content");
    assert_eq!(name.components(), ["UserList", "Content"]);
    assert_eq!(name.simple_name(), "Content");
    assert!(name.is_nested());
    assert_eq!(name.to_string(), "UserList.Content");
}

#[test]
fn type_name_without_module_is_unchanged() {
    assert_eq!(TypeName::parse("A.B.C").depth(), 3);
    assert_eq!(TypeName::parse("Row"), TypeName::from("crate::Row"));
}

// ============================================================================
// Identifier derivation
// ============================================================================

#[test]
fn derive_joins_root_and_fields() {
    let root = TypeName::parse("UserList.Content");
    let id = derive(&root, &[seg("users", "UserList.Content")], Some("7"));
    assert_eq!(id.as_str(), "UserList.Content.users[7]");
}

#[test]
fn derive_identity_is_bare_type_name() {
    let path = KeyPath::identity(TypeName::parse("Listing"));
    assert!(path.is_identity());
    assert_eq!(path.identifier().as_str(), "Listing");
}

#[test]
fn key_path_append_extends_without_mutating() {
    let base = KeyPath::identity(TypeName::parse("Listing"));
    let items = base.append(seg("items", "Listing"));
    let title = items.append(seg("title", "Row"));

    assert_eq!(base.segments().len(), 0);
    assert_eq!(items.identifier().as_str(), "Listing.items");
    assert_eq!(title.identifier().as_str(), "Listing.items.title");
    assert_eq!(items.item_identifier("Gamma").as_str(), "Listing.items[Gamma]");
    assert_eq!(format!("{}", items), "\\Listing.items");
}

#[test]
fn identifier_split_separates_discriminator() {
    assert_eq!(
        Identifier::new("Listing.items[Gamma]").split(),
        ("Listing.items", Some("Gamma"))
    );
    assert_eq!(Identifier::new("Listing.items").split(), ("Listing.items", None));
    assert_eq!(
        Identifier::new("Listing.items").with_item("3").as_str(),
        "Listing.items[3]"
    );
}

#[test]
fn prefix_match_ignores_ascii_case() {
    assert!(Identifier::has_prefix("listing.ITEMS[1]", "Listing.items"));
    assert!(Identifier::has_prefix("Listing.items", "Listing.items"));
    assert!(!Identifier::has_prefix("Listing.item", "Listing.items"));
    assert!(!Identifier::has_prefix("Other.items", "Listing.items"));
}

// ============================================================================
// Path context flattening
// ============================================================================

#[test]
fn entering_top_level_type_restarts_from_its_identity() {
    let root = PathContext::root(TypeName::parse("Listing"));
    let descent = root.enter(&seg("header", "Listing"), &TypeName::parse("Header"));

    assert_eq!(ids(&descent.candidates), ["Listing.header"]);
    assert_eq!(ids(descent.context.paths()), ["Header"]);

    let caption = descent.context.extend(&seg("caption", "Header"));
    assert_eq!(ids(&caption), ["Header.caption"]);
}

#[test]
fn entering_nested_type_keeps_ancestor_chain() {
    let root = PathContext::root(TypeName::parse("UserList"));
    let descent = root.enter(&seg("content", "UserList"), &TypeName::parse("UserList.Content"));

    assert_eq!(ids(descent.context.paths()), ["UserList.content", "UserList.Content"]);

    let title = descent.context.extend(&seg("title", "UserList.Content"));
    assert_eq!(ids(&title), ["UserList.content.title", "UserList.Content.title"]);
}

#[test]
fn nested_chain_grows_through_two_levels() {
    let root = PathContext::root(TypeName::parse("A"));
    let b = root.enter(&seg("b", "A"), &TypeName::parse("A.B"));
    let c = b.context.enter(&seg("c", "A.B"), &TypeName::parse("A.B.C"));

    assert_eq!(ids(&c.candidates), ["A.b.c", "A.B.c"]);
    assert_eq!(ids(c.context.paths()), ["A.b.c", "A.B.c", "A.B.C"]);
}

#[test]
fn top_level_type_below_nested_type_collapses_again() {
    let root = PathContext::root(TypeName::parse("UserList"));
    let content = root.enter(&seg("content", "UserList"), &TypeName::parse("UserList.Content"));
    let row = content.context.enter(&seg("row", "UserList.Content"), &TypeName::parse("Row"));

    assert_eq!(ids(&row.candidates), ["UserList.content.row", "UserList.Content.row"]);
    assert_eq!(ids(row.context.paths()), ["Row"]);
}

#[test]
fn rebind_forgets_accumulated_paths() {
    let context = PathContext::rebind(&TypeName::parse("Row"));
    assert_eq!(ids(context.paths()), ["Row"]);
}

// ============================================================================
// Properties
// ============================================================================

fn field_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z_][a-zA-Z0-9_]{0,8}", 1..6)
}

fn path_of(root: &str, fields: &[String]) -> KeyPath {
    let root = TypeName::parse(root);
    let segments = fields
        .iter()
        .map(|f| PathSegment::new(f.clone(), root.clone()))
        .collect();
    KeyPath::new(root, segments)
}

proptest! {
    #[test]
    fn distinct_paths_give_distinct_identifiers(a in field_names(), b in field_names()) {
        prop_assume!(a != b);
        prop_assert_ne!(path_of("Root", &a).identifier(), path_of("Root", &b).identifier());
    }

    #[test]
    fn derivation_is_deterministic(fields in field_names(), item in proptest::option::of("[A-Za-z0-9]{1,6}")) {
        let path = path_of("Root.Inner", &fields);
        let first = match &item {
            Some(item) => path.item_identifier(item),
            None => path.identifier(),
        };
        let second = match &item {
            Some(item) => path_of("Root.Inner", &fields).item_identifier(item),
            None => path_of("Root.Inner", &fields).identifier(),
        };
        prop_assert_eq!(first, second);
    }

    #[test]
    fn distinct_discriminators_give_distinct_identifiers(fields in field_names(), a in "[a-z0-9]{1,6}", b in "[a-z0-9]{1,6}") {
        prop_assume!(a != b);
        let path = path_of("Root", &fields);
        prop_assert_ne!(path.item_identifier(&a), path.item_identifier(&b));
    }

    #[test]
    fn item_identifier_starts_with_list_prefix(fields in field_names(), item in "[A-Za-z0-9]{1,6}") {
        let path = path_of("Root", &fields);
        let prefix = path.identifier();
        let item_id = path.item_identifier(&item);
        prop_assert!(Identifier::has_prefix(item_id.as_str(), prefix.as_str()));
        prop_assert_eq!(item_id.split(), (prefix.as_str(), Some(item.as_str())));
    }
}
