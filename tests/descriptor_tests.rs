mod common;

use common::{Header, Listing, Row, SearchBox, UserList, UserListContent, UserListFooter};
use screen_keys::descriptor::{
    Capabilities, Capability, Descriptor, DescriptorError, DescriptorTree, FieldNode, FieldShape, NodeKind,
};
use screen_keys::path::type_name::TypeName;

fn name(s: &str) -> TypeName {
    TypeName::parse(s)
}

const LISTING_YAML: &str = r#"
root: Listing
types:
  - name: Listing
    kind: screen
    capabilities: [swipeable]
    fields:
      - { name: items, type: Row, shape: list }
      - { name: header, type: Header }
  - name: Row
    kind: view
    capabilities: [selectable, text]
    fields:
      - { name: title, type: StaticText }
  - name: Header
    kind: group
    fields:
      - { name: caption, type: StaticText }
"#;

// ============================================================================
// Declared descriptors
// ============================================================================

#[test]
fn macro_fields_derive_identifiers_from_declaring_type() {
    assert_eq!(Listing::ITEMS.identifier().as_str(), "Listing.items");
    assert_eq!(Listing::SEARCH.identifier().as_str(), "Listing.search");
    assert_eq!(Row::TITLE.identifier().as_str(), "Row.title");
    assert_eq!(Header::CAPTION.identifier().as_str(), "Header.caption");
    assert_eq!(Listing::ITEMS.item_identifier("Gamma").as_str(), "Listing.items[Gamma]");
    assert_eq!(Row::TITLE.name(), "title");
}

#[test]
fn macro_type_names_drop_module_path() {
    assert_eq!(Listing::type_name(), name("Listing"));
    assert_eq!(UserListContent::type_name(), name("UserList.Content"));
    assert!(UserListContent::TYPE_NAME.ends_with("::UserList.Content"));
    assert_eq!(
        UserListContent::USERS.item_identifier("7").as_str(),
        "UserList.Content.users[7]"
    );
}

#[test]
fn macro_records_kind_and_capabilities() {
    assert_eq!(Listing::KIND, NodeKind::Screen);
    assert_eq!(Header::KIND, NodeKind::Group);
    assert_eq!(Row::KIND, NodeKind::View);
    assert_eq!(
        Row::CAPABILITIES,
        Capabilities::SELECTABLE | Capabilities::DISABLEABLE
    );
    assert!(SearchBox::CAPABILITIES.has(Capability::Editable));
    assert!(!SearchBox::CAPABILITIES.has(Capability::Text));
    assert_eq!(Header::CAPABILITIES, Capabilities::empty());
}

#[test]
fn capability_set_round_trips_through_list() {
    let caps = Capabilities::TEXT | Capabilities::ROTATABLE;
    assert_eq!(caps.to_list(), vec![Capability::Text, Capability::Rotatable]);
    let back: Capabilities = caps.to_list().into_iter().collect();
    assert_eq!(back, caps);
}

#[test]
fn group_kind_binds_no_element() {
    assert!(!NodeKind::Group.binds_element());
    assert!(NodeKind::View.binds_element());
    assert!(NodeKind::Any.binds_element());
    assert!(NodeKind::Screen.binds_element());
}

// ============================================================================
// Tree built from declarations
// ============================================================================

#[test]
fn tree_of_registers_reachable_types() {
    let tree = DescriptorTree::of::<Listing>();

    assert_eq!(tree.root(), Some(&name("Listing")));
    for ty in ["Listing", "Row", "Header", "SearchBox", "StaticText", "StaticImage", "AnyView"] {
        assert!(tree.node(&name(ty)).is_some(), "missing {}", ty);
    }
    assert!(tree.node(&name("UserList")).is_none());

    let listing = tree.node(&name("Listing")).expect("Listing registered");
    let items = listing.field("items").expect("items field");
    assert_eq!(items.shape, FieldShape::List);
    assert_eq!(items.target, name("Row"));
    assert!(listing.supports(Capability::Swipeable));
    assert!(tree.validate().is_ok());
}

mod shadow {
    use screen_keys::prelude::*;

    descriptor! {
        pub view Row {
            field LABEL: StaticText = "label";
        }
    }
}

#[test]
fn same_display_name_keeps_first_registration() {
    let mut tree = DescriptorTree::of::<Listing>();
    assert_eq!(shadow::Row::type_name(), name("Row"));

    assert!(!tree.begin::<shadow::Row>(vec![FieldNode::single("label", "StaticText")]));
    let row = tree.node(&name("Row")).expect("Row registered");
    assert!(row.field("title").is_some());
    assert!(row.field("label").is_none());
}

#[test]
fn tree_of_nested_screen_validates() {
    let tree = DescriptorTree::of::<UserList>();
    assert!(tree.node(&name("UserList.Content")).is_some());
    assert!(tree.node(&UserListFooter::type_name()).is_some());
    assert!(tree.validate().is_ok());
}

#[test]
fn catalog_lists_flattened_identifiers() {
    let tree = DescriptorTree::of::<Listing>();
    let entries = tree.catalog(&name("Listing")).expect("catalog");

    let find = |accessor: &str| {
        entries
            .iter()
            .find(|e| e.accessor == accessor)
            .unwrap_or_else(|| panic!("no entry for {}", accessor))
    };
    let strings = |accessor: &str| -> Vec<String> {
        find(accessor).identifiers.iter().map(|i| i.to_string()).collect()
    };

    assert_eq!(find("items").shape, FieldShape::List);
    assert_eq!(strings("items"), ["Listing.items"]);
    assert_eq!(strings("items[*].title"), ["Row.title"]);
    assert_eq!(strings("items[*].icon"), ["Row.icon"]);
    assert!(strings("header").is_empty());
    assert_eq!(find("header").kind, NodeKind::Group);
    assert_eq!(strings("header.caption"), ["Header.caption"]);
    assert_eq!(strings("search"), ["Listing.search"]);
}

#[test]
fn catalog_of_nested_types_keeps_both_spellings() {
    let tree = DescriptorTree::of::<UserList>();
    let entries = tree.catalog(&name("UserList")).expect("catalog");

    let strings = |accessor: &str| -> Vec<String> {
        entries
            .iter()
            .find(|e| e.accessor == accessor)
            .map(|e| e.identifiers.iter().map(|i| i.to_string()).collect())
            .unwrap_or_default()
    };

    assert_eq!(strings("content"), ["UserList.content"]);
    assert_eq!(strings("content.title"), ["UserList.content.title", "UserList.Content.title"]);
    assert_eq!(strings("content.users"), ["UserList.content.users", "UserList.Content.users"]);
    assert_eq!(strings("content.users[*].name"), ["UserRow.name"]);
    assert!(strings("footer").is_empty());
    assert_eq!(strings("footer.note"), ["UserList.footer.note", "UserList.Footer.note"]);
}

#[test]
fn catalog_identifiers_are_unique_per_tree() {
    for root in [name("Listing"), name("UserList")] {
        let mut tree = DescriptorTree::of::<Listing>();
        UserList::register(&mut tree);
        let entries = tree.catalog(&root).expect("catalog");

        let mut seen = std::collections::HashSet::new();
        for entry in &entries {
            for id in &entry.identifiers {
                assert!(seen.insert(id.clone()), "duplicate identifier {}", id);
            }
        }
    }
}

// ============================================================================
// Tree loaded from YAML
// ============================================================================

#[test]
fn yaml_catalog_loads_and_walks() {
    let tree = DescriptorTree::from_yaml(LISTING_YAML).expect("valid catalog");
    assert_eq!(tree.root(), Some(&name("Listing")));

    let row = tree.require(&name("Row")).expect("Row");
    assert!(row.supports(Capability::Selectable));
    assert!(row.capability_set().has(Capability::Text));

    let entries = tree.catalog(&name("Listing")).expect("catalog");
    let accessors: Vec<&str> = entries.iter().map(|e| e.accessor.as_str()).collect();
    assert_eq!(accessors, ["items", "items[*].title", "header", "header.caption"]);
}

#[test]
fn yaml_unknown_field_type_is_rejected() {
    let yaml = r#"
types:
  - name: Listing
    kind: screen
    fields:
      - { name: items, type: Missing, shape: list }
"#;
    let err = DescriptorTree::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, DescriptorError::UnknownType(ref t) if t == "Missing"), "{err}");
}

#[test]
fn yaml_unknown_root_is_rejected() {
    let yaml = "root: Nowhere\ntypes: []\n";
    let err = DescriptorTree::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, DescriptorError::UnknownType(_)));
}

#[test]
fn yaml_duplicate_type_is_rejected() {
    let yaml = r#"
types:
  - { name: Row, kind: view }
  - { name: Row, kind: view }
"#;
    let err = DescriptorTree::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, DescriptorError::DuplicateType(ref t) if t == "Row"));
}

#[test]
fn yaml_builtin_redeclaration_is_rejected() {
    let yaml = "types:\n  - { name: StaticText, kind: view }\n";
    assert!(matches!(
        DescriptorTree::from_yaml(yaml),
        Err(DescriptorError::DuplicateType(_))
    ));
}

#[test]
fn yaml_duplicate_field_is_rejected() {
    let yaml = r#"
types:
  - name: Row
    kind: view
    fields:
      - { name: title, type: StaticText }
      - { name: title, type: StaticImage }
"#;
    let err = DescriptorTree::from_yaml(yaml).unwrap_err();
    assert!(matches!(err, DescriptorError::DuplicateField { ref field, .. } if field == "title"));
}

#[test]
fn yaml_invalid_names_are_rejected() {
    let bad_type = "types:\n  - { name: row, kind: view }\n";
    assert!(matches!(
        DescriptorTree::from_yaml(bad_type),
        Err(DescriptorError::InvalidName { what: "type", .. })
    ));

    let bad_field = r#"
types:
  - name: Row
    kind: view
    fields:
      - { name: Title, type: StaticText }
"#;
    assert!(matches!(
        DescriptorTree::from_yaml(bad_field),
        Err(DescriptorError::InvalidName { what: "field", .. })
    ));
}

#[test]
fn yaml_cycle_is_reported_with_chain() {
    let yaml = r#"
types:
  - name: A
    kind: view
    fields:
      - { name: b, type: B }
  - name: B
    kind: view
    fields:
      - { name: a, type: A }
"#;
    let err = DescriptorTree::from_yaml(yaml).unwrap_err();
    match err {
        DescriptorError::Cycle(chain) => assert_eq!(chain, "A -> B -> A"),
        other => panic!("expected cycle, got {other}"),
    }
}

#[test]
fn yaml_syntax_error_is_reported() {
    let err = DescriptorTree::from_yaml("types: [unclosed").unwrap_err();
    assert!(matches!(err, DescriptorError::Yaml(_)));
    assert!(err.to_string().starts_with("failed to parse descriptor catalog"));
}
