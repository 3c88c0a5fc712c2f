use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::descriptor::descriptor_model::{Capabilities, Capability, Descriptor, NodeKind};
use crate::descriptor::error::DescriptorError;
use crate::descriptor::primitives::{AnyView, StaticImage, StaticText};
use crate::path::context::{PathContext, identifiers};
use crate::path::identifier::Identifier;
use crate::path::key_path::PathSegment;
use crate::path::type_name::TypeName;

// ============================================================================
// Runtime model
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldShape {
    #[default]
    Single,
    List,
}

/// A named field of a descriptor node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
    pub name: String,

    #[serde(rename = "type")]
    pub target: TypeName,

    #[serde(default)]
    pub shape: FieldShape,
}

impl FieldNode {
    pub fn single(name: &str, target: &str) -> Self {
        FieldNode {
            name: name.to_string(),
            target: TypeName::parse(target),
            shape: FieldShape::Single,
        }
    }

    pub fn list(name: &str, target: &str) -> Self {
        FieldNode {
            name: name.to_string(),
            target: TypeName::parse(target),
            shape: FieldShape::List,
        }
    }
}

/// One declared descriptor type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptorNode {
    pub name: TypeName,

    pub kind: NodeKind,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub capabilities: Vec<Capability>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldNode>,
}

impl DescriptorNode {
    pub fn capability_set(&self) -> Capabilities {
        self.capabilities.iter().copied().collect()
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    pub fn field(&self, name: &str) -> Option<&FieldNode> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// On-disk form of a descriptor catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    root: Option<TypeName>,
    #[serde(default)]
    types: Vec<DescriptorNode>,
}

/// One addressable node reachable from a root, with the identifiers a lookup
/// accepts for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    /// Accessor chain from the root, e.g. `content.users[*].title`.
    pub accessor: String,
    pub type_name: TypeName,
    pub kind: NodeKind,
    pub shape: FieldShape,
    /// Exact identifiers for single fields, prefixes for lists. Empty for groups.
    pub identifiers: Vec<Identifier>,
}

// ============================================================================
// Descriptor tree
// ============================================================================

/// Registry of descriptor types, keyed by display name.
///
/// Built from statically declared types with [`DescriptorTree::of`] or loaded
/// from a YAML catalog with [`DescriptorTree::from_yaml`]. The built-in
/// primitives are always present.
#[derive(Debug, Clone)]
pub struct DescriptorTree {
    root: Option<TypeName>,
    nodes: BTreeMap<TypeName, DescriptorNode>,
}

impl Default for DescriptorTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptorTree {
    pub fn new() -> Self {
        let mut tree = DescriptorTree {
            root: None,
            nodes: BTreeMap::new(),
        };
        StaticText::register(&mut tree);
        StaticImage::register(&mut tree);
        AnyView::register(&mut tree);
        tree
    }

    /// Registry of everything reachable from `D`, rooted at `D`.
    pub fn of<D: Descriptor>() -> Self {
        let mut tree = DescriptorTree::new();
        D::register(&mut tree);
        tree.root = Some(D::type_name());
        tree
    }

    /// Load a catalog such as:
    ///
    /// ```yaml
    /// root: Listing
    /// types:
    ///   - name: Listing
    ///     kind: screen
    ///     fields:
    ///       - { name: items, type: Row, shape: list }
    ///   - name: Row
    ///     kind: view
    ///     fields:
    ///       - { name: title, type: StaticText }
    /// ```
    pub fn from_yaml(source: &str) -> Result<Self, DescriptorError> {
        let file: CatalogFile = serde_yaml::from_str(source)?;
        let mut tree = DescriptorTree::new();

        for node in file.types {
            tree.insert(node)?;
        }
        tree.root = file.root;
        tree.validate()?;

        Ok(tree)
    }

    /// Register `D` with `fields` unless a type of the same name is present.
    /// Returns whether the node was added. The first registration wins.
    pub fn begin<D: Descriptor>(&mut self, fields: Vec<FieldNode>) -> bool {
        let name = D::type_name();
        if let Some(existing) = self.nodes.get(&name) {
            if existing.kind != D::KIND || existing.fields != fields {
                tracing::warn!(
                    type_name = %name.display_name(),
                    declared_by = D::TYPE_NAME,
                    "descriptor name already registered with different fields; keeping the first"
                );
            }
            return false;
        }

        self.nodes.insert(
            name.clone(),
            DescriptorNode {
                name,
                kind: D::KIND,
                capabilities: D::CAPABILITIES.to_list(),
                fields,
            },
        );
        true
    }

    pub fn insert(&mut self, node: DescriptorNode) -> Result<(), DescriptorError> {
        if self.nodes.contains_key(&node.name) {
            return Err(DescriptorError::DuplicateType(node.name.display_name()));
        }
        self.nodes.insert(node.name.clone(), node);
        Ok(())
    }

    pub fn root(&self) -> Option<&TypeName> {
        self.root.as_ref()
    }

    pub fn node(&self, name: &TypeName) -> Option<&DescriptorNode> {
        self.nodes.get(name)
    }

    pub fn require(&self, name: &TypeName) -> Result<&DescriptorNode, DescriptorError> {
        self.node(name)
            .ok_or_else(|| DescriptorError::UnknownType(name.display_name()))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &DescriptorNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    /// Check names, field targets and acyclicity.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        for node in self.nodes.values() {
            for component in node.name.components() {
                if !is_type_component(component) {
                    return Err(DescriptorError::InvalidName {
                        what: "type",
                        name: node.name.display_name(),
                    });
                }
            }
            if node.name.depth() == 0 {
                return Err(DescriptorError::InvalidName {
                    what: "type",
                    name: String::new(),
                });
            }

            let mut seen = HashSet::new();
            for field in &node.fields {
                if !is_field_name(&field.name) {
                    return Err(DescriptorError::InvalidName {
                        what: "field",
                        name: field.name.clone(),
                    });
                }
                if !seen.insert(field.name.as_str()) {
                    return Err(DescriptorError::DuplicateField {
                        type_name: node.name.display_name(),
                        field: field.name.clone(),
                    });
                }
                self.require(&field.target)?;
            }
        }

        if let Some(root) = &self.root {
            self.require(root)?;
        }

        self.check_acyclic()
    }

    fn check_acyclic(&self) -> Result<(), DescriptorError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Visiting,
            Done,
        }

        fn visit<'a>(
            tree: &'a DescriptorTree,
            name: &'a TypeName,
            marks: &mut HashMap<&'a TypeName, Mark>,
            stack: &mut Vec<&'a TypeName>,
        ) -> Result<(), DescriptorError> {
            match marks.get(name) {
                Some(Mark::Done) => return Ok(()),
                Some(Mark::Visiting) => {
                    let mut chain: Vec<String> = stack.iter().map(|n| n.display_name()).collect();
                    chain.push(name.display_name());
                    return Err(DescriptorError::Cycle(chain.join(" -> ")));
                }
                None => {}
            }

            marks.insert(name, Mark::Visiting);
            stack.push(name);
            if let Some(node) = tree.nodes.get(name) {
                for field in &node.fields {
                    visit(tree, &field.target, marks, stack)?;
                }
            }
            stack.pop();
            marks.insert(name, Mark::Done);
            Ok(())
        }

        let mut marks = HashMap::new();
        let mut stack = Vec::new();
        for name in self.nodes.keys() {
            visit(self, name, &mut marks, &mut stack)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------------

    /// Every addressable node reachable from `root`, in declaration order.
    pub fn catalog(&self, root: &TypeName) -> Result<Vec<CatalogEntry>, DescriptorError> {
        self.check_acyclic()?;
        let node = self.require(root)?;

        let mut entries = Vec::new();
        self.walk(node, &PathContext::root(root.clone()), "", &mut entries)?;
        Ok(entries)
    }

    fn walk(
        &self,
        node: &DescriptorNode,
        context: &PathContext,
        accessor: &str,
        entries: &mut Vec<CatalogEntry>,
    ) -> Result<(), DescriptorError> {
        for field in &node.fields {
            let target = self.require(&field.target)?;
            let segment = PathSegment::new(field.name.clone(), node.name.clone());
            let field_accessor = if accessor.is_empty() {
                field.name.clone()
            } else {
                format!("{}.{}", accessor, field.name)
            };

            match field.shape {
                FieldShape::Single => {
                    let descent = context.enter(&segment, &target.name);
                    let ids = if target.kind.binds_element() {
                        identifiers(&descent.candidates)
                    } else {
                        Vec::new()
                    };

                    entries.push(CatalogEntry {
                        accessor: field_accessor.clone(),
                        type_name: target.name.clone(),
                        kind: target.kind,
                        shape: FieldShape::Single,
                        identifiers: ids,
                    });

                    self.walk(target, &descent.context, &field_accessor, entries)?;
                }
                FieldShape::List => {
                    let prefixes = context.extend(&segment);

                    entries.push(CatalogEntry {
                        accessor: field_accessor.clone(),
                        type_name: target.name.clone(),
                        kind: target.kind,
                        shape: FieldShape::List,
                        identifiers: identifiers(&prefixes),
                    });

                    let item_accessor = format!("{}[*]", field_accessor);
                    self.walk(
                        target,
                        &PathContext::rebind(&target.name),
                        &item_accessor,
                        entries,
                    )?;
                }
            }
        }
        Ok(())
    }
}

fn is_type_component(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_field_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
