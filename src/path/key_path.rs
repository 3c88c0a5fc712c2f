use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::identifier::{Identifier, derive};
use crate::path::type_name::TypeName;

/// One step of a declaration path: a field and the type that declares it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathSegment {
    pub field: String,
    pub declaring_type: TypeName,
}

impl PathSegment {
    pub fn new(field: impl Into<String>, declaring_type: TypeName) -> Self {
        PathSegment {
            field: field.into(),
            declaring_type,
        }
    }
}

/// Canonical declaration path from a root descriptor type to a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyPath {
    root: TypeName,
    segments: Vec<PathSegment>,
}

impl KeyPath {
    /// The path of a type to itself. Its identifier is the bare type name and
    /// it is never matched against live elements.
    pub fn identity(root: TypeName) -> Self {
        KeyPath {
            root,
            segments: Vec::new(),
        }
    }

    pub fn new(root: TypeName, segments: Vec<PathSegment>) -> Self {
        KeyPath { root, segments }
    }

    pub fn root(&self) -> &TypeName {
        &self.root
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_identity(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn append(&self, segment: PathSegment) -> KeyPath {
        let mut segments = self.segments.clone();
        segments.push(segment);
        KeyPath {
            root: self.root.clone(),
            segments,
        }
    }

    pub fn identifier(&self) -> Identifier {
        derive(&self.root, &self.segments, None)
    }

    pub fn item_identifier(&self, item: &str) -> Identifier {
        derive(&self.root, &self.segments, Some(item))
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\{}", self.identifier())
    }
}
