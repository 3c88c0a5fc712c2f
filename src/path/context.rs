use crate::path::identifier::Identifier;
use crate::path::key_path::{KeyPath, PathSegment};
use crate::path::type_name::TypeName;

/// The set of equally valid paths that address the current node during a
/// traversal.
///
/// A traversal starts from `[identity(Root)]`. Every field access extends each
/// held path by the field. Whether the longer paths are kept afterwards depends
/// on the nesting depth of the target type: a top-level type restarts from its
/// own identity (reusable components key their children relative to
/// themselves), a nested type keeps the full ancestor chain and its own
/// identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathContext {
    paths: Vec<KeyPath>,
}

/// Result of entering a field: the paths to match and the context for the
/// node behind the field.
#[derive(Debug, Clone)]
pub struct Descent {
    pub candidates: Vec<KeyPath>,
    pub context: PathContext,
}

impl PathContext {
    pub fn root(root: TypeName) -> Self {
        PathContext {
            paths: vec![KeyPath::identity(root)],
        }
    }

    pub fn paths(&self) -> &[KeyPath] {
        &self.paths
    }

    /// Every held path extended by `segment`.
    pub fn extend(&self, segment: &PathSegment) -> Vec<KeyPath> {
        self.paths
            .iter()
            .map(|path| path.append(segment.clone()))
            .collect()
    }

    /// Enter a single-valued field whose value has type `target`.
    pub fn enter(&self, segment: &PathSegment, target: &TypeName) -> Descent {
        let candidates = self.extend(segment);

        let context = if target.is_nested() {
            let mut paths = candidates.clone();
            paths.push(KeyPath::identity(target.clone()));
            PathContext { paths }
        } else {
            PathContext::root(target.clone())
        };

        Descent { candidates, context }
    }

    /// Context for a live element re-addressed as `target`: list items and
    /// narrowed polymorphic nodes.
    pub fn rebind(target: &TypeName) -> Self {
        PathContext::root(target.clone())
    }
}

pub fn identifiers(paths: &[KeyPath]) -> Vec<Identifier> {
    paths.iter().map(KeyPath::identifier).collect()
}

pub fn item_identifiers(paths: &[KeyPath], item: &str) -> Vec<Identifier> {
    paths.iter().map(|path| path.item_identifier(item)).collect()
}
