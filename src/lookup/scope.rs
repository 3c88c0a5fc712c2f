use crate::descriptor::descriptor_model::NodeKind;
use crate::driver::snapshot::ElementSnapshot;
use crate::lookup::query::{ElementQuery, Matcher, Pick};
use crate::path::context::{PathContext, identifiers, item_identifiers};
use crate::path::key_path::{KeyPath, PathSegment};
use crate::path::type_name::TypeName;

/// Untyped traversal state: the paths that address the current node, the
/// query locating its element, and a readable accessor chain.
#[derive(Debug, Clone)]
pub struct Scope {
    context: PathContext,
    query: ElementQuery,
    description: String,
}

/// Traversal state of a list field before an item is chosen.
#[derive(Debug, Clone)]
pub struct ListScope {
    prefixes: Vec<KeyPath>,
    item: TypeName,
    parent: ElementQuery,
    description: String,
}

fn to_strings(paths: &[KeyPath]) -> Vec<String> {
    identifiers(paths).into_iter().map(String::from).collect()
}

impl Scope {
    /// Root descriptor bound to the application element.
    pub fn root(root: TypeName) -> Self {
        let description = root.display_name();
        Scope {
            context: PathContext::root(root),
            query: ElementQuery::root(),
            description,
        }
    }

    pub fn context(&self) -> &PathContext {
        &self.context
    }

    pub fn query(&self) -> &ElementQuery {
        &self.query
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Enter the single-valued field `segment` whose value is `target`.
    ///
    /// Groups have no element of their own: the query is kept and only the
    /// path context moves.
    pub fn field(&self, segment: PathSegment, target: &TypeName, kind: NodeKind) -> Scope {
        let description = format!("{}.{}", self.description, segment.field);
        let descent = self.context.enter(&segment, target);

        let query = if kind.binds_element() {
            let ids = to_strings(&descent.candidates);
            tracing::debug!(?ids, "field lookup");
            self.query.then(Matcher::Exact(ids), Pick::First)
        } else {
            self.query.clone()
        };

        Scope {
            context: descent.context,
            query,
            description,
        }
    }

    pub fn list(&self, segment: PathSegment, item: TypeName) -> ListScope {
        ListScope {
            description: format!("{}.{}", self.description, segment.field),
            prefixes: self.context.extend(&segment),
            item,
            parent: self.query.clone(),
        }
    }

    /// Same element, addressed as `target` from now on.
    pub fn rebind(&self, target: &TypeName) -> Scope {
        Scope {
            context: PathContext::rebind(target),
            query: self.query.clone(),
            description: self.description.clone(),
        }
    }
}

impl ListScope {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn parent(&self) -> &ElementQuery {
        &self.parent
    }

    pub fn matcher(&self) -> Matcher {
        Matcher::Prefix(to_strings(&self.prefixes))
    }

    pub fn count(&self, root: &ElementSnapshot) -> usize {
        self.parent.count(root, &self.matcher())
    }

    /// The `index`-th prefix match in pre-order.
    pub fn at(&self, index: usize) -> Scope {
        Scope {
            context: PathContext::rebind(&self.item),
            query: self.parent.then(self.matcher(), Pick::Index(index)),
            description: format!("{}[{}]", self.description, index),
        }
    }

    /// The item tagged with discriminator `key`.
    pub fn item(&self, key: &str) -> Scope {
        let ids = item_identifiers(&self.prefixes, key)
            .into_iter()
            .map(String::from)
            .collect();
        Scope {
            context: PathContext::rebind(&self.item),
            query: self.parent.then(Matcher::Exact(ids), Pick::First),
            description: format!("{}[\"{}\"]", self.description, key),
        }
    }
}
