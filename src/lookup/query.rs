use crate::driver::snapshot::ElementSnapshot;
use crate::path::identifier::Identifier;

/// How a step compares a descendant's identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher {
    /// Equal to any of the identifiers.
    Exact(Vec<String>),
    /// Starts with any of the identifiers, ASCII case-insensitively.
    Prefix(Vec<String>),
}

impl Matcher {
    pub fn matches(&self, identifier: Option<&str>) -> bool {
        let Some(identifier) = identifier else {
            return false;
        };
        match self {
            Matcher::Exact(ids) => ids.iter().any(|id| id == identifier),
            Matcher::Prefix(ids) => ids.iter().any(|id| Identifier::has_prefix(identifier, id)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    First,
    Index(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryStep {
    pub matcher: Matcher,
    pub pick: Pick,
}

/// Lazy chain of descendant searches, evaluated against a snapshot on demand.
///
/// The empty query addresses the snapshot root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementQuery {
    steps: Vec<QueryStep>,
}

impl ElementQuery {
    pub fn root() -> Self {
        ElementQuery::default()
    }

    pub fn steps(&self) -> &[QueryStep] {
        &self.steps
    }

    pub fn then(&self, matcher: Matcher, pick: Pick) -> ElementQuery {
        let mut steps = self.steps.clone();
        steps.push(QueryStep { matcher, pick });
        ElementQuery { steps }
    }

    /// Walk the steps over `root`. Returns the index path of the element, or
    /// `None` as soon as a step finds nothing.
    pub fn resolve_path(&self, root: &ElementSnapshot) -> Option<Vec<usize>> {
        let mut path = Vec::new();
        let mut node = root;

        for step in &self.steps {
            let mut found = None;
            let mut remaining = match step.pick {
                Pick::First => 0,
                Pick::Index(n) => n,
            };
            let mut scratch = Vec::new();
            search(node, &step.matcher, &mut remaining, &mut scratch, &mut found);

            let relative = found?;
            for &i in &relative {
                node = &node.children[i];
            }
            path.extend(relative);
        }

        Some(path)
    }

    pub fn resolve<'a>(&self, root: &'a ElementSnapshot) -> Option<(Vec<usize>, &'a ElementSnapshot)> {
        let path = self.resolve_path(root)?;
        let node = root.at(&path)?;
        Some((path, node))
    }

    /// Number of descendants of this query's element matching `matcher`.
    pub fn count(&self, root: &ElementSnapshot, matcher: &Matcher) -> usize {
        match self.resolve(root) {
            Some((_, node)) => count_matches(node, matcher),
            None => 0,
        }
    }
}

// Pre-order over descendants (the node itself excluded). Stops at the match
// whose ordinal among all matches equals the requested one.
fn search(
    node: &ElementSnapshot,
    matcher: &Matcher,
    remaining: &mut usize,
    path: &mut Vec<usize>,
    found: &mut Option<Vec<usize>>,
) {
    for (i, child) in node.children.iter().enumerate() {
        if found.is_some() {
            return;
        }
        path.push(i);
        if matcher.matches(child.identifier.as_deref()) {
            if *remaining == 0 {
                *found = Some(path.clone());
                path.pop();
                return;
            }
            *remaining -= 1;
        }
        search(child, matcher, remaining, path, found);
        path.pop();
    }
}

fn count_matches(node: &ElementSnapshot, matcher: &Matcher) -> usize {
    node.children
        .iter()
        .map(|child| {
            usize::from(matcher.matches(child.identifier.as_deref())) + count_matches(child, matcher)
        })
        .sum()
}
