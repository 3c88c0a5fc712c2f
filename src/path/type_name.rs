use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between components of a type name and between path segments.
pub const SEPARATOR: &str = ".";

/// A descriptor type name with its module prefix removed.
///
/// Built from a "reflecting" name such as `my_app::screens::UserList.Content`:
/// everything up to the last `::` is module path and is dropped, the rest is a
/// `.`-separated nesting chain (`UserList`, `Content`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeName {
    components: Vec<String>,
}

impl TypeName {
    pub fn parse(qualified: &str) -> Self {
        let unqualified = match qualified.rfind("::") {
            Some(pos) => &qualified[pos + 2..],
            None => qualified,
        };

        let components = unqualified
            .split(SEPARATOR)
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(String::from)
            .collect();

        TypeName { components }
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }

    /// Number of components in the nesting chain. A top-level type has depth 1.
    pub fn depth(&self) -> usize {
        self.components.len()
    }

    /// True for types declared inside another descriptor type.
    pub fn is_nested(&self) -> bool {
        self.depth() > 1
    }

    /// Innermost component, e.g. `Content` for `UserList.Content`.
    pub fn simple_name(&self) -> &str {
        self.components.last().map(String::as_str).unwrap_or_default()
    }

    pub fn display_name(&self) -> String {
        self.components.join(SEPARATOR)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

impl From<&str> for TypeName {
    fn from(value: &str) -> Self {
        TypeName::parse(value)
    }
}

impl From<String> for TypeName {
    fn from(value: String) -> Self {
        TypeName::parse(&value)
    }
}

impl From<TypeName> for String {
    fn from(value: TypeName) -> Self {
        value.display_name()
    }
}
