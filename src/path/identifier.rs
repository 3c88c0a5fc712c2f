use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::key_path::PathSegment;
use crate::path::type_name::{SEPARATOR, TypeName};

/// String form of a [`KeyPath`](crate::path::key_path::KeyPath), as attached to
/// live elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(String);

/// Build the identifier for `root` followed by `segments`.
///
/// `UserList.Content` + `[users]` + `Some("7")` gives `UserList.Content.users[7]`.
pub fn derive(root: &TypeName, segments: &[PathSegment], discriminator: Option<&str>) -> Identifier {
    let mut out = root.display_name();

    for segment in segments {
        out.push_str(SEPARATOR);
        out.push_str(&segment.field);
    }

    if let Some(item) = discriminator {
        out.push('[');
        out.push_str(item);
        out.push(']');
    }

    Identifier(out)
}

impl Identifier {
    pub fn new(raw: impl Into<String>) -> Self {
        Identifier(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn with_item(&self, item: &str) -> Identifier {
        Identifier(format!("{}[{}]", self.0, item))
    }

    /// Split `Base.path[item]` into `("Base.path", Some("item"))`.
    pub fn split(&self) -> (&str, Option<&str>) {
        if let Some(stripped) = self.0.strip_suffix(']') {
            if let Some(open) = stripped.find('[') {
                return (&stripped[..open], Some(&stripped[open + 1..]));
            }
        }
        (&self.0, None)
    }

    /// ASCII case-insensitive prefix test used for list membership.
    pub fn has_prefix(candidate: &str, prefix: &str) -> bool {
        candidate.len() >= prefix.len()
            && candidate.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Identifier> for String {
    fn from(value: Identifier) -> Self {
        value.0
    }
}
