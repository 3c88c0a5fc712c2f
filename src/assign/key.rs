use std::fmt;
use std::sync::OnceLock;

use crate::path::key_path::KeyPath;

// ============================================================================
// Process-wide switch
// ============================================================================

static IDENTIFIERS_ENABLED: OnceLock<bool> = OnceLock::new();

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AssignError {
    #[error("identifier switch already fixed to {current}")]
    AlreadyInitialized { current: bool },
}

/// Fix the identifier switch for the rest of the process.
///
/// Must run before the first identifier is read; afterwards the value is frozen.
pub fn init_identifiers(enabled: bool) -> Result<(), AssignError> {
    IDENTIFIERS_ENABLED.set(enabled).map_err(|_| AssignError::AlreadyInitialized {
        current: identifiers_enabled(),
    })?;
    tracing::debug!(enabled, "accessibility identifiers initialised");
    Ok(())
}

/// Current value of the switch. The first read freezes the default (`true`).
pub fn identifiers_enabled() -> bool {
    *IDENTIFIERS_ENABLED.get_or_init(|| true)
}

// ============================================================================
// AccessibilityKey
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeyKind {
    Identifier(String),
    Path { path: KeyPath, item: Option<String> },
}

/// What a rendered element is tagged with: a raw identifier or a declaration
/// path, optionally discriminated by a list item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccessibilityKey(KeyKind);

impl AccessibilityKey {
    pub fn identifier(raw: impl Into<String>) -> Self {
        AccessibilityKey(KeyKind::Identifier(raw.into()))
    }

    pub fn path(path: KeyPath) -> Self {
        AccessibilityKey(KeyKind::Path { path, item: None })
    }

    pub fn item(path: KeyPath, item: impl Into<String>) -> Self {
        AccessibilityKey(KeyKind::Path {
            path,
            item: Some(item.into()),
        })
    }

    pub fn key_path(&self) -> Option<&KeyPath> {
        match &self.0 {
            KeyKind::Path { path, .. } => Some(path),
            KeyKind::Identifier(_) => None,
        }
    }

    /// The string to attach, or `None` while identifiers are disabled.
    pub fn to_identifier(&self) -> Option<String> {
        if !identifiers_enabled() {
            return None;
        }
        Some(self.render())
    }

    fn render(&self) -> String {
        match &self.0 {
            KeyKind::Identifier(raw) => raw.clone(),
            KeyKind::Path { path, item: None } => path.identifier().into_string(),
            KeyKind::Path {
                path,
                item: Some(item),
            } => path.item_identifier(item).into_string(),
        }
    }
}

impl fmt::Display for AccessibilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
