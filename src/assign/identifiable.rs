use crate::assign::key::AccessibilityKey;

/// A host UI element that can carry an accessibility identifier.
pub trait Identifiable {
    fn set_accessibility_identifier(&mut self, identifier: Option<String>);

    fn accessibility_identifier(&self) -> Option<&str>;

    /// Read the attached identifier back as a raw key.
    fn accessibility_key(&self) -> Option<AccessibilityKey> {
        self.accessibility_identifier()
            .map(AccessibilityKey::identifier)
    }

    /// Builder form of [`assign`].
    fn with_key(mut self, key: &AccessibilityKey) -> Self
    where
        Self: Sized,
    {
        assign(&mut self, key);
        self
    }
}

/// Tag `element` with `key`, overwriting any previous identifier. Clears the
/// identifier when identifiers are disabled.
pub fn assign<E: Identifiable + ?Sized>(element: &mut E, key: &AccessibilityKey) {
    let identifier = key.to_identifier();
    tracing::trace!(identifier = ?identifier, "assign");
    element.set_accessibility_identifier(identifier);
}
