use std::fmt;
use std::marker::PhantomData;

use crate::assign::key::AccessibilityKey;
use crate::descriptor::descriptor_model::Descriptor;
use crate::path::identifier::Identifier;
use crate::path::key_path::{KeyPath, PathSegment};

/// A single-valued field `name: V` declared on descriptor `R`.
///
/// Plays the role of a key path: views bind it with [`Field::key`], tests
/// traverse it with `Element::get`.
pub struct Field<R, V> {
    name: &'static str,
    _marker: PhantomData<fn() -> (R, V)>,
}

/// A repeated field `name: [V]` declared on descriptor `R`.
pub struct ListField<R, V> {
    name: &'static str,
    _marker: PhantomData<fn() -> (R, V)>,
}

impl<R, V> Field<R, V> {
    pub const fn new(name: &'static str) -> Self {
        Field {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<R, V> ListField<R, V> {
    pub const fn new(name: &'static str) -> Self {
        ListField {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<R: Descriptor, V: Descriptor> Field<R, V> {
    pub fn segment(&self) -> PathSegment {
        PathSegment::new(self.name, R::type_name())
    }

    pub fn path(&self) -> KeyPath {
        KeyPath::identity(R::type_name()).append(self.segment())
    }

    pub fn identifier(&self) -> Identifier {
        self.path().identifier()
    }

    pub fn key(&self) -> AccessibilityKey {
        AccessibilityKey::path(self.path())
    }
}

impl<R: Descriptor, V: Descriptor> ListField<R, V> {
    pub fn segment(&self) -> PathSegment {
        PathSegment::new(self.name, R::type_name())
    }

    pub fn path(&self) -> KeyPath {
        KeyPath::identity(R::type_name()).append(self.segment())
    }

    pub fn identifier(&self) -> Identifier {
        self.path().identifier()
    }

    pub fn item_identifier(&self, item: &str) -> Identifier {
        self.path().item_identifier(item)
    }

    /// Key for an element of the list without a discriminator.
    pub fn key(&self) -> AccessibilityKey {
        AccessibilityKey::path(self.path())
    }

    /// Key for the element of the list discriminated by `item`.
    pub fn key_for(&self, item: impl Into<String>) -> AccessibilityKey {
        AccessibilityKey::item(self.path(), item)
    }
}

impl<R, V> Clone for Field<R, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, V> Copy for Field<R, V> {}

impl<R, V> Clone for ListField<R, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R, V> Copy for ListField<R, V> {}

impl<R, V> fmt::Debug for Field<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.name).finish()
    }
}

impl<R, V> fmt::Debug for ListField<R, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ListField").field(&self.name).finish()
    }
}
