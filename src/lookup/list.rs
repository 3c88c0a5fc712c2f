use std::fmt;
use std::marker::PhantomData;
use std::panic::Location;

use crate::descriptor::descriptor_model::Descriptor;
use crate::lookup::element::Element;
use crate::lookup::scope::ListScope;
use crate::testing::harness::Harness;

/// Handle on the repeated elements of a list field.
pub struct ElementList<D> {
    harness: Harness,
    scope: ListScope,
    _marker: PhantomData<fn() -> D>,
}

impl<D> Clone for ElementList<D> {
    fn clone(&self) -> Self {
        ElementList {
            harness: self.harness.clone(),
            scope: self.scope.clone(),
            _marker: PhantomData,
        }
    }
}

impl<D> fmt::Debug for ElementList<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementList").field(&self.scope.description()).finish()
    }
}

impl<D: Descriptor> ElementList<D> {
    pub fn new(harness: Harness, scope: ListScope) -> Self {
        ElementList {
            harness,
            scope,
            _marker: PhantomData,
        }
    }

    pub fn harness(&self) -> &Harness {
        &self.harness
    }

    pub fn description(&self) -> &str {
        self.scope.description()
    }

    /// Number of live items. Zero when the list's parent is absent.
    pub fn count(&self) -> usize {
        self.harness
            .snapshot()
            .map(|tree| self.scope.count(&tree))
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Item at `index` in tree order. Out of range gives an absent handle.
    pub fn at(&self, index: usize) -> Element<D> {
        Element::new(self.harness.clone(), self.scope.at(index))
    }

    /// Item tagged with discriminator `key`.
    pub fn item(&self, key: impl fmt::Display) -> Element<D> {
        Element::new(self.harness.clone(), self.scope.item(&key.to_string()))
    }

    #[track_caller]
    pub fn assert_count(&self, count: usize) -> &Self {
        self.harness.check(
            format!("{} count", self.description()),
            &count,
            &self.count(),
            Some(Location::caller().into()),
        );
        self
    }

    #[track_caller]
    pub fn assert_is_empty(&self, is_empty: bool) -> &Self {
        self.harness.check(
            format!("{} is empty", self.description()),
            &is_empty,
            &self.is_empty(),
            Some(Location::caller().into()),
        );
        self
    }
}
