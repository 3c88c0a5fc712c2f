use std::panic::Location;

use crate::descriptor::descriptor_model::Descriptor;
use crate::lookup::element::Element;
use crate::lookup::list::ElementList;
use crate::testing::harness::Harness;

/// Inline checks and actions available on every handle, so a chain of calls
/// can continue through arbitrary test code.
pub trait Testing {
    fn harness(&self) -> &Harness;

    fn describe(&self) -> &str;

    /// Record a failure when `condition` is false for this handle.
    #[track_caller]
    fn assert_that<C: FnOnce(&Self) -> bool>(&self, condition: C) -> &Self
    where
        Self: Sized,
    {
        let passed = condition(self);
        self.harness()
            .check_that(format!("{} condition", self.describe()), passed, Some(Location::caller().into()));
        self
    }

    fn perform<A: FnOnce(&Self)>(&self, action: A) -> &Self
    where
        Self: Sized,
    {
        action(self);
        self
    }
}

impl<D: Descriptor> Testing for Element<D> {
    fn harness(&self) -> &Harness {
        Element::harness(self)
    }

    fn describe(&self) -> &str {
        self.description()
    }
}

impl<D: Descriptor> Testing for ElementList<D> {
    fn harness(&self) -> &Harness {
        ElementList::harness(self)
    }

    fn describe(&self) -> &str {
        self.description()
    }
}
