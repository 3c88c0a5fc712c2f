use std::panic::Location;

use crate::descriptor::descriptor_model::Disableable;
use crate::lookup::element::Element;
use crate::testing::content;
use crate::testing::wait::Wait;

pub trait DisableableElement {
    /// `None` when absent. Enabled only if the element and all its direct
    /// children are.
    fn is_enabled(&self) -> Option<bool>;

    fn assert_enabled(&self, enabled: bool) -> &Self;

    fn wait_for_enabled(&self, wait: Wait) -> &Self;

    fn wait_for_disabled(&self, wait: Wait) -> &Self;
}

impl<D: Disableable> DisableableElement for Element<D> {
    fn is_enabled(&self) -> Option<bool> {
        self.observe(content::enabled)
    }

    #[track_caller]
    fn assert_enabled(&self, enabled: bool) -> &Self {
        self.check("enabled", &Some(enabled), &self.is_enabled(), Location::caller())
    }

    #[track_caller]
    fn wait_for_enabled(&self, wait: Wait) -> &Self {
        self.wait_until("was not enabled", content::enabled, Some(true), wait, Location::caller())
    }

    #[track_caller]
    fn wait_for_disabled(&self, wait: Wait) -> &Self {
        self.wait_until("was not disabled", content::enabled, Some(false), wait, Location::caller())
    }
}
