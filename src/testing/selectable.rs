use std::panic::Location;

use crate::descriptor::descriptor_model::Selectable;
use crate::lookup::element::Element;
use crate::testing::content;
use crate::testing::wait::Wait;

pub trait SelectableElement {
    /// `None` when absent. A container counts as selected when all its direct
    /// children are.
    fn is_selected(&self) -> Option<bool>;

    fn assert_selected(&self, selected: bool) -> &Self;

    fn wait_for_selected(&self, wait: Wait) -> &Self;

    fn wait_for_deselected(&self, wait: Wait) -> &Self;
}

impl<D: Selectable> SelectableElement for Element<D> {
    fn is_selected(&self) -> Option<bool> {
        self.observe(content::selected)
    }

    #[track_caller]
    fn assert_selected(&self, selected: bool) -> &Self {
        self.check("selected", &Some(selected), &self.is_selected(), Location::caller())
    }

    #[track_caller]
    fn wait_for_selected(&self, wait: Wait) -> &Self {
        self.wait_until("was not selected", content::selected, Some(true), wait, Location::caller())
    }

    #[track_caller]
    fn wait_for_deselected(&self, wait: Wait) -> &Self {
        self.wait_until("was not deselected", content::selected, Some(false), wait, Location::caller())
    }
}
