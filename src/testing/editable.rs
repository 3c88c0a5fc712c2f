use std::panic::Location;

use crate::descriptor::descriptor_model::Editable;
use crate::driver::gesture::Gesture;
use crate::lookup::element::Element;
use crate::testing::content;
use crate::testing::wait::Wait;

/// Operations on text inputs (`[Editable]`). The input is the element itself
/// or its first text-field-like direct child.
pub trait EditableElement {
    fn text(&self) -> Option<String>;

    fn placeholder(&self) -> Option<String>;

    fn is_focused(&self) -> bool;

    fn assert_text<'a>(&self, expected: impl Into<Option<&'a str>>) -> &Self;

    fn assert_placeholder<'a>(&self, expected: impl Into<Option<&'a str>>) -> &Self;

    fn assert_focused(&self, focused: bool) -> &Self;

    fn wait_for_text(&self, expected: &str, wait: Wait) -> &Self;

    fn wait_for_placeholder(&self, expected: &str, wait: Wait) -> &Self;

    fn wait_for_focused(&self, wait: Wait) -> &Self;

    fn wait_for_unfocused(&self, wait: Wait) -> &Self;

    fn type_text(&self, text: &str) -> &Self;

    /// Type a newline.
    fn submit_by_keyboard(&self) -> &Self;

    /// Delete the current text one character at a time.
    fn clear_by_keyboard(&self) -> &Self;
}

impl<D: Editable> EditableElement for Element<D> {
    fn text(&self) -> Option<String> {
        self.observe(content::editable_text)
    }

    fn placeholder(&self) -> Option<String> {
        self.observe(content::placeholder)
    }

    fn is_focused(&self) -> bool {
        self.observe(content::focused)
    }

    #[track_caller]
    fn assert_text<'a>(&self, expected: impl Into<Option<&'a str>>) -> &Self {
        let expected = expected.into().map(str::to_string);
        self.check("text", &expected, &EditableElement::text(self), Location::caller())
    }

    #[track_caller]
    fn assert_placeholder<'a>(&self, expected: impl Into<Option<&'a str>>) -> &Self {
        let expected = expected.into().map(str::to_string);
        self.check("placeholder", &expected, &self.placeholder(), Location::caller())
    }

    #[track_caller]
    fn assert_focused(&self, focused: bool) -> &Self {
        self.check("focused", &focused, &self.is_focused(), Location::caller())
    }

    #[track_caller]
    fn wait_for_text(&self, expected: &str, wait: Wait) -> &Self {
        self.wait_until(
            &format!("text was not equal to {}", expected),
            content::editable_text,
            Some(expected.to_string()),
            wait,
            Location::caller(),
        )
    }

    #[track_caller]
    fn wait_for_placeholder(&self, expected: &str, wait: Wait) -> &Self {
        self.wait_until(
            &format!("placeholder was not equal to {}", expected),
            content::placeholder,
            Some(expected.to_string()),
            wait,
            Location::caller(),
        )
    }

    #[track_caller]
    fn wait_for_focused(&self, wait: Wait) -> &Self {
        self.wait_until("was not focused", content::focused, true, wait, Location::caller())
    }

    #[track_caller]
    fn wait_for_unfocused(&self, wait: Wait) -> &Self {
        self.wait_until("was not unfocused", content::focused, false, wait, Location::caller())
    }

    #[track_caller]
    fn type_text(&self, text: &str) -> &Self {
        self.dispatch(Gesture::type_text(text), Location::caller())
    }

    #[track_caller]
    fn submit_by_keyboard(&self) -> &Self {
        self.type_text("\n")
    }

    #[track_caller]
    fn clear_by_keyboard(&self) -> &Self {
        match EditableElement::text(self) {
            Some(current) if !current.is_empty() => {
                self.dispatch(Gesture::clear(&current), Location::caller())
            }
            _ => self,
        }
    }
}
