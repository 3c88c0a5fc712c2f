use std::panic::Location;

use crate::descriptor::descriptor_model::Text;
use crate::lookup::element::Element;
use crate::testing::content;
use crate::testing::wait::Wait;

/// Operations on elements declared `[Text]`.
pub trait TextElement {
    /// Label of the element's static text, `None` when absent.
    fn text(&self) -> Option<String>;

    fn assert_text<'a>(&self, expected: impl Into<Option<&'a str>>) -> &Self;

    fn wait_for_text(&self, expected: &str, wait: Wait) -> &Self;
}

impl<D: Text> TextElement for Element<D> {
    fn text(&self) -> Option<String> {
        self.observe(content::text)
    }

    #[track_caller]
    fn assert_text<'a>(&self, expected: impl Into<Option<&'a str>>) -> &Self {
        let expected = expected.into().map(str::to_string);
        self.check("text", &expected, &self.text(), Location::caller())
    }

    #[track_caller]
    fn wait_for_text(&self, expected: &str, wait: Wait) -> &Self {
        self.wait_until(
            &format!("text was not equal to {}", expected),
            content::text,
            Some(expected.to_string()),
            wait,
            Location::caller(),
        )
    }
}
