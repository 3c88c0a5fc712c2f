use std::panic::Location;

use crate::descriptor::descriptor_model::Image;
use crate::lookup::element::Element;
use crate::testing::content;
use crate::testing::wait::Wait;

/// Operations on elements declared `[Image]`. The image is identified by its
/// label.
pub trait ImageElement {
    fn image(&self) -> Option<String>;

    fn assert_image<'a>(&self, expected: impl Into<Option<&'a str>>) -> &Self;

    fn wait_for_image(&self, expected: &str, wait: Wait) -> &Self;
}

impl<D: Image> ImageElement for Element<D> {
    fn image(&self) -> Option<String> {
        self.observe(content::image)
    }

    #[track_caller]
    fn assert_image<'a>(&self, expected: impl Into<Option<&'a str>>) -> &Self {
        let expected = expected.into().map(str::to_string);
        self.check("image", &expected, &self.image(), Location::caller())
    }

    #[track_caller]
    fn wait_for_image(&self, expected: &str, wait: Wait) -> &Self {
        self.wait_until(
            &format!("image was not equal to {}", expected),
            content::image,
            Some(expected.to_string()),
            wait,
            Location::caller(),
        )
    }
}
