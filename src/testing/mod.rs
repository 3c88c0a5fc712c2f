pub mod chain;
pub mod content;
pub mod context;
pub mod disableable;
pub mod editable;
pub mod harness;
pub mod image;
pub mod pinchable;
pub mod rotatable;
pub mod selectable;
pub mod swipeable;
pub mod text;
pub mod wait;

pub use chain::Testing;
pub use context::{AssertionResult, SourceLocation, TestContext};
pub use harness::Harness;
pub use wait::{Wait, WaitOptions};

/// Capability extension traits, for `use screen_keys::testing::prelude::*`.
pub mod prelude {
    pub use super::chain::Testing;
    pub use super::disableable::DisableableElement;
    pub use super::editable::EditableElement;
    pub use super::image::ImageElement;
    pub use super::pinchable::PinchableElement;
    pub use super::rotatable::RotatableElement;
    pub use super::selectable::SelectableElement;
    pub use super::swipeable::{REPEAT_LIMIT, SwipeableElement};
    pub use super::text::TextElement;
    pub use super::wait::Wait;
}
