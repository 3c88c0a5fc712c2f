//! Structural accessibility identifiers for UI tests.
//!
//! Descriptor types declared with [`descriptor!`] mirror the composition of a
//! UI. Each declared field derives a stable identifier from its declaration
//! path (`Listing.items`, `UserList.Content.users[7]`); the app tags rendered
//! elements with [`assign::assign`], and tests walk the same descriptors to find
//! those elements again through a [`driver::Driver`].
//!
//! ```
//! use screen_keys::descriptor;
//! use screen_keys::descriptor::StaticText;
//! use screen_keys::driver::{ElementSnapshot, MemoryDriver};
//! use screen_keys::testing::prelude::*;
//! use screen_keys::testing::Harness;
//!
//! descriptor! {
//!     pub view Row {
//!         field TITLE: StaticText = "title";
//!     }
//! }
//!
//! descriptor! {
//!     pub screen Listing {
//!         list ITEMS: Row = "items";
//!     }
//! }
//!
//! let row = |title: &str| {
//!     ElementSnapshot::default()
//!         .identified(Listing::ITEMS.identifier().as_str())
//!         .child(ElementSnapshot::static_text(title).identified("Row.title"))
//! };
//! let app = ElementSnapshot::application().child(row("Alpha")).child(row("Beta"));
//!
//! let harness = Harness::new(MemoryDriver::new(app));
//! let items = harness.screen::<Listing>().list(Listing::ITEMS);
//! items.assert_count(2);
//! items.at(1).get(Row::TITLE).assert_text("Beta");
//! harness.assert_all_passed();
//! ```

pub mod assign;
pub mod cli;
pub mod descriptor;
pub mod driver;
pub mod lookup;
pub mod path;
pub mod report;
pub mod spec;
pub mod testing;
pub mod trace;

/// Everything a test file usually needs.
pub mod prelude {
    pub use crate::assign::{AccessibilityKey, Identifiable, assign};
    pub use crate::descriptor;
    pub use crate::descriptor::{AnyView, Descriptor, StaticImage, StaticText};
    pub use crate::driver::{ElementSnapshot, ElementType, MemoryDriver, Rect, SwipeDirection, Vector, Velocity};
    pub use crate::lookup::{Element, ElementList};
    pub use crate::testing::Harness;
    pub use crate::testing::prelude::*;
}
