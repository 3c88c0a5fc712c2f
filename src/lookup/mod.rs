pub mod element;
pub mod list;
pub mod query;
pub mod scope;

pub use element::Element;
pub use list::ElementList;
pub use query::{ElementQuery, Matcher, Pick};
pub use scope::{ListScope, Scope};
