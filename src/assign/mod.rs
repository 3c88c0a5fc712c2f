pub mod identifiable;
pub mod key;

pub use identifiable::{Identifiable, assign};
pub use key::{AccessibilityKey, AssignError, identifiers_enabled, init_identifiers};
