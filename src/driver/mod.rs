pub mod error;
pub mod gesture;
pub mod memory;
pub mod session;
pub mod snapshot;

use serde::{Deserialize, Serialize};

pub use error::DriverError;
pub use gesture::{Gesture, SwipeDirection, Velocity};
pub use memory::MemoryDriver;
pub use session::ProcessDriver;
pub use snapshot::{ElementSnapshot, ElementType, Rect, Vector};

/// A resolved live element, as handed to [`Driver::perform`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementTarget {
    /// Child indices from the snapshot root.
    pub index_path: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub frame: Rect,
}

/// Access to the host's live UI tree.
pub trait Driver: Send + Sync {
    /// Fresh copy of the whole tree, rooted at the application element.
    fn snapshot(&self) -> Result<ElementSnapshot, DriverError>;

    fn perform(&self, target: &ElementTarget, gesture: &Gesture) -> Result<(), DriverError>;
}
