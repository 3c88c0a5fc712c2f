pub mod descriptor_model;
pub mod error;
pub mod field;
pub mod macros;
pub mod primitives;
pub mod tree;

pub use descriptor_model::{
    Capabilities, Capability, Descriptor, Disableable, Editable, Image, NodeKind, Pinchable,
    Rotatable, Selectable, Swipeable, Text,
};
pub use error::DescriptorError;
pub use field::{Field, ListField};
pub use primitives::{AnyView, StaticImage, StaticText};
pub use tree::{CatalogEntry, DescriptorNode, DescriptorTree, FieldNode, FieldShape};
