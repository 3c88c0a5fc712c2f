use serde::{Deserialize, Serialize};

use crate::descriptor::tree::DescriptorTree;
use crate::path::type_name::TypeName;

// ============================================================================
// Node kinds and capabilities
// ============================================================================

/// What a descriptor node corresponds to in the rendered UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Root of a screen, bound to the application element.
    Screen,
    /// A rendered element carrying its own identifier.
    View,
    /// Plain grouping of fields with no element of its own.
    Group,
    /// A rendered element of unknown concrete type.
    Any,
}

impl NodeKind {
    /// Whether a field of this kind is looked up in the live tree.
    pub fn binds_element(self) -> bool {
        !matches!(self, NodeKind::Group)
    }
}

/// A family of operations a descriptor supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Text,
    Image,
    Editable,
    Selectable,
    Disableable,
    Swipeable,
    Pinchable,
    Rotatable,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u16 {
        const TEXT = 1 << 0;
        const IMAGE = 1 << 1;
        const EDITABLE = 1 << 2;
        const SELECTABLE = 1 << 3;
        const DISABLEABLE = 1 << 4;
        const SWIPEABLE = 1 << 5;
        const PINCHABLE = 1 << 6;
        const ROTATABLE = 1 << 7;
    }
}

impl Capability {
    pub const ALL: [Capability; 8] = [
        Capability::Text,
        Capability::Image,
        Capability::Editable,
        Capability::Selectable,
        Capability::Disableable,
        Capability::Swipeable,
        Capability::Pinchable,
        Capability::Rotatable,
    ];

    pub const fn flag(self) -> Capabilities {
        match self {
            Capability::Text => Capabilities::TEXT,
            Capability::Image => Capabilities::IMAGE,
            Capability::Editable => Capabilities::EDITABLE,
            Capability::Selectable => Capabilities::SELECTABLE,
            Capability::Disableable => Capabilities::DISABLEABLE,
            Capability::Swipeable => Capabilities::SWIPEABLE,
            Capability::Pinchable => Capabilities::PINCHABLE,
            Capability::Rotatable => Capabilities::ROTATABLE,
        }
    }
}

impl Capabilities {
    pub fn has(self, capability: Capability) -> bool {
        self.contains(capability.flag())
    }

    pub fn to_list(self) -> Vec<Capability> {
        Capability::ALL
            .into_iter()
            .filter(|c| self.has(*c))
            .collect()
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Capabilities::empty(), |acc, c| acc | c.flag())
    }
}

// ============================================================================
// Descriptor trait
// ============================================================================

/// A statically declared descriptor type.
///
/// Implemented by the `descriptor!` macro. `TYPE_NAME` is a reflecting name
/// (module path plus nesting chain); the module path never reaches an
/// identifier.
pub trait Descriptor: Sized + 'static {
    const TYPE_NAME: &'static str;
    const KIND: NodeKind;
    const CAPABILITIES: Capabilities = Capabilities::empty();

    fn type_name() -> TypeName {
        TypeName::parse(Self::TYPE_NAME)
    }

    /// Add this type and everything reachable from its fields to `tree`.
    fn register(tree: &mut DescriptorTree) {
        tree.begin::<Self>(Vec::new());
    }
}

// Capability markers. Operations on typed handles are only available when the
// descriptor declares the matching marker.

pub trait Text: Descriptor {}

pub trait Image: Descriptor {}

pub trait Editable: Descriptor {}

pub trait Selectable: Descriptor {}

pub trait Disableable: Descriptor {}

pub trait Swipeable: Descriptor {}

pub trait Pinchable: Descriptor {}

pub trait Rotatable: Descriptor {}
