use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::assign::identifiable::Identifiable;

// ============================================================================
// Geometry
// ============================================================================

/// Offset normalized to an element's frame: `(0, 0)` is the top-left corner,
/// `(1, 1)` the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub dx: f64,
    pub dy: f64,
}

impl Vector {
    pub const CENTER: Vector = Vector { dx: 0.5, dy: 0.5 };

    pub const fn new(dx: f64, dy: f64) -> Self {
        Vector { dx, dy }
    }
}

impl Default for Vector {
    fn default() -> Self {
        Vector::CENTER
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }
}

// ============================================================================
// Element snapshot
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    Application,
    StaticText,
    Image,
    Button,
    Toggle,
    TextField,
    SecureTextField,
    TextView,
    SearchField,
    Cell,
    ScrollView,
    /// Also stands in for any host type not listed here.
    #[default]
    #[serde(other)]
    Other,
}

impl ElementType {
    /// Element types whose value is user-editable text.
    pub fn is_text_input(self) -> bool {
        matches!(
            self,
            ElementType::TextField
                | ElementType::TextView
                | ElementType::SecureTextField
                | ElementType::SearchField
        )
    }
}

/// One node of the live UI tree, as reported by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    #[serde(rename = "type", default)]
    pub element_type: ElementType,

    #[serde(default)]
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub selected: bool,

    #[serde(default)]
    pub focused: bool,

    #[serde(default = "default_true")]
    pub hittable: bool,

    #[serde(default)]
    pub frame: Rect,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementSnapshot>,
}

fn default_true() -> bool {
    true
}

impl Default for ElementSnapshot {
    fn default() -> Self {
        ElementSnapshot {
            identifier: None,
            element_type: ElementType::Other,
            label: String::new(),
            value: None,
            placeholder: None,
            enabled: true,
            selected: false,
            focused: false,
            hittable: true,
            frame: Rect::default(),
            children: Vec::new(),
        }
    }
}

impl ElementSnapshot {
    pub fn new(element_type: ElementType) -> Self {
        ElementSnapshot {
            element_type,
            ..Default::default()
        }
    }

    pub fn application() -> Self {
        Self::new(ElementType::Application)
    }

    pub fn static_text(label: impl Into<String>) -> Self {
        Self::new(ElementType::StaticText).label(label)
    }

    pub fn identified(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn hittable(mut self, hittable: bool) -> Self {
        self.hittable = hittable;
        self
    }

    pub fn frame(mut self, frame: Rect) -> Self {
        self.frame = frame;
        self
    }

    pub fn child(mut self, child: ElementSnapshot) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementSnapshot>) -> Self {
        self.children.extend(children);
        self
    }

    /// Node at `index_path` below `self` (empty path is `self`).
    pub fn at(&self, index_path: &[usize]) -> Option<&ElementSnapshot> {
        index_path
            .iter()
            .try_fold(self, |node, &i| node.children.get(i))
    }

    pub fn at_mut(&mut self, index_path: &[usize]) -> Option<&mut ElementSnapshot> {
        let mut node = self;
        for &i in index_path {
            node = node.children.get_mut(i)?;
        }
        Some(node)
    }

    /// First node in pre-order (self included) with the given identifier.
    pub fn find(&self, identifier: &str) -> Option<&ElementSnapshot> {
        if self.identifier.as_deref() == Some(identifier) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(identifier))
    }

    pub fn find_mut(&mut self, identifier: &str) -> Option<&mut ElementSnapshot> {
        if self.identifier.as_deref() == Some(identifier) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(identifier))
    }

    /// Remove the first descendant with `identifier`. Returns whether one was
    /// removed.
    pub fn remove(&mut self, identifier: &str) -> bool {
        if let Some(pos) = self
            .children
            .iter()
            .position(|c| c.identifier.as_deref() == Some(identifier))
        {
            self.children.remove(pos);
            return true;
        }
        self.children.iter_mut().any(|c| c.remove(identifier))
    }

    /// Indented one-line-per-node rendering of the subtree.
    pub fn debug_tree(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) {
        let _ = write!(out, "{}{:?}", "  ".repeat(depth), self.element_type);
        if let Some(id) = &self.identifier {
            let _ = write!(out, " id='{}'", id);
        }
        if !self.label.is_empty() {
            let _ = write!(out, " label='{}'", self.label);
        }
        if let Some(value) = &self.value {
            let _ = write!(out, " value='{}'", value);
        }
        if !self.enabled {
            out.push_str(" disabled");
        }
        if self.selected {
            out.push_str(" selected");
        }
        if self.focused {
            out.push_str(" focused");
        }
        out.push('\n');

        for child in &self.children {
            child.write_tree(out, depth + 1);
        }
    }
}

impl Identifiable for ElementSnapshot {
    fn set_accessibility_identifier(&mut self, identifier: Option<String>) {
        self.identifier = identifier;
    }

    fn accessibility_identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }
}
