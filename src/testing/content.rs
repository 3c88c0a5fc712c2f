//! Projections from a live element to the values capability checks compare.
//! Every function takes `None` for an absent element.

use crate::driver::snapshot::{ElementSnapshot, ElementType};

fn self_or_child(node: &ElementSnapshot, accept: impl Fn(ElementType) -> bool) -> Option<&ElementSnapshot> {
    if accept(node.element_type) {
        return Some(node);
    }
    node.children.iter().find(|c| accept(c.element_type))
}

pub fn text_content(node: Option<&ElementSnapshot>) -> Option<&ElementSnapshot> {
    node.and_then(|n| self_or_child(n, |t| t == ElementType::StaticText))
}

pub fn image_content(node: Option<&ElementSnapshot>) -> Option<&ElementSnapshot> {
    node.and_then(|n| self_or_child(n, |t| t == ElementType::Image))
}

pub fn editable_content(node: Option<&ElementSnapshot>) -> Option<&ElementSnapshot> {
    node.and_then(|n| self_or_child(n, ElementType::is_text_input))
}

/// Label of the static text (self or first such child).
pub fn text(node: Option<&ElementSnapshot>) -> Option<String> {
    text_content(node).map(|n| n.label.clone())
}

/// Label of the image (self or first such child).
pub fn image(node: Option<&ElementSnapshot>) -> Option<String> {
    image_content(node).map(|n| n.label.clone())
}

pub fn editable_text(node: Option<&ElementSnapshot>) -> Option<String> {
    editable_content(node).and_then(|n| n.value.clone())
}

/// Placeholder of the input; empty when the input has none.
pub fn placeholder(node: Option<&ElementSnapshot>) -> Option<String> {
    editable_content(node).map(|n| n.placeholder.clone().unwrap_or_default())
}

/// Keyboard focus of the input. No input reads as unfocused.
pub fn focused(node: Option<&ElementSnapshot>) -> bool {
    editable_content(node).is_some_and(|n| n.focused)
}

/// Selected if the element itself is, otherwise only when it has direct
/// children and all of them are.
pub fn selected(node: Option<&ElementSnapshot>) -> Option<bool> {
    let node = node?;
    if node.selected {
        return Some(true);
    }
    if node.children.is_empty() {
        return Some(false);
    }
    Some(node.children.iter().all(|c| c.selected))
}

/// Disabled if the element itself is, otherwise enabled only when every
/// direct child is.
pub fn enabled(node: Option<&ElementSnapshot>) -> Option<bool> {
    let node = node?;
    if !node.enabled {
        return Some(false);
    }
    Some(node.children.iter().all(|c| c.enabled))
}
