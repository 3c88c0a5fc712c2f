#![allow(dead_code)]

use screen_keys::driver::ElementTarget;
use screen_keys::driver::Gesture;
use screen_keys::prelude::*;
use screen_keys::testing::WaitOptions;
use std::time::Duration;

// ============================================================================
// Descriptors
// ============================================================================

descriptor! {
    pub view Row [Selectable, Disableable] {
        field TITLE: StaticText = "title";
        field ICON: StaticImage = "icon";
    }
}

descriptor! {
    /// Top-level plain group: collapses to its own identity.
    pub group Header {
        field CAPTION: StaticText = "caption";
    }
}

descriptor! {
    pub view SearchBox [Editable] {}
}

descriptor! {
    pub screen Listing [Swipeable, Pinchable, Rotatable] {
        list ITEMS: Row = "items";
        field HEADER: Header = "header";
        field SEARCH: SearchBox = "search";
    }
}

descriptor! {
    pub view UserRow [Text, Selectable] {
        field NAME: StaticText = "name";
    }
}

descriptor! {
    /// Declared inside `UserList`, so it keeps the ancestor chain.
    pub view UserListContent as "UserList.Content" {
        field TITLE: StaticText = "title";
        list USERS: UserRow = "users";
    }
}

descriptor! {
    pub group UserListFooter as "UserList.Footer" {
        field NOTE: StaticText = "note";
    }
}

descriptor! {
    pub screen UserList {
        field CONTENT: UserListContent = "content";
        field FOOTER: UserListFooter = "footer";
    }
}

descriptor! {
    pub view Badge [Text] {
        field VALUE: StaticText = "value";
    }
}

descriptor! {
    pub screen Dashboard {
        field WIDGET: AnyView = "widget";
        field STATUS: StaticText = "status";
    }
}

// ============================================================================
// Live trees
// ============================================================================

/// A row tagged the way the app tags it, with an optional discriminator.
pub fn row(title: &str, key: Option<&str>) -> ElementSnapshot {
    let list_key = match key {
        Some(k) => Listing::ITEMS.key_for(k),
        None => Listing::ITEMS.key(),
    };
    ElementSnapshot::new(ElementType::Cell)
        .label(title)
        .child(ElementSnapshot::static_text(title).with_key(&Row::TITLE.key()))
        .child(ElementSnapshot::new(ElementType::Image).label(format!("{}-icon", title)).with_key(&Row::ICON.key()))
        .with_key(&list_key)
}

/// `Listing` with rows Alpha, Beta, Gamma; only Gamma carries a discriminator.
pub fn listing_tree() -> ElementSnapshot {
    ElementSnapshot::application()
        .child(
            ElementSnapshot::new(ElementType::Other)
                .child(ElementSnapshot::static_text("Fruits").with_key(&Header::CAPTION.key())),
        )
        .child(
            ElementSnapshot::new(ElementType::ScrollView)
                .child(row("Alpha", None))
                .child(row("Beta", None))
                .child(row("Gamma", Some("Gamma"))),
        )
        .child(
            ElementSnapshot::new(ElementType::SearchField)
                .placeholder("Search")
                .with_key(&Listing::SEARCH.key()),
        )
}

pub fn user_row(id: &str, name: &str) -> ElementSnapshot {
    ElementSnapshot::new(ElementType::Cell)
        .child(ElementSnapshot::static_text(name).with_key(&UserRow::NAME.key()))
        .with_key(&UserListContent::USERS.key_for(id))
}

pub fn user_list_tree() -> ElementSnapshot {
    ElementSnapshot::application()
        .child(
            ElementSnapshot::new(ElementType::Other)
                .with_key(&UserList::CONTENT.key())
                .child(ElementSnapshot::static_text("Users").with_key(&UserListContent::TITLE.key()))
                .child(user_row("7", "Ada"))
                .child(user_row("9", "Grace")),
        )
        .child(ElementSnapshot::static_text("2 users").with_key(&UserListFooter::NOTE.key()))
}

pub fn dashboard_tree() -> ElementSnapshot {
    ElementSnapshot::application()
        .child(
            ElementSnapshot::new(ElementType::Other)
                .with_key(&Dashboard::WIDGET.key())
                .child(ElementSnapshot::static_text("42").with_key(&Badge::VALUE.key())),
        )
        .child(ElementSnapshot::static_text("Idle").with_key(&Dashboard::STATUS.key()))
}

// ============================================================================
// Harness helpers
// ============================================================================

/// Short poll interval so wait tests stay fast.
pub fn fast_options() -> WaitOptions {
    WaitOptions {
        timeout: Duration::from_secs(4),
        poll_interval: Duration::from_millis(10),
    }
}

pub fn harness_for(driver: &MemoryDriver) -> Harness {
    Harness::new(driver.clone()).with_options(fast_options())
}

/// Gesture handler that toggles `selected` on tap and appends typed text to
/// the target's value, deleting on `\u{8}`.
pub fn interactive(tree: &mut ElementSnapshot, target: &ElementTarget, gesture: &Gesture) {
    let Some(node) = tree.at_mut(&target.index_path) else {
        return;
    };
    match gesture {
        Gesture::Tap { .. } => node.selected = !node.selected,
        Gesture::TypeText { text } => {
            let mut value = node.value.clone().unwrap_or_default();
            for c in text.chars() {
                if c == '\u{8}' {
                    value.pop();
                } else {
                    value.push(c);
                }
            }
            node.value = Some(value);
        }
        _ => {}
    }
}
