use std::sync::{Arc, Mutex, MutexGuard};

use crate::driver::error::DriverError;
use crate::driver::gesture::Gesture;
use crate::driver::snapshot::ElementSnapshot;
use crate::driver::{Driver, ElementTarget};

type GestureHandler = dyn Fn(&mut ElementSnapshot, &ElementTarget, &Gesture) + Send + Sync;

/// In-process driver over a shared, mutable element tree.
///
/// Clones share the tree, so a test can keep one handle to mutate the UI
/// (possibly from another thread) while a harness polls through another.
#[derive(Clone)]
pub struct MemoryDriver {
    tree: Arc<Mutex<ElementSnapshot>>,
    performed: Arc<Mutex<Vec<(ElementTarget, Gesture)>>>,
    handler: Option<Arc<GestureHandler>>,
}

impl MemoryDriver {
    pub fn new(tree: ElementSnapshot) -> Self {
        MemoryDriver {
            tree: Arc::new(Mutex::new(tree)),
            performed: Arc::new(Mutex::new(Vec::new())),
            handler: None,
        }
    }

    /// Install a reaction to dispatched gestures, e.g. toggling selection on
    /// tap or appending typed text to a field's value.
    pub fn on_gesture<F>(mut self, handler: F) -> Self
    where
        F: Fn(&mut ElementSnapshot, &ElementTarget, &Gesture) + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn update<F: FnOnce(&mut ElementSnapshot)>(&self, f: F) {
        f(&mut lock(&self.tree));
    }

    pub fn replace(&self, tree: ElementSnapshot) {
        *lock(&self.tree) = tree;
    }

    pub fn current(&self) -> ElementSnapshot {
        lock(&self.tree).clone()
    }

    /// Gestures dispatched so far, in order.
    pub fn performed(&self) -> Vec<(ElementTarget, Gesture)> {
        lock(&self.performed).clone()
    }

    pub fn clear_performed(&self) {
        lock(&self.performed).clear();
    }
}

impl Driver for MemoryDriver {
    fn snapshot(&self) -> Result<ElementSnapshot, DriverError> {
        Ok(self.current())
    }

    fn perform(&self, target: &ElementTarget, gesture: &Gesture) -> Result<(), DriverError> {
        let mut tree = lock(&self.tree);
        if tree.at(&target.index_path).is_none() {
            return Err(DriverError::Detached(target.index_path.clone()));
        }

        lock(&self.performed).push((target.clone(), gesture.clone()));
        tracing::debug!(gesture = gesture.name(), element = ?target.identifier, "memory driver gesture");

        if let Some(handler) = &self.handler {
            handler(&mut tree, target, gesture);
        }
        Ok(())
    }
}

// A panic while holding the lock leaves the tree usable for inspection.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
