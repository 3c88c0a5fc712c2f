use std::fmt;
use std::marker::PhantomData;
use std::panic::Location;

use crate::descriptor::descriptor_model::Descriptor;
use crate::descriptor::field::{Field, ListField};
use crate::descriptor::primitives::AnyView;
use crate::driver::gesture::{Gesture, LONG_PRESS_SECS};
use crate::driver::snapshot::{ElementSnapshot, Rect, Vector};
use crate::lookup::list::ElementList;
use crate::lookup::scope::Scope;
use crate::testing::harness::Harness;
use crate::testing::wait::Wait;

/// Typed handle on a live element addressed through descriptor `D`.
///
/// Resolution is lazy: every accessor takes a fresh snapshot, so a handle
/// stays valid across UI updates and simply reports absence when its element
/// is gone.
pub struct Element<D> {
    harness: Harness,
    scope: Scope,
    _marker: PhantomData<fn() -> D>,
}

impl<D> Clone for Element<D> {
    fn clone(&self) -> Self {
        Element {
            harness: self.harness.clone(),
            scope: self.scope.clone(),
            _marker: PhantomData,
        }
    }
}

impl<D> fmt::Debug for Element<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Element").field(&self.scope.description()).finish()
    }
}

impl<D: Descriptor> Element<D> {
    pub fn new(harness: Harness, scope: Scope) -> Self {
        Element {
            harness,
            scope,
            _marker: PhantomData,
        }
    }

    pub fn harness(&self) -> &Harness {
        &self.harness
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Accessor chain, e.g. `Listing.items[1].title`.
    pub fn description(&self) -> &str {
        self.scope.description()
    }

    /// Child element behind `field`.
    pub fn get<V: Descriptor>(&self, field: Field<D, V>) -> Element<V> {
        Element::new(
            self.harness.clone(),
            self.scope.field(field.segment(), &V::type_name(), V::KIND),
        )
    }

    /// Repeated children behind `field`.
    pub fn list<V: Descriptor>(&self, field: ListField<D, V>) -> ElementList<V> {
        ElementList::new(
            self.harness.clone(),
            self.scope.list(field.segment(), V::type_name()),
        )
    }

    /// Project the live element, `None` when absent.
    pub fn observe<T>(&self, projection: impl FnOnce(Option<&ElementSnapshot>) -> T) -> T {
        self.harness.observe(self.scope.query(), projection)
    }

    /// Owned copy of the live element.
    pub fn snapshot(&self) -> Option<ElementSnapshot> {
        self.observe(|node| node.cloned())
    }

    pub(crate) fn check<T: PartialEq + fmt::Debug>(
        &self,
        what: &str,
        expected: &T,
        actual: &T,
        location: &Location<'_>,
    ) -> &Self {
        self.harness
            .check(format!("{} {}", self.description(), what), expected, actual, Some(location.into()));
        self
    }

    pub(crate) fn wait_until<T, F>(
        &self,
        what: &str,
        projection: F,
        expected: T,
        wait: Wait,
        location: &Location<'_>,
    ) -> &Self
    where
        T: PartialEq + fmt::Debug,
        F: Fn(Option<&ElementSnapshot>) -> T,
    {
        let subject = format!("Element {}", self.description());
        self.harness.wait_for(
            self.scope.query(),
            &subject,
            what,
            projection,
            &expected,
            wait,
            Some(location.into()),
        );
        self
    }

    pub(crate) fn dispatch(&self, gesture: Gesture, location: &Location<'_>) -> &Self {
        self.harness
            .gesture(self.scope.query(), self.description(), gesture, Some(location.into()));
        self
    }

    /// Run `action` until `condition` holds, at most `limit` times.
    pub(crate) fn repeat<A, C>(&self, mut action: A, limit: usize, condition: C) -> &Self
    where
        A: FnMut(&Self),
        C: Fn(&Self) -> bool,
    {
        let mut count = 0;
        while !condition(self) && count < limit {
            action(self);
            count += 1;
        }
        self
    }

    // ------------------------------------------------------------------------
    // Existence, frame, hittability
    // ------------------------------------------------------------------------

    pub fn exists(&self) -> bool {
        self.observe(|node| node.is_some())
    }

    pub fn frame(&self) -> Option<Rect> {
        self.observe(|node| node.map(|n| n.frame))
    }

    pub fn is_hittable(&self) -> bool {
        self.observe(|node| node.is_some_and(|n| n.hittable))
    }

    #[track_caller]
    pub fn assert_exists(&self, exists: bool) -> &Self {
        self.check("exists", &exists, &self.exists(), Location::caller())
    }

    #[track_caller]
    pub fn assert_frame(&self, frame: Option<Rect>) -> &Self {
        self.check("frame", &frame, &self.frame(), Location::caller())
    }

    #[track_caller]
    pub fn assert_hittable(&self, hittable: bool) -> &Self {
        self.check("hittable", &hittable, &self.is_hittable(), Location::caller())
    }

    #[track_caller]
    pub fn wait_for_existence(&self, wait: Wait) -> &Self {
        self.wait_until("did not appear", |n| n.is_some(), true, wait, Location::caller())
    }

    #[track_caller]
    pub fn wait_for_non_existence(&self, wait: Wait) -> &Self {
        self.wait_until("did not disappear", |n| n.is_some(), false, wait, Location::caller())
    }

    #[track_caller]
    pub fn wait_for_frame(&self, frame: Rect, wait: Wait) -> &Self {
        self.wait_until(
            &format!("frame was not equal to {:?}", frame),
            |n| n.map(|n| n.frame),
            Some(frame),
            wait,
            Location::caller(),
        )
    }

    #[track_caller]
    pub fn wait_for_hittable(&self, wait: Wait) -> &Self {
        self.wait_until(
            "was not hittable",
            |n| n.is_some_and(|n| n.hittable),
            true,
            wait,
            Location::caller(),
        )
    }

    #[track_caller]
    pub fn wait_for_unhittable(&self, wait: Wait) -> &Self {
        self.wait_until(
            "was not unhittable",
            |n| n.is_some_and(|n| n.hittable),
            false,
            wait,
            Location::caller(),
        )
    }

    /// Print the element's subtree to stdout.
    pub fn print(&self) -> &Self {
        match self.snapshot() {
            Some(node) => print!("{}", node.debug_tree()),
            None => println!("{}: <absent>", self.description()),
        }
        self
    }

    // ------------------------------------------------------------------------
    // Taps and presses
    // ------------------------------------------------------------------------

    #[track_caller]
    pub fn tap(&self) -> &Self {
        self.dispatch(Gesture::tap(), Location::caller())
    }

    /// Tap at a normalized offset inside the element.
    #[track_caller]
    pub fn tap_at(&self, x: f64, y: f64) -> &Self {
        self.dispatch(
            Gesture::Tap {
                at: Vector::new(x, y),
                taps: 1,
                touches: 1,
            },
            Location::caller(),
        )
    }

    #[track_caller]
    pub fn tap_count(&self, taps: u32, touches: u32) -> &Self {
        self.dispatch(
            Gesture::Tap {
                at: Vector::CENTER,
                taps,
                touches,
            },
            Location::caller(),
        )
    }

    #[track_caller]
    pub fn double_tap(&self) -> &Self {
        self.dispatch(Gesture::DoubleTap { at: Vector::CENTER }, Location::caller())
    }

    #[track_caller]
    pub fn double_tap_at(&self, x: f64, y: f64) -> &Self {
        self.dispatch(
            Gesture::DoubleTap {
                at: Vector::new(x, y),
            },
            Location::caller(),
        )
    }

    #[track_caller]
    pub fn press(&self, duration_secs: f64) -> &Self {
        self.dispatch(
            Gesture::Press {
                at: Vector::CENTER,
                duration_secs,
            },
            Location::caller(),
        )
    }

    #[track_caller]
    pub fn press_at(&self, duration_secs: f64, x: f64, y: f64) -> &Self {
        self.dispatch(
            Gesture::Press {
                at: Vector::new(x, y),
                duration_secs,
            },
            Location::caller(),
        )
    }

    /// Press for half a second.
    #[track_caller]
    pub fn long_press(&self) -> &Self {
        self.dispatch(Gesture::long_press(Vector::CENTER), Location::caller())
    }

    #[track_caller]
    pub fn long_press_at(&self, x: f64, y: f64) -> &Self {
        self.dispatch(
            Gesture::Press {
                at: Vector::new(x, y),
                duration_secs: LONG_PRESS_SECS,
            },
            Location::caller(),
        )
    }
}

impl Element<AnyView> {
    /// The same live element, addressed as `W`.
    pub fn cast<W: Descriptor>(&self) -> Element<W> {
        Element::new(self.harness.clone(), self.scope.rebind(&W::type_name()))
    }
}
