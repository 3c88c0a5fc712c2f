use std::panic::Location;

use crate::descriptor::descriptor_model::Swipeable;
use crate::driver::gesture::{Gesture, SwipeDirection, Velocity};
use crate::driver::snapshot::Vector;
use crate::lookup::element::Element;

/// Default number of attempts for the `*_until` helpers.
pub const REPEAT_LIMIT: usize = 16;

/// Swipes and drags. The `*_until` variants repeat the gesture until the
/// condition holds, at most `limit` times.
pub trait SwipeableElement: Sized {
    fn swipe(&self, direction: SwipeDirection, velocity: Velocity) -> &Self;

    fn swipe_until<C: Fn(&Self) -> bool>(
        &self,
        direction: SwipeDirection,
        velocity: Velocity,
        limit: usize,
        condition: C,
    ) -> &Self;

    /// Press briefly at `from` and drag to `to` (normalized offsets).
    fn drag(&self, from: Vector, to: Vector) -> &Self;

    fn drag_until<C: Fn(&Self) -> bool>(&self, from: Vector, to: Vector, limit: usize, condition: C) -> &Self;

    /// Drag across the centre by a normalized delta, clamped to the element.
    fn drag_by(&self, dx: f64, dy: f64) -> &Self;

    fn drag_by_until<C: Fn(&Self) -> bool>(&self, dx: f64, dy: f64, limit: usize, condition: C) -> &Self;

    fn swipe_up(&self, velocity: Velocity) -> &Self {
        self.swipe(SwipeDirection::Up, velocity)
    }

    fn swipe_down(&self, velocity: Velocity) -> &Self {
        self.swipe(SwipeDirection::Down, velocity)
    }

    fn swipe_left(&self, velocity: Velocity) -> &Self {
        self.swipe(SwipeDirection::Left, velocity)
    }

    fn swipe_right(&self, velocity: Velocity) -> &Self {
        self.swipe(SwipeDirection::Right, velocity)
    }
}

impl<D: Swipeable> SwipeableElement for Element<D> {
    #[track_caller]
    fn swipe(&self, direction: SwipeDirection, velocity: Velocity) -> &Self {
        self.dispatch(Gesture::Swipe { direction, velocity }, Location::caller())
    }

    #[track_caller]
    fn swipe_until<C: Fn(&Self) -> bool>(
        &self,
        direction: SwipeDirection,
        velocity: Velocity,
        limit: usize,
        condition: C,
    ) -> &Self {
        let location = Location::caller();
        self.repeat(
            |el| {
                el.dispatch(Gesture::Swipe { direction, velocity }, location);
            },
            limit,
            condition,
        )
    }

    #[track_caller]
    fn drag(&self, from: Vector, to: Vector) -> &Self {
        self.dispatch(Gesture::drag(from, to), Location::caller())
    }

    #[track_caller]
    fn drag_until<C: Fn(&Self) -> bool>(&self, from: Vector, to: Vector, limit: usize, condition: C) -> &Self {
        let location = Location::caller();
        self.repeat(
            |el| {
                el.dispatch(Gesture::drag(from, to), location);
            },
            limit,
            condition,
        )
    }

    #[track_caller]
    fn drag_by(&self, dx: f64, dy: f64) -> &Self {
        self.dispatch(Gesture::drag_by(dx, dy), Location::caller())
    }

    #[track_caller]
    fn drag_by_until<C: Fn(&Self) -> bool>(&self, dx: f64, dy: f64, limit: usize, condition: C) -> &Self {
        let location = Location::caller();
        self.repeat(
            |el| {
                el.dispatch(Gesture::drag_by(dx, dy), location);
            },
            limit,
            condition,
        )
    }
}
