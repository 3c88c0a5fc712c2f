use std::panic::Location;

use crate::descriptor::descriptor_model::Rotatable;
use crate::driver::gesture::Gesture;
use crate::lookup::element::Element;

pub trait RotatableElement {
    /// Rotate by `radians` at `velocity` radians per second.
    fn rotate(&self, radians: f64, velocity: f64) -> &Self;

    fn rotate_over(&self, radians: f64, duration_secs: f64) -> &Self;

    fn rotate_degrees(&self, degrees: f64, velocity: f64) -> &Self;

    fn rotate_degrees_over(&self, degrees: f64, duration_secs: f64) -> &Self;
}

impl<D: Rotatable> RotatableElement for Element<D> {
    #[track_caller]
    fn rotate(&self, radians: f64, velocity: f64) -> &Self {
        self.dispatch(Gesture::Rotate { radians, velocity }, Location::caller())
    }

    #[track_caller]
    fn rotate_over(&self, radians: f64, duration_secs: f64) -> &Self {
        self.rotate(radians, radians / duration_secs)
    }

    #[track_caller]
    fn rotate_degrees(&self, degrees: f64, velocity: f64) -> &Self {
        self.rotate(degrees.to_radians(), velocity.to_radians())
    }

    #[track_caller]
    fn rotate_degrees_over(&self, degrees: f64, duration_secs: f64) -> &Self {
        self.rotate_degrees(degrees, degrees / duration_secs)
    }
}
