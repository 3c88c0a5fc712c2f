use std::panic::Location;

use crate::descriptor::descriptor_model::Pinchable;
use crate::driver::gesture::Gesture;
use crate::lookup::element::Element;

pub trait PinchableElement {
    /// Pinch by `scale` (below 1 zooms out) at `velocity` scale factor per
    /// second.
    fn pinch(&self, scale: f64, velocity: f64) -> &Self;

    fn pinch_over(&self, scale: f64, duration_secs: f64) -> &Self;
}

impl<D: Pinchable> PinchableElement for Element<D> {
    #[track_caller]
    fn pinch(&self, scale: f64, velocity: f64) -> &Self {
        self.dispatch(Gesture::Pinch { scale, velocity }, Location::caller())
    }

    #[track_caller]
    fn pinch_over(&self, scale: f64, duration_secs: f64) -> &Self {
        self.pinch(scale, scale / duration_secs)
    }
}
