//! Seams between the engine and its host.

use globeflight_core::state::{ProjectionParameters, RenderFrame};
use globeflight_core::LocationId;

/// Whatever draws the map. The engine pushes new parameters and then asks
/// for a frame, once per animated tick.
pub trait RenderSurface {
    fn set_projection_parameters(&mut self, params: &ProjectionParameters);
    fn render_frame(&mut self, frame: &RenderFrame);
}

/// Called exactly once per completed flight, with the arrived location.
pub trait ArrivalHook {
    fn on_arrival(&mut self, location: LocationId);
}

impl<F> ArrivalHook for F
where
    F: FnMut(LocationId),
{
    fn on_arrival(&mut self, location: LocationId) {
        self(location)
    }
}

/// Surface for hosts that only read `FrameSnapshot`s.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl RenderSurface for NullSurface {
    fn set_projection_parameters(&mut self, _params: &ProjectionParameters) {}
    fn render_frame(&mut self, _frame: &RenderFrame) {}
}
