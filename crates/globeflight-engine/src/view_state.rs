//! Owned view state: the current projection, the last arrived location and
//! the viewport. Phase functions read it and return new parameters; only the
//! engine writes it.

use globeflight_core::state::ProjectionParameters;
use globeflight_core::types::{lerp, Rotation, Viewport};
use globeflight_core::{GeoCoordinate, LocationId};

use crate::config::EngineConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    params: ProjectionParameters,
    last_location: LocationId,
    viewport: Viewport,
}

impl ViewState {
    /// Flat map, positioned at the configured default location.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            params: flat_parameters(config, &config.viewport),
            last_location: config.default_location,
            viewport: config.viewport,
        }
    }

    pub fn params(&self) -> &ProjectionParameters {
        &self.params
    }

    pub fn last_location(&self) -> LocationId {
        self.last_location
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub(crate) fn set_params(&mut self, params: ProjectionParameters) {
        self.params = params;
    }

    pub(crate) fn set_last_location(&mut self, location: LocationId) {
        self.last_location = location;
    }

    /// Replace the viewport and refit the current parameters to it, keeping
    /// rotation, clip and morph.
    pub(crate) fn resize(&mut self, config: &EngineConfig, viewport: Viewport) {
        self.viewport = viewport;
        self.params.scale = lerp(
            flat_scale(config, &viewport),
            globe_scale(config, &viewport),
            self.params.morph,
        );
        self.params.translate = viewport.center();
    }
}

pub fn flat_scale(config: &EngineConfig, viewport: &Viewport) -> f64 {
    viewport.width / config.flat_scale_divisor
}

pub fn globe_scale(config: &EngineConfig, viewport: &Viewport) -> f64 {
    viewport.width / config.globe_scale_divisor
}

/// Unrotated, effectively unclipped equirectangular map.
pub fn flat_parameters(config: &EngineConfig, viewport: &Viewport) -> ProjectionParameters {
    ProjectionParameters {
        scale: flat_scale(config, viewport),
        rotation: Rotation::IDENTITY,
        clip_angle: config.flat_clip_angle,
        translate: viewport.center(),
        morph: 0.0,
    }
}

/// Pure orthographic globe with `center` in the middle of the viewport.
pub fn globe_parameters(
    config: &EngineConfig,
    viewport: &Viewport,
    center: GeoCoordinate,
) -> ProjectionParameters {
    ProjectionParameters {
        scale: globe_scale(config, viewport),
        rotation: Rotation::centering(center),
        clip_angle: config.globe_clip_angle,
        translate: viewport.center(),
        morph: 1.0,
    }
}
