//! Phase transition math.
//!
//! Pure functions that compute projection parameters and marker heading for
//! each animated phase from plain data. No clock or host dependency.

use globeflight_core::constants::COORD_TOLERANCE_DEG;
use globeflight_core::state::{MarkerView, ProjectionParameters};
use globeflight_core::types::{lerp, Rotation, Viewport};
use globeflight_core::{GeoCoordinate, LocationId};
use globeflight_geo::{bearing, interpolate, BlendedProjection, GreatCircle};

use crate::config::EngineConfig;
use crate::view_state::{flat_parameters, globe_parameters, globe_scale};

/// Resolved endpoints of one selection cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub from: LocationId,
    pub to: LocationId,
    pub start: GeoCoordinate,
    pub target: GeoCoordinate,
}

impl Leg {
    /// A stationary leg skips the flight and arrives straight after the morph.
    pub fn is_stationary(&self) -> bool {
        self.from == self.to || self.start.approx_eq(&self.target, COORD_TOLERANCE_DEG)
    }
}

/// State carried through the Flying phase.
#[derive(Debug, Clone, Copy)]
pub struct Flight {
    pub path: GreatCircle,
    /// Initial compass bearing from start to target.
    pub bearing_deg: f64,
    /// Screen-space heading of the marker (0 = right, clockwise, y down).
    pub heading_deg: f64,
}

/// Output of one Flying tick.
#[derive(Debug, Clone, Copy)]
pub struct FlightFrame {
    pub params: ProjectionParameters,
    pub position: GeoCoordinate,
    pub heading_deg: f64,
}

/// Parameters for the flat → globe morph at eased progress `eased`.
///
/// Scale, rotation and clip angle move together from the flat defaults to a
/// globe centered on the leg's start.
pub fn morph_parameters(
    config: &EngineConfig,
    viewport: &Viewport,
    leg: &Leg,
    eased: f64,
) -> ProjectionParameters {
    let flat = flat_parameters(config, viewport);
    ProjectionParameters {
        scale: lerp(flat.scale, globe_scale(config, viewport), eased),
        rotation: Rotation::IDENTITY.lerp(&Rotation::centering(leg.start), eased),
        clip_angle: lerp(config.flat_clip_angle, config.globe_clip_angle, eased),
        translate: viewport.center(),
        morph: eased,
    }
}

/// Enter the Flying phase: pure orthographic centered on the start, with the
/// path and initial heading computed.
pub fn begin_flight(
    config: &EngineConfig,
    viewport: &Viewport,
    leg: &Leg,
) -> (Flight, ProjectionParameters) {
    let params = globe_parameters(config, viewport, leg.start);
    let bearing_deg = bearing(leg.start, leg.target);
    let heading_deg = screen_heading(
        &params,
        leg.target,
        config.initial_heading_min_screen_distance,
    )
    .unwrap_or(bearing_deg - 90.0);

    let flight = Flight {
        path: interpolate(leg.start, leg.target),
        bearing_deg,
        heading_deg,
    };
    (flight, params)
}

/// Globe centered on the path position at `eased`, with the heading updated
/// toward the target until the freeze threshold.
pub fn flight_frame(
    config: &EngineConfig,
    viewport: &Viewport,
    flight: &Flight,
    eased: f64,
) -> FlightFrame {
    let position = flight.path.at(eased);
    let params = globe_parameters(config, viewport, position);

    let heading_deg = if eased < config.heading_freeze_progress {
        screen_heading(
            &params,
            flight.path.end(),
            config.heading_min_screen_distance,
        )
        .unwrap_or(flight.heading_deg)
    } else {
        flight.heading_deg
    };

    FlightFrame {
        params,
        position,
        heading_deg,
    }
}

/// Screen angle from the viewport center to `target`, or `None` when the
/// target is within `min_distance` pixels of the center.
pub fn screen_heading(
    params: &ProjectionParameters,
    target: GeoCoordinate,
    min_distance: f64,
) -> Option<f64> {
    let projected = BlendedProjection::from_parameters(params).project(target);
    let delta = projected - params.translate;
    if !delta.is_finite() || delta.length() <= min_distance {
        return None;
    }
    Some(delta.y.atan2(delta.x).to_degrees())
}

/// Marker pinned to the viewport center, glyph rotated by the configured offset.
pub fn marker(config: &EngineConfig, viewport: &Viewport, heading_deg: f64) -> MarkerView {
    MarkerView {
        heading_deg,
        rotation_deg: heading_deg + config.marker_glyph_offset_deg,
        screen: viewport.center(),
    }
}
