//! Per-frame state handed to rendering surfaces and hosts.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{AnimationPhase, LocationId};
use crate::events::EngineEvent;
use crate::types::{FrameTime, Rotation};

/// Everything a surface needs to place geometry for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParameters {
    /// Pixels per unit of the raw projection.
    pub scale: f64,
    pub rotation: Rotation,
    /// Angular radius (degrees) around the view center beyond which geometry is hidden.
    pub clip_angle: f64,
    /// Pixel position of the projection origin.
    pub translate: DVec2,
    /// Blend factor between the flat (0.0) and globe (1.0) raw projections.
    pub morph: f64,
}

/// Timing of the running phase, recomputed every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightProgress {
    pub elapsed_secs: f64,
    /// Linear progress in [0, 1].
    pub t: f64,
    /// Eased progress in [0, 1].
    pub eased: f64,
}

/// Directional marker drawn at the screen center during flight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerView {
    /// Screen-space heading toward the target (degrees, 0 = +x, clockwise since y points down).
    pub heading_deg: f64,
    /// Rotation to apply to the marker glyph (heading plus glyph offset).
    pub rotation_deg: f64,
    /// Pixel position of the marker.
    pub screen: DVec2,
}

/// What the surface is asked to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub phase: AnimationPhase,
    pub marker: Option<MarkerView>,
}

/// Complete engine state after a tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: FrameTime,
    pub phase: AnimationPhase,
    pub params: ProjectionParameters,
    pub progress: Option<FlightProgress>,
    pub marker: Option<MarkerView>,
    pub last_location: LocationId,
    pub target: Option<LocationId>,
    /// Great-circle distance (km) from the view center to the target during flight.
    pub remaining_km: Option<f64>,
    pub events: Vec<EngineEvent>,
}
