//! Events emitted by the engine for host feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{AnimationPhase, LocationId};

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineEvent {
    /// A phase began.
    PhaseStarted {
        phase: AnimationPhase,
        target: Option<LocationId>,
    },
    /// A running animation was cut short.
    AnimationCancelled { phase: AnimationPhase },
    /// The start location had no geometry and the engine substituted another.
    StartFallback {
        requested: LocationId,
        substituted: LocationId,
    },
    /// A selection or sync command was dropped.
    CommandIgnored { reason: IgnoreReason },
    /// Flight completed; the host has been notified.
    Arrived { location: LocationId },
    /// Flat map restored.
    ReturnedToStart,
    /// Last location changed without a flight.
    LastLocationSynced { location: LocationId },
}

/// Why a command had no effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum IgnoreReason {
    /// Boundary feature does not belong to a serviced location.
    UnservicedFeature { iso_numeric: u16 },
    /// No centroid is known for the location.
    NoGeometry { location: LocationId },
    /// Last location can only be synced while idle.
    Animating { phase: AnimationPhase },
}
