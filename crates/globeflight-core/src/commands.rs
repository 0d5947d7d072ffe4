//! Host commands sent to the engine.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::LocationId;

/// Everything a host can ask the engine to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    /// Fly to a serviced location.
    SelectLocation { location: LocationId },
    /// Fly to whatever serviced location a clicked boundary feature belongs to.
    /// Features that are not serviced are ignored.
    SelectFeature { iso_numeric: u16 },
    /// Abort any animation and restore the flat map.
    ReturnToStart,
    /// Host-side navigation changed the current location without a flight.
    SyncLastLocation { location: LocationId },
    /// Drawing area changed size.
    Resize { width: f64, height: f64 },
}
