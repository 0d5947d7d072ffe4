//! Core types and definitions for GLOBEFLIGHT.
//!
//! This crate defines the vocabulary shared across all other crates:
//! coordinates, locations, host commands, engine events, frame snapshots
//! and tuning constants. It has no dependency on the engine or any host.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod labels;
pub mod state;
pub mod types;

pub use enums::{AnimationPhase, LocationId};
pub use types::GeoCoordinate;
