//! Animation engine for GLOBEFLIGHT.
//!
//! Owns the view state and the single active animation clock, runs the
//! Idle → Morphing → Flying → Arrived cycle one frame at a time, and drives
//! a host-supplied rendering surface. Completely headless, so every cycle
//! can be replayed deterministically in tests.

pub mod clock;
pub mod config;
pub mod engine;
pub mod hooks;
pub mod phases;
pub mod view_state;

pub use globeflight_core as core;
pub use globeflight_geo as geo;

pub use clock::{AnimationClock, ClockAction, ClockId, ClockTick};
pub use config::{ConfigError, EngineConfig};
pub use engine::{EngineBuilder, FlightEngine};
pub use hooks::{ArrivalHook, NullSurface, RenderSurface};
pub use view_state::ViewState;
