//! GLOBEFLIGHT headless host.
//!
//! Wires the engine to a frame loop thread, reads commands from a line-based
//! input and writes one JSON record per rendered frame.

pub mod host_loop;
pub mod ipc;
pub mod state;
pub mod surface;
pub mod tour;

pub use globeflight_core as core;
