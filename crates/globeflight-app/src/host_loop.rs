//! Host loop thread: runs the flight engine at 60 Hz.
//!
//! The engine is created inside this thread, since its host collaborators
//! are not `Send`. Commands arrive via an `mpsc` channel; arrivals are sent
//! back on a second channel. Frames go to the surface the engine owns.

use std::io::Write;
use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info};

use globeflight_core::constants::{DT, FRAME_RATE};
use globeflight_core::enums::Locale;
use globeflight_core::LocationId;
use globeflight_engine::{ConfigError, EngineConfig, FlightEngine};
use globeflight_geo::StaticCentroids;

use crate::state::LoopCommand;
use crate::surface::JsonLinesSurface;

/// Nominal duration of one frame.
const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to spawn host loop thread: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("host loop exited before the engine was ready")]
    LoopExited,
}

/// Handles to a running host loop.
pub struct HostLoop {
    pub commands: mpsc::Sender<LoopCommand>,
    pub arrivals: mpsc::Receiver<LocationId>,
    thread: JoinHandle<()>,
}

impl HostLoop {
    /// Ask the loop to stop and wait for it.
    pub fn shutdown(self) {
        let _ = self.commands.send(LoopCommand::Shutdown);
        let _ = self.thread.join();
    }
}

/// Spawns the host loop in a new thread, writing frames to `output`.
///
/// Returns once the engine has been built, so configuration errors surface
/// here rather than inside the thread.
pub fn spawn_host_loop<W>(
    config: EngineConfig,
    output: W,
    locale: Locale,
) -> Result<HostLoop, HostError>
where
    W: Write + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();
    let (arrival_tx, arrival_rx) = mpsc::channel::<LocationId>();
    let (ready_tx, ready_rx) = mpsc::channel::<Result<(), ConfigError>>();

    let thread = std::thread::Builder::new()
        .name("globeflight-host-loop".into())
        .spawn(move || {
            let surface = JsonLinesSurface::new(output, &StaticCentroids, locale);
            let built = FlightEngine::builder(config)
                .surface(surface)
                .on_arrival(move |location: LocationId| {
                    let _ = arrival_tx.send(location);
                })
                .build();
            match built {
                Ok(engine) => {
                    let _ = ready_tx.send(Ok(()));
                    run_host_loop(engine, cmd_rx);
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                }
            }
        })
        .map_err(HostError::Spawn)?;

    match ready_rx.recv() {
        Ok(Ok(())) => Ok(HostLoop {
            commands: cmd_tx,
            arrivals: arrival_rx,
            thread,
        }),
        Ok(Err(e)) => {
            let _ = thread.join();
            Err(e.into())
        }
        Err(_) => Err(HostError::LoopExited),
    }
}

/// The host loop. Runs until Shutdown command or channel disconnect.
fn run_host_loop(mut engine: FlightEngine, cmd_rx: mpsc::Receiver<LoopCommand>) {
    let mut next_frame_time = Instant::now();
    let mut pending = Vec::new();
    info!("host loop running");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::Host(cmd)) => pending.push(cmd),
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(frames = engine.time().frame, "host loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }
        engine.queue_commands(pending.drain(..));

        // 2. Advance one frame; the surface writes whatever was rendered
        let snapshot = engine.tick(DT);
        for event in &snapshot.events {
            debug!(?event, frame = snapshot.time.frame, "engine event");
        }

        // 3. Sleep until next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_frame_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use globeflight_core::commands::HostCommand;

    /// Writer the test can read back after the loop owns a clone.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn fast_config() -> EngineConfig {
        EngineConfig {
            morph_duration_secs: 0.05,
            flight_duration_secs: 0.05,
            ..Default::default()
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();
        tx.send(LoopCommand::Host(HostCommand::ReturnToStart)).unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let commands: Vec<LoopCommand> = rx.try_iter().collect();
        assert_eq!(
            commands,
            vec![
                LoopCommand::Host(HostCommand::ReturnToStart),
                LoopCommand::Shutdown
            ]
        );
    }

    #[test]
    fn test_frame_duration_constant() {
        assert_eq!(FRAME_DURATION.as_nanos(), (1_000_000_000u64 / 60) as u128);
    }

    #[test]
    fn test_invalid_config_reported_from_spawn() {
        let config = EngineConfig {
            flight_duration_secs: -1.0,
            ..Default::default()
        };
        let result = spawn_host_loop(config, Vec::new(), Locale::English);
        assert!(matches!(result, Err(HostError::Config(_))));
    }

    #[test]
    fn test_loop_flies_and_reports_arrival() {
        let buffer = SharedBuffer::default();
        let host = spawn_host_loop(fast_config(), buffer.clone(), Locale::English).unwrap();
        host.commands
            .send(LoopCommand::Host(HostCommand::SelectLocation {
                location: LocationId::Japan,
            }))
            .unwrap();

        let arrived = host.arrivals.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(arrived, LocationId::Japan);
        host.shutdown();

        let out = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        // Initial flat frame plus morph and flight frames.
        assert!(out.lines().count() > 3);
        for line in out.lines() {
            let _: serde_json::Value = serde_json::from_str(line).unwrap();
        }
    }

    #[test]
    fn test_loop_stops_when_sender_dropped() {
        let host = spawn_host_loop(fast_config(), Vec::new(), Locale::English).unwrap();
        let HostLoop {
            commands, thread, ..
        } = host;
        drop(commands);
        thread.join().unwrap();
    }
}
