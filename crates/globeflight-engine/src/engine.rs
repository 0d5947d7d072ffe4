//! Flight engine: the selection → morph → flight → arrival cycle.
//!
//! `FlightEngine` owns the view state and the single active animation clock,
//! processes host commands, drives the rendering surface and produces
//! `FrameSnapshot`s. Completely headless, so every cycle can be replayed in
//! tests.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use globeflight_core::commands::HostCommand;
use globeflight_core::events::{EngineEvent, IgnoreReason};
use globeflight_core::state::{
    FlightProgress, FrameSnapshot, MarkerView, ProjectionParameters, RenderFrame,
};
use globeflight_core::types::{FrameTime, Viewport};
use globeflight_core::{AnimationPhase, GeoCoordinate, LocationId};
use globeflight_geo::{distance_km, ease_cubic_in_out, GeometryProvider, StaticCentroids};

use crate::clock::{AnimationClock, ClockAction, ClockId, ClockTick};
use crate::config::{ConfigError, EngineConfig};
use crate::hooks::{ArrivalHook, RenderSurface};
use crate::phases::{self, Flight, Leg};
use crate::view_state::{flat_parameters, ViewState};

/// Assembles a `FlightEngine` from its config and host collaborators.
pub struct EngineBuilder {
    config: EngineConfig,
    geometry: Option<Box<dyn GeometryProvider>>,
    surface: Option<Box<dyn RenderSurface>>,
    arrival: Option<Box<dyn ArrivalHook>>,
}

impl EngineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            geometry: None,
            surface: None,
            arrival: None,
        }
    }

    /// Centroid source. Defaults to the built-in `StaticCentroids` table.
    pub fn geometry(mut self, geometry: impl GeometryProvider + 'static) -> Self {
        self.geometry = Some(Box::new(geometry));
        self
    }

    pub fn surface(mut self, surface: impl RenderSurface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    pub fn on_arrival(mut self, hook: impl ArrivalHook + 'static) -> Self {
        self.arrival = Some(Box::new(hook));
        self
    }

    /// Validate the config, check the required collaborators and draw the
    /// initial flat map.
    pub fn build(self) -> Result<FlightEngine, ConfigError> {
        self.config.validate()?;
        let surface = self.surface.ok_or(ConfigError::MissingSurface)?;
        let arrival = self.arrival.ok_or(ConfigError::MissingArrivalHook)?;
        let geometry = self
            .geometry
            .unwrap_or_else(|| Box::new(StaticCentroids) as Box<dyn GeometryProvider>);

        if geometry.centroid_of(self.config.default_location).is_none() {
            return Err(ConfigError::DefaultLocationUnresolvable(
                self.config.default_location,
            ));
        }

        let view = ViewState::new(&self.config);
        let mut engine = FlightEngine {
            config: self.config,
            view,
            phase: ActivePhase::Idle,
            clock: None,
            next_clock_id: 0,
            time: FrameTime::default(),
            progress: None,
            marker: None,
            remaining_km: None,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            geometry,
            surface,
            arrival,
        };
        let initial = *engine.view.params();
        engine.present(initial, None);
        Ok(engine)
    }
}

/// Phase with the data it needs.
#[derive(Debug, Clone, Copy)]
enum ActivePhase {
    Idle,
    Morphing { leg: Leg },
    Flying { leg: Leg, flight: Flight },
}

impl ActivePhase {
    fn public(&self) -> AnimationPhase {
        match self {
            ActivePhase::Idle => AnimationPhase::Idle,
            ActivePhase::Morphing { .. } => AnimationPhase::Morphing,
            ActivePhase::Flying { .. } => AnimationPhase::Flying,
        }
    }

    fn leg(&self) -> Option<&Leg> {
        match self {
            ActivePhase::Idle => None,
            ActivePhase::Morphing { leg } | ActivePhase::Flying { leg, .. } => Some(leg),
        }
    }
}

/// The animation engine. Owns the view state and the active clock.
pub struct FlightEngine {
    config: EngineConfig,
    view: ViewState,
    phase: ActivePhase,
    clock: Option<AnimationClock>,
    next_clock_id: u64,
    time: FrameTime,
    progress: Option<FlightProgress>,
    marker: Option<MarkerView>,
    remaining_km: Option<f64>,
    command_queue: VecDeque<HostCommand>,
    events: Vec<EngineEvent>,
    geometry: Box<dyn GeometryProvider>,
    surface: Box<dyn RenderSurface>,
    arrival: Box<dyn ArrivalHook>,
}

impl FlightEngine {
    pub fn builder(config: EngineConfig) -> EngineBuilder {
        EngineBuilder::new(config)
    }

    /// Queue a host command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: HostCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = HostCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply a command immediately. Resulting events appear in the next snapshot.
    pub fn handle_command(&mut self, command: HostCommand) {
        match command {
            HostCommand::SelectLocation { location } => self.select_location(location),
            HostCommand::SelectFeature { iso_numeric } => self.select_feature(iso_numeric),
            HostCommand::ReturnToStart => self.return_to_start(),
            HostCommand::SyncLastLocation { location } => self.sync_last_location(location),
            HostCommand::Resize { width, height } => self.resize(width, height),
        }
    }

    /// Advance by `dt_secs` of host time and return the resulting snapshot.
    /// Hosts on a fixed frame loop pass `constants::DT`. Negative or
    /// non-finite steps count as zero.
    pub fn tick(&mut self, dt_secs: f64) -> FrameSnapshot {
        let dt_secs = if dt_secs.is_finite() && dt_secs > 0.0 {
            dt_secs
        } else {
            0.0
        };
        self.process_commands();
        self.time.advance(dt_secs);
        self.run_clock(dt_secs);
        self.snapshot()
    }

    /// Begin a selection cycle toward `target`, cancelling any running one.
    pub fn select_location(&mut self, target: LocationId) {
        let Some(target_coord) = self.geometry.centroid_of(target) else {
            debug!(%target, "selection ignored: no geometry");
            self.events.push(EngineEvent::CommandIgnored {
                reason: IgnoreReason::NoGeometry { location: target },
            });
            return;
        };

        self.cancel_animation();

        let (from, start) = self.resolve_start(target, target_coord);
        let leg = Leg {
            from,
            to: target,
            start,
            target: target_coord,
        };
        info!(%from, %target, "selection: morphing to globe");

        self.start_clock(self.config.morph_duration_secs);
        self.phase = ActivePhase::Morphing { leg };
        self.progress = Some(FlightProgress::default());
        self.remaining_km = Some(distance_km(start, target_coord));
        self.events.push(EngineEvent::PhaseStarted {
            phase: AnimationPhase::Morphing,
            target: Some(target),
        });

        let params = phases::morph_parameters(&self.config, self.view.viewport(), &leg, 0.0);
        self.present(params, None);
    }

    /// Select whichever serviced location owns a clicked boundary feature.
    pub fn select_feature(&mut self, iso_numeric: u16) {
        match LocationId::from_iso_numeric(iso_numeric) {
            Some(location) => self.select_location(location),
            None => {
                debug!(iso_numeric, "feature click ignored: not serviced");
                self.events.push(EngineEvent::CommandIgnored {
                    reason: IgnoreReason::UnservicedFeature { iso_numeric },
                });
            }
        }
    }

    /// Abort any animation and restore the flat map. No further ticks from the
    /// aborted clock are observed.
    pub fn return_to_start(&mut self) {
        self.cancel_animation();
        self.phase = ActivePhase::Idle;
        self.progress = None;
        self.remaining_km = None;
        let flat = flat_parameters(&self.config, self.view.viewport());
        self.present(flat, None);
        self.events.push(EngineEvent::ReturnedToStart);
        info!("returned to flat map");
    }

    /// Record a location change made by the host without a flight. Only
    /// honored while idle.
    pub fn sync_last_location(&mut self, location: LocationId) {
        let phase = self.phase();
        if phase.is_animating() {
            debug!(%location, ?phase, "sync ignored while animating");
            self.events.push(EngineEvent::CommandIgnored {
                reason: IgnoreReason::Animating { phase },
            });
            return;
        }
        self.view.set_last_location(location);
        self.events.push(EngineEvent::LastLocationSynced { location });
    }

    /// Refit to a new drawing area. Animated phases pick it up on their next tick.
    pub fn resize(&mut self, width: f64, height: f64) {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            warn!(width, height, "ignoring invalid viewport size");
            return;
        }
        self.view.resize(&self.config, Viewport::new(width, height));
        if !self.phase().is_animating() {
            let params = *self.view.params();
            self.present(params, None);
        }
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase.public()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn time(&self) -> FrameTime {
        self.time
    }

    /// The running clock, if any.
    pub fn active_clock(&self) -> Option<&AnimationClock> {
        self.clock.as_ref().filter(|c| c.is_running())
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Start point for a new cycle: the last location, else the default,
    /// else the target itself.
    fn resolve_start(
        &mut self,
        target: LocationId,
        target_coord: GeoCoordinate,
    ) -> (LocationId, GeoCoordinate) {
        let last = self.view.last_location();
        if let Some(coord) = self.geometry.centroid_of(last) {
            return (last, coord);
        }

        let fallback = self.config.default_location;
        let (substituted, coord) = match self.geometry.centroid_of(fallback) {
            Some(coord) => (fallback, coord),
            None => (target, target_coord),
        };
        warn!(requested = %last, %substituted, "start location has no geometry");
        self.events.push(EngineEvent::StartFallback {
            requested: last,
            substituted,
        });
        (substituted, coord)
    }

    fn start_clock(&mut self, duration_secs: f64) {
        self.cancel_clock();
        let id = ClockId(self.next_clock_id);
        self.next_clock_id += 1;
        self.clock = Some(AnimationClock::new(id, duration_secs));
    }

    fn cancel_clock(&mut self) {
        if let Some(clock) = self.clock.as_mut() {
            clock.cancel();
        }
        self.clock = None;
    }

    /// Cancel the clock and report the interrupted phase, if any.
    fn cancel_animation(&mut self) {
        let phase = self.phase();
        self.cancel_clock();
        if phase.is_animating() {
            debug!(?phase, "animation cancelled");
            self.events.push(EngineEvent::AnimationCancelled { phase });
        }
    }

    fn run_clock(&mut self, dt_secs: f64) {
        let Some(tick) = self.clock.as_mut().and_then(|c| c.advance(dt_secs)) else {
            return;
        };
        if self.on_clock_tick(tick) == ClockAction::Stop {
            // Only the clock that produced the tick may be stopped by it.
            if self.clock.as_ref().map(|c| c.id()) == Some(tick.clock) {
                self.cancel_clock();
            }
        }
    }

    fn on_clock_tick(&mut self, tick: ClockTick) -> ClockAction {
        let eased = ease_cubic_in_out(tick.t);
        self.progress = Some(FlightProgress {
            elapsed_secs: tick.elapsed_secs,
            t: tick.t,
            eased,
        });

        match self.phase {
            ActivePhase::Idle => ClockAction::Stop,
            ActivePhase::Morphing { leg } => {
                let params =
                    phases::morph_parameters(&self.config, self.view.viewport(), &leg, eased);
                self.present(params, None);
                if tick.finished {
                    // Either arrives or starts the flight clock; a Stop only
                    // reaches the morph clock.
                    self.finish_morph(leg);
                    return ClockAction::Stop;
                }
                ClockAction::Continue
            }
            ActivePhase::Flying { leg, mut flight } => {
                let frame =
                    phases::flight_frame(&self.config, self.view.viewport(), &flight, eased);
                flight.heading_deg = frame.heading_deg;
                self.phase = ActivePhase::Flying { leg, flight };
                self.remaining_km = Some(distance_km(frame.position, leg.target));

                let marker = phases::marker(&self.config, self.view.viewport(), flight.heading_deg);
                self.present(frame.params, Some(marker));
                if tick.finished {
                    self.arrive(leg);
                    return ClockAction::Stop;
                }
                ClockAction::Continue
            }
        }
    }

    fn finish_morph(&mut self, leg: Leg) {
        if leg.is_stationary() {
            debug!(location = %leg.to, "already there, skipping flight");
            self.arrive(leg);
            return;
        }

        self.start_clock(self.config.flight_duration_secs);
        let (flight, params) = phases::begin_flight(&self.config, self.view.viewport(), &leg);
        debug!(
            from = %leg.from,
            to = %leg.to,
            bearing = flight.bearing_deg,
            km = flight.path.length_km(),
            "flight started"
        );
        self.phase = ActivePhase::Flying { leg, flight };
        self.progress = Some(FlightProgress::default());
        self.events.push(EngineEvent::PhaseStarted {
            phase: AnimationPhase::Flying,
            target: Some(leg.to),
        });

        let marker = phases::marker(&self.config, self.view.viewport(), flight.heading_deg);
        self.present(params, Some(marker));
    }

    /// Record the arrival, notify the host once and go idle. The finished
    /// clock is stopped by the caller's `ClockAction::Stop`.
    fn arrive(&mut self, leg: Leg) {
        self.view.set_last_location(leg.to);
        self.events.push(EngineEvent::PhaseStarted {
            phase: AnimationPhase::Arrived,
            target: Some(leg.to),
        });
        self.events.push(EngineEvent::Arrived { location: leg.to });
        info!(location = %leg.to, "arrived");
        self.arrival.on_arrival(leg.to);

        self.phase = ActivePhase::Idle;
        self.progress = None;
        self.marker = None;
        self.remaining_km = None;
    }

    /// Store new parameters and hand them to the surface.
    fn present(&mut self, params: ProjectionParameters, marker: Option<MarkerView>) {
        self.view.set_params(params);
        self.marker = marker;
        self.surface.set_projection_parameters(&params);
        self.surface.render_frame(&RenderFrame {
            phase: self.phase(),
            marker,
        });
    }

    fn snapshot(&mut self) -> FrameSnapshot {
        FrameSnapshot {
            time: self.time,
            phase: self.phase(),
            params: *self.view.params(),
            progress: self.progress,
            marker: self.marker,
            last_location: self.view.last_location(),
            target: self.phase.leg().map(|leg| leg.to),
            remaining_km: self.remaining_km,
            events: std::mem::take(&mut self.events),
        }
    }
}
