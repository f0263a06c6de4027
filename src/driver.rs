//! Loop driver: the fixed-step tick and the RUNNING/STOPPED state machine.
//!
//! A tick computes both positions, feeds the approach detector, renders and
//! presents the frame, advances both angles and captures the frame. The run
//! stops when the primary body has completed the configured number of
//! revolutions or when a quit is requested; only then are the frames exported.

use bevy::log::{info, warn};

use crate::approach::{ApproachDetector, ApproachEvent};
use crate::canvas::RenderSurface;
use crate::config::{ConfigError, SimulationConfig};
use crate::export::{AnimationExporter, ExportError, ExportSummary, FrameAccumulator};
use crate::kinematics::{separation, Body};
use crate::scene::{draw_scene, BodyPositions};
use crate::types::DEGREES_PER_REVOLUTION;

/// Why a run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// The primary body finished its revolutions.
    RevolutionsComplete,
    /// Someone asked to quit.
    QuitRequested,
}

/// Loop state. `Stopped` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoopPhase {
    #[default]
    Running,
    Stopped(StopReason),
}

/// True once `primary_angle_deg` covers `revolutions` full turns.
pub fn revolutions_complete(primary_angle_deg: f64, revolutions: u32) -> bool {
    primary_angle_deg >= DEGREES_PER_REVOLUTION * revolutions as f64
}

/// What happened during one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    /// 1-based tick number.
    pub tick: u64,
    /// Separation at the start of the tick.
    pub distance: f64,
    pub event: Option<ApproachEvent>,
    pub phase: LoopPhase,
}

/// Complete state of one animation run.
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    primary: Body,
    secondary: Body,
    detector: ApproachDetector,
    frames: FrameAccumulator,
    ticks: u64,
    phase: LoopPhase,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let primary = Body::new(config.primary_orbit, config.primary_increment_deg);
        let secondary = Body::new(config.secondary_orbit, config.secondary_increment_deg());
        Ok(Self {
            config,
            primary,
            secondary,
            detector: ApproachDetector::new(),
            frames: FrameAccumulator::new(),
            ticks: 0,
            phase: LoopPhase::Running,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn primary(&self) -> &Body {
        &self.primary
    }

    pub fn secondary(&self) -> &Body {
        &self.secondary
    }

    pub fn events(&self) -> &[ApproachEvent] {
        self.detector.events()
    }

    pub fn frames(&self) -> &FrameAccumulator {
        &self.frames
    }

    /// Ticks executed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == LoopPhase::Running
    }

    /// Current positions of both bodies.
    pub fn positions(&self) -> BodyPositions {
        let center = self.config.center();
        BodyPositions {
            primary: self.primary.position(center),
            secondary: self.secondary.position(center),
        }
    }

    /// Draw the current state without advancing it.
    pub fn render<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        draw_scene(surface, &self.config, self.positions(), self.detector.events());
    }

    /// Run one tick. Does nothing once stopped.
    pub fn tick<S: RenderSurface + ?Sized>(&mut self, surface: &mut S) -> Option<TickReport> {
        if !self.is_running() {
            warn!("Tick requested after the run stopped");
            return None;
        }

        let bodies = self.positions();
        let distance = separation(bodies.primary, bodies.secondary);
        let event = self.detector.observe(distance, bodies.secondary);

        draw_scene(surface, &self.config, bodies, self.detector.events());
        surface.present();

        self.primary.advance();
        self.secondary.advance();

        self.frames.capture(surface);
        self.ticks += 1;

        if revolutions_complete(self.primary.angle_deg, self.config.revolutions) {
            self.stop(StopReason::RevolutionsComplete);
        }

        Some(TickReport {
            tick: self.ticks,
            distance,
            event,
            phase: self.phase,
        })
    }

    /// Stop at the current tick boundary. The finished tick keeps its frame.
    pub fn request_quit(&mut self) {
        if self.is_running() {
            self.stop(StopReason::QuitRequested);
        }
    }

    fn stop(&mut self, reason: StopReason) {
        self.phase = LoopPhase::Stopped(reason);
        info!(
            "Simulation stopped after {} ticks ({:?}), {} closest approaches",
            self.ticks,
            reason,
            self.detector.events().len()
        );
    }

    /// Export the captured frames. Only valid once stopped, and only once.
    pub fn finish<E: AnimationExporter + ?Sized>(
        &mut self,
        exporter: &mut E,
    ) -> Result<ExportSummary, ExportError> {
        if self.is_running() {
            return Err(ExportError::StillRunning);
        }
        self.frames.flush(exporter, self.config.tick_rate_hz)
    }
}

/// Non-blocking check for a quit request since the last poll.
pub trait QuitSignal {
    fn poll_quit(&mut self) -> bool;
}

impl<F: FnMut() -> bool> QuitSignal for F {
    fn poll_quit(&mut self) -> bool {
        self()
    }
}

/// Quit signal that never fires.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverQuit;

impl QuitSignal for NeverQuit {
    fn poll_quit(&mut self) -> bool {
        false
    }
}

/// Headless loop: tick and poll for quit until stopped, then export.
///
/// Runs as fast as it can; the Bevy app paces ticks with its fixed timestep.
pub fn run<S, Q, E>(
    simulation: &mut Simulation,
    surface: &mut S,
    quit: &mut Q,
    exporter: &mut E,
) -> Result<ExportSummary, ExportError>
where
    S: RenderSurface + ?Sized,
    Q: QuitSignal + ?Sized,
    E: AnimationExporter + ?Sized,
{
    while simulation.is_running() {
        simulation.tick(surface);
        if quit.poll_quit() {
            simulation.request_quit();
        }
    }
    simulation.finish(exporter)
}
