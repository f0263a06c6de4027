//! Bevy wiring for one animation run.
//!
//! Owns the [`Simulation`], the software canvas every frame is drawn into and
//! the exporter. Ticks run in `FixedUpdate`; once the run has stopped the
//! frames are exported exactly once and the app exits.

use bevy::prelude::*;

use crate::canvas::Canvas;
use crate::config::{ConfigError, SimulationConfig};
use crate::display::{DisplayTarget, WindowSurface};
use crate::driver::{LoopPhase, Simulation, StopReason};
use crate::export::{AnimationExporter, ExportError, GifFileExporter};
use crate::time::start_delay_elapsed;
use crate::types::RunSystemSet;

/// Plugin running the animation loop.
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationConfig>()
            .configure_sets(Update, (RunSystemSet::PollQuit, RunSystemSet::Export).chain())
            .add_systems(Startup, start_run.run_if(not(resource_exists::<OrbitRun>)))
            .add_systems(
                FixedUpdate,
                advance_tick
                    .run_if(resource_exists::<OrbitRun>)
                    .run_if(start_delay_elapsed),
            )
            .add_systems(
                Update,
                export_when_stopped
                    .run_if(resource_exists::<OrbitRun>)
                    .in_set(RunSystemSet::Export),
            );
    }
}

/// Everything one run owns.
#[derive(Resource)]
pub struct OrbitRun {
    pub simulation: Simulation,
    pub canvas: Canvas,
    pub exporter: Box<dyn AnimationExporter + Send + Sync>,
    exported: bool,
}

impl OrbitRun {
    /// Run exporting a GIF to `config.output_path`.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let exporter = GifFileExporter::new(&config.output_path);
        Self::with_exporter(config, Box::new(exporter))
    }

    pub fn with_exporter(
        config: SimulationConfig,
        exporter: Box<dyn AnimationExporter + Send + Sync>,
    ) -> Result<Self, ConfigError> {
        let canvas = Canvas::new(config.canvas_width, config.canvas_height)?;
        let simulation = Simulation::new(config)?;
        Ok(Self {
            simulation,
            canvas,
            exporter,
            exported: false,
        })
    }

    /// Whether the export step has run (successfully or not).
    pub fn is_exported(&self) -> bool {
        self.exported
    }
}

/// Build the run from the configuration. A bad configuration is fatal.
pub fn start_run(
    mut commands: Commands,
    config: Res<SimulationConfig>,
    mut exit: MessageWriter<AppExit>,
) {
    match OrbitRun::new(config.clone()) {
        Ok(run) => {
            info!(
                "Starting run: {} ticks at {} ticks/s, exporting to {}",
                config.ticks_to_completion(),
                config.tick_rate_hz,
                config.output_path.display()
            );
            commands.insert_resource(run);
        }
        Err(err) => {
            error!("Cannot start simulation: {err}");
            exit.write(AppExit::error());
        }
    }
}

/// One simulation tick, drawn into the canvas and, when a window exists,
/// presented to it.
fn advance_tick(
    mut run: ResMut<OrbitRun>,
    display: Option<Res<DisplayTarget>>,
    mut images: Option<ResMut<Assets<Image>>>,
) {
    let run = &mut *run;
    if !run.simulation.is_running() {
        return;
    }

    let mut image = match (display.as_deref(), images.as_deref_mut()) {
        (Some(display), Some(images)) => images.get_mut(&display.image),
        _ => None,
    };
    let mut surface = WindowSurface::new(&mut run.canvas, image.as_deref_mut());
    run.simulation.tick(&mut surface);
}

/// Export once the run has stopped, then exit.
///
/// Quitting before the first tick is a normal exit with nothing to export.
fn export_when_stopped(mut run: ResMut<OrbitRun>, mut exit: MessageWriter<AppExit>) {
    let run = &mut *run;
    if run.exported || run.simulation.is_running() {
        return;
    }
    run.exported = true;

    let quit = run.simulation.phase() == LoopPhase::Stopped(StopReason::QuitRequested);
    match run.simulation.finish(run.exporter.as_mut()) {
        Ok(summary) => {
            info!("Export complete: {} frames", summary.frames);
            exit.write(AppExit::Success);
        }
        Err(ExportError::NoFrames) if quit => {
            info!("Quit before the first tick, nothing to export");
            exit.write(AppExit::Success);
        }
        Err(err) => {
            error!("Failed to export animation: {err}");
            exit.write(AppExit::error());
        }
    }
}
