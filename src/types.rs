//! Shared constants for the closest-approach animation.
//!
//! All tunables are fixed for a given build. [`crate::config::SimulationConfig`]
//! collects them into a single resource.

use bevy::prelude::*;
use image::Rgb;

/// System sets ordering the per-frame work of a run.
///
/// A quit request must be seen before the export check of the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RunSystemSet {
    /// Window close requests and other quit sources
    PollQuit,
    /// Export and shutdown once the run has stopped
    Export,
}

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

/// Degrees in one full revolution.
pub const DEGREES_PER_REVOLUTION: f64 = 360.0;

/// Canvas width in pixels.
pub const CANVAS_WIDTH: u32 = 600;

/// Canvas height in pixels.
pub const CANVAS_HEIGHT: u32 = 600;

/// Radius of the Sun disc drawn at the canvas centre (pixels).
pub const SUN_RADIUS: f64 = 15.0;

/// Orbital radius of the inner (primary) body, "Earth" (pixels).
pub const PRIMARY_ORBIT: f64 = 150.0;

/// Orbital radius of the outer (secondary) body, "Jupiter" (pixels).
pub const SECONDARY_ORBIT: f64 = 250.0;

/// Drawn radius of the primary body (pixels).
pub const PRIMARY_BODY_RADIUS: f64 = 8.0;

/// Drawn radius of the secondary body (pixels).
pub const SECONDARY_BODY_RADIUS: f64 = 10.0;

/// Drawn radius of a closest-approach marker (pixels).
pub const MARKER_RADIUS: f64 = 5.0;

/// How many times slower the secondary body moves than the primary.
///
/// Jupiter's orbital period in Earth years.
pub const PERIOD_RATIO: f64 = 11.86;

/// Angle the primary body advances per tick (degrees).
pub const PRIMARY_INCREMENT_DEG: f64 = 10.0;

/// The run stops once the primary body has completed this many revolutions.
pub const REVOLUTIONS: u32 = 12;

/// Target tick rate, also the playback rate of the exported animation.
pub const TICK_RATE_HZ: u32 = 30;

/// Seconds the window shows the opening frame before ticking starts.
pub const START_DELAY_SECS: f64 = 5.0;

/// Offset of a marker's index label from the marker centre (pixels).
pub const LABEL_OFFSET: (f64, f64) = (10.0, -10.0);

/// Pixel height of the marker labels.
pub const LABEL_FONT_SIZE: f32 = 16.0;

/// Output file for the exported animation.
pub const OUTPUT_PATH: &str = "orbit_simulation.gif";

/// Window title.
pub const WINDOW_TITLE: &str = "Earth & Jupiter Orbit Simulation";

/// Palette used by the scene.
pub mod colors {
    use super::Rgb;

    pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    /// Sun
    pub const YELLOW: Rgb<u8> = Rgb([255, 223, 0]);
    /// Primary body (Earth)
    pub const BLUE: Rgb<u8> = Rgb([50, 100, 255]);
    /// Secondary body (Jupiter)
    pub const ORANGE: Rgb<u8> = Rgb([255, 140, 0]);
    /// Orbit paths
    pub const GRAY: Rgb<u8> = Rgb([100, 100, 100]);
    /// Closest-approach markers
    pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
}
