//! Run configuration.
//!
//! Every tunable is a build-time constant from [`crate::types`]; this resource
//! only groups them and checks they describe a drawable scene before the
//! loop starts.

use std::path::PathBuf;
use std::time::Duration;

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::types::{
    CANVAS_HEIGHT, CANVAS_WIDTH, LABEL_OFFSET, MARKER_RADIUS, OUTPUT_PATH, PERIOD_RATIO,
    PRIMARY_BODY_RADIUS, PRIMARY_INCREMENT_DEG, PRIMARY_ORBIT, REVOLUTIONS, SECONDARY_BODY_RADIUS,
    SECONDARY_ORBIT, START_DELAY_SECS, SUN_RADIUS, TICK_RATE_HZ,
};

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("canvas must be non-empty (got {width}x{height})")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("{name} must be positive and finite (got {value})")]
    InvalidRadius { name: &'static str, value: f64 },

    #[error("period ratio must be positive and finite (got {0})")]
    InvalidPeriodRatio(f64),

    #[error("primary increment must be positive and finite (got {0} degrees)")]
    InvalidIncrement(f64),

    #[error("revolution count must be at least 1")]
    ZeroRevolutions,

    #[error("tick rate must be at least 1 Hz")]
    ZeroTickRate,

    #[error("orbit of radius {radius} does not fit a {width}x{height} canvas")]
    OrbitOutsideCanvas { radius: f64, width: u32, height: u32 },

    #[error("embedded label font could not be parsed")]
    InvalidFont,
}

/// All tunables for one run.
#[derive(Resource, Clone, Debug)]
pub struct SimulationConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub sun_radius: f64,
    /// Orbital radius of the primary (inner) body.
    pub primary_orbit: f64,
    /// Orbital radius of the secondary (outer) body.
    pub secondary_orbit: f64,
    pub primary_body_radius: f64,
    pub secondary_body_radius: f64,
    pub marker_radius: f64,
    /// Secondary rate = primary rate / period ratio.
    pub period_ratio: f64,
    /// Degrees the primary body advances per tick.
    pub primary_increment_deg: f64,
    /// Primary revolutions before the run stops on its own.
    pub revolutions: u32,
    /// Tick rate, and playback rate of the exported animation.
    pub tick_rate_hz: u32,
    /// Time the opening frame is shown before ticking starts.
    pub start_delay: Duration,
    /// Label position relative to its marker.
    pub label_offset: DVec2,
    pub output_path: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            sun_radius: SUN_RADIUS,
            primary_orbit: PRIMARY_ORBIT,
            secondary_orbit: SECONDARY_ORBIT,
            primary_body_radius: PRIMARY_BODY_RADIUS,
            secondary_body_radius: SECONDARY_BODY_RADIUS,
            marker_radius: MARKER_RADIUS,
            period_ratio: PERIOD_RATIO,
            primary_increment_deg: PRIMARY_INCREMENT_DEG,
            revolutions: REVOLUTIONS,
            tick_rate_hz: TICK_RATE_HZ,
            start_delay: Duration::from_secs_f64(START_DELAY_SECS),
            label_offset: DVec2::new(LABEL_OFFSET.0, LABEL_OFFSET.1),
            output_path: PathBuf::from(OUTPUT_PATH),
        }
    }
}

impl SimulationConfig {
    /// Centre of the canvas, which is also the centre of both orbits.
    ///
    /// Integer halves, so the Sun lands on a whole pixel.
    pub fn center(&self) -> DVec2 {
        DVec2::new(
            (self.canvas_width / 2) as f64,
            (self.canvas_height / 2) as f64,
        )
    }

    /// Degrees the secondary body advances per tick.
    pub fn secondary_increment_deg(&self) -> f64 {
        self.primary_increment_deg / self.period_ratio
    }

    /// Number of ticks a run lasts when nobody quits early.
    pub fn ticks_to_completion(&self) -> u64 {
        let total = self.revolutions as f64 * crate::types::DEGREES_PER_REVOLUTION;
        (total / self.primary_increment_deg).ceil() as u64
    }

    /// Check the configuration describes a scene that can be drawn and run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }

        let radii = [
            ("sun radius", self.sun_radius),
            ("primary orbit", self.primary_orbit),
            ("secondary orbit", self.secondary_orbit),
            ("primary body radius", self.primary_body_radius),
            ("secondary body radius", self.secondary_body_radius),
            ("marker radius", self.marker_radius),
        ];
        for (name, value) in radii {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidRadius { name, value });
            }
        }

        if !(self.period_ratio.is_finite() && self.period_ratio > 0.0) {
            return Err(ConfigError::InvalidPeriodRatio(self.period_ratio));
        }
        if !(self.primary_increment_deg.is_finite() && self.primary_increment_deg > 0.0) {
            return Err(ConfigError::InvalidIncrement(self.primary_increment_deg));
        }
        if self.revolutions == 0 {
            return Err(ConfigError::ZeroRevolutions);
        }
        if self.tick_rate_hz == 0 {
            return Err(ConfigError::ZeroTickRate);
        }

        let half_extent = (self.canvas_width.min(self.canvas_height) / 2) as f64;
        for radius in [self.primary_orbit, self.secondary_orbit] {
            if radius > half_extent {
                return Err(ConfigError::OrbitOutsideCanvas {
                    radius,
                    width: self.canvas_width,
                    height: self.canvas_height,
                });
            }
        }

        Ok(())
    }
}
