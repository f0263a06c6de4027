//! Test utilities for the animation loop.
//!
//! Provides fixtures for small, fast configurations and test doubles for the
//! render surface and exporter.

use bevy::math::DVec2;
use image::{Rgb, RgbImage};

use crate::canvas::{CircleStyle, RenderSurface};
use crate::config::SimulationConfig;
use crate::export::{AnimationExporter, ExportError};
use crate::kinematics::orbital_position;
use crate::scene::BodyPositions;

/// Fixtures for creating test configurations and states.
pub mod fixtures {
    use super::*;

    /// Both bodies at angle zero, i.e. lined up on the +x axis.
    pub fn aligned_bodies(config: &SimulationConfig) -> BodyPositions {
        let center = config.center();
        BodyPositions {
            primary: orbital_position(center, config.primary_orbit, 0.0),
            secondary: orbital_position(center, config.secondary_orbit, 0.0),
        }
    }

    /// Default scene scaled down to a 120x120 canvas and a short run.
    pub fn small_config(revolutions: u32) -> SimulationConfig {
        SimulationConfig {
            canvas_width: 120,
            canvas_height: 120,
            sun_radius: 3.0,
            primary_orbit: 30.0,
            secondary_orbit: 50.0,
            primary_body_radius: 2.0,
            secondary_body_radius: 2.0,
            marker_radius: 1.0,
            revolutions,
            ..SimulationConfig::default()
        }
    }
}

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear,
    Circle { center: DVec2, style: CircleStyle },
    Text(String),
    Present,
}

/// Surface that records calls instead of drawing.
#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self, _color: Rgb<u8>) {
        self.calls.push(DrawCall::Clear);
    }

    fn draw_circle(&mut self, center: DVec2, _radius: f64, _color: Rgb<u8>, style: CircleStyle) {
        self.calls.push(DrawCall::Circle { center, style });
    }

    fn draw_text(&mut self, text: &str, _top_left: DVec2, _color: Rgb<u8>) {
        self.calls.push(DrawCall::Text(text.to_string()));
    }

    fn present(&mut self) {
        self.calls.push(DrawCall::Present);
    }

    fn snapshot(&self) -> RgbImage {
        // Encode the call count so captured frames can be told apart
        let n = self.calls.len() as u32;
        RgbImage::from_pixel(1, 1, Rgb([(n & 0xff) as u8, ((n >> 8) & 0xff) as u8, 0]))
    }
}

/// Exporter that keeps what it was given.
#[derive(Default)]
pub struct MemoryExporter {
    pub frames: Vec<RgbImage>,
    pub frame_rate: Option<u32>,
    pub calls: usize,
    /// Fail every call when set.
    pub fail: bool,
}

impl AnimationExporter for MemoryExporter {
    fn encode_looping_animation(
        &mut self,
        frames: &[RgbImage],
        frame_rate: u32,
    ) -> Result<(), ExportError> {
        self.calls += 1;
        if self.fail {
            return Err(ExportError::Io(std::io::Error::other("disk full")));
        }
        self.frames = frames.to_vec();
        self.frame_rate = Some(frame_rate);
        Ok(())
    }

    fn destination(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_config_is_valid() {
        assert!(fixtures::small_config(1).validate().is_ok());
    }

    #[test]
    fn test_recording_snapshot_tracks_calls() {
        let mut surface = RecordingSurface::default();
        let a = surface.snapshot();
        surface.clear(Rgb([0, 0, 0]));
        let b = surface.snapshot();
        assert_ne!(a, b);
    }
}
