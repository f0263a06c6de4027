//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use bevy::math::DVec2;
use closest_approach::canvas::{Canvas, CircleStyle, RenderSurface};
use closest_approach::config::SimulationConfig;
use closest_approach::export::{AnimationExporter, ExportError};
use image::{Rgb, RgbImage, RgbaImage};

/// Where [`StampedSurface`] writes the present counter.
pub const STAMP_ORIGIN: (u32, u32) = (2, 2);

/// Small scene on a canvas large enough to keep the top-left corner clear.
pub fn corner_clear_config(revolutions: u32) -> SimulationConfig {
    SimulationConfig {
        canvas_width: 200,
        canvas_height: 200,
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

/// Canvas that stamps how many frames it has presented into the corner of
/// every frame, so exported frames can be matched back to their tick.
pub struct StampedSurface {
    pub canvas: Canvas,
    presented: u32,
}

impl StampedSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: Canvas::new(width, height).unwrap(),
            presented: 0,
        }
    }
}

impl RenderSurface for StampedSurface {
    fn clear(&mut self, color: Rgb<u8>) {
        self.canvas.clear(color);
    }

    fn draw_circle(&mut self, center: DVec2, radius: f64, color: Rgb<u8>, style: CircleStyle) {
        self.canvas.draw_circle(center, radius, color, style);
    }

    fn draw_text(&mut self, text: &str, top_left: DVec2, color: Rgb<u8>) {
        self.canvas.draw_text(text, top_left, color);
    }

    fn present(&mut self) {
        self.presented += 1;
        let origin = DVec2::new(STAMP_ORIGIN.0 as f64, STAMP_ORIGIN.1 as f64);
        self.canvas
            .draw_text(&self.presented.to_string(), origin, Rgb([255, 255, 255]));
        self.canvas.present();
    }

    fn snapshot(&self) -> RgbImage {
        self.canvas.snapshot()
    }
}

/// Corner region that holds the stamp and nothing else.
pub const STAMP_BOX: (u32, u32) = (48, 28);

/// What the stamp corner of frame `n` should look like.
pub fn stamp_reference(n: u32) -> RgbImage {
    let mut canvas = Canvas::new(STAMP_BOX.0, STAMP_BOX.1).unwrap();
    canvas.clear(Rgb([0, 0, 0]));
    let origin = DVec2::new(STAMP_ORIGIN.0 as f64, STAMP_ORIGIN.1 as f64);
    canvas.draw_text(&n.to_string(), origin, Rgb([255, 255, 255]));
    canvas.snapshot()
}

/// Summed per-channel difference between a frame's corner and a reference.
pub fn corner_difference(frame: &RgbaImage, reference: &RgbImage) -> u64 {
    reference
        .enumerate_pixels()
        .map(|(x, y, expected)| {
            let got = frame.get_pixel(x, y);
            (0..3)
                .map(|c| got.0[c].abs_diff(expected.0[c]) as u64)
                .sum::<u64>()
        })
        .sum()
}

/// Which stamp in `1..=references.len()` the frame's corner is closest to.
///
/// Nearest match rather than equality, since GIF palettes may shift colours.
pub fn identify_stamp(frame: &RgbaImage, references: &[RgbImage]) -> u32 {
    references
        .iter()
        .enumerate()
        .min_by_key(|(_, reference)| corner_difference(frame, reference))
        .map(|(i, _)| i as u32 + 1)
        .unwrap()
}

/// What a [`SharedExporter`] was asked to write.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportRecord {
    pub calls: usize,
    pub frames: usize,
    pub frame_rate: u32,
}

/// Exporter that can be moved into an app while the test keeps a handle.
#[derive(Clone, Default)]
pub struct SharedExporter {
    pub record: Arc<Mutex<ExportRecord>>,
    /// Fail every call when set.
    pub fail: bool,
}

impl AnimationExporter for SharedExporter {
    fn encode_looping_animation(
        &mut self,
        frames: &[RgbImage],
        frame_rate: u32,
    ) -> Result<(), ExportError> {
        let mut record = self.record.lock().unwrap();
        record.calls += 1;
        if self.fail {
            return Err(ExportError::Io(std::io::Error::other("disk full")));
        }
        record.frames = frames.len();
        record.frame_rate = frame_rate;
        Ok(())
    }

    fn destination(&self) -> String {
        "shared memory".to_string()
    }
}
