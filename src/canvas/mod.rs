//! Software render surface.
//!
//! The scene only needs a few primitives: a background fill, filled and
//! outlined circles, and short numeric labels. [`RenderSurface`] is the seam
//! between the simulation and whatever shows the pixels; [`Canvas`] is the
//! in-memory raster every frame is actually drawn into, using `imageproc` for
//! the primitives and an embedded `ab_glyph` font for the labels.

use ab_glyph::{FontRef, PxScale};
use bevy::math::DVec2;
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_circle_mut, draw_text_mut, text_size,
};

use crate::config::ConfigError;
use crate::types::LABEL_FONT_SIZE;

/// Label font, embedded so the window and the exported frames match on any host.
const LABEL_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSansMono-Bold.ttf");

/// How a circle is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CircleStyle {
    Filled,
    /// One-pixel outline.
    Outlined,
}

/// Drawing capability the loop renders each tick into.
pub trait RenderSurface {
    /// Fill the whole surface.
    fn clear(&mut self, color: Rgb<u8>);

    fn draw_circle(&mut self, center: DVec2, radius: f64, color: Rgb<u8>, style: CircleStyle);

    /// Draw `text` with its top-left corner at `top_left`.
    fn draw_text(&mut self, text: &str, top_left: DVec2, color: Rgb<u8>);

    /// Mark the current frame as complete and show it.
    fn present(&mut self);

    /// Copy of the pixels drawn so far, rows top-down.
    fn snapshot(&self) -> RgbImage;
}

/// RGB raster with rows top-down and columns left-to-right.
#[derive(Clone, Debug)]
pub struct Canvas {
    buffer: RgbImage,
    font: FontRef<'static>,
    scale: PxScale,
    presented: u64,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyCanvas { width, height });
        }
        let font = FontRef::try_from_slice(LABEL_FONT).map_err(|_| ConfigError::InvalidFont)?;
        Ok(Self {
            buffer: RgbImage::new(width, height),
            font,
            scale: PxScale::from(LABEL_FONT_SIZE),
            presented: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn buffer(&self) -> &RgbImage {
        &self.buffer
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        self.buffer.get_pixel_checked(x, y).copied()
    }

    /// Frames presented so far.
    pub fn frames_presented(&self) -> u64 {
        self.presented
    }

    /// Size in pixels `text` takes up when drawn as a label.
    pub fn text_size(&self, text: &str) -> (u32, u32) {
        text_size(self.scale, &self.font, text)
    }
}

/// Pixel coordinates of a point, truncated toward zero like the window's
/// integer drawing API.
fn pixel_coords(p: DVec2) -> (i32, i32) {
    (p.x as i32, p.y as i32)
}

impl RenderSurface for Canvas {
    fn clear(&mut self, color: Rgb<u8>) {
        for pixel in self.buffer.pixels_mut() {
            *pixel = color;
        }
    }

    fn draw_circle(&mut self, center: DVec2, radius: f64, color: Rgb<u8>, style: CircleStyle) {
        let center = pixel_coords(center);
        let radius = (radius.round() as i32).max(0);
        match style {
            CircleStyle::Filled => draw_filled_circle_mut(&mut self.buffer, center, radius, color),
            CircleStyle::Outlined => draw_hollow_circle_mut(&mut self.buffer, center, radius, color),
        }
    }

    fn draw_text(&mut self, text: &str, top_left: DVec2, color: Rgb<u8>) {
        let (x, y) = pixel_coords(top_left);
        draw_text_mut(&mut self.buffer, color, x, y, self.scale, &self.font, text);
    }

    fn present(&mut self) {
        self.presented += 1;
    }

    fn snapshot(&self) -> RgbImage {
        self.buffer.clone()
    }
}
