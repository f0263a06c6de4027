//! On-screen display of the canvas.
//!
//! The scene is rasterised in software so the exported frames and the window
//! show the same pixels. The window shows a single sprite whose texture is
//! overwritten with the canvas every time a frame is presented.

use bevy::asset::RenderAssetUsages;
use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::window::WindowCloseRequested;
use image::{Rgb, RgbImage};

use crate::animation::{start_run, OrbitRun};
use crate::canvas::{Canvas, CircleStyle, RenderSurface};
use crate::config::SimulationConfig;
use crate::types::RunSystemSet;

/// Plugin providing the window texture and quit polling.
pub struct DisplayPlugin;

impl Plugin for DisplayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_display.after(start_run))
            .add_systems(Update, poll_window_close.in_set(RunSystemSet::PollQuit));
    }
}

/// Texture the canvas is presented into.
#[derive(Resource)]
pub struct DisplayTarget {
    pub image: Handle<Image>,
}

/// Blank opaque RGBA texture the size of the canvas.
pub fn blank_texture(width: u32, height: u32) -> Image {
    Image::new_fill(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 255],
        TextureFormat::Rgba8UnormSrgb,
        // Main world copy is kept so the texture can be rewritten every tick
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    )
}

/// Copy an RGB raster into an RGBA texture of the same size.
///
/// Both are row-major, top row first, so no reorientation is needed.
pub fn copy_into_texture(src: &RgbImage, dst: &mut Image) {
    let size = dst.texture_descriptor.size;
    if (size.width, size.height) != src.dimensions() {
        warn!(
            "Canvas is {:?} but texture is {}x{}, skipping present",
            src.dimensions(),
            size.width,
            size.height
        );
        return;
    }
    let Some(data) = dst.data.as_mut() else {
        return;
    };
    for (pixel, out) in src.pixels().zip(data.chunks_exact_mut(4)) {
        out[..3].copy_from_slice(&pixel.0);
        out[3] = 255;
    }
}

/// Render surface drawing into the canvas and presenting to the window.
///
/// Without a texture (headless) it behaves exactly like the bare canvas.
pub struct WindowSurface<'a> {
    canvas: &'a mut Canvas,
    target: Option<&'a mut Image>,
}

impl<'a> WindowSurface<'a> {
    pub fn new(canvas: &'a mut Canvas, target: Option<&'a mut Image>) -> Self {
        Self { canvas, target }
    }
}

impl RenderSurface for WindowSurface<'_> {
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
        self.canvas.present();
        if let Some(target) = self.target.as_deref_mut() {
            copy_into_texture(self.canvas.buffer(), target);
        }
    }

    fn snapshot(&self) -> RgbImage {
        self.canvas.snapshot()
    }
}

/// Spawn the camera and the sprite showing the canvas.
///
/// The opening frame is drawn right away so the window is not blank during
/// the start delay.
fn setup_display(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    config: Res<SimulationConfig>,
    run: Option<Res<OrbitRun>>,
) {
    let mut texture = blank_texture(config.canvas_width, config.canvas_height);
    if let Some(run) = run {
        let mut preview = run.canvas.clone();
        run.simulation.render(&mut preview);
        copy_into_texture(preview.buffer(), &mut texture);
    }

    let image = images.add(texture);
    commands.spawn(Camera2d);
    commands.spawn(Sprite::from_image(image.clone()));
    commands.insert_resource(DisplayTarget { image });
}

/// Turn a window close request into a quit at the next tick boundary.
///
/// Closing is intercepted so the frames can still be exported; the app exits
/// after the export.
pub fn poll_window_close(
    mut requests: MessageReader<WindowCloseRequested>,
    run: Option<ResMut<OrbitRun>>,
    mut exit: MessageWriter<AppExit>,
) {
    if requests.read().count() == 0 {
        return;
    }
    match run {
        Some(mut run) => {
            info!("Quit requested");
            run.simulation.request_quit();
        }
        // Nothing to export
        None => {
            exit.write(AppExit::Success);
        }
    }
}
