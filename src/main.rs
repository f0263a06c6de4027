//! Closest Approach - two-body orbit animation
//!
//! Opens a window showing the Earth and Jupiter circling the Sun, numbers
//! each closest approach, and saves the run as a looping GIF.

use bevy::prelude::*;
use bevy::window::WindowResolution;

use closest_approach::animation::AnimationPlugin;
use closest_approach::config::SimulationConfig;
use closest_approach::display::DisplayPlugin;
use closest_approach::time::TickPlugin;
use closest_approach::types::WINDOW_TITLE;

fn main() -> AppExit {
    let config = SimulationConfig::default();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.to_string(),
                resolution: WindowResolution::new(config.canvas_width, config.canvas_height),
                resizable: false,
                ..default()
            }),
            // Closing stops the run; the app exits after the export
            close_when_requested: false,
            ..default()
        }))
        // Insert resources before plugins that depend on them
        .insert_resource(config)
        .add_plugins((TickPlugin, AnimationPlugin, DisplayPlugin))
        .run()
}
