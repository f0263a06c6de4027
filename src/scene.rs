//! Per-tick scene drawing.
//!
//! Draw order, back to front: background, Sun, orbit paths, bodies,
//! closest-approach markers with their index labels.

use bevy::math::DVec2;

use crate::approach::ApproachEvent;
use crate::canvas::{CircleStyle, RenderSurface};
use crate::config::SimulationConfig;
use crate::types::colors;

/// Positions of everything that moves in one frame.
#[derive(Clone, Copy, Debug)]
pub struct BodyPositions {
    pub primary: DVec2,
    pub secondary: DVec2,
}

/// Draw one full frame onto `surface`.
pub fn draw_scene<S: RenderSurface + ?Sized>(
    surface: &mut S,
    config: &SimulationConfig,
    bodies: BodyPositions,
    events: &[ApproachEvent],
) {
    let center = config.center();

    surface.clear(colors::BLACK);
    surface.draw_circle(center, config.sun_radius, colors::YELLOW, CircleStyle::Filled);

    draw_orbit_paths(surface, config);

    surface.draw_circle(
        bodies.primary,
        config.primary_body_radius,
        colors::BLUE,
        CircleStyle::Filled,
    );
    surface.draw_circle(
        bodies.secondary,
        config.secondary_body_radius,
        colors::ORANGE,
        CircleStyle::Filled,
    );

    draw_approach_markers(surface, config, events);
}

fn draw_orbit_paths<S: RenderSurface + ?Sized>(surface: &mut S, config: &SimulationConfig) {
    let center = config.center();
    for radius in [config.primary_orbit, config.secondary_orbit] {
        surface.draw_circle(center, radius, colors::GRAY, CircleStyle::Outlined);
    }
}

/// Red dot at each recorded approach, labelled with its index.
fn draw_approach_markers<S: RenderSurface + ?Sized>(
    surface: &mut S,
    config: &SimulationConfig,
    events: &[ApproachEvent],
) {
    for event in events {
        let marker = event.position.trunc();
        surface.draw_circle(marker, config.marker_radius, colors::RED, CircleStyle::Filled);
        surface.draw_text(
            &event.index.to_string(),
            marker + config.label_offset,
            colors::WHITE,
        );
    }
}
