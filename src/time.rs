//! Tick pacing for the animation.
//!
//! Ticks run in Bevy's `FixedUpdate` schedule so they stay at the configured
//! rate regardless of the window's frame rate. Ticking only starts once the
//! start delay has passed; until then the window shows the opening frame.

use std::time::Duration;

use bevy::prelude::*;

use crate::config::SimulationConfig;

/// Plugin setting the fixed timestep and the start delay.
///
/// Reads [`SimulationConfig`] at build time, so insert it first.
pub struct TickPlugin;

impl Plugin for TickPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_default();

        app.insert_resource(Time::<Fixed>::from_hz(config.tick_rate_hz.max(1) as f64))
            .insert_resource(StartDelay(config.start_delay));
    }
}

/// Time to wait before the first tick.
#[derive(Resource, Clone, Copy, Debug, Default)]
pub struct StartDelay(pub Duration);

/// Run condition: true once the start delay has passed.
///
/// In `FixedUpdate` this reads the fixed clock, so the first tick lands on
/// the first fixed step at or after the delay.
pub fn start_delay_elapsed(time: Res<Time>, delay: Option<Res<StartDelay>>) -> bool {
    let delay = delay.map(|d| d.0).unwrap_or_default();
    time.elapsed() >= delay
}
