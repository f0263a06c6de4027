//! Closed-form circular motion.
//!
//! Bodies move on perfect circles at a constant angular rate. There is no
//! integration: the position is evaluated directly from the accumulated angle.

use bevy::math::DVec2;

use crate::types::DEG_TO_RAD;

/// Position on a circle of `radius` around `center` at `angle_deg`.
///
/// Angles are measured from the +x axis. With raster coordinates (y down)
/// increasing angles turn clockwise on screen.
pub fn orbital_position(center: DVec2, radius: f64, angle_deg: f64) -> DVec2 {
    let theta = angle_deg * DEG_TO_RAD;
    DVec2::new(
        center.x + radius * theta.cos(),
        center.y + radius * theta.sin(),
    )
}

/// A body on a circular orbit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    /// Orbital radius (pixels).
    pub radius: f64,
    /// Accumulated angle in degrees. Never wrapped.
    pub angle_deg: f64,
    /// Degrees added per tick.
    pub rate_deg: f64,
}

impl Body {
    /// Body at angle zero.
    pub fn new(radius: f64, rate_deg: f64) -> Self {
        Self {
            radius,
            angle_deg: 0.0,
            rate_deg,
        }
    }

    /// Current position around `center`.
    pub fn position(&self, center: DVec2) -> DVec2 {
        orbital_position(center, self.radius, self.angle_deg)
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.angle_deg += self.rate_deg;
    }
}

/// Euclidean distance between two positions.
pub fn separation(a: DVec2, b: DVec2) -> f64 {
    a.distance(b)
}
