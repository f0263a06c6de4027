//! Closest-approach detection.
//!
//! Watches the separation between the two bodies one tick at a time and
//! reports every local minimum: a tick whose distance is not smaller than the
//! previous one, reached after a strictly decreasing run. Detection is a
//! single pass with constant memory and no look-ahead, so it works on a live
//! stream of samples.

#[cfg(test)]
mod proptest_approach;

use bevy::log::info;
use bevy::math::DVec2;

/// A confirmed local minimum of the separation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproachEvent {
    /// Position of the secondary body on the tick the minimum was confirmed.
    pub position: DVec2,
    /// 1-based discovery order.
    pub index: usize,
}

/// Streaming local-minimum detector.
#[derive(Clone, Debug)]
pub struct ApproachDetector {
    previous_distance: f64,
    descending: bool,
    events: Vec<ApproachEvent>,
}

impl Default for ApproachDetector {
    fn default() -> Self {
        Self {
            previous_distance: f64::INFINITY,
            descending: false,
            events: Vec::new(),
        }
    }
}

impl ApproachDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one distance sample.
    ///
    /// `position` is where the event is recorded if this sample ends a
    /// descent. Returns the new event, if any.
    pub fn observe(&mut self, distance: f64, position: DVec2) -> Option<ApproachEvent> {
        let mut emitted = None;

        if distance < self.previous_distance {
            // The infinite baseline before the first sample does not open a descent.
            self.descending = self.previous_distance.is_finite();
        } else if self.descending {
            let event = ApproachEvent {
                position,
                index: self.events.len() + 1,
            };
            info!(
                "Closest approach #{} at ({:.1}, {:.1})",
                event.index, event.position.x, event.position.y
            );
            self.events.push(event);
            self.descending = false;
            emitted = Some(event);
        }

        self.previous_distance = distance;
        emitted
    }

    /// All events so far, in discovery order.
    pub fn events(&self) -> &[ApproachEvent] {
        &self.events
    }

    /// Whether the last sample continued a strictly decreasing run.
    #[cfg(test)]
    pub fn is_descending(&self) -> bool {
        self.descending
    }

    /// Distance seen on the previous tick (infinite before the first sample).
    #[cfg(test)]
    pub fn previous_distance(&self) -> f64 {
        self.previous_distance
    }
}

/// Run a whole series through a fresh detector and return the tick index of
/// each emitted event.
///
/// Used for offline analysis and tests; the live loop calls
/// [`ApproachDetector::observe`] directly.
pub fn minima_ticks(distances: &[f64]) -> Vec<usize> {
    let mut detector = ApproachDetector::new();
    distances
        .iter()
        .enumerate()
        .filter_map(|(tick, &d)| detector.observe(d, DVec2::ZERO).map(|_| tick))
        .collect()
}
