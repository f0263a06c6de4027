//! Property-based tests for closest-approach detection using proptest.

use bevy::math::DVec2;
use proptest::prelude::*;

use super::{minima_ticks, ApproachDetector};

/// Brute-force reference with full look-behind: a minimum is confirmed at
/// tick `i` when the sample does not drop and the previous step did.
fn reference_minima(distances: &[f64]) -> Vec<usize> {
    (2..distances.len())
        .filter(|&i| distances[i] >= distances[i - 1] && distances[i - 1] < distances[i - 2])
        .collect()
}

/// Small integer levels make plateaus common.
fn stepped_series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0u8..6, 0..200)
        .prop_map(|levels| levels.into_iter().map(f64::from).collect())
}

fn monotone_steps() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.001f64..50.0, 1..300)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Streaming detection finds exactly the local minima of the full series.
    #[test]
    fn prop_matches_reference_minima(series in stepped_series()) {
        prop_assert_eq!(minima_ticks(&series), reference_minima(&series));
    }

    /// Event indices are 1..=k in emission order.
    #[test]
    fn prop_indices_gap_free(series in stepped_series()) {
        let mut detector = ApproachDetector::new();
        let mut emitted = Vec::new();
        for (tick, &d) in series.iter().enumerate() {
            if let Some(event) = detector.observe(d, DVec2::new(tick as f64, 0.0)) {
                emitted.push(event.index);
            }
        }
        let expected: Vec<usize> = (1..=emitted.len()).collect();
        prop_assert_eq!(emitted, expected);
        prop_assert!(detector.events().len() <= series.len());
    }

    /// A strictly decreasing series never resolves into a minimum.
    #[test]
    fn prop_strictly_decreasing_is_silent(steps in monotone_steps()) {
        let series: Vec<f64> = steps
            .iter()
            .scan(10_000.0, |acc, s| { *acc -= s; Some(*acc) })
            .collect();
        prop_assert!(minima_ticks(&series).is_empty());
    }

    /// A strictly increasing series has no descent to close.
    #[test]
    fn prop_strictly_increasing_is_silent(steps in monotone_steps()) {
        let series: Vec<f64> = steps
            .iter()
            .scan(0.0, |acc, s| { *acc += s; Some(*acc) })
            .collect();
        prop_assert!(minima_ticks(&series).is_empty());
    }

    /// Sawtooth with known teeth: one event per tooth.
    #[test]
    fn prop_sawtooth_event_count(teeth in 1usize..20, depth in 2usize..15) {
        let mut series = Vec::new();
        for _ in 0..teeth {
            series.extend((0..depth).map(|k| (depth - k) as f64));
        }
        series.push(depth as f64);

        let ticks = minima_ticks(&series);
        prop_assert_eq!(ticks.len(), teeth);
        for (n, tick) in ticks.iter().enumerate() {
            prop_assert_eq!(*tick, (n + 1) * depth);
        }
    }
}
