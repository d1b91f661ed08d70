//! Tick cycle: one atomic state transition per tick.
//!
//! Each tick runs through three steps:
//!
//! 1. **Advance** -- the tick clock increments (checked).
//! 2. **Move** -- every mobile point gets a new position from the
//!    movement model; static points pass through bit-identical. The
//!    result is built as a complete replacement vector.
//! 3. **Drift check** -- for every at-risk point, the great-circle
//!    distance from its origin to the new position is measured; beyond
//!    the threshold a [`WanderAlert`] goes to the sink. Alerting is a
//!    side effect only: it never halts or resets movement.
//!
//! The replacement vector is swapped in at the end, so observers never
//! see a partially-updated point set. The tick cycle is deterministic
//! given the same initial state and RNG seed.

use driftwatch_geo::{MovementProfile, distance_km, next_position};
use driftwatch_types::{Point, WanderAlert};
use rand::Rng;
use tracing::debug;

use crate::alert::AlertSink;
use crate::clock::{ClockError, TickClock};
use crate::config::SimulationConfig;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },
}

/// Tuning consumed by the tick cycle, derived from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickParams {
    /// Movement model tuning.
    pub movement: MovementProfile,
    /// Drift distance, in kilometers, beyond which an alert is raised.
    pub drift_threshold_km: f64,
}

impl TickParams {
    /// Derive tick parameters from the loaded configuration.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            movement: config.movement.profile(),
            drift_threshold_km: config.alerting.drift_threshold_km,
        }
    }
}

impl Default for TickParams {
    fn default() -> Self {
        Self {
            movement: MovementProfile::default(),
            drift_threshold_km: 0.7,
        }
    }
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Number of points that received a new position this tick.
    pub moved: u32,
    /// Alerts raised this tick (also delivered to the sink).
    pub alerts: Vec<WanderAlert>,
}

/// The mutable simulation state passed through the tick cycle.
///
/// One runner invocation owns one state; nothing is shared across
/// simulation instances.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// The tick clock.
    pub clock: TickClock,
    /// The current point set. Replaced wholesale every tick.
    pub points: Vec<Point>,
}

impl SimulationState {
    /// Create a state at tick 0 with the given roster.
    pub const fn new(points: Vec<Point>) -> Self {
        Self {
            clock: TickClock::new(),
            points,
        }
    }
}

/// Execute one complete tick of the simulation.
///
/// Builds a full replacement point vector, raises wander alerts through
/// `sink`, swaps the vector in, and returns a summary. This is the main
/// entry point for the engine; the async runner wraps it with timing and
/// stop control.
///
/// # Errors
///
/// Returns [`TickError::Clock`] if the tick counter overflows.
pub fn run_tick(
    state: &mut SimulationState,
    params: &TickParams,
    rng: &mut impl Rng,
    sink: &mut dyn AlertSink,
) -> Result<TickSummary, TickError> {
    let tick = state.clock.advance()?;

    let mut next_points = Vec::with_capacity(state.points.len());
    let mut alerts = Vec::new();
    let mut moved: u32 = 0;

    for point in &state.points {
        if !point.is_mobile() {
            next_points.push(point.clone());
            continue;
        }

        let next = next_position(point.position, point.at_risk, params.movement, rng);
        moved = moved.saturating_add(1);

        if point.at_risk {
            let drift_km = distance_km(point.origin, next);
            if drift_km > params.drift_threshold_km {
                let alert = WanderAlert::new(point, drift_km, tick);
                debug!(
                    tick,
                    point_id = %alert.point_id,
                    title = alert.title,
                    drift_km,
                    "Drift threshold exceeded"
                );
                sink.notify(&alert);
                alerts.push(alert);
            }
        }

        next_points.push(Point {
            position: next,
            ..point.clone()
        });
    }

    // Single swap: observers never see a partially-updated set.
    state.points = next_points;

    debug!(tick, moved, alerts = alerts.len(), "Tick completed");

    Ok(TickSummary {
        tick,
        moved,
        alerts,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use driftwatch_geo::step_toward;
    use driftwatch_types::{Category, LatLon};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::alert::{NullAlertSink, VecAlertSink};

    const HOME: LatLon = LatLon::new(-22.896, -43.1059);

    fn ward(at_risk: bool) -> Point {
        Point::new("Dona Regina", "Icarai", HOME, Category::Ward, at_risk)
    }

    fn household() -> Point {
        Point::new(
            "Silva family home",
            "Icarai",
            LatLon::new(-22.9081, -43.1059),
            Category::Household,
            false,
        )
    }

    fn bits(pos: LatLon) -> (u64, u64) {
        (pos.lat.to_bits(), pos.lon.to_bits())
    }

    #[test]
    fn tick_advances_clock() {
        let mut state = SimulationState::new(vec![ward(false)]);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut sink = NullAlertSink::new();

        let summary = run_tick(&mut state, &TickParams::default(), &mut rng, &mut sink).unwrap();
        assert_eq!(summary.tick, 1);
        assert_eq!(state.clock.tick(), 1);
    }

    #[test]
    fn static_points_are_bit_identical_after_many_ticks() {
        let home = household();
        let initial = bits(home.position);
        let mut state = SimulationState::new(vec![home]);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut sink = NullAlertSink::new();

        for _ in 0..50 {
            let summary =
                run_tick(&mut state, &TickParams::default(), &mut rng, &mut sink).unwrap();
            assert_eq!(summary.moved, 0);
        }

        let after = state.points.first().map(|p| bits(p.position));
        assert_eq!(after, Some(initial));
    }

    #[test]
    fn mobile_points_move_and_keep_identity() {
        let point = ward(false);
        let id = point.id;
        let start = point.position;
        let mut state = SimulationState::new(vec![point]);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut sink = NullAlertSink::new();

        let summary = run_tick(&mut state, &TickParams::default(), &mut rng, &mut sink).unwrap();
        assert_eq!(summary.moved, 1);

        let moved = state.points.first().unwrap();
        assert_eq!(moved.id, id);
        assert_ne!(bits(moved.position), bits(start));
    }

    #[test]
    fn origin_never_changes() {
        let mut state = SimulationState::new(vec![ward(true)]);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut sink = NullAlertSink::new();

        for _ in 0..30 {
            run_tick(&mut state, &TickParams::default(), &mut rng, &mut sink).unwrap();
        }

        let origin = state.points.first().map(|p| bits(p.origin));
        assert_eq!(origin, Some(bits(HOME)));
    }

    #[test]
    fn no_alert_below_threshold() {
        // One default step is ~100 m, far under the 0.7 km threshold.
        let mut state = SimulationState::new(vec![ward(true)]);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut sink = VecAlertSink::new();

        let summary = run_tick(&mut state, &TickParams::default(), &mut rng, &mut sink).unwrap();
        assert!(summary.alerts.is_empty());
        assert!(sink.alerts.is_empty());
    }

    #[test]
    fn oversized_step_alerts_on_first_tick() {
        // A 0.01-degree step is ~1.1 km -- beyond the threshold on any
        // bearing, so the first tick must alert.
        let params = TickParams {
            movement: MovementProfile {
                step_degrees: 0.01,
                jitter_degrees: 0.0005,
            },
            drift_threshold_km: 0.7,
        };
        let mut state = SimulationState::new(vec![ward(true)]);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut sink = VecAlertSink::new();

        let summary = run_tick(&mut state, &params, &mut rng, &mut sink).unwrap();
        assert_eq!(summary.alerts.len(), 1);
        let alert = sink.alerts.first().unwrap();
        assert!(alert.distance_km > 0.7);
        assert_eq!(alert.tick, 1);
        assert_eq!(alert.title, "Dona Regina");
    }

    #[test]
    fn persistent_drift_alerts_exactly_once_per_tick() {
        // Push the point beyond the threshold along a fixed bearing, then
        // tick with a tiny step so the drift persists: one alert per tick.
        let mut point = ward(true);
        point.position = step_toward(point.origin, 0.0, 0.009);
        assert!(distance_km(point.origin, point.position) > 0.7);

        let params = TickParams {
            movement: MovementProfile {
                step_degrees: 1e-6,
                jitter_degrees: 0.0005,
            },
            drift_threshold_km: 0.7,
        };
        let mut state = SimulationState::new(vec![point]);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut sink = VecAlertSink::new();

        for expected in 1..=3_u64 {
            let summary = run_tick(&mut state, &params, &mut rng, &mut sink).unwrap();
            assert_eq!(summary.alerts.len(), 1);
            assert_eq!(summary.alerts.first().map(|a| a.tick), Some(expected));
        }
        assert_eq!(sink.alerts.len(), 3);
    }

    #[test]
    fn alerting_never_stops_movement() {
        let params = TickParams {
            movement: MovementProfile {
                step_degrees: 0.01,
                jitter_degrees: 0.0005,
            },
            drift_threshold_km: 0.7,
        };
        let mut state = SimulationState::new(vec![ward(true)]);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut sink = VecAlertSink::new();

        let before = state.points.first().map(|p| bits(p.position));
        run_tick(&mut state, &params, &mut rng, &mut sink).unwrap();
        let between = state.points.first().map(|p| bits(p.position));
        run_tick(&mut state, &params, &mut rng, &mut sink).unwrap();
        let after = state.points.first().map(|p| bits(p.position));

        assert_ne!(before, between);
        assert_ne!(between, after);
        // The first step always exceeds the threshold; later steps may
        // wander back inside it, but the point kept moving throughout.
        assert!(!sink.alerts.is_empty());
    }

    #[test]
    fn replacement_preserves_count_and_order() {
        let roster = vec![ward(true), household(), ward(false)];
        let ids: Vec<_> = roster.iter().map(|p| p.id).collect();
        let mut state = SimulationState::new(roster);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut sink = NullAlertSink::new();

        run_tick(&mut state, &TickParams::default(), &mut rng, &mut sink).unwrap();

        let after: Vec<_> = state.points.iter().map(|p| p.id).collect();
        assert_eq!(after, ids);
    }

    #[test]
    fn summary_alerts_match_sink() {
        let params = TickParams {
            movement: MovementProfile {
                step_degrees: 0.01,
                jitter_degrees: 0.0005,
            },
            drift_threshold_km: 0.7,
        };
        let mut state = SimulationState::new(vec![ward(true), ward(true)]);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut sink = VecAlertSink::new();

        let summary = run_tick(&mut state, &params, &mut rng, &mut sink).unwrap();
        let summary_ids: Vec<_> = summary.alerts.iter().map(|a| a.id).collect();
        let sink_ids: Vec<_> = sink.alerts.iter().map(|a| a.id).collect();
        assert_eq!(summary_ids, sink_ids);
        assert_eq!(summary_ids.len(), 2);
    }

    #[test]
    fn params_derive_from_config() {
        let config = SimulationConfig::default();
        let params = TickParams::from_config(&config);
        assert!((params.drift_threshold_km - 0.7).abs() < 1e-12);
        assert!((params.movement.step_degrees - 3.0 / (111.0 * 30.0)).abs() < 1e-15);
    }
}
