//! Per-tick movement model.
//!
//! Two regimes, selected by the point's risk flag:
//!
//! - **Jitter**: each axis receives an independent uniform perturbation in
//!   `[-jitter, jitter]` degrees. Uncorrelated across ticks; the point
//!   shuffles around its neighbourhood without going anywhere.
//! - **Risk-biased step**: a fresh uniform bearing θ ∈ [0, 2π) is drawn
//!   every tick and the point takes a full step along it. The bearing is
//!   deliberately re-randomized per tick -- "biased" means larger,
//!   directed steps, not convergence toward a destination. The longitude
//!   delta is divided by `cos(latitude)` to account for meridian
//!   convergence away from the equator.
//!
//! All functions return a new [`LatLon`]; nothing mutates in place.
//! Near the poles `cos(latitude)` approaches zero and the longitude delta
//! diverges. This is an accepted limitation, not guarded.

use driftwatch_types::LatLon;
use rand::Rng;

/// Kilometers per degree of latitude (and of longitude at the equator).
pub const KM_PER_DEGREE: f64 = 111.0;

/// Default jitter half-range in degrees (roughly 55 m of latitude).
pub const DEFAULT_JITTER_DEGREES: f64 = 0.0005;

/// Default biased step in degrees: 3 km spread over 30 ticks.
pub const DEFAULT_STEP_DEGREES: f64 = 3.0 / (KM_PER_DEGREE * 30.0);

/// Tuning for the movement model, derived from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementProfile {
    /// Step length in degrees for risk-biased movement.
    pub step_degrees: f64,
    /// Per-axis half-range in degrees for jittered movement.
    pub jitter_degrees: f64,
}

impl Default for MovementProfile {
    fn default() -> Self {
        Self {
            step_degrees: DEFAULT_STEP_DEGREES,
            jitter_degrees: DEFAULT_JITTER_DEGREES,
        }
    }
}

/// Perturb each axis independently by a uniform draw in `[-range, range]`.
pub fn jitter(position: LatLon, range_deg: f64, rng: &mut impl Rng) -> LatLon {
    LatLon::new(
        position.lat + rng.random_range(-range_deg..=range_deg),
        position.lon + rng.random_range(-range_deg..=range_deg),
    )
}

/// Take one full step from `position` along `bearing_rad`.
///
/// Deterministic: callers that need a reproducible trajectory (tests,
/// replay) supply the bearing themselves instead of going through
/// [`next_position`].
pub fn step_toward(position: LatLon, bearing_rad: f64, step_deg: f64) -> LatLon {
    let d_lat = step_deg * bearing_rad.cos();
    let d_lon = step_deg * bearing_rad.sin() / position.lat.to_radians().cos();
    LatLon::new(position.lat + d_lat, position.lon + d_lon)
}

/// Compute the next position for one point.
///
/// Risk-biased points step a full `profile.step_degrees` along a bearing
/// drawn fresh this tick; everything else jitters within
/// `profile.jitter_degrees` per axis.
pub fn next_position(
    position: LatLon,
    at_risk: bool,
    profile: MovementProfile,
    rng: &mut impl Rng,
) -> LatLon {
    if at_risk {
        let bearing = rng.random_range(0.0..core::f64::consts::TAU);
        step_toward(position, bearing, profile.step_degrees)
    } else {
        jitter(position, profile.jitter_degrees, rng)
    }
}
