//! Core entity structs for the Driftwatch tracker.
//!
//! Covers the tracked [`Point`], the derived viewport [`Bound`], the
//! transient [`WanderAlert`], and the [`CategoryCluster`] grouping that
//! the map dashboard consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Category;
use crate::geo::LatLon;
use crate::ids::{AlertId, PointId};

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// One tracked entity on the map.
///
/// `position` is the only field that mutates after creation, and it is
/// only ever replaced wholesale by the tick cycle. `origin` records where
/// the point started and never changes; it is the reference for drift
/// measurement on at-risk points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Point {
    /// Unique identifier, immutable.
    pub id: PointId,
    /// Display name shown on the marker and in alerts.
    pub title: String,
    /// Neighbourhood or street label shown in the marker popup.
    pub address: String,
    /// Current coordinate, replaced each tick unless the category is static.
    pub position: LatLon,
    /// Marker category; [`Category::Household`] points never move.
    pub category: Category,
    /// Whether movement is risk-biased (larger, directed steps) rather
    /// than local jitter. Biased points are the ones drift-checked.
    pub at_risk: bool,
    /// Coordinate recorded at creation, immutable. Drift is measured
    /// against this; only meaningful when `at_risk` is set.
    pub origin: LatLon,
}

impl Point {
    /// Create a point at `position`, recording it as the drift origin.
    pub fn new(
        title: impl Into<String>,
        address: impl Into<String>,
        position: LatLon,
        category: Category,
        at_risk: bool,
    ) -> Self {
        Self {
            id: PointId::new(),
            title: title.into(),
            address: address.into(),
            position,
            category,
            at_risk,
            origin: position,
        }
    }

    /// Whether this point participates in the movement simulation.
    pub const fn is_mobile(&self) -> bool {
        !self.category.is_static()
    }
}

// ---------------------------------------------------------------------------
// Bound
// ---------------------------------------------------------------------------

/// Centers closer than this (in degrees, per axis) are considered equal
/// when deciding whether a bound is new.
pub const CENTER_EPSILON_DEG: f64 = 1e-9;

/// The derived viewport fit for the current point spread.
///
/// Ephemeral: recomputed from scratch on every point-set change and
/// consumed immediately by the sync layer. Holds no history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Bound {
    /// Midpoint of the geographic bounding box of all points.
    pub center: LatLon,
    /// Smallest discrete zoom level at which every point stays visible.
    pub min_zoom: u32,
}

impl Bound {
    /// Whether this bound is meaningfully different from `other`.
    ///
    /// Uses [`CENTER_EPSILON_DEG`] on the center axes and exact equality
    /// on the zoom level, so sub-nanodegree float noise does not trigger
    /// a re-center.
    pub fn differs_from(&self, other: &Self) -> bool {
        self.min_zoom != other.min_zoom
            || (self.center.lat - other.center.lat).abs() > CENTER_EPSILON_DEG
            || (self.center.lon - other.center.lon).abs() > CENTER_EPSILON_DEG
    }
}

// ---------------------------------------------------------------------------
// WanderAlert
// ---------------------------------------------------------------------------

/// A transient alert raised when an at-risk point drifts too far from
/// its origin.
///
/// Alerts are not retained anywhere by the simulation: each tick
/// re-evaluates drift independently, so a point that stays beyond the
/// threshold produces one alert per tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WanderAlert {
    /// Unique alert identifier.
    pub id: AlertId,
    /// The point that drifted.
    pub point_id: PointId,
    /// Display title of the point, copied so sinks need no lookup.
    pub title: String,
    /// Measured great-circle distance from origin, in kilometers.
    pub distance_km: f64,
    /// Tick when the alert was raised.
    pub tick: u64,
    /// Wall-clock timestamp when the alert was created.
    pub created_at: DateTime<Utc>,
}

impl WanderAlert {
    /// Create an alert for `point` at the given measured distance.
    pub fn new(point: &Point, distance_km: f64, tick: u64) -> Self {
        Self {
            id: AlertId::new(),
            point_id: point.id,
            title: point.title.clone(),
            distance_km,
            tick,
            created_at: Utc::now(),
        }
    }

    /// Human-readable notification text for sinks that display messages.
    pub fn message(&self) -> String {
        format!(
            "{} is too far from home ({:.2} km)",
            self.title, self.distance_km
        )
    }
}

// ---------------------------------------------------------------------------
// CategoryCluster
// ---------------------------------------------------------------------------

/// A group of markers sharing one category, as consumed by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct CategoryCluster {
    /// The shared category of every marker in this cluster.
    pub category: Category,
    /// The markers, in roster order.
    pub markers: Vec<Point>,
}
