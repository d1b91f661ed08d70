//! Geographic primitives shared across the workspace.
//!
//! A [`LatLon`] is a plain (latitude, longitude) pair in decimal degrees
//! with value semantics: movement and fitting code always produce a new
//! pair rather than mutating one in place. No range validation is
//! performed anywhere -- out-of-range input flows through the math and
//! produces a well-defined (if geographically meaningless) result.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LatLon {
    /// Latitude in degrees (positive north).
    pub lat: f64,
    /// Longitude in degrees (positive east).
    pub lon: f64,
}

impl LatLon {
    /// Create a coordinate from latitude and longitude in degrees.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl core::fmt::Display for LatLon {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}
