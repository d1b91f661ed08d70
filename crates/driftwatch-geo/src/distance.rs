//! Great-circle distance via the Haversine formula.
//!
//! Inputs are plain degree pairs and are not validated: out-of-range
//! coordinates still produce a mathematically defined result. The sphere
//! radius is the conventional mean Earth radius of 6371 km, which is
//! accurate to well under 1% everywhere -- more than enough for drift
//! thresholds measured in hundreds of meters.

use driftwatch_types::LatLon;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates, in kilometers.
pub fn distance_km(a: LatLon, b: LatLon) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}
