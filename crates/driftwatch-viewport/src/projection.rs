//! Web Mercator pixel projection at discrete zoom levels.
//!
//! The world at zoom `z` is a square of `256 * 2^z` pixels. Latitude is
//! clamped to the standard Web Mercator limit of ±85.0511287798 degrees
//! before projection, matching what slippy-map providers render.

use driftwatch_types::LatLon;

/// Highest latitude representable in Web Mercator, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

/// Side length of one map tile in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// A position in projected pixel space at some zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    /// Horizontal pixel coordinate (0 at the antimeridian, growing east).
    pub x: f64,
    /// Vertical pixel coordinate (0 at the north clamp, growing south).
    pub y: f64,
}

/// Side length of the projected world, in pixels, at the given zoom.
pub fn world_size(zoom: u32) -> f64 {
    TILE_SIZE * 2.0_f64.powf(f64::from(zoom))
}

/// Project a coordinate to pixel space at the given zoom.
pub fn project(pos: LatLon, zoom: u32) -> PixelPoint {
    let size = world_size(zoom);
    let lat = pos.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let sin_lat = lat.to_radians().sin();

    let x = (pos.lon / 360.0 + 0.5) * size;
    let y = (0.5 - ((1.0 + sin_lat) / (1.0 - sin_lat)).ln() / (4.0 * core::f64::consts::PI)) * size;

    PixelPoint { x, y }
}
