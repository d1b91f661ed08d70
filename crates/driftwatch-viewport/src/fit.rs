//! Bound fitting: derive one center/zoom pair that contains every point.
//!
//! The fit is a pure function of the current point snapshot -- it holds
//! no memory of previous bounds. The center is the midpoint of the
//! geographic bounding box; the zoom is the largest discrete level within
//! the configured limits at which the projected bounding box still fits
//! inside the padded surface. A degenerate spread (one point, or all
//! points coincident) fits at every level and therefore yields the
//! maximum zoom.

use driftwatch_types::{Bound, LatLon, Point};

use crate::projection::project;

/// Pixel dimensions of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Create a surface size from pixel dimensions.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Discrete zoom range the fitter may choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomLimits {
    /// Smallest allowed zoom level.
    pub min: u32,
    /// Largest allowed zoom level.
    pub max: u32,
}

impl ZoomLimits {
    /// Create a zoom range.
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Compute the bound containing every point, or `None` for an empty set.
///
/// `padding_px` is kept free on each edge of the surface, so the usable
/// area is `size - 2 * padding` per axis (floored at one pixel).
pub fn fit_bound(
    points: &[Point],
    size: SurfaceSize,
    limits: ZoomLimits,
    padding_px: f64,
) -> Option<Bound> {
    let first = points.first()?;

    let mut min_lat = first.position.lat;
    let mut max_lat = first.position.lat;
    let mut min_lon = first.position.lon;
    let mut max_lon = first.position.lon;
    for point in points {
        min_lat = min_lat.min(point.position.lat);
        max_lat = max_lat.max(point.position.lat);
        min_lon = min_lon.min(point.position.lon);
        max_lon = max_lon.max(point.position.lon);
    }

    let center = LatLon::new((min_lat + max_lat) / 2.0, (min_lon + max_lon) / 2.0);

    let usable_width = (f64::from(size.width) - 2.0 * padding_px).max(1.0);
    let usable_height = (f64::from(size.height) - 2.0 * padding_px).max(1.0);

    // Walk the discrete zoom levels from the widest view inward and keep
    // the last level at which the projected spread still fits.
    let mut min_zoom = limits.min;
    for zoom in limits.min..=limits.max {
        let north_west = project(LatLon::new(max_lat, min_lon), zoom);
        let south_east = project(LatLon::new(min_lat, max_lon), zoom);
        let spread_width = (south_east.x - north_west.x).abs();
        let spread_height = (south_east.y - north_west.y).abs();

        if spread_width <= usable_width && spread_height <= usable_height {
            min_zoom = zoom;
        } else {
            break;
        }
    }

    Some(Bound { center, min_zoom })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use driftwatch_types::Category;

    use super::*;

    const SIZE: SurfaceSize = SurfaceSize::new(1024, 768);
    const LIMITS: ZoomLimits = ZoomLimits::new(3, 18);

    fn point_at(lat: f64, lon: f64) -> Point {
        Point::new("p", "", LatLon::new(lat, lon), Category::Ward, false)
    }

    #[test]
    fn empty_set_yields_no_bound() {
        assert!(fit_bound(&[], SIZE, LIMITS, 0.0).is_none());
    }

    #[test]
    fn single_point_centers_there_at_max_zoom() {
        let point = point_at(-22.896, -43.1059);
        let bound = fit_bound(std::slice::from_ref(&point), SIZE, LIMITS, 0.0).unwrap();
        assert!((bound.center.lat - (-22.896)).abs() < 1e-12);
        assert!((bound.center.lon - (-43.1059)).abs() < 1e-12);
        assert_eq!(bound.min_zoom, LIMITS.max);
    }

    #[test]
    fn coincident_points_behave_like_one() {
        let points = vec![point_at(10.0, 20.0), point_at(10.0, 20.0)];
        let bound = fit_bound(&points, SIZE, LIMITS, 0.0).unwrap();
        assert_eq!(bound.min_zoom, LIMITS.max);
    }

    #[test]
    fn center_is_bounding_box_midpoint() {
        let points = vec![point_at(10.0, 20.0), point_at(12.0, 26.0)];
        let bound = fit_bound(&points, SIZE, LIMITS, 0.0).unwrap();
        assert!((bound.center.lat - 11.0).abs() < 1e-12);
        assert!((bound.center.lon - 23.0).abs() < 1e-12);
    }

    #[test]
    fn wider_spread_needs_smaller_zoom() {
        // ~1 km apart vs ~200 km apart along a meridian.
        let close = vec![point_at(-22.9, -43.1), point_at(-22.909, -43.1)];
        let far = vec![point_at(-22.9, -43.1), point_at(-24.7, -43.1)];

        let close_bound = fit_bound(&close, SIZE, LIMITS, 0.0).unwrap();
        let far_bound = fit_bound(&far, SIZE, LIMITS, 0.0).unwrap();

        assert!(
            far_bound.min_zoom < close_bound.min_zoom,
            "far {} vs close {}",
            far_bound.min_zoom,
            close_bound.min_zoom
        );
    }

    #[test]
    fn zoom_never_leaves_the_limits() {
        let tight = ZoomLimits::new(5, 10);
        let single = vec![point_at(0.0, 0.0)];
        let spread = vec![point_at(-60.0, -120.0), point_at(60.0, 120.0)];

        let single_bound = fit_bound(&single, SIZE, tight, 0.0).unwrap();
        let spread_bound = fit_bound(&spread, SIZE, tight, 0.0).unwrap();

        assert_eq!(single_bound.min_zoom, 10);
        assert_eq!(spread_bound.min_zoom, 5);
    }

    #[test]
    fn padding_cannot_increase_zoom() {
        let points = vec![point_at(-22.9, -43.1), point_at(-22.95, -43.02)];
        let plain = fit_bound(&points, SIZE, LIMITS, 0.0).unwrap();
        let padded = fit_bound(&points, SIZE, LIMITS, 300.0).unwrap();
        assert!(padded.min_zoom <= plain.min_zoom);
    }

    #[test]
    fn fit_is_deterministic_for_a_snapshot() {
        let points = vec![point_at(-22.9, -43.1), point_at(-22.93, -43.05)];
        let a = fit_bound(&points, SIZE, LIMITS, 0.0).unwrap();
        let b = fit_bound(&points, SIZE, LIMITS, 0.0).unwrap();
        assert!(!a.differs_from(&b));
    }
}
