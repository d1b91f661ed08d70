//! Viewport tracking: readiness gating, fitting, and sync in one place.
//!
//! The tracker is what the engine's tick callback talks to. On every
//! point-set change it checks readiness (a measured surface size and a
//! non-empty point set), recomputes the bound from scratch, and offers it
//! to the sync machine. Until the surface has reported its dimensions,
//! nothing is computed and nothing is applied -- the consuming dashboard
//! uses that same gate to suppress rendering.

use driftwatch_types::{Bound, Point};
use tracing::debug;

use crate::fit::{SurfaceSize, ZoomLimits, fit_bound};
use crate::sync::{MapSurface, ViewportSync};

/// An injected source of the rendering surface's pixel dimensions.
///
/// Returns `None` until the first measurement is available; the tracker
/// treats that as "not ready" rather than an error.
pub trait SurfaceSizeSource {
    /// Current pixel size of the rendering surface, if measured.
    fn size(&self) -> Option<SurfaceSize>;
}

/// Keeps the map surface fitted to the current point spread.
#[derive(Debug)]
pub struct ViewportTracker<S: SurfaceSizeSource> {
    /// Where the surface dimensions come from.
    size_source: S,
    /// Discrete zoom range the fitter may choose from.
    limits: ZoomLimits,
    /// Pixel padding kept free on each edge.
    padding_px: f64,
    /// The apply-once sync machine.
    sync: ViewportSync,
}

impl<S: SurfaceSizeSource> ViewportTracker<S> {
    /// Create a tracker with the given size source and fit parameters.
    pub const fn new(size_source: S, limits: ZoomLimits, padding_px: f64) -> Self {
        Self {
            size_source,
            limits,
            padding_px,
            sync: ViewportSync::new(),
        }
    }

    /// React to a point-set change.
    ///
    /// Recomputes the bound for the snapshot and offers it to the sync
    /// machine. Returns the computed bound, or `None` while not ready
    /// (unmeasured surface or empty point set).
    pub fn observe(&mut self, points: &[Point], surface: &mut dyn MapSurface) -> Option<Bound> {
        let Some(size) = self.size_source.size() else {
            debug!("Surface size not yet measured, skipping fit");
            return None;
        };

        let bound = fit_bound(points, size, self.limits, self.padding_px)?;
        self.sync.offer(bound, surface);
        Some(bound)
    }

    /// The bound most recently handed to the surface, if any.
    pub const fn last_applied(&self) -> Option<Bound> {
        self.sync.last_applied()
    }
}
