//! Tick callback that keeps the dashboard-facing outputs current.
//!
//! After each tick, this callback regroups the points into per-category
//! clusters and hands the fresh snapshot to the viewport tracker, which
//! refits the bound and re-centers the map surface when it changed.

use driftwatch_sim::runner::TickCallback;
use driftwatch_sim::tick::{SimulationState, TickSummary};
use driftwatch_viewport::cluster::clusters_by_category;
use driftwatch_viewport::tracker::ViewportTracker;
use tracing::debug;

use crate::surface::{FixedSurfaceSize, LogMapSurface};

/// Callback that bridges the tick cycle to the viewport and clustering.
pub struct DashboardCallback {
    /// Fits and syncs the viewport against the headless surface.
    tracker: ViewportTracker<FixedSurfaceSize>,
    /// The headless map surface being kept in sync.
    surface: LogMapSurface,
}

impl DashboardCallback {
    /// Create a callback with the given tracker and surface.
    pub const fn new(tracker: ViewportTracker<FixedSurfaceSize>, surface: LogMapSurface) -> Self {
        Self { tracker, surface }
    }
}

impl TickCallback for DashboardCallback {
    fn on_tick(&mut self, summary: &TickSummary, sim: &SimulationState) {
        let clusters = clusters_by_category(&sim.points);
        debug!(
            tick = summary.tick,
            clusters = clusters.len(),
            moved = summary.moved,
            "Clusters rebuilt"
        );

        if let Some(bound) = self.tracker.observe(&sim.points, &mut self.surface) {
            debug!(
                tick = summary.tick,
                center = %bound.center,
                zoom = bound.min_zoom,
                "Viewport bound recomputed"
            );
        }
    }
}
