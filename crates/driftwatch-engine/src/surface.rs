//! Headless collaborator implementations for the engine process.
//!
//! The engine has no DOM and no rendering widget, so the capability
//! traits get process-local stand-ins: a surface whose size comes from
//! configuration, a map surface that logs each re-center and
//! acknowledges it immediately, and an alert sink backed by `tracing`.

use driftwatch_sim::AlertSink;
use driftwatch_types::{LatLon, WanderAlert};
use driftwatch_viewport::{MapSurface, SurfaceSize, SurfaceSizeSource};
use tokio::sync::oneshot;
use tracing::{info, warn};

/// A surface-size source with fixed, configured dimensions.
#[derive(Debug, Clone, Copy)]
pub struct FixedSurfaceSize {
    /// The configured pixel dimensions.
    size: SurfaceSize,
}

impl FixedSurfaceSize {
    /// Create a size source reporting the given dimensions.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            size: SurfaceSize::new(width, height),
        }
    }
}

impl SurfaceSizeSource for FixedSurfaceSize {
    fn size(&self) -> Option<SurfaceSize> {
        Some(self.size)
    }
}

/// A map surface that logs each re-center and completes it immediately.
///
/// Stands in for the slippy-map widget when running headless: the move
/// is instant, so the acknowledgement is resolved before `recenter`
/// returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMapSurface;

impl LogMapSurface {
    /// Create a logging map surface.
    pub const fn new() -> Self {
        Self
    }
}

impl MapSurface for LogMapSurface {
    fn recenter(&mut self, center: LatLon, zoom: u32) -> oneshot::Receiver<()> {
        info!(%center, zoom, "Map re-centered");
        let (ack, rx) = oneshot::channel();
        let _ = ack.send(());
        rx
    }
}

/// An alert sink that logs each wander alert at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlertSink;

impl TracingAlertSink {
    /// Create a tracing-backed alert sink.
    pub const fn new() -> Self {
        Self
    }
}

impl AlertSink for TracingAlertSink {
    fn notify(&mut self, alert: &WanderAlert) {
        warn!(
            point_id = %alert.point_id,
            tick = alert.tick,
            distance_km = alert.distance_km,
            "{}",
            alert.message()
        );
    }
}
