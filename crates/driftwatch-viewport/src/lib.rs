//! Viewport fitting, category clustering, and map-surface sync for
//! Driftwatch.
//!
//! This crate turns the simulation's point snapshots into what the map
//! dashboard needs: per-category marker clusters and a single center/zoom
//! bound kept in sync with an injected map surface. The map widget and
//! the surface-size measurement are capability traits, so everything here
//! is testable without a rendering surface.
//!
//! # Modules
//!
//! - [`projection`] -- Web Mercator pixel projection at discrete zooms
//! - [`fit`] -- Bound fitting (center + minimum zoom) over a snapshot
//! - [`cluster`] -- Per-category marker grouping
//! - [`sync`] -- The apply-once re-center state machine
//! - [`tracker`] -- Readiness gating + fit + sync composition

pub mod cluster;
pub mod fit;
pub mod projection;
pub mod sync;
pub mod tracker;

// Re-export primary items at crate root.
pub use cluster::clusters_by_category;
pub use fit::{SurfaceSize, ZoomLimits, fit_bound};
pub use projection::{MAX_LATITUDE, PixelPoint, TILE_SIZE, project, world_size};
pub use sync::{MapSurface, ViewportSync};
pub use tracker::{SurfaceSizeSource, ViewportTracker};
