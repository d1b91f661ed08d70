//! Shared type definitions for the Driftwatch tracking simulation.
//!
//! This crate is the single source of truth for all types used across the
//! Driftwatch workspace. Types defined here flow downstream to `TypeScript`
//! via `ts-rs` for the map dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for entity identifiers
//! - [`geo`] -- Geographic coordinate primitives
//! - [`enums`] -- The marker category enumeration
//! - [`structs`] -- Core entity structs (points, bounds, alerts, clusters)

pub mod enums;
pub mod geo;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::Category;
pub use geo::LatLon;
pub use ids::{AlertId, PointId};
pub use structs::{Bound, CENTER_EPSILON_DEG, CategoryCluster, Point, WanderAlert};
