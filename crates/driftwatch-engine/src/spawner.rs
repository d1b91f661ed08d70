//! Seed roster spawner.
//!
//! Turns the configured roster entries into tracked [`Point`]s at
//! startup, recording each starting position as the drift origin.

use driftwatch_sim::config::RosterEntry;
use driftwatch_types::{LatLon, Point};
use tracing::debug;

/// Result of spawning the seed roster.
#[derive(Debug, Clone)]
pub struct SpawnResult {
    /// The spawned points, in roster order.
    pub points: Vec<Point>,
    /// How many of them participate in movement.
    pub mobile: usize,
    /// How many of them are drift-checked.
    pub at_risk: usize,
}

/// Build the seed point set from configured roster entries.
pub fn spawn_roster(entries: &[RosterEntry]) -> SpawnResult {
    let mut points = Vec::with_capacity(entries.len());
    let mut mobile: usize = 0;
    let mut at_risk: usize = 0;

    for entry in entries {
        let point = Point::new(
            entry.title.clone(),
            entry.address.clone(),
            LatLon::new(entry.lat, entry.lon),
            entry.category,
            entry.at_risk,
        );
        debug!(
            point_id = %point.id,
            title = point.title,
            category = ?point.category,
            at_risk = point.at_risk,
            "Spawned roster point"
        );
        if point.is_mobile() {
            mobile = mobile.saturating_add(1);
        }
        if point.at_risk {
            at_risk = at_risk.saturating_add(1);
        }
        points.push(point);
    }

    SpawnResult {
        points,
        mobile,
        at_risk,
    }
}

#[cfg(test)]
mod tests {
    use driftwatch_sim::SimulationConfig;
    use driftwatch_types::Category;

    use super::*;

    #[test]
    fn default_roster_spawns_six_points() {
        let config = SimulationConfig::default();
        let result = spawn_roster(&config.roster);

        assert_eq!(result.points.len(), 6);
        assert_eq!(result.mobile, 5);
        assert_eq!(result.at_risk, 1);
        assert_eq!(
            result
                .points
                .iter()
                .filter(|p| p.category == Category::Household)
                .count(),
            1
        );
    }

    #[test]
    fn origin_records_the_starting_position() {
        let config = SimulationConfig::default();
        let result = spawn_roster(&config.roster);
        for point in &result.points {
            assert_eq!(point.origin, point.position);
        }
    }

    #[test]
    fn empty_roster_spawns_nothing() {
        let result = spawn_roster(&[]);
        assert!(result.points.is_empty());
        assert_eq!(result.mobile, 0);
        assert_eq!(result.at_risk, 0);
    }
}
