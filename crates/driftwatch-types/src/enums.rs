//! Enumeration types for the Driftwatch tracker.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Marker categories
// ---------------------------------------------------------------------------

/// Category of a tracked point of interest.
///
/// The category drives marker grouping on the map and decides whether a
/// point participates in the movement simulation: [`Category::Household`]
/// markers are fixed places and are never moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// A tracked person under care.
    Ward,
    /// A caregiver accompanying one or more wards.
    Caregiver,
    /// A family home or other fixed place. Never moves.
    Household,
}

impl Category {
    /// Whether points of this category are static (excluded from movement).
    pub const fn is_static(self) -> bool {
        matches!(self, Self::Household)
    }

    /// All categories in their canonical grouping order.
    pub const fn all() -> [Self; 3] {
        [Self::Ward, Self::Caregiver, Self::Household]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_household_is_static() {
        assert!(Category::Household.is_static());
        assert!(!Category::Ward.is_static());
        assert!(!Category::Caregiver.is_static());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Category::Household).ok();
        assert_eq!(json.as_deref(), Some("\"household\""));
    }

    #[test]
    fn all_lists_every_variant_once() {
        let all = Category::all();
        assert_eq!(all.len(), 3);
        assert!(all.contains(&Category::Ward));
        assert!(all.contains(&Category::Caregiver));
        assert!(all.contains(&Category::Household));
    }
}
