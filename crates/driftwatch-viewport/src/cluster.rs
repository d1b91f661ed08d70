//! Category clustering: group the point set into per-category marker sets.
//!
//! The dashboard renders one cluster layer per category (icon and color
//! come from its own registry, not from here). The contract this module
//! guarantees: every point lands in exactly one cluster, cluster order is
//! deterministic (category order), and marker order within a cluster
//! follows the roster order of the input.

use std::collections::BTreeMap;

use driftwatch_types::{Category, CategoryCluster, Point};

/// Group `points` into per-category clusters.
///
/// Categories with no points are omitted; an empty input yields an empty
/// vector.
pub fn clusters_by_category(points: &[Point]) -> Vec<CategoryCluster> {
    let mut grouped: BTreeMap<Category, Vec<Point>> = BTreeMap::new();
    for point in points {
        grouped.entry(point.category).or_default().push(point.clone());
    }

    grouped
        .into_iter()
        .map(|(category, markers)| CategoryCluster { category, markers })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use driftwatch_types::LatLon;

    use super::*;

    fn point(title: &str, category: Category) -> Point {
        Point::new(title, "", LatLon::new(0.0, 0.0), category, false)
    }

    #[test]
    fn empty_input_yields_no_clusters() {
        assert!(clusters_by_category(&[]).is_empty());
    }

    #[test]
    fn every_point_lands_in_exactly_one_cluster() {
        let points = vec![
            point("a", Category::Ward),
            point("b", Category::Household),
            point("c", Category::Ward),
            point("d", Category::Caregiver),
        ];
        let clusters = clusters_by_category(&points);

        let total: usize = clusters.iter().map(|c| c.markers.len()).sum();
        assert_eq!(total, points.len());

        for original in &points {
            let appearances = clusters
                .iter()
                .flat_map(|c| c.markers.iter())
                .filter(|m| m.id == original.id)
                .count();
            assert_eq!(appearances, 1, "{} appeared {appearances} times", original.title);
        }
    }

    #[test]
    fn markers_share_their_cluster_category() {
        let points = vec![
            point("a", Category::Ward),
            point("b", Category::Household),
        ];
        for cluster in clusters_by_category(&points) {
            assert!(cluster.markers.iter().all(|m| m.category == cluster.category));
        }
    }

    #[test]
    fn cluster_order_is_deterministic() {
        let points = vec![
            point("home", Category::Household),
            point("carer", Category::Caregiver),
            point("ward", Category::Ward),
        ];
        let categories: Vec<_> = clusters_by_category(&points)
            .into_iter()
            .map(|c| c.category)
            .collect();
        assert_eq!(
            categories,
            vec![Category::Ward, Category::Caregiver, Category::Household]
        );
    }

    #[test]
    fn absent_categories_are_omitted() {
        let points = vec![point("a", Category::Ward)];
        let clusters = clusters_by_category(&points);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters.first().map(|c| c.category), Some(Category::Ward));
    }

    #[test]
    fn roster_order_preserved_within_cluster() {
        let points = vec![
            point("first", Category::Ward),
            point("second", Category::Ward),
            point("third", Category::Ward),
        ];
        let clusters = clusters_by_category(&points);
        let titles: Vec<_> = clusters
            .first()
            .unwrap()
            .markers
            .iter()
            .map(|m| m.title.clone())
            .collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }
}
