//! Reachability filter: select the reachable-line features linked to one
//! crossing by its display name.

use crate::geojson::{Feature, FeatureCollection};

/// Property linking a reachable-line feature to its crossing.
pub const CROSSING_NAME_KEY: &str = "crossing_name";

/// Features whose `crossing_name` equals `crossing_name` exactly
/// (case-sensitive, no trimming), in source order. An empty result is a
/// valid state, not an error; callers must have checked that the collection
/// is loaded before getting here.
pub fn reachable_for<'a>(
    collection: &'a FeatureCollection,
    crossing_name: &str,
) -> Vec<&'a Feature> {
    collection
        .features
        .iter()
        .filter(|feature| feature.property_str(CROSSING_NAME_KEY) == Some(crossing_name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines() -> FeatureCollection {
        FeatureCollection::from_json(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "geometry": { "type": "LineString", "coordinates": [[-73.6, 45.5], [-73.59, 45.5]] },
                        "properties": { "crossing_name": "Skatepark Crossing", "crossing_id": "1" }
                    },
                    {
                        "geometry": { "type": "LineString", "coordinates": [[-73.6, 45.51], [-73.59, 45.51]] },
                        "properties": { "crossing_name": "Rue Cartier Crossing" }
                    },
                    {
                        "geometry": { "type": "LineString", "coordinates": [[-73.6, 45.52], [-73.59, 45.52]] },
                        "properties": { "crossing_name": "Skatepark Crossing", "crossing_id": "2" }
                    },
                    {
                        "geometry": { "type": "LineString", "coordinates": [[-73.6, 45.53], [-73.59, 45.53]] },
                        "properties": {}
                    }
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn selects_exactly_the_matching_features() {
        let fc = lines();
        let matched = reachable_for(&fc, "Skatepark Crossing");
        assert_eq!(matched.len(), 2);
        for feature in &matched {
            assert_eq!(
                feature.property_str(CROSSING_NAME_KEY),
                Some("Skatepark Crossing")
            );
        }
    }

    #[test]
    fn preserves_source_order() {
        let fc = lines();
        let matched = reachable_for(&fc, "Skatepark Crossing");
        assert_eq!(matched[0].property_str("crossing_id"), Some("1"));
        assert_eq!(matched[1].property_str("crossing_id"), Some("2"));
    }

    #[test]
    fn single_match() {
        let fc = lines();
        assert_eq!(reachable_for(&fc, "Rue Cartier Crossing").len(), 1);
    }

    #[test]
    fn zero_matches_is_empty_not_error() {
        let fc = lines();
        assert!(reachable_for(&fc, "Outdoor Gym Crossing").is_empty());
    }

    #[test]
    fn matching_is_case_sensitive_and_untrimmed() {
        let fc = lines();
        assert!(reachable_for(&fc, "skatepark crossing").is_empty());
        assert!(reachable_for(&fc, "Skatepark Crossing ").is_empty());
    }

    #[test]
    fn features_without_the_key_never_match() {
        let fc = lines();
        assert!(reachable_for(&fc, "").is_empty());
    }
}
