//! Data source configuration: which GeoJSON files to load and how the
//! reachability bands are styled.
//!
//! The observed deployments ship either a single undifferentiated
//! reachable-lines file or one file per distance band; both are the same
//! configuration with one or several [`BandSource`] entries.

use serde::{Deserialize, Serialize};

/// One reachability distance band and its overlay stroke style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSource {
    pub label: String,
    pub distance_m: u32,
    pub path: String,
    pub color: [u8; 3],
    pub width: f32,
    pub opacity: f32,
}

/// Paths of every static dataset the viewer loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSources {
    pub roads: String,
    pub crossings: String,
    pub bands: Vec<BandSource>,
}

impl DataSources {
    /// Sort bands widest-first so the draw loop can rely on index order:
    /// the widest band is spawned first and the narrowest renders on top.
    pub fn normalize(&mut self) {
        self.bands
            .sort_by(|a, b| b.distance_m.cmp(&a.distance_m));
    }

    /// Index of the widest band, the one viewport fitting prefers.
    pub fn widest_band(&self) -> Option<usize> {
        if self.bands.is_empty() {
            None
        } else {
            Some(0)
        }
    }
}

impl Default for DataSources {
    fn default() -> Self {
        let mut sources = Self {
            roads: "data/roadnetwork_clipped_pedestrian.geojson".to_string(),
            crossings: "data/places.geojson".to_string(),
            bands: vec![
                BandSource {
                    label: "400 m".to_string(),
                    distance_m: 400,
                    path: "data/reachable_lines_400.geojson".to_string(),
                    color: [21, 101, 192],
                    width: 3.5,
                    opacity: 0.95,
                },
                BandSource {
                    label: "800 m".to_string(),
                    distance_m: 800,
                    path: "data/reachable_lines_800.geojson".to_string(),
                    color: [100, 181, 246],
                    width: 5.0,
                    opacity: 0.65,
                },
            ],
        };
        sources.normalize();
        sources
    }
}
