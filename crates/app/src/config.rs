//! Viewer configuration: window, map start view, data sources, basemap.
//!
//! On native builds a `walkshed.json` next to the binary overrides the
//! defaults; a broken override file logs and falls back rather than
//! aborting the viewer.

use bevy::prelude::*;
use serde::Deserialize;

use geodata::{DataSources, LonLat};
use rendering::BasemapConfig;

#[cfg(not(target_arch = "wasm32"))]
pub const CONFIG_PATH: &str = "walkshed.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub title: String,
    /// Initial view center, WGS84 degrees.
    pub center_lon: f64,
    pub center_lat: f64,
    /// Initial zoom, world meters per screen pixel.
    pub initial_scale: f32,
    pub sources: DataSources,
    pub tile_template: String,
    pub tile_min_zoom: u8,
    pub tile_max_zoom: u8,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let basemap = BasemapConfig::default();
        Self {
            title: "Crossing Walksheds".to_string(),
            center_lon: -73.605,
            center_lat: 45.525,
            initial_scale: 2.0,
            sources: DataSources::default(),
            tile_template: basemap.template,
            tile_min_zoom: basemap.min_zoom,
            tile_max_zoom: basemap.max_zoom,
        }
    }
}

impl ViewerConfig {
    pub fn center(&self) -> LonLat {
        LonLat::new(self.center_lon, self.center_lat)
    }

    pub fn basemap(&self) -> BasemapConfig {
        BasemapConfig {
            template: self.tile_template.clone(),
            min_zoom: self.tile_min_zoom,
            max_zoom: self.tile_max_zoom,
        }
    }

    pub fn from_json(contents: &str) -> Result<Self, serde_json::Error> {
        let mut config: ViewerConfig = serde_json::from_str(contents)?;
        config.sources.normalize();
        Ok(config)
    }

    /// Defaults, overridden by [`CONFIG_PATH`] when that file exists.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_or_default() -> Self {
        match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(config) => {
                    info!("Loaded viewer config from {}", CONFIG_PATH);
                    config
                }
                Err(e) => {
                    error!("Invalid config {}: {}; using defaults", CONFIG_PATH, e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load_or_default() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bands_are_ordered_for_drawing() {
        let config = ViewerConfig::default();
        assert_eq!(config.sources.widest_band(), Some(0));
        assert!(config.tile_min_zoom < config.tile_max_zoom);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            ViewerConfig::from_json(r#"{ "title": "Mile End", "initial_scale": 1.0 }"#).unwrap();
        assert_eq!(config.title, "Mile End");
        assert!((config.initial_scale - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.sources, DataSources::default());
        assert!((config.center_lat - 45.525).abs() < 1e-9);
    }

    #[test]
    fn override_bands_are_normalized() {
        let config = ViewerConfig::from_json(
            r#"{
                "sources": {
                    "roads": "data/roads.geojson",
                    "crossings": "data/places.geojson",
                    "bands": [
                        { "label": "200 m", "distance_m": 200, "path": "data/near.geojson",
                          "color": [21, 101, 192], "width": 3.0, "opacity": 0.9 },
                        { "label": "600 m", "distance_m": 600, "path": "data/far.geojson",
                          "color": [100, 181, 246], "width": 5.0, "opacity": 0.6 }
                    ]
                }
            }"#,
        )
        .unwrap();
        let distances: Vec<u32> = config.sources.bands.iter().map(|b| b.distance_m).collect();
        assert_eq!(distances, vec![600, 200]);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(ViewerConfig::from_json("{ not json").is_err());
    }
}
