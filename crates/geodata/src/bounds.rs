//! Geographic bounds over feature geometry, used for viewport fitting.

use crate::geojson::{Feature, LonLat};

/// Axis-aligned lon/lat bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLatBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl LonLatBounds {
    pub fn from_point(p: LonLat) -> Self {
        Self {
            min_lon: p.lon,
            min_lat: p.lat,
            max_lon: p.lon,
            max_lat: p.lat,
        }
    }

    pub fn extend(&mut self, p: LonLat) {
        self.min_lon = self.min_lon.min(p.lon);
        self.min_lat = self.min_lat.min(p.lat);
        self.max_lon = self.max_lon.max(p.lon);
        self.max_lat = self.max_lat.max(p.lat);
    }

    pub fn merge(&mut self, other: &LonLatBounds) {
        self.extend(LonLat::new(other.min_lon, other.min_lat));
        self.extend(LonLat::new(other.max_lon, other.max_lat));
    }

    pub fn center(&self) -> LonLat {
        LonLat::new(
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    /// Bounds over every coordinate of the given features. `None` when no
    /// feature carries any geometry.
    pub fn from_features<'a>(features: impl IntoIterator<Item = &'a Feature>) -> Option<Self> {
        let mut bounds: Option<LonLatBounds> = None;
        for feature in features {
            let Some(geometry) = &feature.geometry else {
                continue;
            };
            for coord in geometry.coords() {
                match &mut bounds {
                    Some(b) => b.extend(coord),
                    None => bounds = Some(LonLatBounds::from_point(coord)),
                }
            }
        }
        bounds
    }
}
