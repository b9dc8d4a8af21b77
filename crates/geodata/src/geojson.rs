//! Serde model of the GeoJSON interchange format.
//!
//! Collections are parsed once at load time and never mutated afterwards;
//! consumers hold them behind `Option` until the load completes.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Errors produced while turning fetched text into a [`FeatureCollection`].
#[derive(Debug, Error)]
pub enum GeoJsonError {
    #[error("invalid GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("expected a FeatureCollection, got \"{0}\"")]
    NotACollection(String),
}

/// A single lon/lat position. GeoJSON positions may carry an elevation as a
/// third element; it is read and discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl<'de> Deserialize<'de> for LonLat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let coords = Vec::<f64>::deserialize(deserializer)?;
        if coords.len() < 2 {
            return Err(serde::de::Error::invalid_length(
                coords.len(),
                &"a position with at least lon and lat",
            ));
        }
        Ok(LonLat {
            lon: coords[0],
            lat: coords[1],
        })
    }
}

/// Geometry variants, tagged by the GeoJSON `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        coordinates: LonLat,
    },
    MultiPoint {
        coordinates: Vec<LonLat>,
    },
    LineString {
        coordinates: Vec<LonLat>,
    },
    MultiLineString {
        coordinates: Vec<Vec<LonLat>>,
    },
    Polygon {
        coordinates: Vec<Vec<LonLat>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<LonLat>>>,
    },
    GeometryCollection {
        geometries: Vec<Geometry>,
    },
}

impl Geometry {
    /// All line paths in this geometry: line strings as-is, polygon rings as
    /// closed paths. Point geometries contribute nothing.
    pub fn paths(&self) -> Vec<&[LonLat]> {
        match self {
            Geometry::LineString { coordinates } => vec![coordinates.as_slice()],
            Geometry::MultiLineString { coordinates } => {
                coordinates.iter().map(|line| line.as_slice()).collect()
            }
            Geometry::Polygon { coordinates } => {
                coordinates.iter().map(|ring| ring.as_slice()).collect()
            }
            Geometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flat_map(|poly| poly.iter().map(|ring| ring.as_slice()))
                .collect(),
            Geometry::GeometryCollection { geometries } => {
                geometries.iter().flat_map(|g| g.paths()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// All point positions in this geometry (line/polygon geometries
    /// contribute nothing).
    pub fn points(&self) -> Vec<LonLat> {
        match self {
            Geometry::Point { coordinates } => vec![*coordinates],
            Geometry::MultiPoint { coordinates } => coordinates.clone(),
            Geometry::GeometryCollection { geometries } => {
                geometries.iter().flat_map(|g| g.points()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Every coordinate in the geometry, for bounds computation.
    pub fn coords(&self) -> Vec<LonLat> {
        match self {
            Geometry::Point { coordinates } => vec![*coordinates],
            Geometry::MultiPoint { coordinates } | Geometry::LineString { coordinates } => {
                coordinates.clone()
            }
            Geometry::MultiLineString { coordinates } | Geometry::Polygon { coordinates } => {
                coordinates.iter().flatten().copied().collect()
            }
            Geometry::MultiPolygon { coordinates } => {
                coordinates.iter().flatten().flatten().copied().collect()
            }
            Geometry::GeometryCollection { geometries } => {
                geometries.iter().flat_map(|g| g.coords()).collect()
            }
        }
    }
}

/// A geometry plus its attribute map.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, Value>>,
}

impl Feature {
    /// String property lookup. Non-string values yield `None`; matching is
    /// byte-exact, no trimming or case folding.
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.as_ref()?.get(key)?.as_str()
    }
}

/// An ordered sequence of features, loaded verbatim from one source file.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Parse GeoJSON text, rejecting documents that are not a
    /// FeatureCollection.
    pub fn from_json(text: &str) -> Result<Self, GeoJsonError> {
        let collection: FeatureCollection = serde_json::from_str(text)?;
        if collection.kind != "FeatureCollection" {
            return Err(GeoJsonError::NotACollection(collection.kind));
        }
        Ok(collection)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
