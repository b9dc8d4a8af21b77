//! Core geodata library for the walkshed viewer.
//!
//! Everything in this crate is renderer-agnostic: the GeoJSON feature model,
//! the crossing category/style resolver, the reachability filter, geographic
//! bounds, the Web Mercator projection and slippy-tile math, and the data
//! source configuration. The `rendering` and `app` crates turn these into
//! Bevy resources and entities.

pub mod bounds;
pub mod crossing;
pub mod filter;
pub mod geojson;
pub mod projection;
pub mod sources;

pub use bounds::LonLatBounds;
pub use crossing::{CrossingCategory, CrossingInfo, MarkerStyle};
pub use filter::reachable_for;
pub use geojson::{Feature, FeatureCollection, GeoJsonError, Geometry, LonLat};
pub use projection::{MapProjection, MercatorPoint};
pub use sources::{BandSource, DataSources};
