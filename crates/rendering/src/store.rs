//! Loaded-data store and shared map-state resources.
//!
//! `GeoDataStore` is the single owner of every loaded feature collection.
//! Each slot stays `None` until its load completes (or forever, if the load
//! failed), and every accessor returns `Option` so "not yet loaded" is a
//! checked condition on every consumer path.

use bevy::prelude::*;

use geodata::{DataSources, FeatureCollection, MapProjection};

/// The configured data sources, normalized widest-band-first.
#[derive(Resource, Clone)]
pub struct SourceConfig(pub DataSources);

/// Projection from lon/lat into the renderer's origin-relative world frame.
#[derive(Resource, Clone, Copy)]
pub struct ViewProjection(pub MapProjection);

#[derive(Resource, Default)]
pub struct GeoDataStore {
    roads: Option<FeatureCollection>,
    crossings: Option<FeatureCollection>,
    bands: Vec<Option<FeatureCollection>>,
}

impl GeoDataStore {
    /// Store with one empty slot per configured band.
    pub fn for_sources(sources: &DataSources) -> Self {
        Self {
            roads: None,
            crossings: None,
            bands: vec![None; sources.bands.len()],
        }
    }

    pub fn roads(&self) -> Option<&FeatureCollection> {
        self.roads.as_ref()
    }

    pub fn crossings(&self) -> Option<&FeatureCollection> {
        self.crossings.as_ref()
    }

    pub fn band(&self, index: usize) -> Option<&FeatureCollection> {
        self.bands.get(index)?.as_ref()
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// True once every configured band collection has loaded.
    pub fn all_bands_loaded(&self) -> bool {
        self.bands.iter().all(|slot| slot.is_some())
    }

    pub fn set_roads(&mut self, collection: FeatureCollection) {
        self.roads = Some(collection);
    }

    pub fn set_crossings(&mut self, collection: FeatureCollection) {
        self.crossings = Some(collection);
    }

    pub fn set_band(&mut self, index: usize, collection: FeatureCollection) {
        if let Some(slot) = self.bands.get_mut(index) {
            *slot = Some(collection);
        }
    }
}
