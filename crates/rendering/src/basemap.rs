//! Slippy tile basemap layer.
//!
//! Tiles come from a pre-fetched `{z}/{x}/{y}` pyramid resolved through the
//! Bevy asset server, so the tile service stays an external collaborator: a
//! missing tile is just a sprite that never resolves, never an error here.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use geodata::projection::{tile_at, tile_center, tile_span_m, zoom_for_resolution};

use crate::camera::MapCamera;
use crate::layers::Z_BASEMAP;
use crate::store::ViewProjection;

/// Hard cap on tiles tracked at once; beyond this the view is so wide the
/// basemap adds nothing and syncing is skipped.
const MAX_VISIBLE_TILES: i64 = 128;

#[derive(Resource, Clone)]
pub struct BasemapConfig {
    /// Asset path template with `{z}`, `{x}`, `{y}` placeholders.
    pub template: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

impl Default for BasemapConfig {
    fn default() -> Self {
        Self {
            template: "tiles/{z}/{x}/{y}.png".to_string(),
            min_zoom: 11,
            max_zoom: 18,
        }
    }
}

type TileKey = (u8, i64, i64);

#[derive(Resource, Default)]
pub struct TileIndex {
    tiles: HashMap<TileKey, Entity>,
}

#[derive(Component)]
pub struct BasemapTile;

/// Expand the path template for one tile.
pub fn tile_path(template: &str, zoom: u8, tx: i64, ty: i64) -> String {
    template
        .replace("{z}", &zoom.to_string())
        .replace("{x}", &tx.to_string())
        .replace("{y}", &ty.to_string())
}

/// Keep the tile sprite set in sync with the viewport: spawn tiles entering
/// the view at the current zoom, despawn the rest.
pub fn sync_basemap_tiles(
    mut commands: Commands,
    config: Res<BasemapConfig>,
    projection: Res<ViewProjection>,
    camera: Res<MapCamera>,
    windows: Query<&Window>,
    asset_server: Res<AssetServer>,
    mut index: ResMut<TileIndex>,
) {
    if !camera.is_changed() && !index.tiles.is_empty() {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };

    let zoom = zoom_for_resolution(camera.scale as f64, config.min_zoom, config.max_zoom);
    let half = Vec2::new(window.width(), window.height()) * 0.5 * camera.scale;
    let min_world = camera.center - half;
    let max_world = camera.center + half;
    let min_m = projection.0.world_to_mercator([min_world.x, min_world.y]);
    let max_m = projection.0.world_to_mercator([max_world.x, max_world.y]);

    // Tile y counts from the north edge, so the world-max corner gives the
    // smallest ty.
    let (tx_min, ty_max) = tile_at(min_m, zoom);
    let (tx_max, ty_min) = tile_at(max_m, zoom);

    let count = (tx_max - tx_min + 1) * (ty_max - ty_min + 1);
    if count > MAX_VISIBLE_TILES {
        return;
    }

    let mut needed: HashSet<TileKey> = HashSet::new();
    for tx in tx_min..=tx_max {
        for ty in ty_min..=ty_max {
            needed.insert((zoom, tx, ty));
        }
    }

    index.tiles.retain(|key, entity| {
        if needed.contains(key) {
            true
        } else {
            commands.entity(*entity).despawn();
            false
        }
    });

    let origin = projection.0.origin();
    let span = tile_span_m(zoom) as f32;
    for key in needed {
        if index.tiles.contains_key(&key) {
            continue;
        }
        let (zoom, tx, ty) = key;
        let center = tile_center(tx, ty, zoom);
        let world_x = (center.x - origin.x) as f32;
        let world_y = (center.y - origin.y) as f32;
        let entity = commands
            .spawn((
                BasemapTile,
                Sprite {
                    image: asset_server.load(tile_path(&config.template, zoom, tx, ty)),
                    custom_size: Some(Vec2::splat(span)),
                    ..default()
                },
                Transform::from_xyz(world_x, world_y, Z_BASEMAP),
            ))
            .id();
        index.tiles.insert(key, entity);
    }
}
