//! Road network layer, spawned once when its collection finishes loading.

use bevy::prelude::*;

use crate::layers::{polyline_ribbon, style_color, Z_ROADS};
use crate::store::{GeoDataStore, ViewProjection};

const ROAD_COLOR: [u8; 3] = [68, 68, 68];
const ROAD_OPACITY: f32 = 0.8;
const ROAD_HALF_WIDTH_M: f32 = 1.2;

#[derive(Component)]
pub struct RoadLayer;

/// Spawn the road ribbons as soon as the collection is available. One load,
/// one bind site; nothing to do on later frames.
pub fn spawn_road_layer(
    mut commands: Commands,
    store: Res<GeoDataStore>,
    projection: Res<ViewProjection>,
    existing: Query<(), With<RoadLayer>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    if !existing.is_empty() {
        return;
    }
    let Some(roads) = store.roads() else {
        return;
    };

    let material = materials.add(style_color(ROAD_COLOR, ROAD_OPACITY));
    let mut segments = 0_usize;
    commands
        .spawn((
            RoadLayer,
            Transform::from_xyz(0.0, 0.0, Z_ROADS),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for feature in &roads.features {
                let Some(geometry) = &feature.geometry else {
                    continue;
                };
                for path in geometry.paths() {
                    let points: Vec<Vec2> = path
                        .iter()
                        .map(|p| {
                            let w = projection.0.to_world(*p);
                            Vec2::new(w[0], w[1])
                        })
                        .collect();
                    if let Some(mesh) = polyline_ribbon(&points, ROAD_HALF_WIDTH_M) {
                        parent.spawn((
                            Mesh2d(meshes.add(mesh)),
                            MeshMaterial2d(material.clone()),
                        ));
                        segments += 1;
                    }
                }
            }
        });
    info!("Road network layer spawned: {} segments", segments);
}
