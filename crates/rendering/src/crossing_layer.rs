//! Crossing point markers: styled circle meshes carrying the attributes the
//! picking and panel systems need.

use bevy::prelude::*;

use geodata::crossing::{marker_style, CrossingInfo};

use crate::layers::{style_color, Z_CROSSINGS};
use crate::store::{GeoDataStore, ViewProjection};

#[derive(Component)]
pub struct CrossingLayer;

/// One clickable crossing marker. `position` duplicates the transform so the
/// picking scan never needs the transform hierarchy.
#[derive(Component)]
pub struct CrossingMarker {
    pub info: CrossingInfo,
    pub position: Vec2,
}

/// Spawn every crossing marker once the collection is available. The click
/// handler binds at the same site as the render pass: one load, one layer.
pub fn spawn_crossing_markers(
    mut commands: Commands,
    store: Res<GeoDataStore>,
    projection: Res<ViewProjection>,
    existing: Query<(), With<CrossingLayer>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    if !existing.is_empty() {
        return;
    }
    let Some(crossings) = store.crossings() else {
        return;
    };

    let mut markers = 0_usize;
    commands
        .spawn((
            CrossingLayer,
            Transform::from_xyz(0.0, 0.0, Z_CROSSINGS),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for feature in &crossings.features {
                let Some(geometry) = &feature.geometry else {
                    continue;
                };
                let info = CrossingInfo::from_feature(feature);
                let style = marker_style(info.category);
                for point in geometry.points() {
                    let w = projection.0.to_world(point);
                    let position = Vec2::new(w[0], w[1]);
                    let stroke = materials.add(style_color(style.stroke_color, style.stroke_opacity));
                    let fill = materials.add(style_color(style.fill_color, style.fill_opacity));
                    parent
                        .spawn((
                            CrossingMarker {
                                info: info.clone(),
                                position,
                            },
                            Transform::from_xyz(position.x, position.y, 0.0),
                            Visibility::default(),
                        ))
                        .with_children(|marker| {
                            marker.spawn((
                                Mesh2d(meshes.add(Circle::new(style.radius + style.stroke_weight))),
                                MeshMaterial2d(stroke),
                                Transform::from_xyz(0.0, 0.0, 0.0),
                            ));
                            marker.spawn((
                                Mesh2d(meshes.add(Circle::new(style.radius))),
                                MeshMaterial2d(fill),
                                Transform::from_xyz(0.0, 0.0, 0.1),
                            ));
                        });
                    markers += 1;
                }
            }
        });
    info!("Crossing markers spawned: {}", markers);
}
