//! Map rendering: camera, basemap tiles, road network, crossing markers,
//! reachability band overlays, and click picking.

pub mod basemap;
pub mod camera;
pub mod crossing_layer;
pub mod egui_guard;
pub mod layers;
pub mod picking;
pub mod road_layer;
pub mod selection;
pub mod store;

use bevy::prelude::*;

pub use basemap::BasemapConfig;
pub use camera::MapCamera;
pub use selection::{OverlayNotice, SelectedCrossing};
pub use store::{GeoDataStore, SourceConfig, ViewProjection};

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MapCamera>()
            .init_resource::<camera::LeftClickDrag>()
            .init_resource::<picking::CursorWorldPos>()
            .init_resource::<basemap::TileIndex>()
            .init_resource::<BasemapConfig>()
            .init_resource::<SelectedCrossing>()
            .init_resource::<OverlayNotice>()
            .add_systems(Startup, camera::setup_camera)
            // Picking runs before the drag handler clears the drag flag on
            // release, so a completed pan never counts as a click.
            .add_systems(
                Update,
                (
                    picking::update_cursor_world_pos,
                    picking::pick_crossing_on_click,
                    camera::camera_left_drag,
                    camera::camera_pan_keyboard,
                    camera::camera_zoom,
                    camera::apply_map_camera,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    road_layer::spawn_road_layer,
                    crossing_layer::spawn_crossing_markers,
                    selection::apply_selection,
                    basemap::sync_basemap_tiles,
                ),
            );
    }
}
