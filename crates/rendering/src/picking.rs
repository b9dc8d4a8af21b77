//! Cursor tracking and crossing marker picking.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::camera::{LeftClickDrag, MapCamera};
use crate::crossing_layer::CrossingMarker;
use crate::egui_guard::egui_wants_pointer;
use crate::selection::SelectedCrossing;

/// Screen-space pick radius; converted to world units by the camera scale so
/// markers stay equally clickable at every zoom.
pub const PICK_RADIUS_PX: f32 = 14.0;

#[derive(Resource, Default)]
pub struct CursorWorldPos {
    pub pos: Option<Vec2>,
}

/// Each frame, resolve the cursor to map world coordinates.
pub fn update_cursor_world_pos(
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    mut cursor: ResMut<CursorWorldPos>,
) {
    cursor.pos = None;
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera_q.get_single() else {
        return;
    };
    if let Some(screen_pos) = window.cursor_position() {
        if let Ok(world) = camera.viewport_to_world_2d(cam_transform, screen_pos) {
            cursor.pos = Some(world);
        }
    }
}

/// Index of the candidate nearest to `target` within `radius`, or `None`.
pub fn nearest_index(target: Vec2, radius: f32, positions: &[Vec2]) -> Option<usize> {
    let mut best_dist = radius;
    let mut best: Option<usize> = None;
    for (i, pos) in positions.iter().enumerate() {
        let dist = (*pos - target).length();
        if dist < best_dist {
            best_dist = dist;
            best = Some(i);
        }
    }
    best
}

/// On a completed left click (not a drag, not over the panel), select the
/// nearest crossing within the pick radius. Must run before the drag state
/// is reset on release.
pub fn pick_crossing_on_click(
    mut contexts: EguiContexts,
    buttons: Res<ButtonInput<MouseButton>>,
    drag: Res<LeftClickDrag>,
    cursor: Res<CursorWorldPos>,
    camera: Res<MapCamera>,
    markers: Query<&CrossingMarker>,
    mut selected: ResMut<SelectedCrossing>,
) {
    if !buttons.just_released(MouseButton::Left) || drag.is_dragging {
        return;
    }
    if egui_wants_pointer(&mut contexts) {
        return;
    }
    let Some(target) = cursor.pos else {
        return;
    };

    let candidates: Vec<&CrossingMarker> = markers.iter().collect();
    let positions: Vec<Vec2> = candidates.iter().map(|m| m.position).collect();
    let radius = PICK_RADIUS_PX * camera.scale;
    if let Some(i) = nearest_index(target, radius, &positions) {
        let marker = candidates[i];
        info!("Selected crossing '{}'", marker.info.name);
        selected.0 = Some(marker.info.clone());
    }
}
