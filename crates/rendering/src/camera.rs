//! 2D map camera: pan (drag + keyboard), wheel zoom, and fit-to-bounds.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

const PAN_SPEED: f32 = 600.0;
const ZOOM_SPEED: f32 = 0.15;
/// Meters per screen pixel at maximum zoom-in.
pub const MIN_SCALE: f32 = 0.05;
/// Meters per screen pixel at maximum zoom-out.
pub const MAX_SCALE: f32 = 60.0;
/// Padding factor around fitted bounds (10% margin).
const FIT_PADDING: f32 = 1.1;

const LEFT_DRAG_THRESHOLD: f32 = 5.0;

/// Map viewport model: a ground-plane center point plus a zoom scale
/// expressed as world meters per screen pixel.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct MapCamera {
    pub center: Vec2,
    pub scale: f32,
}

impl Default for MapCamera {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            scale: 2.0,
        }
    }
}

/// Tracks left-button drag state: differentiates click from drag.
/// When the mouse moves beyond `LEFT_DRAG_THRESHOLD` pixels from the initial
/// press, it becomes a camera pan and suppresses marker picking.
#[derive(Resource, Default)]
pub struct LeftClickDrag {
    pub pressed: bool,
    pub start_pos: Vec2,
    pub last_pos: Vec2,
    /// True once the mouse has moved beyond the threshold.
    pub is_dragging: bool,
}

pub fn setup_camera(mut commands: Commands, camera: Res<MapCamera>) {
    commands.spawn((
        Camera2d,
        Transform::from_xyz(camera.center.x, camera.center.y, 1000.0),
        OrthographicProjection {
            scale: camera.scale,
            ..OrthographicProjection::default_2d()
        },
    ));
}

/// Apply MapCamera state to the actual camera transform and projection.
pub fn apply_map_camera(
    camera: Res<MapCamera>,
    mut query: Query<(&mut Transform, &mut OrthographicProjection), With<Camera2d>>,
) {
    if !camera.is_changed() {
        return;
    }
    let Ok((mut transform, mut projection)) = query.get_single_mut() else {
        return;
    };
    transform.translation.x = camera.center.x;
    transform.translation.y = camera.center.y;
    projection.scale = camera.scale;
}

/// WASD/Arrow keys: pan the center, speed scaled by zoom.
pub fn camera_pan_keyboard(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut camera: ResMut<MapCamera>,
) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }

    if dir != Vec2::ZERO {
        let delta = PAN_SPEED * camera.scale * time.delta_secs();
        camera.center += dir.normalize() * delta;
    }
}

/// Left-mouse drag: pan (with threshold to distinguish from marker clicks).
pub fn camera_left_drag(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut drag: ResMut<LeftClickDrag>,
    mut camera: ResMut<MapCamera>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(pos) = window.cursor_position() {
            drag.pressed = true;
            drag.start_pos = pos;
            drag.last_pos = pos;
            drag.is_dragging = false;
        }
    }

    if buttons.just_released(MouseButton::Left) {
        drag.pressed = false;
        drag.is_dragging = false;
    }

    if drag.pressed {
        if let Some(pos) = window.cursor_position() {
            if !drag.is_dragging {
                let dist = (pos - drag.start_pos).length();
                if dist > LEFT_DRAG_THRESHOLD {
                    drag.is_dragging = true;
                    drag.last_pos = pos;
                }
            }

            if drag.is_dragging {
                let delta = pos - drag.last_pos;
                // Screen y grows downward, world y grows northward.
                camera.center.x -= delta.x * camera.scale;
                camera.center.y += delta.y * camera.scale;
                drag.last_pos = pos;
            }
        }
    }
}

/// Scroll wheel: zoom by changing meters-per-pixel.
pub fn camera_zoom(mut scroll_evts: EventReader<MouseWheel>, mut camera: ResMut<MapCamera>) {
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / 100.0,
        };
        let factor = 1.0 - dy * ZOOM_SPEED;
        camera.scale = (camera.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
    }
}

/// Center + scale that fit `bounds` inside a window of `window_size` logical
/// pixels with a margin, clamped to the zoom limits. Pure so the fitting
/// policy is testable without a camera entity.
pub fn fit_bounds(bounds: Rect, window_size: Vec2) -> (Vec2, f32) {
    let raw = if window_size.x > 0.0 && window_size.y > 0.0 {
        (bounds.width() / window_size.x).max(bounds.height() / window_size.y) * FIT_PADDING
    } else {
        0.0
    };
    let scale = if raw > 0.0 {
        raw.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        // Degenerate bounds (single point): keep a readable street-level zoom.
        1.0
    };
    (bounds.center(), scale)
}
