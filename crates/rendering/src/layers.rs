//! Layer z-order and line ribbon meshes.
//!
//! The overlay stack is fixed: basemap under roads, roads under band
//! overlays, crossings on top. Band overlays are spawned widest-first with
//! ascending z so the narrowest band always renders topmost.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

pub const Z_BASEMAP: f32 = 0.0;
pub const Z_ROADS: f32 = 10.0;
pub const Z_BAND_BASE: f32 = 20.0;
pub const Z_BAND_STEP: f32 = 1.0;
pub const Z_CROSSINGS: f32 = 40.0;

/// Z for the band at `index` in widest-first order: index 0 (widest) is
/// lowest, each narrower band sits one step above.
pub fn band_z(index: usize) -> f32 {
    Z_BAND_BASE + Z_BAND_STEP * index as f32
}

/// Convert a style RGB triple + opacity to a renderer color.
pub fn style_color(rgb: [u8; 3], opacity: f32) -> Color {
    Color::srgba_u8(rgb[0], rgb[1], rgb[2], (opacity.clamp(0.0, 1.0) * 255.0) as u8)
}

/// Build a flat quad-strip ribbon along a polyline. Each input point emits a
/// left/right vertex pair offset by `half_width` along the averaged
/// perpendicular; consecutive duplicate points are dropped. `None` when fewer
/// than two distinct points remain.
pub fn polyline_ribbon(points: &[Vec2], half_width: f32) -> Option<Mesh> {
    let mut path: Vec<Vec2> = Vec::with_capacity(points.len());
    for &p in points {
        if path.last().map_or(true, |prev| prev.distance(p) > 1e-4) {
            path.push(p);
        }
    }
    if path.len() < 2 {
        return None;
    }

    let n = path.len();
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(n * 2);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(n * 2);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(n * 2);
    let mut indices: Vec<u32> = Vec::with_capacity((n - 1) * 6);

    for i in 0..n {
        // Averaged segment direction at interior points, single segment at ends.
        let dir = if i == 0 {
            path[1] - path[0]
        } else if i == n - 1 {
            path[n - 1] - path[n - 2]
        } else {
            path[i + 1] - path[i - 1]
        }
        .normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x);

        let left = path[i] - perp * half_width;
        let right = path[i] + perp * half_width;
        positions.push([left.x, left.y, 0.0]);
        positions.push([right.x, right.y, 0.0]);
        normals.extend_from_slice(&[[0.0, 0.0, 1.0]; 2]);
        let t = i as f32 / (n - 1) as f32;
        uvs.extend_from_slice(&[[0.0, t], [1.0, t]]);

        if i > 0 {
            let base = (i as u32 - 1) * 2;
            indices.push(base);
            indices.push(base + 2);
            indices.push(base + 1);
            indices.push(base + 1);
            indices.push(base + 2);
            indices.push(base + 3);
        }
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    Some(mesh)
}
