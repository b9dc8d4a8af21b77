//! Web Mercator (EPSG:3857) projection and the slippy-tile pyramid.
//!
//! Projection math runs in f64; world coordinates handed to the renderer are
//! f32 offsets from a fixed dataset origin so precision stays around a
//! millimeter instead of the meter-scale error raw Mercator meters would
//! carry in f32.

use crate::geojson::LonLat;

pub const EARTH_RADIUS_M: f64 = 6_378_137.0;
/// Half the extent of the square Mercator plane, in meters.
pub const ORIGIN_SHIFT_M: f64 = std::f64::consts::PI * EARTH_RADIUS_M;
pub const TILE_SIZE_PX: u32 = 256;
/// Latitude clamp that keeps the Mercator plane square.
pub const WEB_MERCATOR_MAX_LAT: f64 = 85.051_128_78;

/// Absolute EPSG:3857 coordinates, meters from the lon=0/lat=0 origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorPoint {
    pub x: f64,
    pub y: f64,
}

/// Forward projection. Latitudes beyond the Web Mercator clamp are pinned to
/// the edge of the plane.
pub fn project(p: LonLat) -> MercatorPoint {
    let lat = p.lat.clamp(-WEB_MERCATOR_MAX_LAT, WEB_MERCATOR_MAX_LAT);
    let x = EARTH_RADIUS_M * p.lon.to_radians();
    let y = EARTH_RADIUS_M
        * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0)
            .tan()
            .ln();
    MercatorPoint { x, y }
}

/// Inverse projection.
pub fn unproject(m: MercatorPoint) -> LonLat {
    let lon = (m.x / EARTH_RADIUS_M).to_degrees();
    let lat = (2.0 * (m.y / EARTH_RADIUS_M).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    LonLat::new(lon, lat)
}

/// Origin-relative world frame: +x east, +y north, meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    origin: MercatorPoint,
}

impl MapProjection {
    pub fn centered_on(center: LonLat) -> Self {
        Self {
            origin: project(center),
        }
    }

    pub fn origin(&self) -> MercatorPoint {
        self.origin
    }

    pub fn to_world(&self, p: LonLat) -> [f32; 2] {
        let m = project(p);
        [(m.x - self.origin.x) as f32, (m.y - self.origin.y) as f32]
    }

    pub fn world_to_mercator(&self, world: [f32; 2]) -> MercatorPoint {
        MercatorPoint {
            x: self.origin.x + world[0] as f64,
            y: self.origin.y + world[1] as f64,
        }
    }

    pub fn to_lonlat(&self, world: [f32; 2]) -> LonLat {
        unproject(self.world_to_mercator(world))
    }
}

// ---------------------------------------------------------------------------
// Slippy-tile pyramid (XYZ scheme, y counted from the north edge)
// ---------------------------------------------------------------------------

/// Meters per pixel at the given zoom level.
pub fn resolution(zoom: u8) -> f64 {
    2.0 * ORIGIN_SHIFT_M / (TILE_SIZE_PX as f64 * 2_f64.powi(zoom as i32))
}

/// Ground extent of one tile edge, in meters.
pub fn tile_span_m(zoom: u8) -> f64 {
    resolution(zoom) * TILE_SIZE_PX as f64
}

pub fn tiles_per_axis(zoom: u8) -> i64 {
    1_i64 << zoom
}

/// Zoom whose resolution best matches the requested meters-per-pixel,
/// clamped to the configured range.
pub fn zoom_for_resolution(meters_per_px: f64, min_zoom: u8, max_zoom: u8) -> u8 {
    let raw = (resolution(0) / meters_per_px).log2().round();
    let clamped = raw.clamp(min_zoom as f64, max_zoom as f64);
    clamped as u8
}

/// Tile indices containing the given Mercator point.
pub fn tile_at(m: MercatorPoint, zoom: u8) -> (i64, i64) {
    let span = tile_span_m(zoom);
    let tx = ((m.x + ORIGIN_SHIFT_M) / span).floor() as i64;
    let ty = ((ORIGIN_SHIFT_M - m.y) / span).floor() as i64;
    let max = tiles_per_axis(zoom) - 1;
    (tx.clamp(0, max), ty.clamp(0, max))
}

/// Mercator center of a tile.
pub fn tile_center(tx: i64, ty: i64, zoom: u8) -> MercatorPoint {
    let span = tile_span_m(zoom);
    MercatorPoint {
        x: -ORIGIN_SHIFT_M + (tx as f64 + 0.5) * span,
        y: ORIGIN_SHIFT_M - (ty as f64 + 0.5) * span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_projects_to_zero() {
        let m = project(LonLat::new(0.0, 0.0));
        assert!(m.x.abs() < 1e-6);
        assert!(m.y.abs() < 1e-6);
    }

    #[test]
    fn antimeridian_is_the_plane_edge() {
        let m = project(LonLat::new(180.0, 0.0));
        assert!((m.x - ORIGIN_SHIFT_M).abs() < 1e-3);
    }

    #[test]
    fn project_unproject_round_trip() {
        let p = LonLat::new(-73.605, 45.525);
        let back = unproject(project(p));
        assert!((back.lon - p.lon).abs() < 1e-9);
        assert!((back.lat - p.lat).abs() < 1e-9);
    }

    #[test]
    fn polar_latitudes_are_clamped() {
        let m = project(LonLat::new(0.0, 90.0));
        assert!((m.y - ORIGIN_SHIFT_M).abs() < 1.0);
    }

    #[test]
    fn world_frame_is_origin_relative() {
        let proj = MapProjection::centered_on(LonLat::new(-73.605, 45.525));
        let at_origin = proj.to_world(LonLat::new(-73.605, 45.525));
        assert!(at_origin[0].abs() < 1e-3);
        assert!(at_origin[1].abs() < 1e-3);

        // A point to the northeast has positive x and y.
        let ne = proj.to_world(LonLat::new(-73.6, 45.53));
        assert!(ne[0] > 0.0);
        assert!(ne[1] > 0.0);

        let back = proj.to_lonlat(ne);
        assert!((back.lon - -73.6).abs() < 1e-6);
        assert!((back.lat - 45.53).abs() < 1e-6);
    }

    #[test]
    fn zoom_zero_is_one_world_tile() {
        assert_eq!(tiles_per_axis(0), 1);
        assert!((tile_span_m(0) - 2.0 * ORIGIN_SHIFT_M).abs() < 1e-6);
        assert_eq!(tile_at(MercatorPoint { x: 0.0, y: 0.0 }, 0), (0, 0));
    }

    #[test]
    fn zoom_one_quadrants() {
        // The Mercator origin sits at the corner of the four zoom-1 tiles;
        // flooring puts it in the southeast quadrant (1, 1).
        assert_eq!(tile_at(MercatorPoint { x: 0.0, y: 0.0 }, 1), (1, 1));
        assert_eq!(
            tile_at(MercatorPoint { x: -1.0, y: 1.0 }, 1),
            (0, 0)
        );
    }

    #[test]
    fn tile_center_round_trips_through_tile_at() {
        for zoom in [3_u8, 10, 15] {
            let m = project(LonLat::new(-73.605, 45.525));
            let (tx, ty) = tile_at(m, zoom);
            let center = tile_center(tx, ty, zoom);
            assert_eq!(tile_at(center, zoom), (tx, ty));
        }
    }

    #[test]
    fn resolution_halves_per_zoom() {
        for zoom in 0..18_u8 {
            let ratio = resolution(zoom) / resolution(zoom + 1);
            assert!((ratio - 2.0).abs() < 1e-9);
        }
    }

    #[test]
    fn zoom_for_resolution_matches_pyramid() {
        assert_eq!(zoom_for_resolution(resolution(15), 0, 19), 15);
        // Finer than the max zoom supports: clamp up.
        assert_eq!(zoom_for_resolution(0.0001, 0, 19), 19);
        // Coarser than zoom 0: clamp down.
        assert_eq!(zoom_for_resolution(1e9, 0, 19), 0);
    }
}
