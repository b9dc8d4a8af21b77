//! Selection controller: reacts to a crossing click by replacing the band
//! overlays, fitting the viewport, and recording what the panel should say.
//!
//! The transition is split in two: [`plan_selection`] is pure and decides
//! everything (pending / which paths per band / fit rect), and
//! [`apply_selection`] is the thin ECS glue that despawns, spawns, and moves
//! the camera. There is no deselect; every click overwrites the previous
//! selection.

use bevy::prelude::*;

use geodata::crossing::CrossingInfo;
use geodata::{reachable_for, DataSources, LonLat, LonLatBounds, MapProjection};

use crate::camera::{fit_bounds, MapCamera};
use crate::layers::{band_z, polyline_ribbon, style_color};
use crate::store::{GeoDataStore, SourceConfig, ViewProjection};

/// The currently selected crossing; the info panel mirrors this directly.
#[derive(Resource, Default)]
pub struct SelectedCrossing(pub Option<CrossingInfo>);

/// Outcome of the last selection, for the panel's reachability line.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayNotice {
    /// Nothing selected yet.
    #[default]
    Idle,
    /// Clicked before the band collections finished loading.
    DataPending,
    /// Reachable lines are on the map.
    Drawn,
    /// The filter matched nothing in any band.
    NoReachableLines,
}

/// One drawn band overlay. At most one of these exists per band index.
#[derive(Component)]
pub struct BandOverlay {
    pub band_index: usize,
}

/// World-space paths to draw for one band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandPlan {
    pub band_index: usize,
    pub paths: Vec<Vec<Vec2>>,
}

/// Everything a selection transition will do, decided up front.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionPlan {
    /// Some band collection has not loaded: draw nothing, keep previous
    /// overlays untouched.
    DataPending,
    /// Replace the overlays with these bands (widest-first order). `fit` is
    /// the world rect of the widest non-empty band, `None` when every band
    /// came up empty.
    Ready {
        bands: Vec<BandPlan>,
        fit: Option<Rect>,
    },
}

fn world_point(projection: &MapProjection, p: LonLat) -> Vec2 {
    let w = projection.to_world(p);
    Vec2::new(w[0], w[1])
}

fn world_rect(projection: &MapProjection, bounds: &LonLatBounds) -> Rect {
    let a = world_point(projection, LonLat::new(bounds.min_lon, bounds.min_lat));
    let b = world_point(projection, LonLat::new(bounds.max_lon, bounds.max_lat));
    Rect::from_corners(a, b)
}

/// Decide the full selection transition for `crossing_name`.
pub fn plan_selection(
    crossing_name: &str,
    sources: &DataSources,
    store: &GeoDataStore,
    projection: &MapProjection,
) -> SelectionPlan {
    // Every configured band must be loaded before any overlay is touched.
    if (0..sources.bands.len()).any(|idx| store.band(idx).is_none()) {
        return SelectionPlan::DataPending;
    }

    let mut bands = Vec::new();
    let mut fit: Option<Rect> = None;
    for idx in 0..sources.bands.len() {
        let Some(collection) = store.band(idx) else {
            continue;
        };
        let features = reachable_for(collection, crossing_name);

        // Bands are widest-first, so the first band with geometry is the one
        // the viewport fits to.
        if fit.is_none() {
            if let Some(bounds) = LonLatBounds::from_features(features.iter().copied()) {
                fit = Some(world_rect(projection, &bounds));
            }
        }

        let paths: Vec<Vec<Vec2>> = features
            .iter()
            .filter_map(|feature| feature.geometry.as_ref())
            .flat_map(|geometry| {
                geometry
                    .paths()
                    .into_iter()
                    .map(|path| path.iter().map(|p| world_point(projection, *p)).collect())
                    .collect::<Vec<_>>()
            })
            .collect();
        if !paths.is_empty() {
            bands.push(BandPlan {
                band_index: idx,
                paths,
            });
        }
    }

    SelectionPlan::Ready { bands, fit }
}

/// Apply the transition whenever the selection changes.
///
/// The panel text is already covered: picking wrote `SelectedCrossing`
/// unconditionally, and the panel renders straight from it. This system only
/// handles the overlay/viewport part, so an early `DataPending` return leaves
/// previous overlays exactly as they were.
#[allow(clippy::too_many_arguments)]
pub fn apply_selection(
    mut commands: Commands,
    selected: Res<SelectedCrossing>,
    sources: Res<SourceConfig>,
    store: Res<GeoDataStore>,
    projection: Res<ViewProjection>,
    mut notice: ResMut<OverlayNotice>,
    mut camera: ResMut<MapCamera>,
    windows: Query<&Window>,
    existing: Query<Entity, With<BandOverlay>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    if !selected.is_changed() {
        return;
    }
    let Some(info) = &selected.0 else {
        return;
    };

    match plan_selection(&info.name, &sources.0, &store, &projection.0) {
        SelectionPlan::DataPending => {
            warn!(
                "Crossing '{}' clicked before reachability data finished loading",
                info.name
            );
            *notice = OverlayNotice::DataPending;
        }
        SelectionPlan::Ready { bands, fit } => {
            for entity in &existing {
                commands.entity(entity).despawn_recursive();
            }

            for plan in bands {
                let band = &sources.0.bands[plan.band_index];
                let material = materials.add(style_color(band.color, band.opacity));
                let half_width = band.width * 0.5;
                commands
                    .spawn((
                        BandOverlay {
                            band_index: plan.band_index,
                        },
                        Transform::from_xyz(0.0, 0.0, band_z(plan.band_index)),
                        Visibility::default(),
                    ))
                    .with_children(|parent| {
                        for path in &plan.paths {
                            if let Some(mesh) = polyline_ribbon(path, half_width) {
                                parent.spawn((
                                    Mesh2d(meshes.add(mesh)),
                                    MeshMaterial2d(material.clone()),
                                ));
                            }
                        }
                    });
            }

            if let Some(rect) = fit {
                if let Ok(window) = windows.get_single() {
                    let (center, scale) =
                        fit_bounds(rect, Vec2::new(window.width(), window.height()));
                    camera.center = center;
                    camera.scale = scale;
                }
                *notice = OverlayNotice::Drawn;
            } else {
                // All bands empty: viewport stays where it is.
                *notice = OverlayNotice::NoReachableLines;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geodata::crossing::CrossingCategory;
    use geodata::FeatureCollection;

    fn projection() -> MapProjection {
        MapProjection::centered_on(LonLat::new(-73.6, 45.52))
    }

    fn band_collection(entries: &[(&str, [[f64; 2]; 2])]) -> FeatureCollection {
        let features: Vec<String> = entries
            .iter()
            .map(|(name, line)| {
                format!(
                    r#"{{
                        "geometry": {{ "type": "LineString", "coordinates": [[{}, {}], [{}, {}]] }},
                        "properties": {{ "crossing_name": "{}" }}
                    }}"#,
                    line[0][0], line[0][1], line[1][0], line[1][1], name
                )
            })
            .collect();
        let json = format!(
            r#"{{ "type": "FeatureCollection", "features": [{}] }}"#,
            features.join(",")
        );
        FeatureCollection::from_json(&json).unwrap()
    }

    fn loaded_store(sources: &DataSources) -> GeoDataStore {
        let mut store = GeoDataStore::for_sources(sources);
        // Far band (index 0): lines for A and B; near band (index 1): A only.
        store.set_band(
            0,
            band_collection(&[
                ("A", [[-73.61, 45.51], [-73.60, 45.52]]),
                ("B", [[-73.59, 45.53], [-73.58, 45.54]]),
            ]),
        );
        store.set_band(1, band_collection(&[("A", [[-73.605, 45.515], [-73.602, 45.518]])]));
        store
    }

    fn info(name: &str) -> CrossingInfo {
        CrossingInfo {
            name: name.to_string(),
            description: "x".to_string(),
            category: CrossingCategory::FormalCrossing,
        }
    }

    #[test]
    fn pending_when_any_band_is_unloaded() {
        let sources = DataSources::default();
        let mut store = GeoDataStore::for_sources(&sources);
        store.set_band(0, band_collection(&[("A", [[-73.61, 45.51], [-73.60, 45.52]])]));
        let plan = plan_selection("A", &sources, &store, &projection());
        assert_eq!(plan, SelectionPlan::DataPending);
    }

    #[test]
    fn ready_plan_is_widest_first_with_fit_from_widest() {
        let sources = DataSources::default();
        let store = loaded_store(&sources);
        let proj = projection();
        let SelectionPlan::Ready { bands, fit } = plan_selection("A", &sources, &store, &proj)
        else {
            panic!("expected ready plan");
        };
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].band_index, 0);
        assert_eq!(bands[1].band_index, 1);
        // The narrow band draws above the wide one.
        assert!(band_z(bands[1].band_index) > band_z(bands[0].band_index));

        // Fit covers the far-band line for A, not the near-band one.
        let rect = fit.expect("widest band is non-empty");
        let far_start = proj.to_world(LonLat::new(-73.61, 45.51));
        assert!((rect.min.x - far_start[0]).abs() < 1e-3);
    }

    #[test]
    fn empty_match_is_ready_with_no_fit() {
        let sources = DataSources::default();
        let store = loaded_store(&sources);
        let plan = plan_selection("Parc Ave & Sherbrooke", &sources, &store, &projection());
        assert_eq!(
            plan,
            SelectionPlan::Ready {
                bands: Vec::new(),
                fit: None
            }
        );
    }

    #[test]
    fn match_in_one_band_only() {
        let sources = DataSources::default();
        let store = loaded_store(&sources);
        let SelectionPlan::Ready { bands, fit } =
            plan_selection("B", &sources, &store, &projection())
        else {
            panic!("expected ready plan");
        };
        assert_eq!(bands.len(), 1);
        assert_eq!(bands[0].band_index, 0);
        assert!(fit.is_some());
    }

    fn test_app(store: GeoDataStore, sources: DataSources) -> App {
        let mut app = App::new();
        app.insert_resource(Assets::<Mesh>::default());
        app.insert_resource(Assets::<ColorMaterial>::default());
        app.insert_resource(SourceConfig(sources));
        app.insert_resource(store);
        app.insert_resource(ViewProjection(projection()));
        app.init_resource::<MapCamera>();
        app.init_resource::<OverlayNotice>();
        app.init_resource::<SelectedCrossing>();
        app.add_systems(Update, apply_selection);
        app
    }

    fn overlay_band_indices(app: &mut App) -> Vec<usize> {
        let mut indices: Vec<usize> = app
            .world_mut()
            .query::<&BandOverlay>()
            .iter(app.world())
            .map(|overlay| overlay.band_index)
            .collect();
        indices.sort_unstable();
        indices
    }

    #[test]
    fn clicking_b_after_a_leaves_only_bs_overlays() {
        let sources = DataSources::default();
        let mut app = test_app(loaded_store(&sources), sources);

        app.world_mut().resource_mut::<SelectedCrossing>().0 = Some(info("A"));
        app.update();
        assert_eq!(overlay_band_indices(&mut app), vec![0, 1]);
        assert_eq!(
            *app.world().resource::<OverlayNotice>(),
            OverlayNotice::Drawn
        );

        app.world_mut().resource_mut::<SelectedCrossing>().0 = Some(info("B"));
        app.update();
        // A's overlays are gone; only B's far-band overlay remains.
        assert_eq!(overlay_band_indices(&mut app), vec![0]);
    }

    #[test]
    fn click_before_load_draws_nothing_and_does_not_panic() {
        let sources = DataSources::default();
        let store = GeoDataStore::for_sources(&sources);
        let mut app = test_app(store, sources);

        app.world_mut().resource_mut::<SelectedCrossing>().0 = Some(info("A"));
        app.update();
        assert!(overlay_band_indices(&mut app).is_empty());
        assert_eq!(
            *app.world().resource::<OverlayNotice>(),
            OverlayNotice::DataPending
        );
    }

    #[test]
    fn empty_result_sets_notice_and_leaves_camera_alone() {
        let sources = DataSources::default();
        let mut app = test_app(loaded_store(&sources), sources);
        let before = *app.world().resource::<MapCamera>();

        app.world_mut().resource_mut::<SelectedCrossing>().0 =
            Some(info("Parc Ave & Sherbrooke"));
        app.update();
        assert!(overlay_band_indices(&mut app).is_empty());
        assert_eq!(
            *app.world().resource::<OverlayNotice>(),
            OverlayNotice::NoReachableLines
        );
        assert_eq!(*app.world().resource::<MapCamera>(), before);
    }

    #[test]
    fn reselecting_after_data_arrives_draws_the_overlay() {
        let sources = DataSources::default();
        let mut app = test_app(GeoDataStore::for_sources(&sources), sources.clone());

        app.world_mut().resource_mut::<SelectedCrossing>().0 = Some(info("A"));
        app.update();
        assert!(overlay_band_indices(&mut app).is_empty());

        app.insert_resource(loaded_store(&sources));
        app.world_mut().resource_mut::<SelectedCrossing>().0 = Some(info("A"));
        app.update();
        assert_eq!(overlay_band_indices(&mut app), vec![0, 1]);
    }
}
