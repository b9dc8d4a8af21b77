use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::{UpdateMode, WinitSettings};

use geodata::MapProjection;
use rendering::{GeoDataStore, MapCamera, SourceConfig, ViewProjection};

mod config;
mod loader;

use config::ViewerConfig;

fn main() {
    let config = ViewerConfig::load_or_default();

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: config.title.clone(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(16)),
        unfocused_mode: UpdateMode::reactive_low_power(std::time::Duration::from_millis(100)),
    })
    .insert_resource(ViewProjection(MapProjection::centered_on(config.center())))
    .insert_resource(MapCamera {
        center: Vec2::ZERO,
        scale: config.initial_scale,
    })
    .insert_resource(config.basemap())
    .insert_resource(GeoDataStore::for_sources(&config.sources))
    .insert_resource(loader::LoadQueue::for_sources(&config.sources))
    .insert_resource(SourceConfig(config.sources))
    .add_plugins((rendering::RenderingPlugin, ui::UiPlugin))
    .add_systems(Startup, loader::begin_data_loads)
    .add_systems(Update, loader::poll_data_loads);

    app.run();
}
