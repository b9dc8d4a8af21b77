//! Panel UI: side panel with Info / Legend / About tabs.

pub mod info_panel;
pub mod legend;
pub mod tabs;
pub mod theme;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub use tabs::PanelTab;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<PanelTab>()
            .add_systems(Startup, theme::apply_map_theme)
            .add_systems(Update, info_panel::side_panel);
    }
}
