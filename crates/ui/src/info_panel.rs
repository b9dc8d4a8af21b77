//! Left side panel: tab strip plus the per-tab body.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use geodata::crossing::CrossingInfo;
use rendering::{OverlayNotice, SelectedCrossing, SourceConfig};

use crate::legend::legend_body;
use crate::tabs::PanelTab;

pub const PANEL_WIDTH: f32 = 300.0;

/// Reachability line under the crossing details, one per notice state.
pub fn notice_text(notice: OverlayNotice) -> Option<&'static str> {
    match notice {
        OverlayNotice::Idle | OverlayNotice::Drawn => None,
        OverlayNotice::DataPending => Some("Reachability data is still loading, try again shortly."),
        OverlayNotice::NoReachableLines => Some("No reachable lines found for this crossing."),
    }
}

pub fn side_panel(
    mut contexts: EguiContexts,
    mut tab: ResMut<PanelTab>,
    selected: Res<SelectedCrossing>,
    notice: Res<OverlayNotice>,
    sources: Res<SourceConfig>,
) {
    let ctx = contexts.ctx_mut();

    egui::SidePanel::left("side_panel")
        .exact_width(PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                for candidate in PanelTab::ALL {
                    if ui
                        .selectable_label(*tab == candidate, candidate.label())
                        .clicked()
                    {
                        *tab = candidate;
                    }
                }
            });
            ui.separator();

            match *tab {
                PanelTab::Info => info_body(ui, &selected.0, *notice),
                PanelTab::Legend => legend_body(ui),
                PanelTab::About => about_body(ui, &sources),
            }
        });
}

fn info_body(ui: &mut egui::Ui, selected: &Option<CrossingInfo>, notice: OverlayNotice) {
    let Some(info) = selected else {
        ui.label("Click a crossing marker on the map to inspect it.");
        return;
    };

    ui.heading(&info.name);
    ui.add_space(4.0);
    ui.label(egui::RichText::new(info.category.label()).italics());
    ui.add_space(8.0);
    ui.label(&info.description);

    if let Some(text) = notice_text(notice) {
        ui.add_space(12.0);
        ui.label(egui::RichText::new(text).color(egui::Color32::from_rgb(230, 170, 80)));
    }
}

fn about_body(ui: &mut egui::Ui, sources: &SourceConfig) {
    ui.heading("Pedestrian crossing walksheds");
    ui.add_space(8.0);
    ui.label(
        "Click a crossing marker to see the street segments reachable from it \
         on foot, per distance band:",
    );
    ui.add_space(6.0);
    for band in &sources.0.bands {
        let [r, g, b] = band.color;
        ui.horizontal(|ui| {
            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
            ui.painter().rect_filled(
                rect,
                egui::CornerRadius::same(3),
                egui::Color32::from_rgb(r, g, b),
            );
            ui.label(&band.label);
        });
    }
    ui.add_space(8.0);
    ui.label("Drag or use WASD to pan, scroll to zoom.");
}
