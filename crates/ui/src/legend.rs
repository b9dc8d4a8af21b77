//! Legend tab: marker swatches per crossing category.

use bevy_egui::egui;

use geodata::crossing::{marker_style, LEGEND_CATEGORIES};

pub fn legend_body(ui: &mut egui::Ui) {
    ui.heading("Crossing categories");
    ui.add_space(8.0);
    for category in LEGEND_CATEGORIES {
        let style = marker_style(category);
        let [r, g, b] = style.fill_color;
        let [sr, sg, sb] = style.stroke_color;
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::hover());
            let center = rect.center();
            ui.painter().circle(
                center,
                6.0,
                egui::Color32::from_rgb(r, g, b),
                egui::Stroke::new(style.stroke_weight, egui::Color32::from_rgb(sr, sg, sb)),
            );
            ui.label(category.label());
        });
    }
}
