//! Component palette: one button per catalog category.

use egui::{Color32, RichText};
use pipeline_types::{Catalog, ComponentType};

/// Render the palette. Returns the component type the user asked to add,
/// if any card was clicked this frame.
pub fn show(ui: &mut egui::Ui) -> Option<ComponentType> {
    let mut picked = None;

    ui.heading("Components");
    ui.add_space(4.0);
    ui.label(
        RichText::new("Click to add to the canvas")
            .size(11.0)
            .color(Color32::from_rgb(148, 155, 168)),
    );
    ui.add_space(8.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        for category in Catalog::get().categories() {
            let accent = pipeline_graph::colors::component_accent(category.component);
            let response = ui.add(
                egui::Button::new(
                    RichText::new(format!("{}  {}", category.icon, category.label)).size(13.0),
                )
                .fill(Color32::from_rgb(40, 44, 54))
                .stroke(egui::Stroke::new(1.0, accent))
                .min_size(egui::Vec2::new(ui.available_width(), 34.0)),
            );
            if response.clicked() {
                picked = Some(category.component);
            }
            response.on_hover_text(&category.description);
            ui.add_space(6.0);
        }
    });

    picked
}
