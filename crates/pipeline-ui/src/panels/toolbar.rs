//! Top toolbar: document name, stats, and the document actions.

use egui::{Color32, RichText};
use pipeline_types::PipelineStore;

use crate::io;
use crate::toasts::ToastStack;

pub fn show(ui: &mut egui::Ui, store: &mut PipelineStore, toasts: &mut ToastStack) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("AI Pipeline Builder").strong().size(15.0));
        ui.separator();

        let mut name = store.name().to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut name)
                .desired_width(220.0)
                .font(egui::TextStyle::Heading),
        );
        if response.changed() {
            store.rename(&name);
        }

        ui.separator();

        if ui.button("💾 Save").clicked() {
            match io::save_local(&store.to_document()) {
                Ok(()) => toasts.success("Pipeline saved"),
                Err(err) => toasts.error(format!("Save failed: {err}")),
            }
        }
        if ui.button("⬇ Export").clicked() {
            match io::export_dialog(&store.to_document()) {
                Ok(Some(path)) => toasts.success(format!("Exported to {}", path.display())),
                Ok(None) => {}
                Err(err) => toasts.error(format!("Export failed: {err}")),
            }
        }
        if ui.button("⬆ Import").clicked() {
            match io::import_dialog() {
                Ok(Some(pipeline)) => {
                    let name = pipeline.name.clone();
                    store.replace(pipeline);
                    toasts.success(format!("Imported \"{name}\""));
                }
                Ok(None) => {}
                Err(err) => toasts.error(format!("Import failed: {err}")),
            }
        }
        if ui.button("▶ Run").clicked() {
            if store.nodes().is_empty() {
                toasts.warning("Nothing to run: the canvas is empty");
            } else {
                toasts.info(format!(
                    "Run requested: {} components, {} connections. Execution is not wired up.",
                    store.nodes().len(),
                    store.connections().len()
                ));
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let updated = store.pipeline().updated.format("%H:%M:%S");
            ui.label(
                RichText::new(format!(
                    "{} components · updated {}",
                    store.nodes().len(),
                    updated
                ))
                .size(11.0)
                .color(Color32::from_rgb(148, 155, 168)),
            );
        });
    });
}
