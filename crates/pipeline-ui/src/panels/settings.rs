//! Settings form for the selected node, generated from the catalog's
//! field descriptors.

use egui::{Color32, RichText};
use pipeline_types::{Catalog, ConfigField, FieldKind, PipelineStore};
use serde_json::Value;
use uuid::Uuid;

use crate::toasts::ToastStack;

pub fn show(ui: &mut egui::Ui, store: &mut PipelineStore, node_id: Uuid, toasts: &mut ToastStack) {
    let Some(node) = store.pipeline().node(node_id) else {
        return;
    };
    let component = node.component;
    let data = node.data.clone();
    let provider_id = node.provider_id().map(str::to_string);

    let catalog = Catalog::get();
    let Some(category) = catalog.category(component) else {
        return;
    };

    ui.heading(format!("{} {}", category.icon, category.label));
    ui.label(
        RichText::new(&category.description)
            .size(11.0)
            .color(Color32::from_rgb(148, 155, 168)),
    );
    ui.add_space(8.0);

    let provider = provider_id
        .as_deref()
        .and_then(|id| catalog.provider(component, id));
    if provider.is_none() {
        ui.colored_label(
            Color32::from_rgb(248, 113, 113),
            format!(
                "Unknown {} \"{}\". Pick one below to repair this component.",
                component.discriminator(),
                provider_id.as_deref().unwrap_or("<unset>")
            ),
        );
        ui.add_space(6.0);
    }

    // Provider selector. Switching reseeds the data bag with the new
    // provider's defaults.
    let selected_label = provider.map(|p| p.name.as_str()).unwrap_or("Select…");
    let mut switch_to: Option<String> = None;
    egui::ComboBox::from_label(provider_label(component))
        .selected_text(selected_label)
        .show_ui(ui, |ui| {
            for candidate in &category.providers {
                let checked = provider_id.as_deref() == Some(candidate.id.as_str());
                if ui.selectable_label(checked, &candidate.name).clicked() && !checked {
                    switch_to = Some(candidate.id.clone());
                }
            }
        });
    if let Some(id) = switch_to {
        match store.set_provider(node_id, &id) {
            Ok(()) => toasts.info(format!("Switched to {id}")),
            Err(err) => toasts.error(err.to_string()),
        }
        return; // Re-render next frame with the reseeded fields.
    }

    let Some(provider) = provider else {
        show_delete(ui, store, node_id, toasts);
        return;
    };

    ui.label(
        RichText::new(&provider.description)
            .size(11.0)
            .color(Color32::from_rgb(148, 155, 168)),
    );
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(6.0);

    // Collect edits, then write them back after the form is painted.
    let mut updates: Vec<(String, Value)> = Vec::new();
    for field in &provider.config_fields {
        field_widget(ui, field, data.get(&field.id), &mut updates);
        ui.add_space(6.0);
    }
    for (key, value) in updates {
        store.set_field(node_id, &key, value);
    }

    ui.add_space(10.0);
    ui.separator();
    ui.add_space(6.0);
    show_delete(ui, store, node_id, toasts);
}

fn provider_label(component: pipeline_types::ComponentType) -> &'static str {
    match component.discriminator() {
        "provider" => "Provider",
        _ => "Option",
    }
}

fn show_delete(ui: &mut egui::Ui, store: &mut PipelineStore, node_id: Uuid, toasts: &mut ToastStack) {
    let delete = egui::Button::new(RichText::new("Delete component").color(Color32::WHITE))
        .fill(Color32::from_rgb(185, 28, 28));
    if ui.add(delete).clicked() {
        store.remove_node(node_id);
        toasts.info("Component removed");
    }
}

fn field_widget(
    ui: &mut egui::Ui,
    field: &ConfigField,
    current: Option<&Value>,
    updates: &mut Vec<(String, Value)>,
) {
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    };
    let heading = ui.label(RichText::new(label).size(12.0));
    if let Some(tooltip) = &field.tooltip {
        heading.on_hover_text(tooltip);
    }

    match field.kind {
        FieldKind::Text => {
            let mut text = current.and_then(Value::as_str).unwrap_or("").to_string();
            let mut edit = egui::TextEdit::singleline(&mut text).desired_width(f32::INFINITY);
            if let Some(placeholder) = &field.placeholder {
                edit = edit.hint_text(placeholder);
            }
            if ui.add(edit).changed() {
                updates.push((field.id.clone(), Value::from(text)));
            }
        }
        FieldKind::Select => {
            let selected = current.and_then(Value::as_str).unwrap_or("").to_string();
            egui::ComboBox::from_id_salt(&field.id)
                .selected_text(if selected.is_empty() {
                    "Select…"
                } else {
                    selected.as_str()
                })
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    for option in &field.options {
                        if ui.selectable_label(*option == selected, option).clicked()
                            && *option != selected
                        {
                            updates.push((field.id.clone(), Value::from(option.clone())));
                        }
                    }
                });
        }
        FieldKind::Number => {
            let mut value = current.and_then(Value::as_f64).unwrap_or(0.0);
            let mut drag = egui::DragValue::new(&mut value);
            if let (Some(min), Some(max)) = (field.min, field.max) {
                drag = drag.range(min..=max);
            }
            if let Some(step) = field.step {
                drag = drag.speed(step);
            }
            if ui.add(drag).changed() {
                updates.push((field.id.clone(), number_value(value)));
            }
        }
        FieldKind::Boolean => {
            let mut checked = current.and_then(Value::as_bool).unwrap_or(false);
            if ui.checkbox(&mut checked, "").changed() {
                updates.push((field.id.clone(), Value::from(checked)));
            }
        }
        FieldKind::Slider => {
            let min = field.min.unwrap_or(0.0);
            let max = field.max.unwrap_or(1.0);
            let mut value = current.and_then(Value::as_f64).unwrap_or(min);
            let mut slider = egui::Slider::new(&mut value, min..=max);
            if let Some(step) = field.step {
                slider = slider.step_by(step);
            }
            if let Some(unit) = &field.unit {
                slider = slider.suffix(format!(" {unit}"));
            }
            if ui.add(slider).changed() {
                updates.push((field.id.clone(), number_value(value)));
            }
        }
    }
}

/// Store whole numbers as JSON integers so documents stay stable across
/// edit sessions.
fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}
