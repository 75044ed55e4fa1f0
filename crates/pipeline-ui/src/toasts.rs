//! Toast notifications, stacked top-right and auto-dismissed.

use chrono::{DateTime, Duration, Utc};
use egui::{Align2, Color32, RichText, Vec2};

const AUTO_DISMISS_MS: i64 = 3000;

#[derive(Clone, Debug, PartialEq)]
pub enum ToastSeverity {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastSeverity {
    fn accent(&self) -> Color32 {
        match self {
            ToastSeverity::Info => Color32::from_rgb(96, 165, 250),
            ToastSeverity::Success => Color32::from_rgb(74, 222, 128),
            ToastSeverity::Warning => Color32::from_rgb(250, 204, 21),
            ToastSeverity::Error => Color32::from_rgb(248, 113, 113),
        }
    }
}

#[derive(Clone, Debug)]
struct Toast {
    id: String,
    message: String,
    severity: ToastSeverity,
    created: DateTime<Utc>,
}

/// Active toasts, oldest first.
#[derive(Default)]
pub struct ToastStack {
    toasts: Vec<Toast>,
}

impl ToastStack {
    pub fn push(&mut self, message: impl Into<String>, severity: ToastSeverity) {
        let message = message.into();
        let id = format!("toast-{}-{}", Utc::now().timestamp_millis(), self.toasts.len());
        self.toasts.push(Toast {
            id,
            message,
            severity,
            created: Utc::now(),
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(message, ToastSeverity::Info);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(message, ToastSeverity::Success);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(message, ToastSeverity::Warning);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(message, ToastSeverity::Error);
    }

    /// Drop expired toasts, then paint the rest in the top-right corner.
    pub fn show(&mut self, ctx: &egui::Context) {
        let cutoff = Utc::now() - Duration::milliseconds(AUTO_DISMISS_MS);
        self.toasts.retain(|t| t.created > cutoff);
        if self.toasts.is_empty() {
            return;
        }
        // Keep repainting while a toast is counting down.
        ctx.request_repaint_after(std::time::Duration::from_millis(250));

        let mut offset_y = 16.0;
        let mut dismissed: Option<String> = None;
        for toast in &self.toasts {
            egui::Area::new(egui::Id::new(&toast.id))
                .anchor(Align2::RIGHT_TOP, Vec2::new(-16.0, offset_y))
                .order(egui::Order::Foreground)
                .show(ctx, |ui| {
                    egui::Frame::popup(ui.style())
                        .fill(Color32::from_rgb(32, 35, 43))
                        .stroke(egui::Stroke::new(1.0, toast.severity.accent()))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(
                                    RichText::new(&toast.message)
                                        .color(Color32::from_rgb(229, 231, 235)),
                                );
                                if ui.small_button("×").clicked() {
                                    dismissed = Some(toast.id.clone());
                                }
                            });
                        });
                });
            offset_y += 44.0;
        }
        if let Some(id) = dismissed {
            self.toasts.retain(|t| t.id != id);
        }
    }
}
