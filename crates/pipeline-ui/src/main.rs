//! Desktop entry point for the pipeline editor.

use tracing_subscriber::EnvFilter;

mod app;
mod io;
mod panels;
mod toasts;

use app::PipelineApp;

fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("AI Pipeline Builder"),
        ..Default::default()
    };

    eframe::run_native(
        "ai-pipeline",
        options,
        Box::new(|cc| Ok(Box::new(PipelineApp::new(cc)))),
    )
}
