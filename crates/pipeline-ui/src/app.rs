//! Application shell: owns the store, routes canvas events, lays out the
//! toolbar, palette, settings, and canvas panels.

use eframe::CreationContext;
use pipeline_graph::{CanvasEvent, PipelineCanvas};
use pipeline_types::{PipelineError, PipelineStore, Position, Selection};
use tracing::warn;

use crate::io;
use crate::panels;
use crate::toasts::ToastStack;

pub struct PipelineApp {
    store: PipelineStore,
    canvas: PipelineCanvas,
    toasts: ToastStack,
    /// Counter used to stagger palette drops so stacked cards stay visible.
    drop_count: usize,
}

impl PipelineApp {
    pub fn new(_cc: &CreationContext<'_>) -> Self {
        let store = match io::load_local() {
            Some(pipeline) => PipelineStore::from_pipeline(pipeline),
            None => Self::seed_store(),
        };
        Self {
            store,
            canvas: PipelineCanvas::new(),
            toasts: ToastStack::default(),
            drop_count: 0,
        }
    }

    /// A fresh document starts with one LLM card so the canvas is never
    /// an empty void on first launch.
    fn seed_store() -> PipelineStore {
        let mut store = PipelineStore::new();
        store.add_node(pipeline_types::ComponentType::Llm, Position::new(300.0, 200.0));
        store.clear_selection();
        store
    }

    fn handle_canvas_events(&mut self, events: Vec<CanvasEvent>) {
        for event in events {
            match event {
                CanvasEvent::NodeSelected(id) => self.store.select_node(id),
                CanvasEvent::ConnectionSelected(id) => self.store.select_connection(id),
                CanvasEvent::SelectionCleared => self.store.clear_selection(),
                CanvasEvent::NodeMoved { id, position } => self.store.move_node(id, position),
                CanvasEvent::ConnectRequested(request) => match self.store.connect(request) {
                    Ok(_) => {}
                    Err(err @ PipelineError::DuplicateConnection)
                    | Err(err @ PipelineError::SelfLoop) => {
                        self.toasts.warning(err.to_string());
                    }
                    Err(err) => {
                        warn!(%err, "connect request rejected");
                        self.toasts.error(err.to_string());
                    }
                },
                CanvasEvent::ConnectionDeleted(id) => self.store.disconnect(id),
                CanvasEvent::NodeDeleted(id) => {
                    self.store.remove_node(id);
                    self.toasts.info("Component removed");
                }
            }
        }
    }

    /// World position for the next palette drop, staggered diagonally
    /// from the camera center so repeated adds do not pile up exactly.
    fn next_drop_position(&mut self) -> Position {
        let center = self.canvas.camera().center();
        let stagger = (self.drop_count % 5) as f32 * 30.0;
        self.drop_count += 1;
        Position::new(
            center.x - 100.0 + stagger,
            center.y - 40.0 + stagger,
        )
    }
}

impl eframe::App for PipelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            panels::toolbar::show(ui, &mut self.store, &mut self.toasts);
            ui.add_space(4.0);
        });

        egui::SidePanel::left("palette")
            .resizable(false)
            .default_width(210.0)
            .show(ctx, |ui| {
                if let Some(component) = panels::palette::show(ui) {
                    let position = self.next_drop_position();
                    self.store.add_node(component, position);
                }
            });

        if let Selection::Node(node_id) = self.store.selection() {
            egui::SidePanel::right("settings")
                .default_width(280.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        panels::settings::show(ui, &mut self.store, node_id, &mut self.toasts);
                    });
                });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let selection = self.store.selection();
                let events = self.canvas.ui(ui, self.store.pipeline(), selection);
                self.handle_canvas_events(events);
            });

        self.toasts.show(ctx);
    }

    /// Periodic autosave alongside eframe's own window state.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        if let Err(err) = io::save_local(&self.store.to_document()) {
            warn!(%err, "autosave failed");
        }
    }
}
