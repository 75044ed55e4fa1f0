//! The canvas widget: input handling, painting, and event collection.

use egui::{Color32, Pos2, Rect, Sense, Vec2};
use pipeline_types::{Pipeline, Selection};
use tracing::debug;

use crate::camera::{Camera, ZOOM_STEP};
use crate::geometry;
use crate::interaction::{self, CanvasEvent, Interaction};
use crate::render::CanvasPainter;

/// Interactive node-graph canvas. Owns only view state; the pipeline is
/// borrowed each frame and mutations travel back as [`CanvasEvent`]s.
pub struct PipelineCanvas {
    camera: Camera,
    interaction: Interaction,
}

impl Default for PipelineCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineCanvas {
    pub fn new() -> Self {
        Self {
            camera: Camera::new(),
            interaction: Interaction::Idle,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn reset_view(&mut self) {
        self.camera.reset();
    }

    /// Screen-to-world for a point inside the last-painted rect. The app
    /// uses this to drop palette nodes near the view center.
    pub fn view_center_world(&self, screen_rect: Rect) -> Pos2 {
        self.camera.screen_to_world(screen_rect.center(), screen_rect)
    }

    /// Run one frame of the canvas. Returns the events this frame's
    /// gestures produced, in order.
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        pipeline: &Pipeline,
        selection: Selection,
    ) -> Vec<CanvasEvent> {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let screen_rect = response.rect;
        let mut events = Vec::new();

        self.handle_gestures(&response, pipeline, screen_rect, &mut events);
        self.handle_clicks(&response, pipeline, screen_rect, &mut events);
        self.handle_scroll(&response, screen_rect);
        self.handle_keys(&response, selection, &mut events);

        ui.ctx().set_cursor_icon(self.cursor_icon());

        let canvas = CanvasPainter {
            painter: &painter,
            camera: &self.camera,
            screen_rect,
        };
        canvas.paint_grid();
        canvas.paint_connections(pipeline, selection);

        let connecting = match &self.interaction {
            Interaction::Connecting { origin } => Some(origin.clone()),
            _ => None,
        };
        canvas.paint_nodes(pipeline, selection, connecting.as_ref());

        if let (Some(origin), Some(pointer)) = (&connecting, response.hover_pos()) {
            if let Some(node) = pipeline.node(origin.node) {
                let anchor = geometry::anchor_for_handle(
                    node,
                    origin.direction,
                    Some(origin.port_id.as_str()),
                );
                canvas.paint_preview(anchor, pointer, origin);
            }
        }

        self.render_chrome(&painter, pipeline, screen_rect);

        events
    }

    // =========================================================================
    // INPUT
    // =========================================================================

    fn handle_gestures(
        &mut self,
        response: &egui::Response,
        pipeline: &Pipeline,
        screen_rect: Rect,
        events: &mut Vec<CanvasEvent>,
    ) {
        if response.drag_started() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let world = self.camera.screen_to_world(pointer, screen_rect);
                self.interaction = self.gesture_for(pipeline, world);
                if let Interaction::DraggingNode { id, .. } = self.interaction {
                    events.push(CanvasEvent::NodeSelected(id));
                }
            }
        }

        if response.dragged() {
            match &self.interaction {
                Interaction::DraggingNode { id, grab_offset } => {
                    if let Some(pointer) = response.interact_pointer_pos() {
                        let world = self.camera.screen_to_world(pointer, screen_rect);
                        events.push(CanvasEvent::NodeMoved {
                            id: *id,
                            position: interaction::dragged_position(world, *grab_offset),
                        });
                    }
                }
                Interaction::Panning => {
                    self.camera.pan(response.drag_delta());
                }
                // The preview is painted from the hover position.
                Interaction::Connecting { .. } | Interaction::Idle => {}
            }
        }

        if response.drag_stopped() {
            if let Interaction::Connecting { origin } = std::mem::take(&mut self.interaction) {
                let ended_on = response
                    .interact_pointer_pos()
                    .map(|p| self.camera.screen_to_world(p, screen_rect))
                    .and_then(|world| {
                        let node = geometry::node_at(&pipeline.nodes, world)
                            .or_else(|| nearest_port_owner(pipeline, world))?;
                        let (direction, port) = geometry::port_at(node, world)?;
                        Some(interaction::port_ref(node, direction, &port))
                    });

                match ended_on {
                    Some(target) => {
                        if let Some(request) = interaction::connection_from_gesture(&origin, &target)
                        {
                            events.push(CanvasEvent::ConnectRequested(request));
                        } else {
                            debug!("connect gesture ended on an incompatible port");
                        }
                    }
                    None => debug!("connect gesture released over empty canvas"),
                }
            }
            self.interaction = Interaction::Idle;
        }
    }

    /// Classify a fresh drag: a port wins over its card, a card over the
    /// background.
    fn gesture_for(&self, pipeline: &Pipeline, world: Pos2) -> Interaction {
        // Ports overhang the card edge, so check every card's ports first.
        for node in pipeline.nodes.iter().rev() {
            if let Some((direction, port)) = geometry::port_at(node, world) {
                return Interaction::Connecting {
                    origin: interaction::port_ref(node, direction, &port),
                };
            }
        }
        if let Some(node) = geometry::node_at(&pipeline.nodes, world) {
            let origin = geometry::node_rect(node).min;
            return Interaction::DraggingNode {
                id: node.id,
                grab_offset: world - origin,
            };
        }
        Interaction::Panning
    }

    fn handle_clicks(
        &mut self,
        response: &egui::Response,
        pipeline: &Pipeline,
        screen_rect: Rect,
        events: &mut Vec<CanvasEvent>,
    ) {
        // egui suppresses clicked() after a drag, so selection never
        // fires at the end of a move or pan.
        if !response.clicked() && !response.double_clicked() {
            return;
        }
        let Some(pointer) = response.interact_pointer_pos() else {
            return;
        };
        let world = self.camera.screen_to_world(pointer, screen_rect);

        if let Some(node) = geometry::node_at(&pipeline.nodes, world) {
            events.push(CanvasEvent::NodeSelected(node.id));
            return;
        }

        match crate::render::connection_at(pipeline, world) {
            Some(connection) if response.double_clicked() => {
                events.push(CanvasEvent::ConnectionDeleted(connection));
            }
            Some(connection) => events.push(CanvasEvent::ConnectionSelected(connection)),
            None => events.push(CanvasEvent::SelectionCleared),
        }
    }

    fn handle_scroll(&mut self, response: &egui::Response, screen_rect: Rect) {
        if !response.hovered() {
            return;
        }
        let scroll = response.ctx.input(|i| i.raw_scroll_delta);
        if scroll.y == 0.0 {
            return;
        }
        if let Some(pointer) = response.hover_pos() {
            let factor = if scroll.y > 0.0 { ZOOM_STEP } else { 0.9 };
            self.camera.zoom_at(factor, pointer, screen_rect);
        }
    }

    fn handle_keys(
        &mut self,
        response: &egui::Response,
        selection: Selection,
        events: &mut Vec<CanvasEvent>,
    ) {
        if !response.hovered() {
            return;
        }
        let delete_pressed = response
            .ctx
            .input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace));
        if delete_pressed {
            match selection {
                Selection::Node(id) => events.push(CanvasEvent::NodeDeleted(id)),
                Selection::Connection(id) => events.push(CanvasEvent::ConnectionDeleted(id)),
                Selection::None => {}
            }
        }
        if response.ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            if matches!(self.interaction, Interaction::Connecting { .. }) {
                self.interaction = Interaction::Idle;
            } else {
                events.push(CanvasEvent::SelectionCleared);
            }
        }
    }

    fn cursor_icon(&self) -> egui::CursorIcon {
        match self.interaction {
            Interaction::Panning => egui::CursorIcon::Grabbing,
            Interaction::DraggingNode { .. } => egui::CursorIcon::Move,
            Interaction::Connecting { .. } => egui::CursorIcon::Crosshair,
            Interaction::Idle => egui::CursorIcon::Default,
        }
    }

    // =========================================================================
    // CHROME
    // =========================================================================

    fn render_chrome(&self, painter: &egui::Painter, pipeline: &Pipeline, screen_rect: Rect) {
        let stats = format!(
            "{} components | {} connections",
            pipeline.nodes.len(),
            pipeline.connections.len()
        );
        painter.text(
            screen_rect.left_top() + Vec2::new(10.0, 20.0),
            egui::Align2::LEFT_TOP,
            stats,
            egui::FontId::proportional(12.0),
            Color32::from_rgb(150, 150, 150),
        );

        let zoom_text = format!("Zoom: {:.0}%", self.camera.zoom() * 100.0);
        painter.text(
            screen_rect.left_bottom() + Vec2::new(10.0, -30.0),
            egui::Align2::LEFT_BOTTOM,
            zoom_text,
            egui::FontId::proportional(11.0),
            Color32::from_rgb(120, 120, 120),
        );

        let hints = "Drag card: Move | Drag port: Connect | Drag canvas: Pan | Scroll: Zoom | Del: Remove";
        painter.text(
            screen_rect.left_bottom() + Vec2::new(10.0, -10.0),
            egui::Align2::LEFT_BOTTOM,
            hints,
            egui::FontId::proportional(10.0),
            Color32::from_rgb(100, 100, 100),
        );
    }
}

/// A port anchor can sit just outside every card rect, so a release near
/// a card still needs a port check on the nearest candidates.
fn nearest_port_owner(pipeline: &Pipeline, world: Pos2) -> Option<&pipeline_types::Node> {
    pipeline.nodes.iter().rev().find(|node| {
        let expanded = geometry::node_rect(node).expand(geometry::PORT_HIT_RADIUS);
        expanded.contains(world)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline_types::{ComponentType, Node, PortDirection, Position};

    fn pipeline_with_node(position: Position) -> (Pipeline, uuid::Uuid) {
        let mut pipeline = Pipeline::new("test");
        let node = Node::new(ComponentType::Llm, position, Default::default());
        let id = node.id;
        pipeline.nodes.push(node);
        (pipeline, id)
    }

    #[test]
    fn drag_on_a_card_body_starts_a_node_drag() {
        let canvas = PipelineCanvas::new();
        let (pipeline, id) = pipeline_with_node(Position::new(0.0, 0.0));

        let gesture = canvas.gesture_for(&pipeline, Pos2::new(100.0, 20.0));
        match gesture {
            Interaction::DraggingNode { id: hit, grab_offset } => {
                assert_eq!(hit, id);
                assert_eq!(grab_offset, Vec2::new(100.0, 20.0));
            }
            other => panic!("expected node drag, got {other:?}"),
        }
    }

    #[test]
    fn drag_on_a_port_anchor_starts_a_connection() {
        let canvas = PipelineCanvas::new();
        let (pipeline, id) = pipeline_with_node(Position::new(0.0, 0.0));
        let node = &pipeline.nodes[0];
        let outputs = node.output_ports();
        let anchor = geometry::port_anchor(node, PortDirection::Output, 0, outputs.len());

        let gesture = canvas.gesture_for(&pipeline, anchor);
        match gesture {
            Interaction::Connecting { origin } => {
                assert_eq!(origin.node, id);
                assert_eq!(origin.direction, PortDirection::Output);
                assert_eq!(origin.port_id, outputs[0].id);
            }
            other => panic!("expected connection gesture, got {other:?}"),
        }
    }

    #[test]
    fn drag_on_empty_canvas_pans() {
        let canvas = PipelineCanvas::new();
        let (pipeline, _) = pipeline_with_node(Position::new(0.0, 0.0));
        let gesture = canvas.gesture_for(&pipeline, Pos2::new(-500.0, -500.0));
        assert!(matches!(gesture, Interaction::Panning));
    }
}
