//! Painting the canvas: grid, connections, cards, and the wire preview.

use egui::{Align2, FontId, Pos2, Rect, Stroke};
use pipeline_types::{Catalog, Connection, Node, Pipeline, PortDirection, Selection};
use uuid::Uuid;

use crate::camera::Camera;
use crate::colors;
use crate::edges::{self, EdgeCurve};
use crate::geometry::{self, PORT_RADIUS};
use crate::interaction::PortRef;

/// Per-frame painting context. Pure output; all hit testing happens in
/// world space before anything is painted.
pub struct CanvasPainter<'a> {
    pub painter: &'a egui::Painter,
    pub camera: &'a Camera,
    pub screen_rect: Rect,
}

impl<'a> CanvasPainter<'a> {
    fn to_screen(&self, world: Pos2) -> Pos2 {
        self.camera.world_to_screen(world, self.screen_rect)
    }

    // =========================================================================
    // BACKGROUND
    // =========================================================================

    /// Dot-free line grid, spaced 20 world units.
    pub fn paint_grid(&self) {
        self.painter
            .rect_filled(self.screen_rect, 0.0, colors::CANVAS_BG);

        let zoom = self.camera.zoom();
        let spacing = 20.0 * zoom;
        if spacing < 4.0 {
            return;
        }

        let bounds = self.camera.visible_bounds(self.screen_rect);
        let stroke = Stroke::new(1.0, colors::GRID_LINE);

        let mut x = (bounds.left() / 20.0).floor() * 20.0;
        while x <= bounds.right() {
            let sx = self.to_screen(Pos2::new(x, 0.0)).x;
            self.painter.vline(sx, self.screen_rect.y_range(), stroke);
            x += 20.0;
        }
        let mut y = (bounds.top() / 20.0).floor() * 20.0;
        while y <= bounds.bottom() {
            let sy = self.to_screen(Pos2::new(0.0, y)).y;
            self.painter.hline(self.screen_rect.x_range(), sy, stroke);
            y += 20.0;
        }
    }

    // =========================================================================
    // CONNECTIONS
    // =========================================================================

    pub fn paint_connections(&self, pipeline: &Pipeline, selection: Selection) {
        for connection in &pipeline.connections {
            self.paint_connection(pipeline, connection, selection);
        }
    }

    fn paint_connection(&self, pipeline: &Pipeline, connection: &Connection, selection: Selection) {
        let (Some(source), Some(target)) = (
            pipeline.node(connection.source),
            pipeline.node(connection.target),
        ) else {
            return;
        };

        let from = geometry::anchor_for_handle(
            source,
            PortDirection::Output,
            connection.source_handle.as_deref(),
        );
        let to = geometry::anchor_for_handle(
            target,
            PortDirection::Input,
            connection.target_handle.as_deref(),
        );

        // Route in world units so the control-offset cap matches the hit
        // test, then project for painting.
        let curve = EdgeCurve::between(from, to);
        let points = edge_screen_points(self.camera, self.screen_rect, from, to);
        let zoom = self.camera.zoom();
        let selected = selection == Selection::Connection(connection.id);
        let color = colors::connection_color(connection.kind);
        let width = if selected { 3.0 } else { 2.0 } * zoom;

        if selected {
            edges::paint_polyline(
                self.painter,
                &points,
                Stroke::new(width + 3.0 * zoom, color.gamma_multiply(0.35)),
                false,
            );
        }
        edges::paint_polyline(
            self.painter,
            &points,
            Stroke::new(width, color),
            connection.kind.dashed(),
        );
        // Direction survives the projection unchanged: the camera scales
        // uniformly.
        edges::paint_arrow_head(
            self.painter,
            self.to_screen(curve.to),
            curve.end_direction(),
            zoom,
            color,
        );

        if edges::should_show_edge_label(true, zoom) {
            let label = connection
                .label
                .as_deref()
                .unwrap_or_else(|| connection.kind.label());
            edges::paint_edge_label(
                self.painter,
                self.to_screen(curve.midpoint()),
                label,
                zoom,
                colors::CARD_BG,
                colors::TEXT_PRIMARY,
            );
        }
    }

    /// Dashed wire from the grabbed port to the pointer while connecting.
    pub fn paint_preview(&self, origin_world: Pos2, pointer_screen: Pos2, origin: &PortRef) {
        let pointer_world = self.camera.screen_to_world(pointer_screen, self.screen_rect);
        let color = origin
            .accepts
            .first()
            .map(|t| colors::connection_color(*t))
            .unwrap_or(colors::TEXT_SECONDARY);

        // Preview always routes output-to-input, whichever end is grabbed.
        let (from, to) = match origin.direction {
            PortDirection::Output => (origin_world, pointer_world),
            PortDirection::Input => (pointer_world, origin_world),
        };
        edges::paint_polyline(
            self.painter,
            &edge_screen_points(self.camera, self.screen_rect, from, to),
            Stroke::new(2.0 * self.camera.zoom(), color),
            true,
        );
    }

    // =========================================================================
    // NODE CARDS
    // =========================================================================

    pub fn paint_nodes(&self, pipeline: &Pipeline, selection: Selection, connecting: Option<&PortRef>) {
        for node in &pipeline.nodes {
            self.paint_node(node, selection == Selection::Node(node.id), connecting);
        }
    }

    fn paint_node(&self, node: &Node, selected: bool, connecting: Option<&PortRef>) {
        let zoom = self.camera.zoom();
        let world_rect = geometry::node_rect(node);
        let rect = Rect::from_min_max(
            self.to_screen(world_rect.min),
            self.to_screen(world_rect.max),
        );
        if !self.screen_rect.intersects(rect) {
            return;
        }

        let catalog = Catalog::get();
        let provider = node
            .provider_id()
            .and_then(|id| catalog.provider(node.component, id));
        let broken = provider.is_none();

        let accent = colors::component_accent(node.component);
        let rounding = 6.0 * zoom;

        if selected {
            self.painter.rect_stroke(
                rect.expand(3.0 * zoom),
                rounding,
                Stroke::new(2.0 * zoom, colors::CARD_SELECTED),
            );
        }
        self.painter.rect_filled(rect, rounding, colors::CARD_BG);
        let border = if broken {
            colors::CARD_BROKEN
        } else {
            colors::CARD_BORDER
        };
        self.painter
            .rect_stroke(rect, rounding, Stroke::new(1.5 * zoom, border));

        // Accent chip in the header.
        let chip = Rect::from_min_size(
            rect.min + egui::Vec2::splat(8.0 * zoom),
            egui::Vec2::splat(14.0 * zoom),
        );
        self.painter.rect_filled(chip, 3.0 * zoom, accent);

        self.painter.text(
            Pos2::new(chip.right() + 6.0 * zoom, chip.center().y),
            Align2::LEFT_CENTER,
            node.component.label(),
            FontId::proportional(12.0 * zoom),
            colors::TEXT_PRIMARY,
        );

        let subtitle = if broken {
            "unknown provider".to_string()
        } else {
            provider.map(|p| p.name.clone()).unwrap_or_default()
        };
        self.painter.text(
            Pos2::new(chip.left(), chip.bottom() + 10.0 * zoom),
            Align2::LEFT_CENTER,
            subtitle,
            FontId::proportional(10.0 * zoom),
            if broken {
                colors::CARD_BROKEN
            } else {
                colors::TEXT_SECONDARY
            },
        );

        self.paint_ports(node, connecting);

        if selected && !broken {
            self.paint_config_preview(node, rect, zoom);
        }
    }

    fn paint_ports(&self, node: &Node, connecting: Option<&PortRef>) {
        let zoom = self.camera.zoom();
        for direction in [PortDirection::Input, PortDirection::Output] {
            let ports = match direction {
                PortDirection::Input => node.input_ports(),
                PortDirection::Output => node.output_ports(),
            };
            for (index, port) in ports.iter().enumerate() {
                let anchor =
                    self.to_screen(geometry::port_anchor(node, direction, index, ports.len()));

                let base = match direction {
                    PortDirection::Input => colors::PORT_INPUT,
                    PortDirection::Output => colors::PORT_OUTPUT,
                };
                let eligible = connecting.is_some_and(|origin| {
                    crate::interaction::port_is_eligible(
                        origin,
                        &crate::interaction::port_ref(node, direction, port),
                    )
                });
                let color = if eligible { colors::PORT_ELIGIBLE } else { base };
                let radius = if eligible { PORT_RADIUS + 2.0 } else { PORT_RADIUS } * zoom;

                self.painter.circle_filled(anchor, radius, color);
                self.painter
                    .circle_stroke(anchor, radius, Stroke::new(1.0 * zoom, colors::CANVAS_BG));

                // Port labels only when zoomed in enough to read them.
                if zoom > 0.7 {
                    let (align, offset) = match direction {
                        PortDirection::Input => {
                            (Align2::LEFT_CENTER, egui::Vec2::new(radius + 4.0 * zoom, 0.0))
                        }
                        PortDirection::Output => {
                            (Align2::RIGHT_CENTER, egui::Vec2::new(-radius - 4.0 * zoom, 0.0))
                        }
                    };
                    self.painter.text(
                        anchor + offset,
                        align,
                        &port.label,
                        FontId::proportional(8.5 * zoom),
                        colors::TEXT_SECONDARY,
                    );
                }
            }
        }
    }

    /// First few configuration values below the selected card.
    fn paint_config_preview(&self, node: &Node, rect: Rect, zoom: f32) {
        let mut y = rect.bottom() + 8.0 * zoom;
        for (key, value) in node.data.iter().take(3) {
            let text = format!("{}: {}", key, preview_value(value));
            self.painter.text(
                Pos2::new(rect.left(), y),
                Align2::LEFT_TOP,
                text,
                FontId::monospace(9.0 * zoom),
                colors::TEXT_SECONDARY,
            );
            y += 12.0 * zoom;
        }
    }
}

/// Flattened screen-space polyline for a wire between two world anchors.
/// The curve is always routed in world units, the same way `connection_at`
/// routes it, and only the flattened points are projected.
pub fn edge_screen_points(camera: &Camera, screen_rect: Rect, from: Pos2, to: Pos2) -> Vec<Pos2> {
    EdgeCurve::between(from, to)
        .flatten()
        .into_iter()
        .map(|p| camera.world_to_screen(p, screen_rect))
        .collect()
}

/// The connection nearest `world_pos` within the hit band, if any.
/// Distances are measured in world units, so the band feels the same at
/// every zoom level.
pub fn connection_at(pipeline: &Pipeline, world_pos: Pos2) -> Option<Uuid> {
    let mut best: Option<(Uuid, f32)> = None;
    for connection in &pipeline.connections {
        let (Some(source), Some(target)) = (
            pipeline.node(connection.source),
            pipeline.node(connection.target),
        ) else {
            continue;
        };
        let from = geometry::anchor_for_handle(
            source,
            PortDirection::Output,
            connection.source_handle.as_deref(),
        );
        let to = geometry::anchor_for_handle(
            target,
            PortDirection::Input,
            connection.target_handle.as_deref(),
        );
        let dist = EdgeCurve::between(from, to).distance_to(world_pos);
        if dist <= edges::EDGE_HIT_BAND && best.map_or(true, |(_, d)| dist < d) {
            best = Some((connection.id, dist));
        }
    }
    best.map(|(id, _)| id)
}

fn preview_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => {
            if s.chars().count() > 18 {
                let head: String = s.chars().take(18).collect();
                format!("{head}…")
            } else {
                s.clone()
            }
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipeline_types::{ComponentType, Position};

    #[test]
    fn clicks_inside_the_hit_band_select_a_connection() {
        let mut pipeline = Pipeline::new("test");
        let source = Node::new(
            ComponentType::Prompt,
            Position::new(0.0, 0.0),
            Default::default(),
        );
        let target = Node::new(
            ComponentType::Llm,
            Position::new(400.0, 0.0),
            Default::default(),
        );
        let connection = pipeline_types::Connection {
            id: uuid::Uuid::new_v4(),
            source: source.id,
            target: target.id,
            source_handle: Some("prompt".into()),
            target_handle: Some("prompt".into()),
            kind: Default::default(),
            label: None,
            metadata: None,
        };
        let from = geometry::anchor_for_handle(&source, PortDirection::Output, Some("prompt"));
        let to = geometry::anchor_for_handle(&target, PortDirection::Input, Some("prompt"));
        pipeline.nodes.push(source);
        pipeline.nodes.push(target);
        let id = connection.id;
        pipeline.connections.push(connection);

        let mid = EdgeCurve::between(from, to).midpoint();
        assert_eq!(connection_at(&pipeline, mid), Some(id));
        assert_eq!(
            connection_at(&pipeline, mid + egui::Vec2::new(0.0, 100.0)),
            None
        );
    }

    #[test]
    fn painted_wire_and_hit_test_share_one_curve_at_any_zoom() {
        let mut camera = Camera::new();
        camera.set_zoom(0.1);
        let screen_rect = Rect::from_min_size(Pos2::ZERO, egui::Vec2::new(800.0, 600.0));

        // Wide enough that the control-offset cap engages.
        let from = Pos2::new(0.0, 0.0);
        let to = Pos2::new(2_000.0, 400.0);

        let hit_curve = EdgeCurve::between(from, to);
        let worst = edge_screen_points(&camera, screen_rect, from, to)
            .into_iter()
            .map(|p| hit_curve.distance_to(camera.screen_to_world(p, screen_rect)))
            .fold(0.0f32, f32::max);
        assert!(
            worst < 1.0,
            "painted line strays {worst} world units from the hit curve"
        );
    }

    #[test]
    fn long_string_values_are_truncated_in_the_preview() {
        let value = serde_json::Value::String("sk-0123456789abcdefghij".to_string());
        let preview = preview_value(&value);
        assert!(preview.ends_with('…'));
        assert!(preview.chars().count() <= 19);
    }

    #[test]
    fn non_string_values_render_as_json() {
        assert_eq!(preview_value(&serde_json::json!(0.7)), "0.7");
        assert_eq!(preview_value(&serde_json::json!(true)), "true");
    }
}
