//! Card and port geometry in world space.
//!
//! Port anchors are computed analytically from the node's position and
//! port count, so hit testing and edge routing never depend on what was
//! painted last frame.

use egui::{Pos2, Rect, Vec2};
use pipeline_types::{Node, Port, PortDirection};

/// Fixed card width in world units.
pub const NODE_WIDTH: f32 = 200.0;
/// Header band holding the accent chip, type label and provider line.
pub const HEADER_HEIGHT: f32 = 46.0;
/// Vertical room reserved per port row.
pub const PORT_ROW_HEIGHT: f32 = 18.0;
/// Port circle radius, world units.
pub const PORT_RADIUS: f32 = 5.0;
/// Pointer must land within this world distance of an anchor to grab it.
pub const PORT_HIT_RADIUS: f32 = 9.0;

/// Card size derived from the longer of the two port columns.
pub fn node_size(node: &Node) -> Vec2 {
    let rows = node.input_ports().len().max(node.output_ports().len()).max(1);
    Vec2::new(NODE_WIDTH, HEADER_HEIGHT + rows as f32 * PORT_ROW_HEIGHT + 10.0)
}

/// Card rect with `node.position` as the top-left corner.
pub fn node_rect(node: &Node) -> Rect {
    Rect::from_min_size(Pos2::new(node.position.x, node.position.y), node_size(node))
}

/// Anchor point for the port at `index` in a column of `count`.
///
/// Inputs sit on the left edge, outputs on the right, spread evenly over
/// the band below the header at fractions (index + 1) / (count + 1).
pub fn port_anchor(node: &Node, direction: PortDirection, index: usize, count: usize) -> Pos2 {
    let rect = node_rect(node);
    let x = match direction {
        PortDirection::Input => rect.left(),
        PortDirection::Output => rect.right(),
    };
    let band_top = rect.top() + HEADER_HEIGHT;
    let band_height = rect.height() - HEADER_HEIGHT;
    let y = band_top + band_height * (index as f32 + 1.0) / (count as f32 + 1.0);
    Pos2::new(x, y)
}

/// Anchor for a port id, falling back to the card edge midpoint when the
/// id is absent. Documents can reference handles a card no longer has.
pub fn anchor_for_handle(node: &Node, direction: PortDirection, handle: Option<&str>) -> Pos2 {
    let ports = ports_for(node, direction);
    if let Some(id) = handle {
        if let Some(index) = ports.iter().position(|p| p.id == id) {
            return port_anchor(node, direction, index, ports.len());
        }
    }
    let rect = node_rect(node);
    match direction {
        PortDirection::Input => rect.left_center(),
        PortDirection::Output => rect.right_center(),
    }
}

fn ports_for(node: &Node, direction: PortDirection) -> Vec<Port> {
    match direction {
        PortDirection::Input => node.input_ports(),
        PortDirection::Output => node.output_ports(),
    }
}

/// The port whose anchor is nearest `world_pos` within the hit radius.
pub fn port_at(node: &Node, world_pos: Pos2) -> Option<(PortDirection, Port)> {
    for direction in [PortDirection::Input, PortDirection::Output] {
        let ports = ports_for(node, direction);
        for (index, port) in ports.iter().enumerate() {
            let anchor = port_anchor(node, direction, index, ports.len());
            if (world_pos - anchor).length() <= PORT_HIT_RADIUS {
                return Some((direction, port.clone()));
            }
        }
    }
    None
}

/// First node (topmost in paint order, so iterate from the back) whose
/// card contains `world_pos`.
pub fn node_at(nodes: &[Node], world_pos: Pos2) -> Option<&Node> {
    nodes.iter().rev().find(|n| node_rect(n).contains(world_pos))
}
