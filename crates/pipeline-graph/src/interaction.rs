//! Gesture state and the events the canvas reports upward.

use egui::Vec2;
use pipeline_types::{ConnectRequest, ConnectionType, Node, PortDirection, Position};
use uuid::Uuid;

/// A grabbed or hovered port, identified analytically.
#[derive(Debug, Clone, PartialEq)]
pub struct PortRef {
    pub node: Uuid,
    pub direction: PortDirection,
    pub port_id: String,
    /// Connection types the port carries, for eligibility highlighting
    /// and for stamping the created connection.
    pub accepts: Vec<ConnectionType>,
}

/// One in-flight gesture at a time.
#[derive(Debug, Clone, Default)]
pub enum Interaction {
    #[default]
    Idle,
    /// Moving a card; `grab_offset` is pointer-to-card-origin in world
    /// units so the card does not jump to the cursor.
    DraggingNode { id: Uuid, grab_offset: Vec2 },
    /// Dragging a wire out of a port.
    Connecting { origin: PortRef },
    /// Dragging empty canvas to pan.
    Panning,
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }
}

/// What a frame of canvas interaction asks the application to do.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    NodeSelected(Uuid),
    ConnectionSelected(Uuid),
    SelectionCleared,
    NodeMoved { id: Uuid, position: Position },
    ConnectRequested(ConnectRequest),
    ConnectionDeleted(Uuid),
    NodeDeleted(Uuid),
}

/// Turn a completed port-to-port gesture into a connect request.
///
/// The output side becomes the source regardless of which end the drag
/// started from. Gestures between two ports of the same direction, or
/// two ports on the same node, produce nothing.
pub fn connection_from_gesture(origin: &PortRef, ended_on: &PortRef) -> Option<ConnectRequest> {
    if origin.node == ended_on.node || origin.direction == ended_on.direction {
        return None;
    }
    let (output, input) = match origin.direction {
        PortDirection::Output => (origin, ended_on),
        PortDirection::Input => (ended_on, origin),
    };
    // Stamp the wire with the output port's primary type.
    let kind = output.accepts.first().copied();
    Some(ConnectRequest {
        source: output.node,
        target: input.node,
        source_handle: Some(output.port_id.clone()),
        target_handle: Some(input.port_id.clone()),
        kind,
        label: None,
    })
}

/// Whether `candidate` could legally complete a wire from `origin`:
/// opposite direction, different node, and at least one shared type.
pub fn port_is_eligible(origin: &PortRef, candidate: &PortRef) -> bool {
    origin.node != candidate.node
        && origin.direction != candidate.direction
        && pipeline_types::port::compatible(&origin.accepts, &candidate.accepts)
}

/// World position a dragged card should take for the current pointer.
pub fn dragged_position(pointer_world: egui::Pos2, grab_offset: Vec2) -> Position {
    Position::new(pointer_world.x - grab_offset.x, pointer_world.y - grab_offset.y)
}

/// Build a [`PortRef`] from a node's port table.
pub fn port_ref(node: &Node, direction: PortDirection, port: &pipeline_types::Port) -> PortRef {
    PortRef {
        node: node.id,
        direction,
        port_id: port.id.clone(),
        accepts: port.accepts.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn port(node: Uuid, direction: PortDirection, id: &str, accepts: &[ConnectionType]) -> PortRef {
        PortRef {
            node,
            direction,
            port_id: id.to_string(),
            accepts: accepts.to_vec(),
        }
    }

    #[test]
    fn output_side_becomes_source_regardless_of_drag_direction() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let out = port(a, PortDirection::Output, "response", &[ConnectionType::Text]);
        let inp = port(b, PortDirection::Input, "context", &[ConnectionType::Text]);

        let forward = connection_from_gesture(&out, &inp).unwrap();
        let backward = connection_from_gesture(&inp, &out).unwrap();

        for request in [forward, backward] {
            assert_eq!(request.source, a);
            assert_eq!(request.target, b);
            assert_eq!(request.source_handle.as_deref(), Some("response"));
            assert_eq!(request.target_handle.as_deref(), Some("context"));
            assert_eq!(request.kind, Some(ConnectionType::Text));
        }
    }

    #[test]
    fn same_direction_gesture_is_rejected() {
        let out1 = port(Uuid::new_v4(), PortDirection::Output, "a", &[ConnectionType::Data]);
        let out2 = port(Uuid::new_v4(), PortDirection::Output, "b", &[ConnectionType::Data]);
        assert!(connection_from_gesture(&out1, &out2).is_none());
    }

    #[test]
    fn same_node_gesture_is_rejected() {
        let node = Uuid::new_v4();
        let out = port(node, PortDirection::Output, "out", &[ConnectionType::Data]);
        let inp = port(node, PortDirection::Input, "in", &[ConnectionType::Data]);
        assert!(connection_from_gesture(&out, &inp).is_none());
    }

    #[test]
    fn eligibility_requires_a_shared_type() {
        let out = port(
            Uuid::new_v4(),
            PortDirection::Output,
            "embeddings",
            &[ConnectionType::Embedding],
        );
        let matching = port(
            Uuid::new_v4(),
            PortDirection::Input,
            "embeddings",
            &[ConnectionType::Embedding, ConnectionType::Vector],
        );
        let mismatched = port(
            Uuid::new_v4(),
            PortDirection::Input,
            "prompt",
            &[ConnectionType::Text],
        );
        assert!(port_is_eligible(&out, &matching));
        assert!(!port_is_eligible(&out, &mismatched));
    }

    #[test]
    fn dragged_card_keeps_its_grab_offset() {
        let position = dragged_position(egui::Pos2::new(150.0, 90.0), Vec2::new(30.0, 10.0));
        assert_eq!(position, Position::new(120.0, 80.0));
    }
}
