//! Nodes and connections - the entities the canvas edits.

use crate::component::{ComponentType, ConnectionType};
use crate::port::{self, Port};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

// =============================================================================
// POSITION
// =============================================================================

/// A point in logical canvas units. Node positions are stored unscaled;
/// the camera applies the zoom transform once at render time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

// =============================================================================
// NODE
// =============================================================================

/// One placed, configured component instance.
///
/// The `data` bag is open-keyed: it always holds the discriminator entry
/// (`provider` or `option`, see [`ComponentType::discriminator`]) plus the
/// governing provider's field values.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Node {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub component: ComponentType,
    pub position: Position,
    #[serde(default)]
    pub data: Map<String, Value>,
    /// Explicit port overrides; `None` falls back to the per-type defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<Port>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<Port>>,
}

impl Node {
    pub fn new(component: ComponentType, position: Position, data: Map<String, Value>) -> Self {
        Self {
            id: Uuid::new_v4(),
            component,
            position,
            data,
            inputs: None,
            outputs: None,
        }
    }

    /// Id of the catalog provider currently governing the field set.
    pub fn provider_id(&self) -> Option<&str> {
        self.data
            .get(self.component.discriminator())
            .and_then(Value::as_str)
    }

    /// Input ports, explicit overrides first, per-type defaults otherwise.
    pub fn input_ports(&self) -> Vec<Port> {
        match &self.inputs {
            Some(ports) => ports.clone(),
            None => port::default_inputs(self.component),
        }
    }

    /// Output ports, explicit overrides first, per-type defaults otherwise.
    pub fn output_ports(&self) -> Vec<Port> {
        match &self.outputs {
            Some(ports) => ports.clone(),
            None => port::default_outputs(self.component),
        }
    }
}

// =============================================================================
// CONNECTION
// =============================================================================

/// A typed, directional edge. `source` is always the output side.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Connection {
    pub id: Uuid,
    pub source: Uuid,
    pub target: Uuid,
    #[serde(
        rename = "sourceHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_handle: Option<String>,
    #[serde(
        rename = "targetHandle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub target_handle: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: ConnectionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl Connection {
    /// The identity tuple used for duplicate rejection.
    pub fn endpoints(&self) -> (Uuid, Option<&str>, Uuid, Option<&str>) {
        (
            self.source,
            self.source_handle.as_deref(),
            self.target,
            self.target_handle.as_deref(),
        )
    }

    /// Whether this edge touches the given node on either side.
    pub fn touches(&self, node_id: Uuid) -> bool {
        self.source == node_id || self.target == node_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_serializes_with_wire_field_names() {
        let mut data = Map::new();
        data.insert("provider".into(), Value::from("openai"));
        let node = Node::new(ComponentType::Llm, Position::new(10.0, 20.0), data);

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "llm");
        assert_eq!(json["position"]["x"], 10.0);
        assert_eq!(json["data"]["provider"], "openai");
        // Port overrides are omitted unless set.
        assert!(json.get("inputs").is_none());
    }

    #[test]
    fn connection_handles_use_camel_case() {
        let conn = Connection {
            id: Uuid::new_v4(),
            source: Uuid::new_v4(),
            target: Uuid::new_v4(),
            source_handle: Some("response".into()),
            target_handle: Some("prompt".into()),
            kind: ConnectionType::Text,
            label: None,
            metadata: None,
        };

        let json = serde_json::to_value(&conn).unwrap();
        assert_eq!(json["sourceHandle"], "response");
        assert_eq!(json["targetHandle"], "prompt");
        assert_eq!(json["type"], "text");
    }

    #[test]
    fn provider_id_reads_the_discriminator_key() {
        let mut data = Map::new();
        data.insert("option".into(), Value::from("lora"));
        data.insert("rank".into(), Value::from(8));
        let node = Node::new(ComponentType::FineTuning, Position::default(), data);
        assert_eq!(node.provider_id(), Some("lora"));
    }

    #[test]
    fn default_ports_are_used_unless_overridden() {
        let node = Node::new(ComponentType::Llm, Position::default(), Map::new());
        assert!(node.input_ports().iter().any(|p| p.id == "prompt"));
        assert!(node.output_ports().iter().any(|p| p.id == "response"));
    }
}
