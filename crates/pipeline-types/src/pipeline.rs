//! The top-level pipeline aggregate and its JSON document form.

use crate::error::PipelineError;
use crate::node::{Connection, Node};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// The unit of save/export/import: nodes, connections and identifying
/// metadata. Imports replace the whole structure, never merge.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Pipeline {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl Pipeline {
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            nodes: Vec::new(),
            connections: Vec::new(),
            created: now,
            updated: now,
            metadata: None,
        }
    }

    /// Pretty-printed (2-space) document, the shape written to disk and
    /// offered for download.
    pub fn to_json(&self) -> Result<String, PipelineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document. Callers replace their state wholesale on success;
    /// a parse failure must leave prior state untouched.
    pub fn from_json(text: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Download file name: whitespace collapsed to underscores.
    pub fn export_file_name(&self) -> String {
        let stem: String = self
            .name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");
        let stem = if stem.is_empty() { "pipeline".to_string() } else { stem };
        format!("{stem}.json")
    }

    pub fn node(&self, id: Uuid) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: Uuid) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn connection(&self, id: Uuid) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentType, ConnectionType};
    use crate::node::Position;

    fn sample() -> Pipeline {
        let mut pipeline = Pipeline::new("My Pipeline");
        let mut data = Map::new();
        data.insert("provider".into(), Value::from("anthropic"));
        data.insert("maxTokens".into(), Value::from(1000));
        let llm = Node::new(ComponentType::Llm, Position::new(100.0, 100.0), data);

        let mut data = Map::new();
        data.insert("option".into(), Value::from("basic"));
        let prompt = Node::new(ComponentType::Prompt, Position::new(300.0, 100.0), data);

        pipeline.connections.push(Connection {
            id: Uuid::new_v4(),
            source: prompt.id,
            target: llm.id,
            source_handle: Some("prompt".into()),
            target_handle: Some("prompt".into()),
            kind: ConnectionType::Text,
            label: Some("prompt feed".into()),
            metadata: None,
        });
        pipeline.nodes.push(llm);
        pipeline.nodes.push(prompt);
        pipeline
    }

    #[test]
    fn round_trip_preserves_nodes_connections_and_name() {
        let original = sample();
        let json = original.to_json().unwrap();
        let parsed = Pipeline::from_json(&json).unwrap();

        assert_eq!(parsed.name, original.name);
        assert_eq!(parsed.nodes, original.nodes);
        assert_eq!(parsed.connections, original.connections);
    }

    #[test]
    fn export_file_name_replaces_whitespace() {
        let mut pipeline = Pipeline::new("My First Pipeline");
        assert_eq!(pipeline.export_file_name(), "My_First_Pipeline.json");
        pipeline.name = "  ".into();
        assert_eq!(pipeline.export_file_name(), "pipeline.json");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Pipeline::from_json("{not json"),
            Err(PipelineError::Document(_))
        ));
    }

    #[test]
    fn timestamps_serialize_as_iso8601() {
        let pipeline = Pipeline::new("t");
        let value = serde_json::to_value(&pipeline).unwrap();
        let created = value["created"].as_str().unwrap();
        assert!(created.contains('T'), "expected ISO-8601, got {created}");
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let json = format!(
            r#"{{"id":"{}","name":"Empty","created":"2026-01-01T00:00:00Z","updated":"2026-01-01T00:00:00Z"}}"#,
            Uuid::new_v4()
        );
        let parsed = Pipeline::from_json(&json).unwrap();
        assert!(parsed.nodes.is_empty());
        assert!(parsed.connections.is_empty());
    }
}
