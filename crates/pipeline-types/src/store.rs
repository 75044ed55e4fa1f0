//! The canonical graph state and its mutation commands.
//!
//! The application page owns exactly one `PipelineStore`; every view reads
//! it by reference and requests changes through these methods. No view
//! mutates the collections directly.

use crate::catalog::Catalog;
use crate::component::{ComponentType, ConnectionType};
use crate::error::PipelineError;
use crate::node::{Connection, Node, Position};
use crate::pipeline::Pipeline;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// At most one node or one connection is selected, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Node(Uuid),
    Connection(Uuid),
}

impl Selection {
    pub fn node(&self) -> Option<Uuid> {
        match self {
            Selection::Node(id) => Some(*id),
            _ => None,
        }
    }

    pub fn connection(&self) -> Option<Uuid> {
        match self {
            Selection::Connection(id) => Some(*id),
            _ => None,
        }
    }
}

/// What a completed connect gesture asks the store to create.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectRequest {
    pub source: Uuid,
    pub target: Uuid,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
    /// Defaults to [`ConnectionType::Data`] when unset.
    pub kind: Option<ConnectionType>,
    pub label: Option<String>,
}

/// Owner of the canonical node/connection collections.
#[derive(Debug, Clone)]
pub struct PipelineStore {
    pipeline: Pipeline,
    selection: Selection,
}

impl Default for PipelineStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineStore {
    pub fn new() -> Self {
        Self {
            pipeline: Pipeline::new("New Pipeline"),
            selection: Selection::None,
        }
    }

    pub fn from_pipeline(pipeline: Pipeline) -> Self {
        Self {
            pipeline,
            selection: Selection::None,
        }
    }

    // =========================================================================
    // READ ACCESS
    // =========================================================================

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn nodes(&self) -> &[Node] {
        &self.pipeline.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.pipeline.connections
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn name(&self) -> &str {
        &self.pipeline.name
    }

    // =========================================================================
    // NODE COMMANDS
    // =========================================================================

    /// Create a node of `component` at `position`, seeded with the
    /// catalog's first provider and its field defaults, and select it.
    pub fn add_node(&mut self, component: ComponentType, position: Position) -> Uuid {
        let catalog = Catalog::get();
        let data = match catalog.first_provider(component) {
            Some(provider) => catalog.default_data(component, provider),
            None => {
                // The closed type set always has a catalog entry; an empty
                // bag keeps the node usable if the table ever regresses.
                warn!(%component, "component type missing from catalog");
                serde_json::Map::new()
            }
        };
        let node = Node::new(component, position, data);
        let id = node.id;
        info!(%component, node = %id, "add node");
        self.pipeline.nodes.push(node);
        self.selection = Selection::Node(id);
        self.touch();
        id
    }

    /// Replace the node with a matching id wholesale. No-op if absent.
    pub fn update_node(&mut self, node: Node) {
        if let Some(slot) = self.pipeline.node_mut(node.id) {
            *slot = node;
            self.touch();
        }
    }

    /// Commit a new position. Called on every pointer move of a drag, so
    /// the canonical state tracks the gesture in real time.
    pub fn move_node(&mut self, id: Uuid, position: Position) {
        if let Some(node) = self.pipeline.node_mut(id) {
            node.position = position;
            self.touch();
        }
    }

    /// Remove a node and every connection touching it; clear selection if
    /// the node (or a cascaded connection) was selected.
    pub fn remove_node(&mut self, id: Uuid) {
        let before = self.pipeline.nodes.len();
        self.pipeline.nodes.retain(|n| n.id != id);
        if self.pipeline.nodes.len() == before {
            return;
        }
        let removed_connections: Vec<Uuid> = self
            .pipeline
            .connections
            .iter()
            .filter(|c| c.touches(id))
            .map(|c| c.id)
            .collect();
        self.pipeline.connections.retain(|c| !c.touches(id));

        match self.selection {
            Selection::Node(sel) if sel == id => self.selection = Selection::None,
            Selection::Connection(sel) if removed_connections.contains(&sel) => {
                self.selection = Selection::None
            }
            _ => {}
        }
        info!(node = %id, cascaded = removed_connections.len(), "remove node");
        self.touch();
    }

    /// Switch a node to another catalog provider. The old provider's field
    /// values are dropped and the new provider's defaults seeded, so no
    /// stale keys linger in the data bag.
    pub fn set_provider(&mut self, node_id: Uuid, provider_id: &str) -> Result<(), PipelineError> {
        let catalog = Catalog::get();
        let component = self
            .pipeline
            .node(node_id)
            .ok_or(PipelineError::UnknownNode(node_id))?
            .component;
        let provider = catalog.provider(component, provider_id).ok_or_else(|| {
            PipelineError::UnknownProvider {
                component,
                provider: provider_id.to_string(),
            }
        })?;
        let data = catalog.default_data(component, provider);
        if let Some(node) = self.pipeline.node_mut(node_id) {
            node.data = data;
        }
        debug!(node = %node_id, provider = provider_id, "switch provider");
        self.touch();
        Ok(())
    }

    /// Write one configuration field on a node's data bag.
    pub fn set_field(&mut self, node_id: Uuid, key: &str, value: Value) {
        if let Some(node) = self.pipeline.node_mut(node_id) {
            node.data.insert(key.to_string(), value);
            self.touch();
        }
    }

    // =========================================================================
    // CONNECTION COMMANDS
    // =========================================================================

    /// Validate and append a connection. Self-loops and duplicate endpoint
    /// tuples are rejected without mutating state.
    pub fn connect(&mut self, request: ConnectRequest) -> Result<Uuid, PipelineError> {
        if request.source == request.target {
            return Err(PipelineError::SelfLoop);
        }
        let source = self
            .pipeline
            .node(request.source)
            .ok_or(PipelineError::UnknownNode(request.source))?;
        let target = self
            .pipeline
            .node(request.target)
            .ok_or(PipelineError::UnknownNode(request.target))?;
        // Named handles must sit on the right side of their node.
        if let Some(handle) = request.source_handle.as_deref() {
            if !source.output_ports().iter().any(|p| p.id == handle) {
                return Err(PipelineError::DirectionMismatch);
            }
        }
        if let Some(handle) = request.target_handle.as_deref() {
            if !target.input_ports().iter().any(|p| p.id == handle) {
                return Err(PipelineError::DirectionMismatch);
            }
        }
        let key = (
            request.source,
            request.source_handle.as_deref(),
            request.target,
            request.target_handle.as_deref(),
        );
        if self.pipeline.connections.iter().any(|c| c.endpoints() == key) {
            return Err(PipelineError::DuplicateConnection);
        }

        let connection = Connection {
            id: Uuid::new_v4(),
            source: request.source,
            target: request.target,
            source_handle: request.source_handle,
            target_handle: request.target_handle,
            kind: request.kind.unwrap_or_default(),
            label: request.label,
            metadata: None,
        };
        let id = connection.id;
        info!(source = %connection.source, target = %connection.target, "add connection");
        self.pipeline.connections.push(connection);
        self.touch();
        Ok(id)
    }

    /// Remove a connection. No-op if absent.
    pub fn disconnect(&mut self, id: Uuid) {
        let before = self.pipeline.connections.len();
        self.pipeline.connections.retain(|c| c.id != id);
        if self.pipeline.connections.len() == before {
            return;
        }
        if self.selection == Selection::Connection(id) {
            self.selection = Selection::None;
        }
        self.touch();
    }

    // =========================================================================
    // SELECTION
    // =========================================================================

    pub fn select_node(&mut self, id: Uuid) {
        self.selection = Selection::Node(id);
    }

    pub fn select_connection(&mut self, id: Uuid) {
        self.selection = Selection::Connection(id);
    }

    pub fn clear_selection(&mut self) {
        self.selection = Selection::None;
    }

    // =========================================================================
    // DOCUMENT I/O
    // =========================================================================

    pub fn rename(&mut self, name: &str) {
        if self.pipeline.name != name {
            self.pipeline.name = name.to_string();
            self.touch();
        }
    }

    /// Snapshot with a refreshed `updated` stamp, ready to serialize.
    pub fn to_document(&self) -> Pipeline {
        let mut doc = self.pipeline.clone();
        doc.updated = Utc::now();
        doc
    }

    pub fn export_json(&self) -> Result<String, PipelineError> {
        self.to_document().to_json()
    }

    pub fn export_file_name(&self) -> String {
        self.pipeline.export_file_name()
    }

    /// Replace the whole pipeline from a document. Transactional: a parse
    /// failure returns the error and leaves current state untouched.
    pub fn import_json(&mut self, text: &str) -> Result<(), PipelineError> {
        let pipeline = Pipeline::from_json(text)?;
        self.replace(pipeline);
        Ok(())
    }

    /// Swap in an already-parsed document.
    pub fn replace(&mut self, pipeline: Pipeline) {
        info!(name = %pipeline.name, nodes = pipeline.nodes.len(), "replace pipeline");
        self.pipeline = pipeline;
        self.selection = Selection::None;
    }

    fn touch(&mut self) {
        self.pipeline.updated = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_nodes() -> (PipelineStore, Uuid, Uuid) {
        let mut store = PipelineStore::new();
        let a = store.add_node(ComponentType::Prompt, Position::new(300.0, 100.0));
        let b = store.add_node(ComponentType::Llm, Position::new(100.0, 100.0));
        (store, a, b)
    }

    fn request(source: Uuid, target: Uuid) -> ConnectRequest {
        ConnectRequest {
            source,
            target,
            source_handle: Some("prompt".into()),
            target_handle: Some("prompt".into()),
            kind: Some(ConnectionType::Text),
            label: None,
        }
    }

    #[test]
    fn add_node_seeds_defaults_and_selects() {
        let mut store = PipelineStore::new();
        let id = store.add_node(ComponentType::Llm, Position::new(10.0, 10.0));
        let node = store.pipeline().node(id).unwrap();
        assert_eq!(node.provider_id(), Some("openai"));
        assert_eq!(node.data.get("model"), Some(&json!("gpt-3.5-turbo")));
        assert_eq!(store.selection(), Selection::Node(id));
    }

    #[test]
    fn self_loop_is_rejected() {
        let (mut store, a, _) = two_nodes();
        let err = store.connect(request(a, a)).unwrap_err();
        assert!(matches!(err, PipelineError::SelfLoop));
        assert!(store.connections().is_empty());
    }

    #[test]
    fn handle_on_the_wrong_side_is_a_direction_mismatch() {
        let (mut store, a, b) = two_nodes();
        let mut req = request(a, b);
        // "variables" is an input of Prompt, not an output.
        req.source_handle = Some("variables".into());
        let err = store.connect(req).unwrap_err();
        assert!(matches!(err, PipelineError::DirectionMismatch));
        assert!(store.connections().is_empty());
    }

    #[test]
    fn duplicate_tuple_is_rejected_with_one_connection_kept() {
        let (mut store, a, b) = two_nodes();
        store.connect(request(a, b)).unwrap();
        let err = store.connect(request(a, b)).unwrap_err();
        assert!(matches!(err, PipelineError::DuplicateConnection));
        assert_eq!(store.connections().len(), 1);
    }

    #[test]
    fn same_nodes_different_handles_are_distinct_edges() {
        let (mut store, a, b) = two_nodes();
        store.connect(request(a, b)).unwrap();
        let mut other = request(a, b);
        other.target_handle = Some("context".into());
        other.kind = Some(ConnectionType::Data);
        store.connect(other).unwrap();
        assert_eq!(store.connections().len(), 2);
    }

    #[test]
    fn cascade_delete_removes_touching_connections() {
        let (mut store, prompt, llm) = two_nodes();
        store.connect(request(prompt, llm)).unwrap();
        let prompt_pos = store.pipeline().node(prompt).unwrap().position;

        store.remove_node(llm);

        assert!(store.pipeline().node(llm).is_none());
        assert!(store.connections().is_empty());
        // The surviving node is untouched.
        let survivor = store.pipeline().node(prompt).unwrap();
        assert_eq!(survivor.position, prompt_pos);
    }

    #[test]
    fn deleting_selected_node_clears_selection() {
        let mut store = PipelineStore::new();
        let id = store.add_node(ComponentType::Rag, Position::default());
        assert_eq!(store.selection(), Selection::Node(id));
        store.remove_node(id);
        assert_eq!(store.selection(), Selection::None);
    }

    #[test]
    fn connection_defaults_to_data_kind() {
        let (mut store, a, b) = two_nodes();
        let mut req = request(a, b);
        req.kind = None;
        let id = store.connect(req).unwrap();
        assert_eq!(
            store.pipeline().connection(id).unwrap().kind,
            ConnectionType::Data
        );
    }

    #[test]
    fn provider_switch_drops_stale_fields() {
        let mut store = PipelineStore::new();
        let id = store.add_node(ComponentType::Llm, Position::default());
        store.set_field(id, "model", json!("gpt-4o"));
        store.set_field(id, "organization", json!("acme"));

        store.set_provider(id, "anthropic").unwrap();

        let node = store.pipeline().node(id).unwrap();
        assert_eq!(node.provider_id(), Some("anthropic"));
        assert_eq!(node.data.get("model"), Some(&json!("claude-3-sonnet")));
        assert!(node.data.get("organization").is_none());
    }

    #[test]
    fn unknown_provider_switch_is_an_error() {
        let mut store = PipelineStore::new();
        let id = store.add_node(ComponentType::Llm, Position::default());
        let err = store.set_provider(id, "nonexistent").unwrap_err();
        assert!(matches!(err, PipelineError::UnknownProvider { .. }));
        // State unchanged.
        assert_eq!(
            store.pipeline().node(id).unwrap().provider_id(),
            Some("openai")
        );
    }

    #[test]
    fn update_node_with_unknown_id_is_a_no_op() {
        let mut store = PipelineStore::new();
        let phantom = Node::new(ComponentType::Prompt, Position::default(), Default::default());
        store.update_node(phantom);
        assert!(store.nodes().is_empty());
    }

    #[test]
    fn failed_import_leaves_state_untouched() {
        let (mut store, a, b) = two_nodes();
        store.connect(request(a, b)).unwrap();

        let err = store.import_json("{broken").unwrap_err();
        assert!(matches!(err, PipelineError::Document(_)));
        assert_eq!(store.nodes().len(), 2);
        assert_eq!(store.connections().len(), 1);
    }

    #[test]
    fn import_replaces_wholesale() {
        let (mut store, _, _) = two_nodes();
        let empty = Pipeline::new("Empty");
        store.import_json(&empty.to_json().unwrap()).unwrap();
        assert!(store.nodes().is_empty());
        assert!(store.connections().is_empty());
        assert_eq!(store.name(), "Empty");
        assert_eq!(store.selection(), Selection::None);
    }

    #[test]
    fn selection_is_mutually_exclusive() {
        let (mut store, a, b) = two_nodes();
        let conn = store.connect(request(a, b)).unwrap();
        store.select_node(a);
        assert_eq!(store.selection().node(), Some(a));
        store.select_connection(conn);
        assert_eq!(store.selection().node(), None);
        assert_eq!(store.selection().connection(), Some(conn));
    }
}
