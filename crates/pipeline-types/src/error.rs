//! Error taxonomy for graph mutations and document I/O.

use crate::component::ComponentType;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A port of a node was dropped on another port of the same node.
    #[error("a component cannot be connected to itself")]
    SelfLoop,

    /// Both gesture endpoints were inputs, or both outputs.
    #[error("connections must run from an output port to an input port")]
    DirectionMismatch,

    /// The (source, sourceHandle, target, targetHandle) tuple already exists.
    #[error("these components are already connected")]
    DuplicateConnection,

    /// A mutation referenced a node id that is not in the graph.
    #[error("unknown node {0}")]
    UnknownNode(Uuid),

    /// A provider id with no catalog entry for the node's component type.
    #[error("unknown provider '{provider}' for {component}")]
    UnknownProvider {
        component: ComponentType,
        provider: String,
    },

    /// An uploaded document failed to parse. The in-memory pipeline is
    /// left untouched when this is returned.
    #[error("invalid pipeline document: {0}")]
    Document(#[from] serde_json::Error),
}
