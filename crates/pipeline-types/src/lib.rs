//! Data model for the AI pipeline builder.
//!
//! This crate is UI-free: it defines the component/connection enumerations,
//! the port and provider catalogs, the `Pipeline` document that is saved and
//! exported as JSON, and the [`PipelineStore`] that owns the canonical graph
//! and exposes the mutation commands the UI layers call into.

pub mod catalog;
pub mod component;
pub mod error;
pub mod node;
pub mod pipeline;
pub mod port;
pub mod store;

pub use catalog::{Catalog, ComponentCategory, ConfigField, FieldKind, Provider};
pub use component::{ComponentType, ConnectionType};
pub use error::PipelineError;
pub use node::{Connection, Node, Position};
pub use pipeline::Pipeline;
pub use port::{Port, PortDirection};
pub use store::{ConnectRequest, PipelineStore, Selection};
