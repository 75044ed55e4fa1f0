//! Component and connection type enumerations.
//!
//! The serde tags match the pipeline document wire format, so imported
//! files round-trip byte-compatible with exports.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// COMPONENT TYPE
// =============================================================================

/// The eight pipeline roles a node can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    #[serde(rename = "vectordb")]
    VectorDb,
    Embedding,
    Llm,
    Prompt,
    Rag,
    Chunking,
    #[serde(rename = "finetuning")]
    FineTuning,
    Temperature,
}

impl ComponentType {
    /// All component types, in palette order.
    pub fn all() -> &'static [ComponentType] {
        &[
            Self::VectorDb,
            Self::Embedding,
            Self::Llm,
            Self::Prompt,
            Self::Rag,
            Self::Chunking,
            Self::FineTuning,
            Self::Temperature,
        ]
    }

    /// Wire tag used in the pipeline document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VectorDb => "vectordb",
            Self::Embedding => "embedding",
            Self::Llm => "llm",
            Self::Prompt => "prompt",
            Self::Rag => "rag",
            Self::Chunking => "chunking",
            Self::FineTuning => "finetuning",
            Self::Temperature => "temperature",
        }
    }

    /// Human-readable card label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::VectorDb => "Vector Database",
            Self::Embedding => "Embedding Model",
            Self::Llm => "Language Model",
            Self::Prompt => "Prompt Engineering",
            Self::Rag => "RAG",
            Self::Chunking => "Chunking",
            Self::FineTuning => "Fine-Tuning",
            Self::Temperature => "Temperature",
        }
    }

    /// Key in the node's data bag that names the governing catalog provider.
    ///
    /// The infrastructure types pick a `provider`; the technique types pick
    /// an `option`. Every node carries exactly one of the two.
    pub fn discriminator(&self) -> &'static str {
        match self {
            Self::VectorDb | Self::Embedding | Self::Llm => "provider",
            _ => "option",
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// CONNECTION TYPE
// =============================================================================

/// Payload tag carried by an edge between two ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    #[default]
    Data,
    Control,
    Text,
    Embedding,
    Vector,
    Query,
    Result,
    Document,
    Config,
}

impl ConnectionType {
    /// Label rendered at the edge midpoint.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Data => "Data",
            Self::Control => "Control",
            Self::Text => "Text",
            Self::Embedding => "Embedding",
            Self::Vector => "Vector",
            Self::Query => "Query",
            Self::Result => "Result",
            Self::Document => "Document",
            Self::Config => "Config",
        }
    }

    /// Control edges render dashed.
    pub fn dashed(&self) -> bool {
        matches!(self, Self::Control)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_wire_tags_match_document_format() {
        let json = serde_json::to_string(&ComponentType::VectorDb).unwrap();
        assert_eq!(json, "\"vectordb\"");
        let json = serde_json::to_string(&ComponentType::FineTuning).unwrap();
        assert_eq!(json, "\"finetuning\"");

        let parsed: ComponentType = serde_json::from_str("\"llm\"").unwrap();
        assert_eq!(parsed, ComponentType::Llm);
    }

    #[test]
    fn discriminator_splits_providers_from_options() {
        for ty in ComponentType::all() {
            let expected = match ty {
                ComponentType::VectorDb | ComponentType::Embedding | ComponentType::Llm => {
                    "provider"
                }
                _ => "option",
            };
            assert_eq!(ty.discriminator(), expected);
        }
    }

    #[test]
    fn connection_type_defaults_to_data() {
        assert_eq!(ConnectionType::default(), ConnectionType::Data);
        assert!(ConnectionType::Control.dashed());
        assert!(!ConnectionType::Data.dashed());
    }
}
