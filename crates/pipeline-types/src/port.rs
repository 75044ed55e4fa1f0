//! Port descriptors and the per-type default port layouts.
//!
//! Ports are derived from the node's component type; a node may carry
//! explicit overrides but ports are never stored independently.

use crate::component::{ComponentType, ConnectionType};
use serde::{Deserialize, Serialize};

/// Which side of the node a port sits on and which way data flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    Input,
    Output,
}

/// A named attachment point on a node.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Port {
    pub id: String,
    #[serde(rename = "type")]
    pub direction: PortDirection,
    pub label: String,
    /// Connection types this port accepts.
    #[serde(rename = "connectionType")]
    pub accepts: Vec<ConnectionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Whether the port may carry more than one connection.
    #[serde(default)]
    pub multiple: bool,
}

impl Port {
    fn input(id: &str, label: &str, accepts: &[ConnectionType]) -> Self {
        Self {
            id: id.to_string(),
            direction: PortDirection::Input,
            label: label.to_string(),
            accepts: accepts.to_vec(),
            description: None,
            required: false,
            multiple: false,
        }
    }

    fn output(id: &str, label: &str, accepts: &[ConnectionType]) -> Self {
        Self {
            direction: PortDirection::Output,
            ..Self::input(id, label, accepts)
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }
}

/// Two port type sets are compatible when they share at least one tag.
pub fn compatible(source: &[ConnectionType], target: &[ConnectionType]) -> bool {
    source.iter().any(|s| target.contains(s))
}

/// Default input ports for a component type.
pub fn default_inputs(component: ComponentType) -> Vec<Port> {
    use ConnectionType::*;
    match component {
        ComponentType::VectorDb => vec![
            Port::input("documents", "Documents", &[Document]).multiple(),
            Port::input("embeddings", "Embeddings", &[Embedding]),
            Port::input("query", "Query", &[Query]),
            Port::input("config", "Config", &[Config]),
        ],
        ComponentType::Embedding => vec![
            Port::input("text", "Text", &[Text]).required().multiple(),
            Port::input("config", "Config", &[Config]),
        ],
        ComponentType::Llm => vec![
            Port::input("prompt", "Prompt", &[Text]).required(),
            Port::input("context", "Context", &[Data]).multiple(),
            Port::input("config", "Config", &[Config]),
            Port::input("temperature", "Temperature", &[Data]),
        ],
        ComponentType::Prompt => vec![
            Port::input("variables", "Variables", &[Data]).multiple(),
            Port::input("context", "Context", &[Text, Data]).multiple(),
        ],
        ComponentType::Rag => vec![
            Port::input("query", "Query", &[Text]).required(),
            Port::input("retrievedDocs", "Retrieved Docs", &[Document, Result]).required(),
            Port::input("config", "Config", &[Config]),
        ],
        ComponentType::Chunking => vec![
            Port::input("document", "Document", &[Document, Text])
                .required()
                .multiple(),
            Port::input("config", "Config", &[Config]),
        ],
        ComponentType::FineTuning => vec![
            Port::input("trainingData", "Training Data", &[Data, Document]).required(),
            Port::input("validationData", "Validation Data", &[Data, Document]),
            Port::input("config", "Config", &[Config]),
        ],
        ComponentType::Temperature => vec![
            Port::input("context", "Context", &[Text, Data]),
            Port::input("config", "Config", &[Config]),
        ],
    }
}

/// Default output ports for a component type.
pub fn default_outputs(component: ComponentType) -> Vec<Port> {
    use ConnectionType::*;
    match component {
        ComponentType::VectorDb => vec![
            Port::output("results", "Results", &[Result]),
            Port::output("metadata", "Metadata", &[Data]),
        ],
        ComponentType::Embedding => vec![
            Port::output("embeddings", "Embeddings", &[Embedding]),
            Port::output("metadata", "Metadata", &[Data]),
        ],
        ComponentType::Llm => vec![
            Port::output("response", "Response", &[Text]),
            Port::output("metadata", "Metadata", &[Data]),
        ],
        ComponentType::Prompt => vec![Port::output("prompt", "Prompt", &[Text])],
        ComponentType::Rag => vec![
            Port::output("context", "Context", &[Text]),
            Port::output("formattedQuery", "Formatted Query", &[Text]),
            Port::output("metadata", "Metadata", &[Data]),
        ],
        ComponentType::Chunking => vec![
            Port::output("chunks", "Chunks", &[Document]),
            Port::output("metadata", "Metadata", &[Data]),
        ],
        ComponentType::FineTuning => vec![
            Port::output("model", "Model", &[Data]),
            Port::output("metrics", "Metrics", &[Data]),
            Port::output("logs", "Logs", &[Text]),
        ],
        ComponentType::Temperature => vec![Port::output("temperature", "Temperature", &[Data])],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_type_has_ports_on_both_sides() {
        for ty in ComponentType::all() {
            assert!(!default_inputs(*ty).is_empty(), "{ty} has no inputs");
            assert!(!default_outputs(*ty).is_empty(), "{ty} has no outputs");
        }
    }

    #[test]
    fn llm_prompt_input_accepts_prompt_output() {
        let prompt_out = default_outputs(ComponentType::Prompt);
        let llm_in = default_inputs(ComponentType::Llm);
        let out = prompt_out.iter().find(|p| p.id == "prompt").unwrap();
        let inp = llm_in.iter().find(|p| p.id == "prompt").unwrap();
        assert!(inp.required);
        assert!(compatible(&out.accepts, &inp.accepts));
    }

    #[test]
    fn incompatible_tags_do_not_match() {
        use ConnectionType::*;
        assert!(!compatible(&[Embedding], &[Query]));
        assert!(compatible(&[Document, Text], &[Text]));
    }

    #[test]
    fn directions_are_consistent() {
        for ty in ComponentType::all() {
            assert!(default_inputs(*ty)
                .iter()
                .all(|p| p.direction == PortDirection::Input));
            assert!(default_outputs(*ty)
                .iter()
                .all(|p| p.direction == PortDirection::Output));
        }
    }
}
