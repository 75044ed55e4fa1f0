//! The static provider catalog.
//!
//! Maps each component type to its selectable providers/options and their
//! configuration field descriptors. The canvas and the settings form both
//! consume this read-only; nothing in the editor writes to it.

use crate::component::ComponentType;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::OnceLock;

// =============================================================================
// FIELD DESCRIPTORS
// =============================================================================

/// Widget kind for a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Select,
    Number,
    Boolean,
    Slider,
}

/// One entry in a provider's ordered configuration field list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConfigField {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub tooltip: Option<String>,
    pub placeholder: Option<String>,
    pub options: Vec<String>,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    pub unit: Option<String>,
}

impl ConfigField {
    fn new(id: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            tooltip: None,
            placeholder: None,
            options: Vec::new(),
            default: None,
            min: None,
            max: None,
            step: None,
            unit: None,
        }
    }

    fn text(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::Text)
    }

    fn select(id: &str, label: &str, options: &[&str]) -> Self {
        let mut f = Self::new(id, label, FieldKind::Select);
        f.options = options.iter().map(|s| s.to_string()).collect();
        f
    }

    fn number(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::Number)
    }

    fn boolean(id: &str, label: &str) -> Self {
        Self::new(id, label, FieldKind::Boolean)
    }

    fn slider(id: &str, label: &str, min: f64, max: f64, step: f64) -> Self {
        let mut f = Self::new(id, label, FieldKind::Slider);
        f.min = Some(min);
        f.max = Some(max);
        f.step = Some(step);
        f
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    fn tooltip(mut self, text: &str) -> Self {
        self.tooltip = Some(text.to_string());
        self
    }

    fn placeholder(mut self, text: &str) -> Self {
        self.placeholder = Some(text.to_string());
        self
    }
}

// =============================================================================
// PROVIDERS & CATEGORIES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Pricing {
    Free,
    Tiered,
    PayPerUse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Deployment {
    Cloud,
    Local,
    Hybrid,
}

/// A selectable implementation choice within a component type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub description: String,
    pub pricing: Pricing,
    pub deployment: Deployment,
    pub use_cases: Vec<String>,
    pub config_fields: Vec<ConfigField>,
}

impl Provider {
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: &str,
        name: &str,
        description: &str,
        pricing: Pricing,
        deployment: Deployment,
        use_cases: &[&str],
        config_fields: Vec<ConfigField>,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            pricing,
            deployment,
            use_cases: use_cases.iter().map(|s| s.to_string()).collect(),
            config_fields,
        }
    }
}

/// One palette entry: a component type plus its provider list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ComponentCategory {
    pub component: ComponentType,
    pub label: String,
    pub description: String,
    pub icon: String,
    pub providers: Vec<Provider>,
}

// =============================================================================
// CATALOG
// =============================================================================

/// Read-only catalog handle. `Catalog::get()` returns the process-wide table.
pub struct Catalog {
    categories: Vec<ComponentCategory>,
}

static CATALOG: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    pub fn get() -> &'static Catalog {
        CATALOG.get_or_init(|| Catalog {
            categories: build_categories(),
        })
    }

    pub fn categories(&self) -> &[ComponentCategory] {
        &self.categories
    }

    pub fn category(&self, component: ComponentType) -> Option<&ComponentCategory> {
        self.categories.iter().find(|c| c.component == component)
    }

    pub fn provider(&self, component: ComponentType, provider_id: &str) -> Option<&Provider> {
        self.category(component)?
            .providers
            .iter()
            .find(|p| p.id == provider_id)
    }

    pub fn first_provider(&self, component: ComponentType) -> Option<&Provider> {
        self.category(component)?.providers.first()
    }

    /// Seed a node data bag for a provider: the discriminator entry plus
    /// every field default the provider declares.
    pub fn default_data(&self, component: ComponentType, provider: &Provider) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert(
            component.discriminator().to_string(),
            Value::from(provider.id.clone()),
        );
        for field in &provider.config_fields {
            if let Some(default) = &field.default {
                data.insert(field.id.clone(), default.clone());
            }
        }
        data
    }
}

fn build_categories() -> Vec<ComponentCategory> {
    vec![
        vector_db(),
        embedding(),
        llm(),
        prompt(),
        rag(),
        chunking(),
        fine_tuning(),
        temperature(),
    ]
}

fn category(
    component: ComponentType,
    label: &str,
    description: &str,
    icon: &str,
    providers: Vec<Provider>,
) -> ComponentCategory {
    ComponentCategory {
        component,
        label: label.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        providers,
    }
}

fn vector_db() -> ComponentCategory {
    category(
        ComponentType::VectorDb,
        "Vector Database",
        "Store and retrieve vector embeddings",
        "database",
        vec![
            Provider::new(
                "pinecone",
                "Pinecone",
                "Cloud vector database with simple API and managed service",
                Pricing::Tiered,
                Deployment::Cloud,
                &["production", "RAG", "semantic search"],
                vec![
                    ConfigField::text("apiKey", "API Key")
                        .required()
                        .placeholder("Enter your Pinecone API key")
                        .tooltip("Found in Pinecone dashboard under API Keys"),
                    ConfigField::select("indexType", "Index Type", &["pod", "serverless"])
                        .required()
                        .default_value(json!("serverless"))
                        .tooltip("Serverless offers easier scaling, Pod gives more control"),
                    ConfigField::select(
                        "region",
                        "Region",
                        &["us-east-1", "us-west-1", "eu-west-1", "ap-southeast-1"],
                    )
                    .required()
                    .default_value(json!("us-east-1")),
                ],
            ),
            Provider::new(
                "chromadb",
                "ChromaDB",
                "Open-source embedding database for AI applications",
                Pricing::Free,
                Deployment::Hybrid,
                &["prototyping", "local development", "self-hosting"],
                vec![
                    ConfigField::text("persistDirectory", "Persist Directory")
                        .default_value(json!("./chroma_db"))
                        .tooltip("Local directory to persist database files"),
                    ConfigField::text("collectionName", "Collection Name")
                        .required()
                        .default_value(json!("my_collection")),
                ],
            ),
            Provider::new(
                "milvus",
                "Milvus",
                "Open-source vector database with high performance",
                Pricing::Free,
                Deployment::Hybrid,
                &["large-scale", "high-performance", "clustering"],
                vec![
                    ConfigField::text("host", "Host")
                        .required()
                        .default_value(json!("localhost")),
                    ConfigField::number("port", "Port")
                        .required()
                        .default_value(json!(19530)),
                    ConfigField::select(
                        "consistencyLevel",
                        "Consistency Level",
                        &["Strong", "Session", "Bounded", "Eventually"],
                    )
                    .default_value(json!("Session"))
                    .tooltip("Affects query consistency vs performance trade-off"),
                    ConfigField::boolean("gpuAcceleration", "GPU Acceleration")
                        .default_value(json!(false)),
                ],
            ),
        ],
    )
}

fn embedding() -> ComponentCategory {
    category(
        ComponentType::Embedding,
        "Embedding Models",
        "Convert text to vector embeddings",
        "move",
        vec![
            Provider::new(
                "openai",
                "OpenAI",
                "State-of-the-art embedding models from OpenAI",
                Pricing::PayPerUse,
                Deployment::Cloud,
                &["search", "classification", "clustering"],
                vec![
                    ConfigField::text("apiKey", "API Key")
                        .required()
                        .placeholder("Enter your OpenAI API key"),
                    ConfigField::select(
                        "model",
                        "Model",
                        &["text-embedding-3-small", "text-embedding-3-large"],
                    )
                    .required()
                    .default_value(json!("text-embedding-3-small"))
                    .tooltip("Small is cheaper, Large is more powerful"),
                    ConfigField::number("batchSize", "Batch Size")
                        .default_value(json!(100))
                        .tooltip("Number of texts to process in a single API call"),
                ],
            ),
            Provider::new(
                "voyageai",
                "Voyage AI",
                "Advanced embeddings specialized for search and retrieval",
                Pricing::PayPerUse,
                Deployment::Cloud,
                &["semantic search", "RAG", "multilingual"],
                vec![
                    ConfigField::text("apiKey", "API Key")
                        .required()
                        .placeholder("Enter your Voyage AI API key"),
                    ConfigField::select("model", "Model", &["voyage-2", "voyage-large-2"])
                        .required()
                        .default_value(json!("voyage-2")),
                ],
            ),
            Provider::new(
                "jinaai",
                "Jina AI",
                "Open-source neural search ecosystem",
                Pricing::Tiered,
                Deployment::Hybrid,
                &["search", "multilingual", "code search"],
                vec![
                    ConfigField::text("apiKey", "API Key")
                        .required()
                        .placeholder("Enter your Jina AI API key"),
                    ConfigField::select("task", "Task", &["search", "clustering"])
                        .required()
                        .default_value(json!("search")),
                    ConfigField::boolean("multilingual", "Multilingual Support")
                        .default_value(json!(false)),
                ],
            ),
        ],
    )
}

fn llm() -> ComponentCategory {
    category(
        ComponentType::Llm,
        "Large Language Models",
        "Generate text and answers from prompts",
        "message-circle",
        vec![
            Provider::new(
                "openai",
                "OpenAI",
                "GPT models with state-of-the-art capabilities",
                Pricing::PayPerUse,
                Deployment::Cloud,
                &["chat", "completion", "function calling"],
                vec![
                    ConfigField::text("apiKey", "API Key")
                        .required()
                        .placeholder("Enter your OpenAI API key"),
                    ConfigField::select("model", "Model", &["gpt-4o", "gpt-4o-mini", "gpt-3.5-turbo"])
                        .required()
                        .default_value(json!("gpt-3.5-turbo")),
                    ConfigField::number("maxTokens", "Max Tokens").default_value(json!(1000)),
                    ConfigField::slider("temperature", "Temperature", 0.0, 2.0, 0.1)
                        .default_value(json!(0.7)),
                ],
            ),
            Provider::new(
                "anthropic",
                "Anthropic",
                "Claude models known for safety and helpful assistants",
                Pricing::PayPerUse,
                Deployment::Cloud,
                &["chat", "reasoning", "safety-critical"],
                vec![
                    ConfigField::text("apiKey", "API Key")
                        .required()
                        .placeholder("Enter your Anthropic API key"),
                    ConfigField::select(
                        "model",
                        "Model",
                        &["claude-3-opus", "claude-3-sonnet", "claude-3-haiku"],
                    )
                    .required()
                    .default_value(json!("claude-3-sonnet")),
                    ConfigField::number("maxTokens", "Max Tokens").default_value(json!(1000)),
                ],
            ),
            Provider::new(
                "groq",
                "Groq",
                "Ultra-fast inference for large language models",
                Pricing::PayPerUse,
                Deployment::Cloud,
                &["chat", "real-time", "low-latency"],
                vec![
                    ConfigField::text("apiKey", "API Key")
                        .required()
                        .placeholder("Enter your Groq API key"),
                    ConfigField::select(
                        "model",
                        "Model",
                        &["llama2-70b-4096", "mixtral-8x7b-32768"],
                    )
                    .required()
                    .default_value(json!("mixtral-8x7b-32768")),
                    ConfigField::select(
                        "speedVsCost",
                        "Optimization Priority",
                        &["speed", "balanced", "cost"],
                    )
                    .default_value(json!("balanced")),
                ],
            ),
        ],
    )
}

fn prompt() -> ComponentCategory {
    category(
        ComponentType::Prompt,
        "Prompt Engineering",
        "Design effective prompts for LLMs",
        "edit",
        vec![
            Provider::new(
                "basic",
                "Basic Templates",
                "Simple template-based prompting",
                Pricing::Free,
                Deployment::Hybrid,
                &["general purpose", "simple tasks"],
                vec![ConfigField::text("template", "Template")
                    .required()
                    .placeholder("Enter your prompt template with {variables}")],
            ),
            Provider::new(
                "fewshot",
                "Few-Shot Learning",
                "Provide examples to guide LLM responses",
                Pricing::Free,
                Deployment::Hybrid,
                &["classification", "formatting", "consistency"],
                vec![
                    ConfigField::text("examples", "Example Pairs")
                        .required()
                        .placeholder("Input 1 => Output 1\nInput 2 => Output 2"),
                    ConfigField::text("delimiter", "Delimiter Tokens")
                        .default_value(json!("=>"))
                        .tooltip("Token(s) separating inputs from outputs in examples"),
                ],
            ),
        ],
    )
}

fn rag() -> ComponentCategory {
    category(
        ComponentType::Rag,
        "RAG",
        "Retrieval-Augmented Generation",
        "network",
        vec![
            Provider::new(
                "basicrag",
                "Basic RAG",
                "Simple retrieval and generation process",
                Pricing::Free,
                Deployment::Hybrid,
                &["question-answering", "document augmentation"],
                vec![
                    ConfigField::number("numResults", "Number of Results")
                        .required()
                        .default_value(json!(3))
                        .tooltip("Number of documents to retrieve"),
                    ConfigField::slider("threshold", "Similarity Threshold", 0.0, 1.0, 0.05)
                        .default_value(json!(0.7))
                        .tooltip("Minimum similarity score for retrieved documents"),
                ],
            ),
            Provider::new(
                "colbert",
                "ColBERT",
                "Token-level interaction for precise retrieval",
                Pricing::Free,
                Deployment::Hybrid,
                &["high-precision retrieval", "complex QA"],
                vec![
                    ConfigField::boolean("tokenRetrieval", "Token-level Retrieval")
                        .default_value(json!(true))
                        .tooltip("Enable token-level matching for more precise results"),
                    ConfigField::select(
                        "compression",
                        "Compression Level",
                        &["None", "Low", "Medium", "High"],
                    )
                    .default_value(json!("Medium"))
                    .tooltip("Trade-off between index size and retrieval quality"),
                ],
            ),
        ],
    )
}

fn chunking() -> ComponentCategory {
    category(
        ComponentType::Chunking,
        "Chunking",
        "Split documents into processable pieces",
        "scissors",
        vec![
            Provider::new(
                "fixedsize",
                "Fixed Size",
                "Split text into chunks of consistent size",
                Pricing::Free,
                Deployment::Hybrid,
                &["simple documents", "uniform content"],
                vec![
                    ConfigField::number("chunkSize", "Chunk Size")
                        .required()
                        .default_value(json!(1000))
                        .tooltip("Number of characters per chunk"),
                    ConfigField::number("overlap", "Overlap")
                        .default_value(json!(200))
                        .tooltip("Number of characters to overlap between chunks"),
                ],
            ),
            Provider::new(
                "semantic",
                "Semantic Splitting",
                "Split text based on semantic boundaries",
                Pricing::Free,
                Deployment::Hybrid,
                &["complex documents", "preserving context"],
                vec![ConfigField::slider(
                    "similarityThreshold",
                    "Similarity Threshold",
                    0.0,
                    1.0,
                    0.05,
                )
                .required()
                .default_value(json!(0.75))
                .tooltip("Threshold for splitting based on semantic similarity")],
            ),
        ],
    )
}

fn fine_tuning() -> ComponentCategory {
    category(
        ComponentType::FineTuning,
        "Fine-Tuning",
        "Customize models for specific tasks",
        "settings",
        vec![
            Provider::new(
                "lora",
                "LoRA",
                "Low-Rank Adaptation for efficient fine-tuning",
                Pricing::Free,
                Deployment::Hybrid,
                &["efficient tuning", "custom assistant", "domain adaptation"],
                vec![
                    ConfigField::number("rank", "Rank")
                        .required()
                        .default_value(json!(8))
                        .tooltip("Rank of the update matrices (higher = more capacity)"),
                    ConfigField::number("alpha", "Alpha")
                        .required()
                        .default_value(json!(16))
                        .tooltip("Scaling factor for the update (usually 2x rank)"),
                ],
            ),
            Provider::new(
                "qlora",
                "QLoRA",
                "Quantized LoRA for memory-efficient fine-tuning",
                Pricing::Free,
                Deployment::Hybrid,
                &["memory-constrained", "large models", "consumer hardware"],
                vec![
                    ConfigField::boolean("bits", "4-bit Precision")
                        .default_value(json!(true))
                        .tooltip("Use 4-bit quantization for base model weights"),
                    ConfigField::select(
                        "datasetFormat",
                        "Dataset Format",
                        &["JSON", "CSV", "JSONL", "Hugging Face"],
                    )
                    .required()
                    .default_value(json!("JSONL")),
                ],
            ),
        ],
    )
}

fn temperature() -> ComponentCategory {
    category(
        ComponentType::Temperature,
        "Temperature",
        "Control randomness in LLM outputs",
        "thermometer",
        vec![
            Provider::new(
                "fixed",
                "Fixed Value",
                "Set a constant temperature value",
                Pricing::Free,
                Deployment::Hybrid,
                &["consistent outputs", "simple configuration"],
                vec![ConfigField::slider("value", "Temperature", 0.0, 2.0, 0.1)
                    .required()
                    .default_value(json!(0.7))
                    .tooltip("0 = deterministic, 1 = balanced, 2 = random")],
            ),
            Provider::new(
                "dynamic",
                "Dynamic Adjustment",
                "Adjust temperature based on rules",
                Pricing::Free,
                Deployment::Hybrid,
                &["adaptive generation", "context-aware randomness"],
                vec![
                    ConfigField::text("rules", "Rule Templates")
                        .required()
                        .placeholder("if repetitive -> +0.2")
                        .tooltip("Rules to adjust temperature dynamically"),
                    ConfigField::slider("baseTemperature", "Base Temperature", 0.0, 2.0, 0.1)
                        .required()
                        .default_value(json!(0.7)),
                ],
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_component_type_has_providers() {
        let catalog = Catalog::get();
        for ty in ComponentType::all() {
            let cat = catalog.category(*ty).expect("missing category");
            assert!(!cat.providers.is_empty(), "{ty} has no providers");
        }
    }

    #[test]
    fn default_data_seeds_the_discriminator() {
        let catalog = Catalog::get();
        for ty in ComponentType::all() {
            let provider = catalog.first_provider(*ty).unwrap();
            let data = catalog.default_data(*ty, provider);
            assert_eq!(
                data.get(ty.discriminator()).and_then(Value::as_str),
                Some(provider.id.as_str())
            );
        }
    }

    #[test]
    fn default_data_includes_field_defaults() {
        let catalog = Catalog::get();
        let lora = catalog.provider(ComponentType::FineTuning, "lora").unwrap();
        let data = catalog.default_data(ComponentType::FineTuning, lora);
        assert_eq!(data.get("rank"), Some(&json!(8)));
        assert_eq!(data.get("alpha"), Some(&json!(16)));
    }

    #[test]
    fn unknown_provider_lookup_is_none() {
        let catalog = Catalog::get();
        assert!(catalog.provider(ComponentType::Llm, "no-such").is_none());
    }

    #[test]
    fn slider_fields_carry_bounds() {
        let catalog = Catalog::get();
        let fixed = catalog.provider(ComponentType::Temperature, "fixed").unwrap();
        let value = fixed.config_fields.iter().find(|f| f.id == "value").unwrap();
        assert_eq!(value.kind, FieldKind::Slider);
        assert_eq!(value.min, Some(0.0));
        assert_eq!(value.max, Some(2.0));
    }
}
