//! Ollama chat API wire format types
//!
//! Optional fields carry `skip_serializing_if` so absent values are
//! dropped from the payload entirely; the backend rejects or
//! misinterprets explicit nulls.

use serde::{Deserialize, Serialize};

use crate::types::ToolDefinition;

// -- Request types --

/// Body of a `POST /api/chat` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaChatRequest {
    /// Model identifier
    pub model: String,
    /// Conversation messages
    pub messages: Vec<OllamaMessage>,
    /// Always false; streaming is not supported by this adapter
    pub stream: bool,
    /// Sampling parameters and tool definitions
    pub options: OllamaOptions,
}

/// Message in Ollama wire format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaMessage {
    /// Role string ("system", "user", "assistant", "tool")
    pub role: String,
    /// Flattened text content
    pub content: String,
    /// Tool name, only present on tool messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Base64-encoded image payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

/// Generation options passed alongside the messages
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OllamaOptions {
    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
    /// Stop sequences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    /// Tool definitions available to the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,
}

// -- Response types --

/// Body of a `POST /api/chat` response
///
/// `prompt_eval_count` and `eval_count` are required: a response missing
/// either fails deserialization and surfaces as a data-shape error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaChatResponse {
    /// Generated message
    pub message: OllamaResponseMessage,
    /// Tokens consumed by the prompt
    pub prompt_eval_count: u32,
    /// Tokens generated in the completion
    pub eval_count: u32,
}

/// Assistant message in an Ollama chat response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OllamaResponseMessage {
    /// Text content, may be absent when the model only calls tools
    #[serde(default)]
    pub content: Option<String>,
    /// Tool calls requested by the model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OllamaToolCall>>,
}

/// Tool call entry in an Ollama response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaToolCall {
    /// The requested function
    pub function: OllamaFunctionCall,
}

/// Function name and arguments within an Ollama tool call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaFunctionCall {
    /// Function name
    pub name: String,
    /// Function arguments as opaque JSON
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<serde_json::Value>,
}

// -- Model listing --

/// Body of a `GET /api/tags` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaTagList {
    /// Locally available models
    pub models: Vec<OllamaModelTag>,
}

/// Single entry in the tag listing
///
/// The endpoint returns more metadata (size, digest, modification time);
/// only the name is consumed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaModelTag {
    /// Model name, e.g. "llama3"
    pub name: String,
}
