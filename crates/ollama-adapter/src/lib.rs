//! Ollama backend adapter
//!
//! Translates a backend-agnostic chat request into the Ollama HTTP API
//! wire format, performs the exchange, and maps the JSON reply back onto
//! a generic response model. A secondary operation lists the models the
//! backend has available.
//!
//! The chat operation blocks the calling thread; image references are
//! resolved through an async media collaborator on a runtime scoped to
//! the call. Streaming, retries, and session state are out of scope.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod config;
pub mod convert;
pub mod error;
pub mod media;
pub mod protocol;
pub mod provider;
pub mod types;

pub use config::OllamaConfig;
pub use error::AdapterError;
pub use media::{InMemoryMediaStore, MediaError, MediaResolver};
pub use provider::OllamaAdapter;
pub use types::{
    ChatRequest, ChatResponse, ContentPart, FinishReason, GenerationParams, Message,
    ResponseMessage, Role, ToolCall, ToolDefinition, Usage,
};
