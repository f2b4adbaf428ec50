use serde::{Deserialize, Serialize};
use url::Url;

/// Default Ollama API base URL
const DEFAULT_API_BASE: &str = "http://localhost:11434";

/// Immutable adapter configuration
///
/// Constructed once and handed to the adapter; safely shared across
/// concurrent invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    #[serde(default = "default_api_base")]
    pub api_base: Url,
}

impl OllamaConfig {
    /// Create a configuration pointing at the given base URL
    pub fn new(api_base: Url) -> Self {
        Self { api_base }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
        }
    }
}

fn default_api_base() -> Url {
    Url::parse(DEFAULT_API_BASE).expect("valid default URL")
}
