//! Ollama backend adapter

use std::sync::Arc;

use reqwest::Client;

use crate::config::OllamaConfig;
use crate::convert;
use crate::error::AdapterError;
use crate::media::MediaResolver;
use crate::protocol::{OllamaChatResponse, OllamaTagList};
use crate::types::{ChatRequest, ChatResponse};

/// Adapter translating generic chat requests into Ollama API calls
///
/// Holds no mutable state; a single instance can serve concurrent
/// invocations.
pub struct OllamaAdapter {
    config: OllamaConfig,
    client: Client,
    media: Arc<dyn MediaResolver>,
}

impl OllamaAdapter {
    /// Create an adapter from its configuration and media collaborator
    ///
    /// # Errors
    ///
    /// Returns `AdapterError::Internal` if the HTTP client cannot be
    /// constructed.
    pub fn new(config: OllamaConfig, media: Arc<dyn MediaResolver>) -> Result<Self, AdapterError> {
        // Idle connections must not outlive the per-call runtime that
        // drove them
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build http client: {e}"))?;

        Ok(Self { config, client, media })
    }

    /// Build the chat endpoint URL
    fn chat_url(&self) -> String {
        let base = self.config.api_base.as_str().trim_end_matches('/');
        format!("{base}/api/chat")
    }

    /// Build the tag-listing endpoint URL
    fn tags_url(&self) -> String {
        let base = self.config.api_base.as_str().trim_end_matches('/');
        format!("{base}/api/tags")
    }

    /// Send a chat request, blocking the calling thread until completion
    ///
    /// Media resolution and the HTTP exchange are async; this drives them
    /// on a runtime scoped to the call, so no scheduler is assumed from
    /// the caller and no scheduling context survives the return. Must not
    /// be called from within an async context — use [`Self::chat_async`]
    /// there.
    pub fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, AdapterError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build chat runtime: {e}"))?;

        runtime.block_on(self.chat_async(request))
    }

    /// Async core of the chat operation
    #[tracing::instrument(skip_all, fields(model = %request.model))]
    pub async fn chat_async(&self, request: &ChatRequest) -> Result<ChatResponse, AdapterError> {
        let payload = convert::chat_payload(request, self.media.as_ref()).await?;

        let response = self
            .client
            .post(self.chat_url())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "chat request failed");
                AdapterError::Upstream(e.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "backend returned error");
            return Err(AdapterError::Upstream(format!("backend returned {status}: {body}")));
        }

        let reply: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::InvalidResponse(format!("failed to parse response: {e}")))?;

        Ok(convert::chat_response(request.model.clone(), reply))
    }

    /// List the models available on the backend
    pub async fn list_models(&self) -> Result<Vec<String>, AdapterError> {
        let response = self
            .client
            .get(self.tags_url())
            .send()
            .await
            .map_err(|e| AdapterError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AdapterError::Upstream(format!(
                "backend returned {}",
                response.status()
            )));
        }

        let tags: OllamaTagList = response
            .json()
            .await
            .map_err(|e| AdapterError::InvalidResponse(format!("failed to parse tag list: {e}")))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::InMemoryMediaStore;

    #[test]
    fn endpoint_urls_join_cleanly() {
        let config = OllamaConfig::default();
        let adapter = OllamaAdapter::new(config, Arc::new(InMemoryMediaStore::new())).unwrap();

        assert_eq!(adapter.chat_url(), "http://localhost:11434/api/chat");
        assert_eq!(adapter.tags_url(), "http://localhost:11434/api/tags");
    }
}
