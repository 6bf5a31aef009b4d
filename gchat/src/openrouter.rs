//! Prompt-style turns against OpenRouter.

use gcommon::GenerationConfig;
use gprovider::{OpenRouterClient, OpenRouterRequest};

use crate::ChatError;

/// Joins the texts of multiple choices.
pub const CHOICE_SEPARATOR: &str = "\n=====\n";

/// Each call is a standalone prompt; no history is kept.
#[derive(Debug, Clone)]
pub struct OpenRouterConversation {
    client: OpenRouterClient,
    model: String,
    generation_config: GenerationConfig,
}

impl OpenRouterConversation {
    pub fn new(client: OpenRouterClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            generation_config: GenerationConfig::default(),
        }
    }

    pub fn with_generation_config(mut self, generation_config: GenerationConfig) -> Self {
        self.generation_config = generation_config;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `prompt` and returns every choice's text joined by [`CHOICE_SEPARATOR`].
    pub async fn send(&self, prompt: &str) -> Result<String, ChatError> {
        if prompt.trim().is_empty() {
            return Err(ChatError::invalid_request("prompt must not be empty"));
        }

        let request = OpenRouterRequest::prompt(self.model.as_str(), prompt)
            .with_generation_config(&self.generation_config);
        let response = self.client.complete(&request).await?;

        Ok(response.choice_texts().join(CHOICE_SEPARATOR))
    }
}
