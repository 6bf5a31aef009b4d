//! Single-shot prompts that pair text with a PNG image.

use std::sync::Arc;

use gcommon::GenerationConfig;
use gprovider::{
    Blob, Message, ModelProvider, ModelRequest, Part, Role, SafetySetting, SafetySettings,
};

use crate::ChatError;
use crate::conversation::first_candidate_content;

/// Stateless: nothing is remembered between calls.
pub struct ImagePrompt {
    provider: Arc<dyn ModelProvider>,
    generation_config: GenerationConfig,
    safety_settings: SafetySettings,
}

impl ImagePrompt {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            generation_config: GenerationConfig::default(),
            safety_settings: SafetySettings::new(),
        }
    }

    pub fn with_generation_config(mut self, generation_config: GenerationConfig) -> Self {
        self.generation_config = generation_config;
        self
    }

    pub fn with_safety_settings(mut self, safety_settings: SafetySettings) -> Self {
        self.safety_settings = safety_settings;
        self
    }

    /// Returns the first text part of the reply, or an empty string when the
    /// first part is not text.
    pub async fn send(&self, text: &str, image_png: &[u8]) -> Result<String, ChatError> {
        let message = image_message(text, image_png)?;
        let request = ModelRequest::new(vec![message])
            .with_safety_settings(SafetySetting::from_settings(&self.safety_settings))
            .with_generation_config(self.generation_config.clone());

        let response = self.provider.generate_content(request).await?;
        let (content, _) = first_candidate_content(response)?;
        Ok(content.first_text().unwrap_or_default().to_string())
    }

    pub async fn count_tokens(&self, text: &str, image_png: &[u8]) -> Result<u32, ChatError> {
        let message = image_message(text, image_png)?;
        Ok(self.provider.count_tokens(vec![message]).await?)
    }
}

impl std::fmt::Debug for ImagePrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePrompt")
            .field("provider", &self.provider.id())
            .field("generation_config", &self.generation_config)
            .field("safety_settings", &self.safety_settings)
            .finish()
    }
}

fn image_message(text: &str, image_png: &[u8]) -> Result<Message, ChatError> {
    if text.trim().is_empty() {
        return Err(ChatError::invalid_request("prompt text must not be empty"));
    }
    if image_png.is_empty() {
        return Err(ChatError::invalid_request("image bytes must not be empty"));
    }

    Ok(Message::new(
        Role::User,
        vec![Part::text(text), Part::InlineData(Blob::png(image_png))],
    ))
}
