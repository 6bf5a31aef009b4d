//! Wiring helpers that turn a [`GabbleConfig`] into ready-to-use engines.

use std::sync::Arc;

use gchat::{Conversation, ImagePrompt, OpenRouterConversation};
use gobserve::{SafeFunctionHooks, SafeProviderHooks, TracingObservabilityHooks};
use gprovider::{
    GeminiModel, GeminiProvider, HttpTransport, ModelProvider, OpenRouterClient, ProviderError,
};
use gtooling::DefaultFunctionRuntime;

use crate::GabbleConfig;

pub fn http_transport(config: &GabbleConfig) -> Result<HttpTransport, ProviderError> {
    HttpTransport::new(config.transport_config())
}

/// Gemini provider for the configured text model.
pub fn gemini_provider(config: &GabbleConfig) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    gemini_provider_for(config, config.gemini_model.clone())
}

pub fn gemini_provider_for(
    config: &GabbleConfig,
    model: GeminiModel,
) -> Result<Arc<dyn ModelProvider>, ProviderError> {
    let api_key = config.require_gemini_api_key()?.clone();
    let provider = GeminiProvider::over_http(api_key, http_transport(config)?)
        .with_model(model)
        .with_hooks(Arc::new(SafeProviderHooks::new(TracingObservabilityHooks)));

    Ok(Arc::new(provider))
}

pub fn gemini_conversation(config: &GabbleConfig) -> Result<Conversation, ProviderError> {
    let runtime = DefaultFunctionRuntime::new()
        .with_hooks(Arc::new(SafeFunctionHooks::new(TracingObservabilityHooks)));

    Ok(Conversation::builder(gemini_provider(config)?)
        .function_runtime(Arc::new(runtime))
        .build())
}

pub fn image_prompt(config: &GabbleConfig) -> Result<ImagePrompt, ProviderError> {
    let provider = gemini_provider_for(config, config.gemini_vision_model.clone())?;
    Ok(ImagePrompt::new(provider))
}

pub fn openrouter_conversation(
    config: &GabbleConfig,
) -> Result<OpenRouterConversation, ProviderError> {
    let api_key = config.require_openrouter_api_key()?;
    let client = OpenRouterClient::from_api_key(api_key, config.transport_config())?
        .with_hooks(Arc::new(SafeProviderHooks::new(TracingObservabilityHooks)));

    Ok(OpenRouterConversation::new(
        client,
        config.openrouter_model.as_str(),
    ))
}

#[cfg(test)]
mod tests {
    use gprovider::{ProviderErrorKind, ProviderId};

    use super::*;

    #[test]
    fn constructors_require_matching_keys() {
        let config = GabbleConfig::new().with_openrouter_api_key("sk-or");

        let error = gemini_conversation(&config).expect_err("gemini key missing");
        assert_eq!(error.kind, ProviderErrorKind::Authentication);

        let error = image_prompt(&config).expect_err("gemini key missing");
        assert_eq!(error.kind, ProviderErrorKind::Authentication);

        let conversation = openrouter_conversation(&config).expect("openrouter key present");
        assert_eq!(conversation.model(), crate::config::DEFAULT_OPENROUTER_MODEL);
    }

    #[test]
    fn gemini_conversation_starts_empty() {
        let config = GabbleConfig::new()
            .with_gemini_api_key("AIza-key")
            .with_gemini_model(GeminiModel::Gemini15Pro);

        let provider = gemini_provider(&config).expect("provider should build");
        assert_eq!(provider.id(), ProviderId::Gemini);

        let conversation = gemini_conversation(&config).expect("conversation should build");
        assert!(conversation.history().is_empty());
        assert!(conversation.functions().is_empty());
        assert_eq!(conversation.policy().max_round_trips(), 10);
    }

    #[test]
    fn openrouter_requires_key() {
        let error = openrouter_conversation(&GabbleConfig::new()).expect_err("key missing");
        assert!(error.message.contains("OPENROUTER_API_KEY"));
    }
}
