//! OpenRouter chat-completions client over `HttpTransport`.

use std::sync::Arc;
use std::time::Instant;

use crate::{
    HttpTransport, NoopOperationHooks, ProviderError, ProviderId, ProviderOperationHooks,
    SecretString, TransportConfig,
};

use super::types::{OpenRouterRequest, OpenRouterResponse};

pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

#[derive(Clone)]
pub struct OpenRouterClient {
    http: HttpTransport,
    url: String,
    hooks: Arc<dyn ProviderOperationHooks>,
}

impl OpenRouterClient {
    /// Wraps a transport that already carries the `Authorization` default header.
    pub fn new(http: HttpTransport) -> Self {
        Self {
            http,
            url: OPENROUTER_URL.to_string(),
            hooks: Arc::new(NoopOperationHooks),
        }
    }

    pub fn from_api_key(
        api_key: &SecretString,
        config: TransportConfig,
    ) -> Result<Self, ProviderError> {
        if api_key.is_empty() {
            return Err(ProviderError::authentication(
                "OpenRouter api key must not be empty",
            ));
        }

        let http = HttpTransport::new(config.with_bearer_auth(api_key.expose()))?;
        Ok(Self::new(http))
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub async fn complete(
        &self,
        request: &OpenRouterRequest,
    ) -> Result<OpenRouterResponse, ProviderError> {
        const OPERATION: &str = "chat_completions";

        self.hooks.on_request_start(ProviderId::OpenRouter, OPERATION);
        let started = Instant::now();

        let result = if request.model.trim().is_empty() {
            Err(ProviderError::invalid_request("model must not be empty"))
        } else if request.prompt.is_none() && request.messages.is_none() {
            Err(ProviderError::invalid_request(
                "either a prompt or messages are required",
            ))
        } else {
            self.http.post_json(&self.url, &[], request).await
        };

        match &result {
            Ok(_) => self
                .hooks
                .on_success(ProviderId::OpenRouter, OPERATION, started.elapsed()),
            Err(error) => self.hooks.on_failure(
                ProviderId::OpenRouter,
                OPERATION,
                started.elapsed(),
                error,
            ),
        }

        result
    }
}

impl std::fmt::Debug for OpenRouterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterClient")
            .field("http", &self.http)
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}
