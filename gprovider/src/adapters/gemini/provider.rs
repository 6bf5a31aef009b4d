//! Gemini provider implementation over transport and shared models.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::{
    HttpTransport, Message, ModelProvider, ModelRequest, ModelResponse, NoopOperationHooks,
    ProviderError, ProviderFuture, ProviderId, ProviderOperationHooks, SecretString,
};

use super::transport::{GeminiHttpTransport, GeminiTransport};
use super::types::GeminiModel;

#[derive(Clone)]
pub struct GeminiProvider {
    transport: Arc<dyn GeminiTransport>,
    api_key: SecretString,
    model: GeminiModel,
    hooks: Arc<dyn ProviderOperationHooks>,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<SecretString>, transport: Arc<dyn GeminiTransport>) -> Self {
        Self {
            transport,
            api_key: api_key.into(),
            model: GeminiModel::default(),
            hooks: Arc::new(NoopOperationHooks),
        }
    }

    /// Provider talking to the public Gemini endpoint through `http`.
    pub fn over_http(api_key: impl Into<SecretString>, http: HttpTransport) -> Self {
        Self::new(api_key, Arc::new(GeminiHttpTransport::new(http)))
    }

    pub fn with_model(mut self, model: GeminiModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn model(&self) -> &GeminiModel {
        &self.model
    }

    fn ensure_api_key(&self) -> Result<(), ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::authentication(
                "Gemini api key must not be empty",
            ));
        }

        Ok(())
    }

    async fn observe<T, F>(&self, operation: &str, future: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        self.hooks.on_request_start(ProviderId::Gemini, operation);
        let started = Instant::now();
        let result = future.await;

        match &result {
            Ok(_) => self
                .hooks
                .on_success(ProviderId::Gemini, operation, started.elapsed()),
            Err(error) => {
                self.hooks
                    .on_failure(ProviderId::Gemini, operation, started.elapsed(), error)
            }
        }

        result
    }
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("transport", &self.transport)
            .field("api_key", &self.api_key)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl ModelProvider for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn generate_content<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(self.observe("generate_content", async move {
            request.validate()?;
            self.ensure_api_key()?;
            self.transport
                .generate_content(&self.model, &self.api_key, request)
                .await
        }))
    }

    fn count_tokens<'a>(
        &'a self,
        contents: Vec<Message>,
    ) -> ProviderFuture<'a, Result<u32, ProviderError>> {
        Box::pin(self.observe("count_tokens", async move {
            if contents.is_empty() {
                return Err(ProviderError::invalid_request(
                    "at least one message is required",
                ));
            }
            self.ensure_api_key()?;
            self.transport
                .count_tokens(&self.model, &self.api_key, contents)
                .await
        }))
    }
}
