//! Gemini transport trait and the HTTP implementation over `HttpTransport`.

use crate::{
    HttpTransport, Message, ModelRequest, ModelResponse, ProviderError, ProviderFuture,
    SecretString,
};

use super::serde_api::{
    GeminiApiCountTokensResponse, GeminiApiResponse, build_api_request,
    build_count_tokens_request,
};
use super::types::{GEMINI_BASE_URL, GeminiMethod, GeminiModel};

pub trait GeminiTransport: Send + Sync + std::fmt::Debug {
    fn generate_content<'a>(
        &'a self,
        model: &'a GeminiModel,
        api_key: &'a SecretString,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;

    fn count_tokens<'a>(
        &'a self,
        model: &'a GeminiModel,
        api_key: &'a SecretString,
        contents: Vec<Message>,
    ) -> ProviderFuture<'a, Result<u32, ProviderError>>;
}

#[derive(Debug, Clone)]
pub struct GeminiHttpTransport {
    http: HttpTransport,
    base_url: String,
}

impl GeminiHttpTransport {
    pub fn new(http: HttpTransport) -> Self {
        Self {
            http,
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn endpoint(&self, model: &GeminiModel, method: GeminiMethod) -> String {
        format!(
            "{}/models/{}:{}",
            self.base_url.trim_end_matches('/'),
            model.as_str(),
            method.as_str()
        )
    }
}

impl GeminiTransport for GeminiHttpTransport {
    fn generate_content<'a>(
        &'a self,
        model: &'a GeminiModel,
        api_key: &'a SecretString,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            let api_request = build_api_request(request);
            let url = self.endpoint(model, GeminiMethod::GenerateContent);
            let parsed: GeminiApiResponse = self
                .http
                .post_json(&url, &[("key", api_key.expose())], &api_request)
                .await?;

            ModelResponse::try_from(parsed)
        })
    }

    fn count_tokens<'a>(
        &'a self,
        model: &'a GeminiModel,
        api_key: &'a SecretString,
        contents: Vec<Message>,
    ) -> ProviderFuture<'a, Result<u32, ProviderError>> {
        Box::pin(async move {
            let api_request = build_count_tokens_request(contents);
            let url = self.endpoint(model, GeminiMethod::CountTokens);
            let parsed: GeminiApiCountTokensResponse = self
                .http
                .post_json(&url, &[("key", api_key.expose())], &api_request)
                .await?;

            Ok(parsed.total_tokens)
        })
    }
}
