use gcommon::BoxFuture;

use crate::{Message, ModelRequest, ModelResponse, ProviderError, ProviderId};

pub type ProviderFuture<'a, T> = BoxFuture<'a, T>;

/// A generative backend addressed by the conversation engine.
pub trait ModelProvider: Send + Sync {
    fn id(&self) -> ProviderId;

    fn generate_content<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>>;

    /// Returns the total token count the backend assigns to `contents`.
    fn count_tokens<'a>(
        &'a self,
        contents: Vec<Message>,
    ) -> ProviderFuture<'a, Result<u32, ProviderError>>;
}
