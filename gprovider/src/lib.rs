//! Provider layer for the gabble conversation client: the wire-neutral message
//! model, the shared HTTP transport, and the Gemini and OpenRouter adapters.
//!
//! ```rust
//! use gprovider::prelude::*;
//!
//! let request = ModelRequest::builder()
//!     .message(Message::user("ping"))
//!     .build()
//!     .expect("request should validate");
//!
//! assert_eq!(request.contents[0].role, Role::User);
//! ```

pub mod adapters;
pub mod credentials;
pub mod error;
pub mod hooks;
pub mod model;
pub mod prelude;
pub mod provider;
pub mod safety;
pub mod transport;

pub use credentials::SecretString;
pub use error::{HttpFailure, ProviderError, ProviderErrorKind};
pub use hooks::{NoopOperationHooks, ProviderOperationHooks};
pub use model::{
    Blob, Candidate, FinishReason, FunctionArgs, FunctionCall, FunctionDeclaration,
    FunctionOutput, FunctionResponse, Message, ModelRequest, ModelRequestBuilder, ModelResponse,
    Part, PromptFeedback, ProviderId, Role, Schema, SchemaType, TokenUsage,
};
pub use provider::{ModelProvider, ProviderFuture};
pub use safety::{
    HarmBlockThreshold, HarmCategory, SafetyRating, SafetySetting, SafetySettings,
};
pub use transport::{DefaultHeader, HttpTransport, TransportConfig};

#[cfg(feature = "provider-gemini")]
pub use adapters::gemini::{GeminiHttpTransport, GeminiModel, GeminiProvider, GeminiTransport};

#[cfg(feature = "provider-openrouter")]
pub use adapters::openrouter::{OpenRouterClient, OpenRouterRequest, OpenRouterResponse};
