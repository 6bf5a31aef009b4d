//! Common `gprovider` imports for downstream crates.

pub use crate::{
    Blob, FunctionArgs, FunctionCall, FunctionDeclaration, FunctionOutput, FunctionResponse,
    HarmBlockThreshold, HarmCategory, HttpTransport, Message, ModelProvider, ModelRequest,
    ModelResponse, NoopOperationHooks, Part, ProviderError, ProviderErrorKind, ProviderId,
    ProviderOperationHooks, Role, SafetySettings, Schema, SecretString, TransportConfig,
};
pub use gcommon::{BoxFuture, GenerationConfig};
