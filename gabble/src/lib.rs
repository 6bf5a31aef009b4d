//! Gemini and OpenRouter conversation client.
//!
//! This crate is the single dependency for most applications. It re-exports
//! the workspace crates and adds configuration loading, runtime constructors,
//! and a few convenience helpers and macros.
//!
//! ```rust,no_run
//! use gabble::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GabbleConfig::from_env()?;
//! let mut conversation = gemini_conversation(&config)?;
//!
//! println!("{}", conversation.send("Write a short logic puzzle.").await?);
//! println!("{}", conversation.send("Now solve it step by step.").await?);
//! # Ok(())
//! # }
//! ```

mod macros;

pub mod config;
pub mod prelude;
pub mod runtime;
pub mod util;

pub use gchat;
pub use gcommon;
pub use gobserve;
pub use gprovider;
pub use gtooling;

pub use gchat::{
    CHOICE_SEPARATOR, ChatError, ChatErrorKind, ChatTurnResult, Conversation,
    ConversationBuilder, ConversationPolicy, ImagePrompt, OpenRouterConversation,
};
pub use gcommon::{BoxFuture, GenerationConfig};
pub use gobserve::{
    MetricsObservabilityHooks, SafeFunctionHooks, SafeProviderHooks, TracingObservabilityHooks,
};
pub use gprovider::{
    Blob, FinishReason, FunctionArgs, FunctionCall, FunctionDeclaration, FunctionOutput,
    FunctionResponse, GeminiModel, GeminiProvider, HarmBlockThreshold, HarmCategory,
    HttpTransport, Message, ModelProvider, ModelRequest, ModelResponse, OpenRouterClient, Part,
    ProviderError, ProviderErrorKind, ProviderId, Role, SafetySettings, Schema, SecretString,
    TokenUsage, TransportConfig,
};
pub use gtooling::{
    DefaultFunctionRuntime, FnFunction, Function, FunctionRegistry, FunctionRuntime, ToolError,
    ToolErrorKind, json_output, optional_arg, parse_arg, required_arg,
};

pub use config::GabbleConfig;
pub use runtime::{
    gemini_conversation, gemini_provider, gemini_provider_for, http_transport, image_prompt,
    openrouter_conversation,
};
pub use util::{
    image_message, integer_function, model_message, uniform_safety_settings, user_message,
};

#[cfg(test)]
mod tests {
    use crate::Role;

    #[test]
    fn gb_msg_macro_creates_expected_message() {
        let message = crate::gb_msg!(user => "hello");
        assert_eq!(message.role, Role::User);
        assert_eq!(message.first_text(), Some("hello"));
    }

    #[test]
    fn gb_messages_macro_builds_message_vector() {
        let messages = crate::gb_messages![
            user => "ping",
            model => "pong",
            user => "again",
        ];

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::Model);
    }

    #[test]
    fn gb_args_macro_stringifies_values() {
        let args = crate::gb_args! { "day" => 9, "month" => "3" };
        assert_eq!(crate::parse_arg::<u32>(&args, "day"), Ok(9));
        assert_eq!(args.len(), 2);
    }
}
