//! Common imports for most gabble applications.

pub use crate::{
    gemini_conversation, gemini_provider, http_transport, image_message, image_prompt,
    integer_function, model_message, openrouter_conversation, uniform_safety_settings,
    user_message,
};
pub use crate::{gb_args, gb_messages, gb_msg};
pub use crate::{
    ChatError, ChatErrorKind, Conversation, FunctionArgs, FunctionDeclaration, FunctionOutput,
    FunctionRegistry, GabbleConfig, GeminiModel, GenerationConfig, HarmBlockThreshold,
    HarmCategory, ImagePrompt, Message, ModelProvider, OpenRouterConversation, Part,
    ProviderError, Role, Schema, ToolError, json_output, parse_arg, required_arg,
};
