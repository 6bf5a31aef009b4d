//! Conversation layer for the gabble client: the multi-turn Gemini engine with
//! its automatic function-call loop, single-shot image prompts, and
//! OpenRouter prompt turns.

mod conversation;
mod error;
mod image;
mod openrouter;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatTurnResult, Conversation, ConversationBuilder,
        ConversationPolicy, ImagePrompt, OpenRouterConversation,
    };
}

pub use conversation::{ChatTurnResult, Conversation, ConversationBuilder, ConversationPolicy};
pub use error::{ChatError, ChatErrorKind};
pub use image::ImagePrompt;
pub use openrouter::{CHOICE_SEPARATOR, OpenRouterConversation};
