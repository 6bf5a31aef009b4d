mod client;
mod tests;
mod types;

pub use client::{OPENROUTER_URL, OpenRouterClient};
pub use types::{
    ChoiceMessage, ContentPart, FunctionDescription, ImageUrl, OpenRouterChoice,
    OpenRouterRequest, OpenRouterResponse, OpenRouterTool, OpenRouterToolCall, OpenRouterUsage,
    RequestMessage, ResponseFormat, ResponseMessage, ToolFunctionCall,
};
