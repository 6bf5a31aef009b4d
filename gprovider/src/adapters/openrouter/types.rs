//! OpenRouter chat-completions payloads.
//!
//! Request fields left as `None` are omitted from the wire. Response decoding
//! is lenient: every field defaults when missing and unknown fields are ignored.

use std::collections::BTreeMap;

use gcommon::GenerationConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::FunctionDeclaration;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OpenRouterRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<RequestMessage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repetition_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<OpenRouterTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<BTreeMap<u32, i32>>,
}

impl OpenRouterRequest {
    pub fn prompt(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: Some(prompt.into()),
            ..Self::default()
        }
    }

    pub fn chat(model: impl Into<String>, messages: Vec<RequestMessage>) -> Self {
        Self {
            model: model.into(),
            messages: Some(messages),
            ..Self::default()
        }
    }

    /// Copies every set sampling override; unset fields stay off the wire.
    pub fn with_generation_config(mut self, config: &GenerationConfig) -> Self {
        if !config.stop_sequences.is_empty() {
            self.stop = Some(config.stop_sequences.clone());
        }
        self.max_tokens = config.max_output_tokens.or(self.max_tokens);
        self.temperature = config.temperature.or(self.temperature);
        self.top_p = config.top_p.or(self.top_p);
        self.top_k = config.top_k.or(self.top_k);
        self
    }

    pub fn with_tools(mut self, functions: &[FunctionDeclaration]) -> Self {
        if functions.is_empty() {
            self.tools = None;
        } else {
            self.tools = Some(functions.iter().map(OpenRouterTool::from).collect());
        }
        self
    }

    pub fn with_response_format(mut self, format: impl Into<String>) -> Self {
        self.response_format = Some(ResponseFormat {
            kind: format.into(),
        });
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<ContentPart>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RequestMessage {
    pub fn new(role: impl Into<String>, content: Vec<ContentPart>) -> Self {
        Self {
            role: role.into(),
            content: Some(content),
            name: None,
        }
    }

    pub fn user_text(text: impl Into<String>) -> Self {
        Self::new("user", vec![ContentPart::text(text)])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl {
                url: url.into(),
                detail: None,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenRouterTool {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionDescription,
}

impl From<&FunctionDeclaration> for OpenRouterTool {
    fn from(value: &FunctionDeclaration) -> Self {
        let parameters = value
            .parameters
            .as_ref()
            .map(|schema| schema.to_json_schema())
            .unwrap_or_else(|| serde_json::json!({"type": "object", "properties": {}}));

        Self {
            kind: "function".to_string(),
            function: FunctionDescription {
                name: value.name.clone(),
                description: value.description.clone(),
                parameters,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDescription {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct OpenRouterResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub choices: Vec<OpenRouterChoice>,
    #[serde(default)]
    pub created: i64,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub usage: Option<OpenRouterUsage>,
}

impl OpenRouterResponse {
    /// Each choice's text, with an empty string for choices that carry none.
    pub fn choice_texts(&self) -> Vec<String> {
        self.choices
            .iter()
            .map(|choice| choice.text_content().unwrap_or_default())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct OpenRouterChoice {
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
    #[serde(default)]
    pub delta: Option<ResponseMessage>,
    #[serde(default)]
    pub code: Option<i64>,
}

impl OpenRouterChoice {
    /// Text in precedence order: `text`, `message.content`, `delta.content`,
    /// then an error string sent where the message object was expected.
    pub fn text_content(&self) -> Option<String> {
        self.text
            .clone()
            .or_else(|| self.response_message().and_then(|message| message.content.clone()))
            .or_else(|| self.delta.as_ref().and_then(|delta| delta.content.clone()))
            .or_else(|| self.error_message())
    }

    pub fn response_message(&self) -> Option<&ResponseMessage> {
        match &self.message {
            Some(ChoiceMessage::Message(message)) => Some(message),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        match &self.message {
            Some(ChoiceMessage::Error(message)) => Some(message.clone()),
            Some(ChoiceMessage::Other(value)) => match value {
                Value::Bool(_) | Value::Number(_) => Some(value.to_string()),
                _ => None,
            },
            _ => None,
        }
    }
}

/// `message` is normally an object but some upstreams put a bare error string there.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChoiceMessage {
    Message(ResponseMessage),
    Error(String),
    Other(Value),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub tool_calls: Option<Vec<OpenRouterToolCall>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OpenRouterToolCall {
    #[serde(default)]
    pub id: String,
    pub function: ToolFunctionCall,
    #[serde(rename = "type", default = "default_tool_kind")]
    pub kind: String,
}

fn default_tool_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ToolFunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct OpenRouterUsage {
    #[serde(default)]
    pub completion_tokens: Option<u32>,
    #[serde(default)]
    pub prompt_tokens: Option<u32>,
    #[serde(default)]
    pub total_tokens: Option<u32>,
    #[serde(default)]
    pub total_cost: Option<f64>,
}
