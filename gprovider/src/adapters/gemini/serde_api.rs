//! Gemini HTTP payload serde models and conversion helpers.

use std::collections::BTreeMap;

use gcommon::GenerationConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    Blob, Candidate, FinishReason, FunctionArgs, FunctionCall, FunctionDeclaration,
    FunctionResponse, Message, ModelRequest, ModelResponse, Part, PromptFeedback, ProviderError,
    ProviderId, Role, SafetyRating, SafetySetting, Schema, TokenUsage,
};

pub(crate) fn build_api_request(request: ModelRequest) -> GeminiApiRequest {
    let tools = if request.functions.is_empty() {
        Vec::new()
    } else {
        vec![GeminiApiTool {
            function_declarations: request
                .functions
                .into_iter()
                .map(GeminiApiFunctionDeclaration::from)
                .collect(),
        }]
    };

    let generation_config = if request.generation_config.is_empty() {
        None
    } else {
        Some(GeminiApiGenerationConfig::from(request.generation_config))
    };

    GeminiApiRequest {
        contents: request
            .contents
            .into_iter()
            .map(GeminiApiContent::from)
            .collect(),
        tools,
        safety_settings: request
            .safety_settings
            .into_iter()
            .map(GeminiApiSafetySetting::from)
            .collect(),
        generation_config,
    }
}

pub(crate) fn build_count_tokens_request(contents: Vec<Message>) -> GeminiApiCountTokensRequest {
    GeminiApiCountTokensRequest {
        contents: contents.into_iter().map(GeminiApiContent::from).collect(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiRequest {
    pub contents: Vec<GeminiApiContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<GeminiApiTool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub safety_settings: Vec<GeminiApiSafetySetting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GeminiApiGenerationConfig>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiApiCountTokensRequest {
    pub contents: Vec<GeminiApiContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiCountTokensResponse {
    #[serde(default)]
    pub total_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GeminiApiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiApiPart>,
}

impl From<Message> for GeminiApiContent {
    fn from(value: Message) -> Self {
        Self {
            role: Some(value.role.as_str().to_string()),
            parts: value.parts.into_iter().map(GeminiApiPart::from).collect(),
        }
    }
}

impl TryFrom<GeminiApiContent> for Message {
    type Error = ProviderError;

    fn try_from(value: GeminiApiContent) -> Result<Self, Self::Error> {
        let role = match value.role.as_deref() {
            None | Some("") => Role::Model,
            Some(role) => Role::parse(role)
                .ok_or_else(|| ProviderError::decode(format!("unknown content role `{role}`")))?,
        };

        let parts = value
            .parts
            .into_iter()
            .filter_map(GeminiApiPart::into_part)
            .collect();

        Ok(Message::new(role, parts))
    }
}

/// Wire part. Exactly one field is populated on encode; decoding tolerates
/// parts this crate does not model by dropping them.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<GeminiApiBlob>,
    #[serde(default, alias = "function_call", skip_serializing_if = "Option::is_none")]
    pub function_call: Option<GeminiApiFunctionCall>,
    #[serde(
        default,
        alias = "function_response",
        skip_serializing_if = "Option::is_none"
    )]
    pub function_response: Option<GeminiApiFunctionResponse>,
}

impl GeminiApiPart {
    pub(crate) fn into_part(self) -> Option<Part> {
        if let Some(text) = self.text {
            return Some(Part::Text(text));
        }
        if let Some(blob) = self.inline_data {
            return Some(Part::InlineData(Blob::new(blob.mime_type, blob.data)));
        }
        if let Some(call) = self.function_call {
            return Some(Part::FunctionCall(FunctionCall {
                name: call.name,
                args: args_from_wire(call.args),
            }));
        }
        if let Some(response) = self.function_response {
            return Some(Part::FunctionResponse(FunctionResponse::new(
                response.name,
                response.response,
            )));
        }

        tracing::debug!("dropping unsupported Gemini content part");
        None
    }
}

impl From<Part> for GeminiApiPart {
    fn from(value: Part) -> Self {
        match value {
            Part::Text(text) => Self {
                text: Some(text),
                ..Self::default()
            },
            Part::InlineData(blob) => Self {
                inline_data: Some(GeminiApiBlob {
                    mime_type: blob.mime_type,
                    data: blob.data,
                }),
                ..Self::default()
            },
            Part::FunctionCall(call) => Self {
                function_call: Some(GeminiApiFunctionCall {
                    name: call.name,
                    args: call
                        .args
                        .into_iter()
                        .map(|(key, value)| (key, Value::String(value)))
                        .collect(),
                }),
                ..Self::default()
            },
            Part::FunctionResponse(response) => Self {
                function_response: Some(GeminiApiFunctionResponse {
                    name: response.name,
                    response: response.response,
                }),
                ..Self::default()
            },
        }
    }
}

/// Flattens wire arguments to strings; non-string values keep their JSON text.
pub(crate) fn args_from_wire(args: Map<String, Value>) -> FunctionArgs {
    args.into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(text) => text,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect()
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiBlob {
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GeminiApiFunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GeminiApiFunctionResponse {
    pub name: String,
    #[serde(default)]
    pub response: Map<String, Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiTool {
    pub function_declarations: Vec<GeminiApiFunctionDeclaration>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiApiFunctionDeclaration {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<GeminiApiSchema>,
}

impl From<FunctionDeclaration> for GeminiApiFunctionDeclaration {
    fn from(value: FunctionDeclaration) -> Self {
        Self {
            name: value.name,
            description: value.description,
            parameters: value.parameters.map(GeminiApiSchema::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiApiSchema {
    #[serde(rename = "type")]
    pub schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, GeminiApiSchema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<GeminiApiSchema>>,
}

impl From<Schema> for GeminiApiSchema {
    fn from(value: Schema) -> Self {
        Self {
            schema_type: value.schema_type.as_gemini_str(),
            format: value.format,
            description: value.description,
            nullable: value.nullable.then_some(true),
            enum_values: value.enum_values,
            properties: value
                .properties
                .into_iter()
                .map(|(name, schema)| (name, Self::from(schema)))
                .collect(),
            required: value.required,
            items: value.items.map(|items| Box::new(Self::from(*items))),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GeminiApiSafetySetting {
    pub category: &'static str,
    pub threshold: &'static str,
}

impl From<SafetySetting> for GeminiApiSafetySetting {
    fn from(value: SafetySetting) -> Self {
        Self {
            category: value.category.as_str(),
            threshold: value.threshold.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiGenerationConfig {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stop_sequences: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl From<GenerationConfig> for GeminiApiGenerationConfig {
    fn from(value: GenerationConfig) -> Self {
        Self {
            stop_sequences: value.stop_sequences,
            temperature: value.temperature,
            max_output_tokens: value.max_output_tokens,
            top_p: value.top_p,
            top_k: value.top_k,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiApiCandidate>,
    #[serde(default)]
    pub prompt_feedback: Option<GeminiApiPromptFeedback>,
    #[serde(default)]
    pub usage_metadata: Option<GeminiApiUsage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiCandidate {
    #[serde(default)]
    pub content: Option<GeminiApiContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub index: Option<u32>,
    #[serde(default)]
    pub safety_ratings: Vec<GeminiApiSafetyRating>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiSafetyRating {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub probability: String,
    #[serde(default)]
    pub blocked: bool,
}

impl From<GeminiApiSafetyRating> for SafetyRating {
    fn from(value: GeminiApiSafetyRating) -> Self {
        Self {
            category: value.category,
            probability: value.probability,
            blocked: value.blocked,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiPromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
    #[serde(default)]
    pub safety_ratings: Vec<GeminiApiSafetyRating>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiApiUsage {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

impl TryFrom<GeminiApiResponse> for ModelResponse {
    type Error = ProviderError;

    fn try_from(value: GeminiApiResponse) -> Result<Self, Self::Error> {
        let candidates = value
            .candidates
            .into_iter()
            .enumerate()
            .map(|(position, candidate)| {
                let content = candidate.content.map(Message::try_from).transpose()?;
                Ok(Candidate {
                    content,
                    finish_reason: FinishReason::parse(candidate.finish_reason.as_deref()),
                    index: candidate.index.unwrap_or(position as u32),
                    safety_ratings: candidate
                        .safety_ratings
                        .into_iter()
                        .map(SafetyRating::from)
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>, ProviderError>>()?;

        let prompt_feedback = value.prompt_feedback.map(|feedback| PromptFeedback {
            block_reason: feedback.block_reason,
            safety_ratings: feedback
                .safety_ratings
                .into_iter()
                .map(SafetyRating::from)
                .collect(),
        });

        let usage = value.usage_metadata.unwrap_or_default();

        Ok(Self {
            provider: ProviderId::Gemini,
            candidates,
            prompt_feedback,
            usage: TokenUsage {
                prompt_tokens: usage.prompt_token_count,
                candidates_tokens: usage.candidates_token_count,
                total_tokens: usage.total_token_count,
            },
        })
    }
}
