//! Provider-agnostic conversation, function, and request/response model types.
//!
//! ```rust
//! use gprovider::{Message, ModelRequest, Part, ProviderErrorKind, Role};
//!
//! let ok = ModelRequest::builder()
//!     .message(Message::user("Summarize this diff"))
//!     .build();
//! assert!(ok.is_ok());
//!
//! let err = ModelRequest::builder().build().err().expect("empty contents should fail");
//! assert_eq!(err.kind, ProviderErrorKind::InvalidRequest);
//!
//! let reply = Message::new(Role::Model, vec![Part::text("done")]);
//! assert_eq!(reply.first_text(), Some("done"));
//! ```

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use gcommon::GenerationConfig;
use serde_json::{Map, Value};

use crate::{ProviderError, SafetyRating, SafetySetting};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    Gemini,
    OpenRouter,
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let id = match self {
            Self::Gemini => "gemini",
            Self::OpenRouter => "openrouter",
        };

        f.write_str(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Model,
    Function,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
            Self::Function => "function",
        }
    }

    /// Parses a wire role, accepting the OpenAI-style spellings as aliases.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Self::User),
            "model" | "assistant" => Some(Self::Model),
            "function" | "tool" => Some(Self::Function),
            _ => None,
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments the model supplied for a function call, always as raw strings.
pub type FunctionArgs = BTreeMap<String, String>;

/// Result payload a function handler hands back to the model.
pub type FunctionOutput = Map<String, Value>;

/// Inline binary content, base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub mime_type: String,
    pub data: String,
}

impl Blob {
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    pub fn png(bytes: &[u8]) -> Self {
        Self::from_bytes("image/png", bytes)
    }

    pub fn decode(&self) -> Result<Vec<u8>, ProviderError> {
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|err| ProviderError::decode(format!("inline data is not base64: {err}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: String,
    pub args: FunctionArgs,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: FunctionArgs::new(),
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionResponse {
    pub name: String,
    pub response: FunctionOutput,
}

impl FunctionResponse {
    pub fn new(name: impl Into<String>, response: FunctionOutput) -> Self {
        Self {
            name: name.into(),
            response,
        }
    }
}

/// One atomic unit of message content.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    InlineData(Blob),
    FunctionCall(FunctionCall),
    FunctionResponse(FunctionResponse),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            Self::FunctionCall(call) => Some(call),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub parts: Vec<Part>,
}

impl Message {
    pub fn new(role: Role, parts: Vec<Part>) -> Self {
        Self { role, parts }
    }

    pub fn text(role: Role, text: impl Into<String>) -> Self {
        Self::new(role, vec![Part::text(text)])
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::text(Role::User, text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::text(Role::Model, text)
    }

    pub fn function_call(call: FunctionCall) -> Self {
        Self::new(Role::Model, vec![Part::FunctionCall(call)])
    }

    pub fn function_response(response: FunctionResponse) -> Self {
        Self::new(Role::Function, vec![Part::FunctionResponse(response)])
    }

    pub fn first_part(&self) -> Option<&Part> {
        self.parts.first()
    }

    /// Text of the first part, if that part is text.
    pub fn first_text(&self) -> Option<&str> {
        self.first_part().and_then(Part::as_text)
    }

    /// Function call carried by the first part, if any. Later parts are not consulted.
    pub fn function_call_request(&self) -> Option<&FunctionCall> {
        self.first_part().and_then(Part::as_function_call)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl SchemaType {
    pub fn as_gemini_str(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Integer => "INTEGER",
            Self::Boolean => "BOOLEAN",
            Self::Array => "ARRAY",
            Self::Object => "OBJECT",
        }
    }

    pub fn as_json_schema_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "STRING" => Some(Self::String),
            "NUMBER" => Some(Self::Number),
            "INTEGER" => Some(Self::Integer),
            "BOOLEAN" => Some(Self::Boolean),
            "ARRAY" => Some(Self::Array),
            "OBJECT" => Some(Self::Object),
            _ => None,
        }
    }
}

/// Recursive parameter schema advertised with a function declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub schema_type: SchemaType,
    pub format: Option<String>,
    pub description: Option<String>,
    pub nullable: bool,
    pub enum_values: Vec<String>,
    pub properties: BTreeMap<String, Schema>,
    pub required: Vec<String>,
    pub items: Option<Box<Schema>>,
}

impl Schema {
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            format: None,
            description: None,
            nullable: false,
            enum_values: Vec::new(),
            properties: BTreeMap::new(),
            required: Vec::new(),
            items: None,
        }
    }

    pub fn string() -> Self {
        Self::new(SchemaType::String)
    }

    pub fn number() -> Self {
        Self::new(SchemaType::Number)
    }

    pub fn integer() -> Self {
        Self::new(SchemaType::Integer)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaType::Boolean)
    }

    pub fn object() -> Self {
        Self::new(SchemaType::Object)
    }

    pub fn array(items: Schema) -> Self {
        let mut schema = Self::new(SchemaType::Array);
        schema.items = Some(Box::new(items));
        schema
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    pub fn with_required_property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name.clone());
        }
        self.properties.insert(name, schema);
        self
    }

    /// Renders the schema as lower-case JSON Schema for OpenAI-compatible APIs.
    pub fn to_json_schema(&self) -> Value {
        let mut object = Map::new();
        object.insert(
            "type".to_string(),
            Value::String(self.schema_type.as_json_schema_str().to_string()),
        );
        if let Some(format) = &self.format {
            object.insert("format".to_string(), Value::String(format.clone()));
        }
        if let Some(description) = &self.description {
            object.insert("description".to_string(), Value::String(description.clone()));
        }
        if self.nullable {
            object.insert("nullable".to_string(), Value::Bool(true));
        }
        if !self.enum_values.is_empty() {
            object.insert(
                "enum".to_string(),
                Value::Array(self.enum_values.iter().cloned().map(Value::String).collect()),
            );
        }
        if !self.properties.is_empty() {
            let properties = self
                .properties
                .iter()
                .map(|(name, schema)| (name.clone(), schema.to_json_schema()))
                .collect::<Map<_, _>>();
            object.insert("properties".to_string(), Value::Object(properties));
        }
        if !self.required.is_empty() {
            object.insert(
                "required".to_string(),
                Value::Array(self.required.iter().cloned().map(Value::String).collect()),
            );
        }
        if let Some(items) = &self.items {
            object.insert("items".to_string(), items.to_json_schema());
        }

        Value::Object(object)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Option<Schema>,
}

impl FunctionDeclaration {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: None,
        }
    }

    pub fn with_parameters(mut self, parameters: Schema) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Stop,
    MaxTokens,
    Safety,
    Recitation,
    Unspecified,
    Other,
}

impl FinishReason {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("STOP") | Some("stop") => Self::Stop,
            Some("MAX_TOKENS") | Some("length") => Self::MaxTokens,
            Some("SAFETY") | Some("content_filter") => Self::Safety,
            Some("RECITATION") => Self::Recitation,
            None | Some("FINISH_REASON_UNSPECIFIED") => Self::Unspecified,
            Some(_) => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub candidates_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub content: Option<Message>,
    pub finish_reason: FinishReason,
    pub index: u32,
    pub safety_ratings: Vec<SafetyRating>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
    pub safety_ratings: Vec<SafetyRating>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelResponse {
    pub provider: ProviderId,
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage: TokenUsage,
}

impl ModelResponse {
    pub fn first_candidate(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Content of the first candidate; the only one a conversation consumes.
    pub fn into_first_content(self) -> Option<Message> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelRequest {
    pub contents: Vec<Message>,
    pub functions: Vec<FunctionDeclaration>,
    pub safety_settings: Vec<SafetySetting>,
    pub generation_config: GenerationConfig,
}

impl ModelRequest {
    pub fn builder() -> ModelRequestBuilder {
        ModelRequestBuilder::new()
    }

    pub fn new(contents: Vec<Message>) -> Self {
        Self {
            contents,
            functions: Vec::new(),
            safety_settings: Vec::new(),
            generation_config: GenerationConfig::default(),
        }
    }

    pub fn with_functions(mut self, functions: Vec<FunctionDeclaration>) -> Self {
        self.functions = functions;
        self
    }

    pub fn with_safety_settings(mut self, safety_settings: Vec<SafetySetting>) -> Self {
        self.safety_settings = safety_settings;
        self
    }

    pub fn with_generation_config(mut self, generation_config: GenerationConfig) -> Self {
        self.generation_config = generation_config;
        self
    }

    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.contents.is_empty() {
            return Err(ProviderError::invalid_request(
                "at least one message is required",
            ));
        }

        if self.contents.iter().any(|message| message.parts.is_empty()) {
            return Err(ProviderError::invalid_request(
                "every message must carry at least one part",
            ));
        }

        if self
            .functions
            .iter()
            .any(|function| function.name.trim().is_empty())
        {
            return Err(ProviderError::invalid_request(
                "function declarations must be named",
            ));
        }

        let config = &self.generation_config;
        if let Some(max_output_tokens) = config.max_output_tokens
            && max_output_tokens == 0
        {
            return Err(ProviderError::invalid_request(
                "max_output_tokens must be greater than zero",
            ));
        }

        if let Some(temperature) = config.temperature
            && !(0.0..=2.0).contains(&temperature)
        {
            return Err(ProviderError::invalid_request(
                "temperature must be in the inclusive range 0.0..=2.0",
            ));
        }

        if let Some(top_p) = config.top_p
            && !(0.0..=1.0).contains(&top_p)
        {
            return Err(ProviderError::invalid_request(
                "top_p must be in the inclusive range 0.0..=1.0",
            ));
        }

        if let Some(top_k) = config.top_k
            && top_k == 0
        {
            return Err(ProviderError::invalid_request(
                "top_k must be greater than zero",
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModelRequestBuilder {
    contents: Vec<Message>,
    functions: Vec<FunctionDeclaration>,
    safety_settings: Vec<SafetySetting>,
    generation_config: GenerationConfig,
}

impl ModelRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: Message) -> Self {
        self.contents.push(message);
        self
    }

    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.contents.extend(messages);
        self
    }

    pub fn function(mut self, function: FunctionDeclaration) -> Self {
        self.functions.push(function);
        self
    }

    pub fn functions(mut self, functions: Vec<FunctionDeclaration>) -> Self {
        self.functions = functions;
        self
    }

    pub fn safety_settings(mut self, safety_settings: Vec<SafetySetting>) -> Self {
        self.safety_settings = safety_settings;
        self
    }

    pub fn generation_config(mut self, generation_config: GenerationConfig) -> Self {
        self.generation_config = generation_config;
        self
    }

    pub fn build(self) -> Result<ModelRequest, ProviderError> {
        let request = ModelRequest {
            contents: self.contents,
            functions: self.functions,
            safety_settings: self.safety_settings,
            generation_config: self.generation_config,
        };

        request.validate()?;
        Ok(request)
    }
}
