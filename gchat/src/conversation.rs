//! Multi-turn conversation engine with an automatic function-call loop.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use gchat::Conversation;
//! use gprovider::{GeminiProvider, HttpTransport, TransportConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let http = HttpTransport::new(TransportConfig::default())?;
//! let provider = GeminiProvider::over_http("api-key", http);
//! let mut conversation = Conversation::new(Arc::new(provider));
//!
//! let reply = conversation.send("Hello!").await?;
//! println!("{reply}");
//! assert_eq!(conversation.history().len(), 2);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use gcommon::GenerationConfig;
use gprovider::{
    FinishReason, HarmBlockThreshold, HarmCategory, Message, ModelProvider, ModelRequest,
    ModelResponse, Role, SafetySetting, SafetySettings, TokenUsage,
};
use gtooling::{DefaultFunctionRuntime, FunctionRegistry, FunctionRuntime};

use crate::ChatError;

/// Bounds applied to every turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversationPolicy {
    max_round_trips: usize,
}

impl Default for ConversationPolicy {
    fn default() -> Self {
        Self { max_round_trips: 10 }
    }
}

impl ConversationPolicy {
    /// Values below one are raised to one.
    pub fn with_max_round_trips(mut self, max_round_trips: usize) -> Self {
        self.max_round_trips = max_round_trips.max(1);
        self
    }

    pub fn max_round_trips(&self) -> usize {
        self.max_round_trips
    }
}

/// Outcome of one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurnResult {
    pub text: String,
    pub round_trips: usize,
    pub messages_appended: usize,
    pub finish_reason: FinishReason,
    pub usage: TokenUsage,
}

pub struct Conversation {
    provider: Arc<dyn ModelProvider>,
    runtime: Arc<dyn FunctionRuntime>,
    functions: FunctionRegistry,
    safety_settings: SafetySettings,
    generation_config: GenerationConfig,
    policy: ConversationPolicy,
    history: Vec<Message>,
}

impl Conversation {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self::builder(provider).build()
    }

    pub fn builder(provider: Arc<dyn ModelProvider>) -> ConversationBuilder {
        ConversationBuilder::new(provider)
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn into_history(self) -> Vec<Message> {
        self.history
    }

    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    pub fn functions_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.functions
    }

    pub fn safety_settings(&self) -> &SafetySettings {
        &self.safety_settings
    }

    pub fn safety_settings_mut(&mut self) -> &mut SafetySettings {
        &mut self.safety_settings
    }

    pub fn set_safety_setting(&mut self, category: HarmCategory, threshold: HarmBlockThreshold) {
        self.safety_settings.insert(category, threshold);
    }

    pub fn generation_config(&self) -> &GenerationConfig {
        &self.generation_config
    }

    pub fn set_generation_config(&mut self, generation_config: GenerationConfig) {
        self.generation_config = generation_config;
    }

    pub fn policy(&self) -> ConversationPolicy {
        self.policy
    }

    /// Sends `text` as a user message and returns the model's final text.
    ///
    /// Messages appended before a failure stay in the history.
    pub async fn send(&mut self, text: impl Into<String>) -> Result<String, ChatError> {
        self.send_turn(text).await.map(|turn| turn.text)
    }

    /// Like [`Conversation::send`] for a caller-built user message, e.g. text plus an image.
    pub async fn send_message(&mut self, message: Message) -> Result<String, ChatError> {
        if message.role != Role::User {
            return Err(ChatError::invalid_request(
                "conversation turns must start with a user message",
            ));
        }
        if message.parts.is_empty() {
            return Err(ChatError::invalid_request(
                "user message must carry at least one part",
            ));
        }

        self.run_turn(message).await.map(|turn| turn.text)
    }

    pub async fn send_turn(&mut self, text: impl Into<String>) -> Result<ChatTurnResult, ChatError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ChatError::invalid_request("user input must not be empty"));
        }

        self.run_turn(Message::user(text)).await
    }

    /// Token cost of the history plus `text` as the next user message.
    pub async fn count_tokens(&self, text: impl Into<String>) -> Result<u32, ChatError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ChatError::invalid_request("user input must not be empty"));
        }

        let mut contents = self.history.clone();
        contents.push(Message::user(text));
        Ok(self.provider.count_tokens(contents).await?)
    }

    async fn run_turn(&mut self, message: Message) -> Result<ChatTurnResult, ChatError> {
        let starting_len = self.history.len();
        let max_round_trips = self.policy.max_round_trips();

        // A request rejected locally must not leave the user message behind.
        let mut contents = self.history.clone();
        contents.push(message.clone());
        let first_request = self.request_for(contents);
        first_request.validate()?;
        self.history.push(message);

        let mut pending = Some(first_request);
        let mut round_trips = 0;
        loop {
            if round_trips >= max_round_trips {
                return Err(ChatError::turn_budget_exceeded(max_round_trips));
            }
            round_trips += 1;

            let request = match pending.take() {
                Some(request) => request,
                None => self.request_for(self.history.clone()),
            };
            let response = self.provider.generate_content(request).await?;
            let usage = response.usage;
            let (content, finish_reason) = first_candidate_content(response)?;

            let call = content.function_call_request().cloned();
            self.history.push(content);

            let Some(call) = call else {
                let text = self
                    .history
                    .last()
                    .and_then(Message::first_text)
                    .unwrap_or_default()
                    .to_string();

                return Ok(ChatTurnResult {
                    text,
                    round_trips,
                    messages_appended: self.history.len() - starting_len,
                    finish_reason,
                    usage,
                });
            };

            let result = self.runtime.execute(&self.functions, call).await?;
            self.history.push(Message::function_response(result));
        }
    }

    fn request_for(&self, contents: Vec<Message>) -> ModelRequest {
        ModelRequest::new(contents)
            .with_functions(self.functions.declarations())
            .with_safety_settings(SafetySetting::from_settings(&self.safety_settings))
            .with_generation_config(self.generation_config.clone())
    }
}

impl std::fmt::Debug for Conversation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Conversation")
            .field("provider", &self.provider.id())
            .field("functions", &self.functions)
            .field("safety_settings", &self.safety_settings)
            .field("generation_config", &self.generation_config)
            .field("policy", &self.policy)
            .field("history_len", &self.history.len())
            .finish()
    }
}

/// Content of the first candidate, which must carry at least one part.
pub(crate) fn first_candidate_content(
    response: ModelResponse,
) -> Result<(Message, FinishReason), ChatError> {
    let block_reason = response
        .prompt_feedback
        .as_ref()
        .and_then(|feedback| feedback.block_reason.clone());

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(ChatError::generation(match block_reason {
            Some(reason) => format!("response had no candidates (prompt blocked: {reason})"),
            None => "response had no candidates".to_string(),
        }));
    };

    let finish_reason = candidate.finish_reason;
    match candidate.content {
        Some(content) if !content.parts.is_empty() => Ok((content, finish_reason)),
        _ => Err(ChatError::generation(format!(
            "first candidate carried no content (finish reason {finish_reason:?})"
        ))),
    }
}

pub struct ConversationBuilder {
    provider: Arc<dyn ModelProvider>,
    runtime: Arc<dyn FunctionRuntime>,
    functions: FunctionRegistry,
    safety_settings: SafetySettings,
    generation_config: GenerationConfig,
    policy: ConversationPolicy,
    history: Vec<Message>,
}

impl ConversationBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>) -> Self {
        Self {
            provider,
            runtime: Arc::new(DefaultFunctionRuntime::new()),
            functions: FunctionRegistry::new(),
            safety_settings: SafetySettings::new(),
            generation_config: GenerationConfig::default(),
            policy: ConversationPolicy::default(),
            history: Vec::new(),
        }
    }

    pub fn function_runtime(mut self, runtime: Arc<dyn FunctionRuntime>) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn functions(mut self, functions: FunctionRegistry) -> Self {
        self.functions = functions;
        self
    }

    pub fn safety_settings(mut self, safety_settings: SafetySettings) -> Self {
        self.safety_settings = safety_settings;
        self
    }

    pub fn safety_setting(mut self, category: HarmCategory, threshold: HarmBlockThreshold) -> Self {
        self.safety_settings.insert(category, threshold);
        self
    }

    pub fn generation_config(mut self, generation_config: GenerationConfig) -> Self {
        self.generation_config = generation_config;
        self
    }

    pub fn policy(mut self, policy: ConversationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn max_round_trips(mut self, max_round_trips: usize) -> Self {
        self.policy = self.policy.with_max_round_trips(max_round_trips);
        self
    }

    /// Seeds the conversation with an earlier history.
    pub fn history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }

    pub fn build(self) -> Conversation {
        Conversation {
            provider: self.provider,
            runtime: self.runtime,
            functions: self.functions,
            safety_settings: self.safety_settings,
            generation_config: self.generation_config,
            policy: self.policy,
            history: self.history,
        }
    }
}
