//! Conversation-layer errors and classification.

use std::error::Error;
use std::fmt::{Display, Formatter};

use gprovider::{HttpFailure, ProviderError, ProviderErrorKind};
use gtooling::{ToolError, ToolErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    InvalidRequest,
    Transport,
    Generation,
    UnknownFunction,
    TurnBudgetExceeded,
    Tooling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
    pub function_name: Option<String>,
    pub provider: Option<ProviderError>,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            function_name: None,
            provider: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidRequest, message)
    }

    pub fn generation(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Generation, message)
    }

    pub fn unknown_function(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::new(
            ChatErrorKind::UnknownFunction,
            format!("model requested unregistered function '{name}'"),
        )
        .with_function_name(name)
    }

    pub fn turn_budget_exceeded(max_round_trips: usize) -> Self {
        Self::new(
            ChatErrorKind::TurnBudgetExceeded,
            format!("model still requested functions after {max_round_trips} round trips"),
        )
    }

    pub fn tooling(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::Tooling, message)
    }

    pub fn with_function_name(mut self, function_name: impl Into<String>) -> Self {
        self.function_name = Some(function_name.into());
        self
    }

    /// Status and raw bodies of the failed exchange, when the backend answered.
    pub fn transport_failure(&self) -> Option<&HttpFailure> {
        self.provider.as_ref().and_then(|error| error.http.as_ref())
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.function_name {
            Some(function_name) => write!(
                f,
                "{:?} [function={}]: {}",
                self.kind, function_name, self.message
            ),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ChatError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.provider
            .as_ref()
            .map(|error| error as &(dyn Error + 'static))
    }
}

impl From<ProviderError> for ChatError {
    fn from(value: ProviderError) -> Self {
        let kind = match value.kind {
            ProviderErrorKind::InvalidRequest if value.http.is_none() => {
                ChatErrorKind::InvalidRequest
            }
            _ => ChatErrorKind::Transport,
        };

        Self {
            kind,
            message: value.to_string(),
            function_name: None,
            provider: Some(value),
        }
    }
}

impl From<ToolError> for ChatError {
    fn from(value: ToolError) -> Self {
        match (value.kind, value.function_name) {
            (ToolErrorKind::Unregistered, Some(name)) => Self::unknown_function(name),
            (_, function_name) => Self {
                kind: ChatErrorKind::Tooling,
                message: format!("{:?}: {}", value.kind, value.message),
                function_name,
                provider: None,
            },
        }
    }
}
