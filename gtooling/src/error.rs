//! Function invocation errors and classifications.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    /// The requested name has no entry in the registry. Only the runtime
    /// produces this kind.
    Unregistered,
    InvalidArguments,
    /// A handler could not find the record it was asked about.
    NotFound,
    Execution,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
    pub function_name: Option<String>,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            function_name: None,
        }
    }

    pub fn unregistered(function_name: impl Into<String>) -> Self {
        let function_name = function_name.into();
        Self::new(
            ToolErrorKind::Unregistered,
            format!("function '{function_name}' is not registered"),
        )
        .with_function_name(function_name)
    }

    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArguments, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, message)
    }

    pub fn execution(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Execution, message)
    }

    pub fn with_function_name(mut self, function_name: impl Into<String>) -> Self {
        self.function_name = Some(function_name.into());
        self
    }

    pub fn is_unregistered(&self) -> bool {
        self.kind == ToolErrorKind::Unregistered
    }
}

impl Display for ToolError {
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

impl Error for ToolError {}
