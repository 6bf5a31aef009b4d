//! Gemini model selection and endpoint naming.

use std::fmt::{Display, Formatter};

pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GeminiModel {
    Gemini15Pro,
    #[default]
    GeminiPro,
    GeminiProVision,
    Custom(String),
}

impl GeminiModel {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gemini15Pro => "gemini-1.5-pro-latest",
            Self::GeminiPro => "gemini-pro",
            Self::GeminiProVision => "gemini-pro-vision",
            Self::Custom(name) => name.as_str(),
        }
    }

    /// Maps a model name to a known variant, falling back to `Custom`.
    pub fn parse(value: &str) -> Self {
        let value = value.trim().trim_start_matches("models/");
        match value {
            "gemini-1.5-pro-latest" => Self::Gemini15Pro,
            "gemini-pro" => Self::GeminiPro,
            "gemini-pro-vision" => Self::GeminiProVision,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl Display for GeminiModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeminiMethod {
    GenerateContent,
    CountTokens,
}

impl GeminiMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GenerateContent => "generateContent",
            Self::CountTokens => "countTokens",
        }
    }
}
