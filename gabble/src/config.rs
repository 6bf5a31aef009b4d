//! Client configuration loaded from the environment or built explicitly.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use gabble::{GabbleConfig, GeminiModel};
//!
//! let config = GabbleConfig::new()
//!     .with_gemini_api_key("AIza-example")
//!     .with_gemini_model(GeminiModel::Gemini15Pro)
//!     .with_timeout(Duration::from_secs(60));
//!
//! assert!(config.gemini_api_key.is_some());
//! assert!(!format!("{config:?}").contains("AIza-example"));
//! ```

use std::time::Duration;

use gprovider::{GeminiModel, ProviderError, SecretString, TransportConfig};

pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const OPENROUTER_API_KEY_VAR: &str = "OPENROUTER_API_KEY";
pub const GEMINI_MODEL_VAR: &str = "GABBLE_GEMINI_MODEL";
pub const GEMINI_VISION_MODEL_VAR: &str = "GABBLE_GEMINI_VISION_MODEL";
pub const OPENROUTER_MODEL_VAR: &str = "GABBLE_OPENROUTER_MODEL";
pub const LOG_TRAFFIC_VAR: &str = "GABBLE_LOG_TRAFFIC";
pub const TIMEOUT_SECS_VAR: &str = "GABBLE_TIMEOUT_SECS";

pub const DEFAULT_OPENROUTER_MODEL: &str = "google/gemma-7b-it:free";

#[derive(Debug, Clone, PartialEq)]
pub struct GabbleConfig {
    pub gemini_api_key: Option<SecretString>,
    pub openrouter_api_key: Option<SecretString>,
    pub gemini_model: GeminiModel,
    pub gemini_vision_model: GeminiModel,
    pub openrouter_model: String,
    pub log_traffic: bool,
    pub timeout: Option<Duration>,
}

impl Default for GabbleConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            openrouter_api_key: None,
            gemini_model: GeminiModel::default(),
            gemini_vision_model: GeminiModel::GeminiProVision,
            openrouter_model: DEFAULT_OPENROUTER_MODEL.to_string(),
            log_traffic: false,
            timeout: None,
        }
    }
}

impl GabbleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self, ProviderError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads every setting through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ProviderError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self {
            gemini_api_key: read(GEMINI_API_KEY_VAR).map(SecretString::from),
            openrouter_api_key: read(OPENROUTER_API_KEY_VAR).map(SecretString::from),
            ..Self::default()
        };

        if let Some(model) = read(GEMINI_MODEL_VAR) {
            config.gemini_model = GeminiModel::parse(&model);
        }
        if let Some(model) = read(GEMINI_VISION_MODEL_VAR) {
            config.gemini_vision_model = GeminiModel::parse(&model);
        }
        if let Some(model) = read(OPENROUTER_MODEL_VAR) {
            config.openrouter_model = model;
        }
        if let Some(flag) = read(LOG_TRAFFIC_VAR) {
            config.log_traffic = parse_flag(LOG_TRAFFIC_VAR, &flag)?;
        }
        if let Some(seconds) = read(TIMEOUT_SECS_VAR) {
            let seconds = seconds.parse::<u64>().map_err(|_| {
                ProviderError::invalid_request(format!(
                    "{TIMEOUT_SECS_VAR} must be a whole number of seconds, got '{seconds}'"
                ))
            })?;
            config.timeout = Some(Duration::from_secs(seconds));
        }

        Ok(config)
    }

    pub fn with_gemini_api_key(mut self, api_key: impl Into<SecretString>) -> Self {
        self.gemini_api_key = Some(api_key.into());
        self
    }

    pub fn with_openrouter_api_key(mut self, api_key: impl Into<SecretString>) -> Self {
        self.openrouter_api_key = Some(api_key.into());
        self
    }

    pub fn with_gemini_model(mut self, model: GeminiModel) -> Self {
        self.gemini_model = model;
        self
    }

    pub fn with_gemini_vision_model(mut self, model: GeminiModel) -> Self {
        self.gemini_vision_model = model;
        self
    }

    pub fn with_openrouter_model(mut self, model: impl Into<String>) -> Self {
        self.openrouter_model = model.into();
        self
    }

    pub fn with_log_traffic(mut self, log_traffic: bool) -> Self {
        self.log_traffic = log_traffic;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn transport_config(&self) -> TransportConfig {
        let config = TransportConfig::default().with_logging(self.log_traffic);
        match self.timeout {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }

    pub fn require_gemini_api_key(&self) -> Result<&SecretString, ProviderError> {
        require_key(self.gemini_api_key.as_ref(), GEMINI_API_KEY_VAR)
    }

    pub fn require_openrouter_api_key(&self) -> Result<&SecretString, ProviderError> {
        require_key(self.openrouter_api_key.as_ref(), OPENROUTER_API_KEY_VAR)
    }
}

fn require_key<'a>(
    key: Option<&'a SecretString>,
    variable: &str,
) -> Result<&'a SecretString, ProviderError> {
    match key {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(ProviderError::authentication(format!(
            "api key is not configured; set {variable}"
        ))),
    }
}

fn parse_flag(variable: &str, value: &str) -> Result<bool, ProviderError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ProviderError::invalid_request(format!(
            "{variable} must be a boolean flag, got '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use gprovider::ProviderErrorKind;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = GabbleConfig::from_lookup(lookup(&[])).expect("config should load");

        assert_eq!(config, GabbleConfig::default());
        assert_eq!(config.gemini_model, GeminiModel::GeminiPro);
        assert_eq!(config.openrouter_model, DEFAULT_OPENROUTER_MODEL);
        assert!(config.timeout.is_none());
    }

    #[test]
    fn reads_keys_models_and_flags() {
        let config = GabbleConfig::from_lookup(lookup(&[
            (GEMINI_API_KEY_VAR, " AIza-key "),
            (OPENROUTER_API_KEY_VAR, "sk-or-key"),
            (GEMINI_MODEL_VAR, "models/gemini-1.5-pro-latest"),
            (OPENROUTER_MODEL_VAR, "mistralai/mistral-7b-instruct"),
            (LOG_TRAFFIC_VAR, "Yes"),
            (TIMEOUT_SECS_VAR, "45"),
        ]))
        .expect("config should load");

        assert_eq!(
            config.require_gemini_api_key().map(SecretString::expose),
            Ok("AIza-key")
        );
        assert_eq!(config.gemini_model, GeminiModel::Gemini15Pro);
        assert_eq!(config.openrouter_model, "mistralai/mistral-7b-instruct");
        assert!(config.log_traffic);
        assert_eq!(config.timeout, Some(Duration::from_secs(45)));

        let transport = config.transport_config();
        assert!(transport.log_traffic);
        assert_eq!(transport.timeout, Some(Duration::from_secs(45)));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = GabbleConfig::from_lookup(lookup(&[(GEMINI_API_KEY_VAR, "   ")]))
            .expect("config should load");

        let error = config
            .require_gemini_api_key()
            .expect_err("blank key is missing");
        assert_eq!(error.kind, ProviderErrorKind::Authentication);
        assert!(error.message.contains(GEMINI_API_KEY_VAR));
    }

    #[test]
    fn malformed_values_are_rejected() {
        let flag = GabbleConfig::from_lookup(lookup(&[(LOG_TRAFFIC_VAR, "sometimes")]))
            .expect_err("bad flag");
        assert_eq!(flag.kind, ProviderErrorKind::InvalidRequest);

        let timeout = GabbleConfig::from_lookup(lookup(&[(TIMEOUT_SECS_VAR, "soon")]))
            .expect_err("bad timeout");
        assert!(timeout.message.contains(TIMEOUT_SECS_VAR));
    }
}
