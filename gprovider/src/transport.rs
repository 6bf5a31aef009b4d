//! Shared JSON-over-HTTP transport used by every provider adapter.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use gprovider::TransportConfig;
//!
//! let config = TransportConfig::default()
//!     .with_logging(true)
//!     .with_timeout(Duration::from_secs(90))
//!     .with_bearer_auth("sk-or-secret");
//!
//! assert!(config.log_traffic);
//! assert_eq!(config.timeout, Some(Duration::from_secs(90)));
//! assert!(!format!("{config:?}").contains("sk-or-secret"));
//! ```

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{HttpFailure, ProviderError, SecretString};

#[derive(Debug, Clone)]
pub struct DefaultHeader {
    pub name: String,
    pub value: SecretString,
    pub sensitive: bool,
}

/// Per-instance transport settings. No timeout is applied unless one is set.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    pub log_traffic: bool,
    pub timeout: Option<Duration>,
    pub default_headers: Vec<DefaultHeader>,
}

impl TransportConfig {
    pub fn with_logging(mut self, log_traffic: bool) -> Self {
        self.log_traffic = log_traffic;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push(DefaultHeader {
            name: name.into(),
            value: SecretString::new(value),
            sensitive: false,
        });
        self
    }

    pub fn with_bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.default_headers.push(DefaultHeader {
            name: AUTHORIZATION.as_str().to_string(),
            value: SecretString::new(format!("Bearer {}", token.as_ref())),
            sensitive: true,
        });
        self
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    log_traffic: bool,
}

impl HttpTransport {
    pub fn new(config: TransportConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        for header in &config.default_headers {
            let name = HeaderName::from_bytes(header.name.as_bytes()).map_err(|err| {
                ProviderError::invalid_request(format!("invalid header name `{}`: {err}", header.name))
            })?;
            let mut value = HeaderValue::from_str(header.value.expose()).map_err(|_| {
                ProviderError::invalid_request(format!("invalid value for header `{}`", header.name))
            })?;
            value.set_sensitive(header.sensitive);
            headers.insert(name, value);
        }

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|err| ProviderError::transport(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            log_traffic: config.log_traffic,
        })
    }

    /// Wraps an existing client so several transports can share one connection pool.
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            log_traffic: false,
        }
    }

    pub fn with_logging(mut self, log_traffic: bool) -> Self {
        self.log_traffic = log_traffic;
        self
    }

    pub fn log_traffic(&self) -> bool {
        self.log_traffic
    }

    /// Sends one JSON POST and decodes the JSON answer.
    ///
    /// Query values are never logged; adapters pass API keys through them.
    pub async fn post_json<Req, Resp>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &Req,
    ) -> Result<Resp, ProviderError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let request_json = serde_json::to_string(body).map_err(|err| {
            ProviderError::invalid_request(format!("request could not be encoded: {err}"))
        })?;

        if self.log_traffic {
            tracing::debug!(url, body = %request_json, "sending request");
        }

        let response = self
            .client
            .post(url)
            .query(query)
            .header(CONTENT_TYPE, "application/json")
            .body(request_json.clone())
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ProviderError::timeout(err.without_url().to_string())
                } else {
                    ProviderError::transport(err.without_url().to_string())
                }
            })?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|err| ProviderError::transport(err.without_url().to_string()))?;

        if self.log_traffic {
            tracing::debug!(url, status = status.as_u16(), body = %response_body, "received response");
        }

        if !status.is_success() {
            tracing::warn!(url, status = status.as_u16(), "request failed");
            let message = extract_error_message(&response_body)
                .unwrap_or_else(|| format!("request failed with status {status}"));

            return Err(classify_status(status, message).with_http_failure(HttpFailure::new(
                status.as_u16(),
                request_json,
                response_body,
            )));
        }

        serde_json::from_str(&response_body).map_err(|err| {
            ProviderError::decode(format!("response could not be decoded: {err}"))
        })
    }
}

pub(crate) fn classify_status(status: StatusCode, message: String) -> ProviderError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProviderError::authentication(message),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ProviderError::timeout(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderError::invalid_request(message)
        }
        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
            ProviderError::unavailable(message)
        }
        _ => ProviderError::transport(message),
    }
}

/// Pulls `error.message` out of a Google or OpenAI-style error envelope.
pub(crate) fn extract_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ApiErrorEnvelope>(body).ok()?;
    parsed.error.message.filter(|message| !message.trim().is_empty())
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}
