//! Metrics-based observability hooks for provider calls and function invocations.
//!
//! ```rust
//! use gobserve::MetricsObservabilityHooks;
//! use gprovider::ProviderOperationHooks;
//!
//! fn accepts_provider_hooks(_hooks: &dyn ProviderOperationHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_provider_hooks(&hooks);
//! ```

use std::time::Duration;

use gprovider::{FunctionCall, FunctionResponse, ProviderError, ProviderId, ProviderOperationHooks};
use gtooling::{FunctionRuntimeHooks, ToolError};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl ProviderOperationHooks for MetricsObservabilityHooks {
    fn on_request_start(&self, provider: ProviderId, operation: &str) {
        metrics::counter!(
            "gabble_provider_request_start_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
    }

    fn on_success(&self, provider: ProviderId, operation: &str, elapsed: Duration) {
        metrics::counter!(
            "gabble_provider_success_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "gabble_provider_request_duration_seconds",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        metrics::counter!(
            "gabble_provider_failure_total",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "gabble_provider_request_duration_seconds",
            "provider" => provider.to_string(),
            "operation" => operation.to_string(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}

impl FunctionRuntimeHooks for MetricsObservabilityHooks {
    fn on_invocation_start(&self, call: &FunctionCall) {
        metrics::counter!(
            "gabble_function_invocation_start_total",
            "function_name" => call.name.clone()
        )
        .increment(1);
    }

    fn on_invocation_success(
        &self,
        call: &FunctionCall,
        _response: &FunctionResponse,
        elapsed: Duration,
    ) {
        metrics::counter!(
            "gabble_function_invocation_success_total",
            "function_name" => call.name.clone()
        )
        .increment(1);
        metrics::histogram!(
            "gabble_function_invocation_duration_seconds",
            "function_name" => call.name.clone(),
            "status" => "success"
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_invocation_failure(&self, call: &FunctionCall, error: &ToolError, elapsed: Duration) {
        metrics::counter!(
            "gabble_function_invocation_failure_total",
            "function_name" => call.name.clone(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
        metrics::histogram!(
            "gabble_function_invocation_duration_seconds",
            "function_name" => call.name.clone(),
            "status" => "failure"
        )
        .record(elapsed.as_secs_f64());
    }
}
