//! Tracing-based observability hooks for provider calls and function invocations.
//!
//! ```rust
//! use gobserve::TracingObservabilityHooks;
//! use gtooling::FunctionRuntimeHooks;
//!
//! fn accepts_function_hooks(_hooks: &dyn FunctionRuntimeHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_function_hooks(&hooks);
//! ```

use std::time::Duration;

use gprovider::{FunctionCall, FunctionResponse, ProviderError, ProviderId, ProviderOperationHooks};
use gtooling::{FunctionRuntimeHooks, ToolError};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ProviderOperationHooks for TracingObservabilityHooks {
    fn on_request_start(&self, provider: ProviderId, operation: &str) {
        tracing::info!(
            phase = "provider",
            event = "request_start",
            provider = %provider,
            operation
        );
    }

    fn on_success(&self, provider: ProviderId, operation: &str, elapsed: Duration) {
        tracing::info!(
            phase = "provider",
            event = "success",
            provider = %provider,
            operation,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        tracing::error!(
            phase = "provider",
            event = "failure",
            provider = %provider,
            operation,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            status = error.status(),
            retryable = error.retryable,
            error = %error
        );
    }
}

impl FunctionRuntimeHooks for TracingObservabilityHooks {
    fn on_invocation_start(&self, call: &FunctionCall) {
        tracing::info!(
            phase = "function",
            event = "invocation_start",
            function_name = call.name,
            arg_count = call.args.len()
        );
    }

    fn on_invocation_success(
        &self,
        call: &FunctionCall,
        response: &FunctionResponse,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "function",
            event = "invocation_success",
            function_name = call.name,
            output_fields = response.response.len(),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_invocation_failure(&self, call: &FunctionCall, error: &ToolError, elapsed: Duration) {
        tracing::error!(
            phase = "function",
            event = "invocation_failure",
            function_name = call.name,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = ?error.kind,
            unregistered = error.is_unregistered(),
            error = %error
        );
    }
}
