use std::sync::{Arc, Mutex};
use std::time::Duration;

use gprovider::{
    FunctionCall, FunctionOutput, FunctionResponse, HttpFailure, ProviderError, ProviderId,
    ProviderOperationHooks,
};
use gtooling::{FunctionRuntimeHooks, ToolError};

use crate::{
    MetricsObservabilityHooks, SafeFunctionHooks, SafeProviderHooks, TracingObservabilityHooks,
};

fn sample_call() -> FunctionCall {
    FunctionCall::new("getEvents").with_arg("year", "2024")
}

fn sample_response() -> FunctionResponse {
    FunctionResponse::new("getEvents", FunctionOutput::new())
}

fn sample_provider_error() -> ProviderError {
    ProviderError::unavailable("backend overloaded")
        .with_http_failure(HttpFailure::new(503, "{}", "overloaded"))
}

fn exercise_provider_hooks(hooks: &dyn ProviderOperationHooks) {
    hooks.on_request_start(ProviderId::Gemini, "generate_content");
    hooks.on_success(
        ProviderId::Gemini,
        "generate_content",
        Duration::from_millis(40),
    );
    hooks.on_failure(
        ProviderId::OpenRouter,
        "chat_completions",
        Duration::from_millis(40),
        &sample_provider_error(),
    );
}

fn exercise_function_hooks(hooks: &dyn FunctionRuntimeHooks) {
    hooks.on_invocation_start(&sample_call());
    hooks.on_invocation_success(&sample_call(), &sample_response(), Duration::from_millis(5));
    hooks.on_invocation_failure(
        &sample_call(),
        &ToolError::execution("calendar offline"),
        Duration::from_millis(5),
    );
}

#[test]
fn tracing_hooks_smoke_test_all_callbacks() {
    let hooks = TracingObservabilityHooks;
    exercise_provider_hooks(&hooks);
    exercise_function_hooks(&hooks);
}

#[test]
fn metrics_hooks_smoke_test_all_callbacks() {
    let hooks = MetricsObservabilityHooks;
    exercise_provider_hooks(&hooks);
    exercise_function_hooks(&hooks);
}

#[derive(Default, Clone)]
struct RecordingHooks {
    events: Arc<Mutex<Vec<&'static str>>>,
}

impl ProviderOperationHooks for RecordingHooks {
    fn on_request_start(&self, _provider: ProviderId, _operation: &str) {
        self.events.lock().expect("events lock").push("request_start");
    }

    fn on_success(&self, _provider: ProviderId, _operation: &str, _elapsed: Duration) {
        self.events.lock().expect("events lock").push("success");
    }

    fn on_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
        self.events.lock().expect("events lock").push("failure");
    }
}

impl FunctionRuntimeHooks for RecordingHooks {
    fn on_invocation_start(&self, _call: &FunctionCall) {
        self.events.lock().expect("events lock").push("invocation_start");
    }

    fn on_invocation_success(
        &self,
        _call: &FunctionCall,
        _response: &FunctionResponse,
        _elapsed: Duration,
    ) {
        self.events.lock().expect("events lock").push("invocation_success");
    }

    fn on_invocation_failure(&self, _call: &FunctionCall, _error: &ToolError, _elapsed: Duration) {
        self.events.lock().expect("events lock").push("invocation_failure");
    }
}

struct PanicHooks;

impl ProviderOperationHooks for PanicHooks {
    fn on_request_start(&self, _provider: ProviderId, _operation: &str) {
        panic!("request_start panic");
    }

    fn on_success(&self, _provider: ProviderId, _operation: &str, _elapsed: Duration) {
        panic!("success panic");
    }

    fn on_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
        panic!("failure panic");
    }
}

impl FunctionRuntimeHooks for PanicHooks {
    fn on_invocation_start(&self, _call: &FunctionCall) {
        panic!("start panic");
    }

    fn on_invocation_success(
        &self,
        _call: &FunctionCall,
        _response: &FunctionResponse,
        _elapsed: Duration,
    ) {
        panic!("success panic");
    }

    fn on_invocation_failure(&self, _call: &FunctionCall, _error: &ToolError, _elapsed: Duration) {
        panic!("failure panic");
    }
}

#[test]
fn safe_provider_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingHooks::default();
    let events = Arc::clone(&inner.events);

    exercise_provider_hooks(&SafeProviderHooks::new(inner));

    assert_eq!(
        events.lock().expect("events lock").as_slice(),
        ["request_start", "success", "failure"]
    );
}

#[test]
fn safe_function_hooks_delegate_when_inner_succeeds() {
    let inner = RecordingHooks::default();
    let events = Arc::clone(&inner.events);

    exercise_function_hooks(&SafeFunctionHooks::new(inner));

    assert_eq!(
        events.lock().expect("events lock").as_slice(),
        ["invocation_start", "invocation_success", "invocation_failure"]
    );
}

#[test]
fn safe_provider_hooks_swallow_panics() {
    exercise_provider_hooks(&SafeProviderHooks::new(PanicHooks));
}

#[test]
fn safe_function_hooks_swallow_panics() {
    exercise_function_hooks(&SafeFunctionHooks::new(PanicHooks));
}
