use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use gprovider::{FunctionCall, FunctionResponse, ProviderError, ProviderId, ProviderOperationHooks};
use gtooling::{FunctionRuntimeHooks, ToolError};

/// Runs the inner hooks and discards any panic they raise.
pub struct SafeProviderHooks<H> {
    inner: H,
}

impl<H> SafeProviderHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> ProviderOperationHooks for SafeProviderHooks<H>
where
    H: ProviderOperationHooks,
{
    fn on_request_start(&self, provider: ProviderId, operation: &str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_request_start(provider, operation)
        }));
    }

    fn on_success(&self, provider: ProviderId, operation: &str, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_success(provider, operation, elapsed)
        }));
    }

    fn on_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_failure(provider, operation, elapsed, error)
        }));
    }
}

pub struct SafeFunctionHooks<H> {
    inner: H,
}

impl<H> SafeFunctionHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> FunctionRuntimeHooks for SafeFunctionHooks<H>
where
    H: FunctionRuntimeHooks,
{
    fn on_invocation_start(&self, call: &FunctionCall) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_invocation_start(call)));
    }

    fn on_invocation_success(
        &self,
        call: &FunctionCall,
        response: &FunctionResponse,
        elapsed: Duration,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_invocation_success(call, response, elapsed)
        }));
    }

    fn on_invocation_failure(&self, call: &FunctionCall, error: &ToolError, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_invocation_failure(call, error, elapsed)
        }));
    }
}
