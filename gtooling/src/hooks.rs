//! Runtime hooks for function invocation lifecycle events.
//!
//! ```rust
//! use gtooling::{FunctionRuntimeHooks, NoopFunctionRuntimeHooks};
//!
//! fn assert_hooks_trait(_hooks: &dyn FunctionRuntimeHooks) {}
//!
//! let hooks = NoopFunctionRuntimeHooks;
//! assert_hooks_trait(&hooks);
//! ```

use std::time::Duration;

use gprovider::{FunctionCall, FunctionResponse};

use crate::ToolError;

pub trait FunctionRuntimeHooks: Send + Sync {
    fn on_invocation_start(&self, _call: &FunctionCall) {}

    fn on_invocation_success(
        &self,
        _call: &FunctionCall,
        _response: &FunctionResponse,
        _elapsed: Duration,
    ) {
    }

    fn on_invocation_failure(&self, _call: &FunctionCall, _error: &ToolError, _elapsed: Duration) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFunctionRuntimeHooks;

impl FunctionRuntimeHooks for NoopFunctionRuntimeHooks {}
