//! Function runtime trait and default registry-backed executor.

use std::sync::Arc;
use std::time::Instant;

use gprovider::{FunctionCall, FunctionResponse};

use crate::{
    FunctionRegistry, FunctionRuntimeHooks, NoopFunctionRuntimeHooks, ToolError, ToolFuture,
};

pub trait FunctionRuntime: Send + Sync {
    fn execute<'a>(
        &'a self,
        registry: &'a FunctionRegistry,
        call: FunctionCall,
    ) -> ToolFuture<'a, Result<FunctionResponse, ToolError>>;
}

#[derive(Clone)]
pub struct DefaultFunctionRuntime {
    hooks: Arc<dyn FunctionRuntimeHooks>,
}

impl Default for DefaultFunctionRuntime {
    fn default() -> Self {
        Self {
            hooks: Arc::new(NoopFunctionRuntimeHooks),
        }
    }
}

impl DefaultFunctionRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn FunctionRuntimeHooks>) -> Self {
        self.hooks = hooks;
        self
    }
}

impl FunctionRuntime for DefaultFunctionRuntime {
    fn execute<'a>(
        &'a self,
        registry: &'a FunctionRegistry,
        call: FunctionCall,
    ) -> ToolFuture<'a, Result<FunctionResponse, ToolError>> {
        Box::pin(async move {
            self.hooks.on_invocation_start(&call);
            let started = Instant::now();

            let result = match registry.get(&call.name) {
                Some(function) => function
                    .invoke(&call.args)
                    .await
                    .map(|output| FunctionResponse::new(call.name.clone(), output)),
                None => Err(ToolError::unregistered(call.name.clone())),
            }
            .map_err(|error| {
                if error.function_name.is_some() {
                    error
                } else {
                    error.with_function_name(call.name.clone())
                }
            });

            match &result {
                Ok(response) => {
                    self.hooks
                        .on_invocation_success(&call, response, started.elapsed())
                }
                Err(error) => self
                    .hooks
                    .on_invocation_failure(&call, error, started.elapsed()),
            }

            result
        })
    }
}
