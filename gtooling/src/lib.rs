//! Capability layer for declaring, registering, and invoking model-callable functions.

mod args;
mod error;
mod function;
mod hooks;
mod registry;
mod runtime;

pub mod prelude {
    pub use crate::{
        DefaultFunctionRuntime, FnFunction, Function, FunctionRegistry, FunctionRuntime,
        FunctionRuntimeHooks, ToolError, ToolErrorKind, ToolFuture, json_output, optional_arg,
        parse_arg, required_arg,
    };
}

pub use args::{json_output, optional_arg, parse_arg, required_arg};
pub use error::{ToolError, ToolErrorKind};
pub use function::{FnFunction, Function, ToolFuture};
pub use hooks::{FunctionRuntimeHooks, NoopFunctionRuntimeHooks};
pub use registry::FunctionRegistry;
pub use runtime::{DefaultFunctionRuntime, FunctionRuntime};
