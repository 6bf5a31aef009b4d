//! Function trait contract for registry-managed capabilities.
//!
//! ```rust
//! use gprovider::FunctionDeclaration;
//! use gtooling::{FnFunction, Function};
//!
//! let function = FnFunction::new(
//!     FunctionDeclaration::new("echo", "Echoes its arguments"),
//!     |_args| async move { Ok(serde_json::Map::new()) },
//! );
//!
//! assert_eq!(function.declaration().name, "echo");
//! ```

use std::future::Future;
use std::sync::Arc;

use gcommon::BoxFuture;
use gprovider::{FunctionArgs, FunctionDeclaration, FunctionOutput};

use crate::ToolError;

pub type ToolFuture<'a, T> = BoxFuture<'a, T>;

pub trait Function: Send + Sync {
    fn declaration(&self) -> FunctionDeclaration;

    fn invoke<'a>(
        &'a self,
        args: &'a FunctionArgs,
    ) -> ToolFuture<'a, Result<FunctionOutput, ToolError>>;
}

type FunctionHandler =
    dyn Fn(FunctionArgs) -> ToolFuture<'static, Result<FunctionOutput, ToolError>> + Send + Sync;

/// A function backed by an async closure.
pub struct FnFunction {
    declaration: FunctionDeclaration,
    handler: Arc<FunctionHandler>,
}

impl FnFunction {
    pub fn new<F, Fut>(declaration: FunctionDeclaration, handler: F) -> Self
    where
        F: Fn(FunctionArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<FunctionOutput, ToolError>> + Send + 'static,
    {
        let handler: Arc<FunctionHandler> = Arc::new(move |args| Box::pin(handler(args)));

        Self {
            declaration,
            handler,
        }
    }
}

impl Function for FnFunction {
    fn declaration(&self) -> FunctionDeclaration {
        self.declaration.clone()
    }

    fn invoke<'a>(
        &'a self,
        args: &'a FunctionArgs,
    ) -> ToolFuture<'a, Result<FunctionOutput, ToolError>> {
        (self.handler)(args.clone())
    }
}
