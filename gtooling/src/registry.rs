//! Function registry keyed by declaration name.
//!
//! Registration order is preserved and is the order declarations are sent to
//! the model. Registering a name twice replaces the handler in place.

use std::future::Future;
use std::sync::Arc;

use gcommon::Registry;
use gprovider::{FunctionArgs, FunctionDeclaration, FunctionOutput};

use crate::{FnFunction, Function, ToolError};

#[derive(Default, Clone)]
pub struct FunctionRegistry {
    functions: Registry<String, Arc<dyn Function>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `function`, returning the handler it replaced if the name was taken.
    pub fn register<T>(&mut self, function: T) -> Option<Arc<dyn Function>>
    where
        T: Function + 'static,
    {
        self.register_arc(Arc::new(function))
    }

    pub fn register_arc(&mut self, function: Arc<dyn Function>) -> Option<Arc<dyn Function>> {
        let name = function.declaration().name;
        self.functions.insert(name, function)
    }

    pub fn register_fn<F, Fut>(&mut self, declaration: FunctionDeclaration, handler: F)
    where
        F: Fn(FunctionArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<FunctionOutput, ToolError>> + Send + 'static,
    {
        self.register(FnFunction::new(declaration, handler));
    }

    pub fn register_sync_fn<F>(&mut self, declaration: FunctionDeclaration, handler: F)
    where
        F: Fn(FunctionArgs) -> Result<FunctionOutput, ToolError> + Send + Sync + 'static,
    {
        self.register_fn(declaration, move |args| {
            let output = handler(args);
            async move { output }
        });
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Function>> {
        self.functions.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<dyn Function>> {
        self.functions.remove(name)
    }

    pub fn declarations(&self) -> Vec<FunctionDeclaration> {
        self.functions
            .values()
            .map(|function| function.declaration())
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
