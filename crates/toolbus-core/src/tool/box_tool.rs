//! BoxTool -- object-safe dynamic dispatch wrapper for [`Tool`].
//!
//! 1. Define an object-safe `ToolDyn` trait with a boxed `execute` future
//! 2. Blanket-impl `ToolDyn` for all `T: Tool`
//! 3. `BoxTool` wraps `Arc<dyn ToolDyn>` and delegates

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use toolbus_types::error::ToolError;
use toolbus_types::frame::{ToolDescriptor, ToolParameter};

use super::{Tool, ToolOutput, ToolParams};

/// Object-safe version of [`Tool`] with a boxed execute future.
///
/// This trait exists solely to enable dynamic dispatch (`dyn ToolDyn`).
/// A blanket implementation is provided for all types implementing `Tool`.
pub trait ToolDyn: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn parameters(&self) -> &[ToolParameter];

    fn execute_boxed<'a>(
        &'a self,
        params: &'a ToolParams,
    ) -> Pin<Box<dyn Future<Output = Result<ToolOutput, ToolError>> + Send + 'a>>;
}

/// Blanket implementation: any `Tool` automatically implements `ToolDyn`.
impl<T: Tool> ToolDyn for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn description(&self) -> &str {
        Tool::description(self)
    }

    fn parameters(&self) -> &[ToolParameter] {
        Tool::parameters(self)
    }

    fn execute_boxed<'a>(
        &'a self,
        params: &'a ToolParams,
    ) -> Pin<Box<dyn Future<Output = Result<ToolOutput, ToolError>> + Send + 'a>> {
        Box::pin(self.execute(params))
    }
}

/// Type-erased tool for heterogeneous registry storage.
///
/// Since `Tool` uses RPITIT, it cannot be used as a trait object directly.
/// `BoxTool` provides equivalent methods that delegate to the inner
/// `ToolDyn` trait object. The inner tool is shared behind an `Arc`, so a
/// registry lookup hands out a cheap clone and `execute` runs without
/// holding any registry lock.
#[derive(Clone)]
pub struct BoxTool {
    inner: Arc<dyn ToolDyn>,
}

impl BoxTool {
    /// Wrap a concrete `Tool` in a type-erased handle.
    pub fn new<T: Tool + 'static>(tool: T) -> Self {
        Self {
            inner: Arc::new(tool),
        }
    }

    /// Unique key in the registry.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        self.inner.description()
    }

    /// Declared parameters, in declaration order.
    pub fn parameters(&self) -> &[ToolParameter] {
        self.inner.parameters()
    }

    /// Project this tool into its wire descriptor.
    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters().to_vec(),
        }
    }

    /// Invoke the tool.
    pub async fn execute(&self, params: &ToolParams) -> Result<ToolOutput, ToolError> {
        self.inner.execute_boxed(params).await
    }
}

impl std::fmt::Debug for BoxTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxTool").field("name", &self.name()).finish()
    }
}
