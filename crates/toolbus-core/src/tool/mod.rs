//! Tool capability interface and implementations.
//!
//! A [`Tool`] is a named, parameterized, invocable capability: `execute`
//! takes a JSON parameter mapping and produces a JSON result mapping, or a
//! [`ToolError`]. New tools implement this one trait; there is no base type
//! to subclass. The registry stores tools behind [`BoxTool`] for dynamic
//! dispatch.

pub mod box_tool;
pub mod builtin;
pub mod registry;

pub use box_tool::BoxTool;
pub use registry::ToolRegistry;

use std::future::Future;

use serde_json::{Map, Value};
use toolbus_types::error::ToolError;
use toolbus_types::frame::{ToolDescriptor, ToolParameter};

/// JSON parameter mapping passed to a tool.
pub type ToolParams = Map<String, Value>;

/// JSON result mapping produced by a tool.
pub type ToolOutput = Map<String, Value>;

/// A named, parameterized, invocable capability.
///
/// Uses RPITIT for the async `execute`; see [`BoxTool`] for the object-safe
/// wrapper used by the registry.
pub trait Tool: Send + Sync {
    /// Unique key in the registry.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Declared parameters, in declaration order.
    fn parameters(&self) -> &[ToolParameter];

    /// Invoke the tool.
    ///
    /// May suspend (tool execution must not stall other connections) and
    /// may fail. Implementations validate their own parameters.
    fn execute(
        &self,
        params: &ToolParams,
    ) -> impl Future<Output = Result<ToolOutput, ToolError>> + Send;

    /// Project this tool into its wire descriptor.
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters().to_vec(),
        }
    }
}
