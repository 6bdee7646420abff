//! Tool registry for runtime tool lookup.
//!
//! A name-indexed registry of boxed tools. Lookup order for `list_tools`
//! is registration insertion order, so a static registry always enumerates
//! its tools stably. Re-registering an existing name replaces the tool in
//! place.

use std::collections::HashMap;

use tokio::sync::RwLock;

use toolbus_types::frame::ToolDescriptor;

use super::builtin::{CalculatorTool, EchoTool, TimeTool};
use super::BoxTool;

/// Insertion-ordered name→tool table behind the registry lock.
struct RegistryTable {
    by_name: HashMap<String, usize>,
    ordered: Vec<BoxTool>,
}

/// Registry of available tools, indexed by name.
///
/// Shared across all connection tasks; reads (lookup, enumeration) are
/// concurrent, registration takes the write lock.
pub struct ToolRegistry {
    table: RwLock<RegistryTable>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            table: RwLock::new(RegistryTable {
                by_name: HashMap::new(),
                ordered: Vec::new(),
            }),
        }
    }

    /// Create a registry pre-populated with the built-in tools:
    /// `echo`, `get_time`, `calculate`.
    pub async fn with_builtins() -> Self {
        let registry = Self::new();
        registry.register_tool(BoxTool::new(EchoTool::new())).await;
        registry.register_tool(BoxTool::new(TimeTool::new())).await;
        registry
            .register_tool(BoxTool::new(CalculatorTool::new()))
            .await;
        registry
    }

    /// Register a tool under its own name.
    ///
    /// If a tool with this name already exists, it is replaced in place
    /// (keeping its original position in the enumeration order).
    pub async fn register_tool(&self, tool: BoxTool) {
        let name = tool.name().to_string();
        let mut table = self.table.write().await;
        match table.by_name.get(&name).copied() {
            Some(index) => table.ordered[index] = tool,
            None => {
                let index = table.ordered.len();
                table.ordered.push(tool);
                table.by_name.insert(name, index);
            }
        }
    }

    /// Look up a tool by name.
    ///
    /// Returns a cheap handle clone; `execute` runs without holding the
    /// registry lock.
    pub async fn get_tool(&self, name: &str) -> Option<BoxTool> {
        let table = self.table.read().await;
        table
            .by_name
            .get(name)
            .map(|&index| table.ordered[index].clone())
    }

    /// Project every registered tool into its wire descriptor,
    /// in registration order.
    pub async fn list_tools(&self) -> Vec<ToolDescriptor> {
        let table = self.table.read().await;
        table.ordered.iter().map(BoxTool::descriptor).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
