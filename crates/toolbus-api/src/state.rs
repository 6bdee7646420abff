//! Application state wiring the protocol core together.
//!
//! AppState pins the shared maps and the dispatcher into `Arc`s so every
//! connection task works against the same registry, context store, and
//! connection table. These are explicitly owned, dependency-injected state
//! -- not ambient singletons.

use std::sync::Arc;

use toolbus_core::connection::ConnectionManager;
use toolbus_core::context::ContextManager;
use toolbus_core::dispatch::Dispatcher;
use toolbus_core::tool::ToolRegistry;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub connections: Arc<ConnectionManager>,
}

impl AppState {
    /// Wire the built-in tool registry, the managers, and the dispatcher.
    pub async fn init() -> Self {
        let connections = Arc::new(ConnectionManager::new());
        let contexts = Arc::new(ContextManager::new());
        let tools = Arc::new(ToolRegistry::with_builtins().await);

        let dispatcher = Arc::new(Dispatcher::new(
            connections.clone(),
            contexts,
            tools,
        ));

        Self {
            dispatcher,
            connections,
        }
    }
}
