//! Request dispatch: the protocol core.
//!
//! One [`Dispatcher`] is shared by all connection tasks. The transport layer
//! drives the per-connection lifecycle:
//!
//! 1. [`Dispatcher::open_session`] on connection establishment -- registers
//!    the outbound channel, mints the session id, eagerly creates the
//!    context.
//! 2. [`Dispatcher::dispatch`] once per inbound frame, strictly sequentially
//!    within a connection (no pipelining). Every outcome, including a
//!    malformed frame, is answered with an outbound frame; the connection is
//!    never closed from here.
//! 3. [`Dispatcher::close_session`] on transport disconnect -- releases the
//!    channel. The context is deliberately retained; history is only lost
//!    through an explicit `clear_context`.

use std::sync::Arc;

use uuid::Uuid;

use toolbus_types::frame::{ClientRequest, ServerFrame};

use crate::connection::{ConnectionManager, OutboundSender};
use crate::context::ContextManager;
use crate::tool::{ToolParams, ToolRegistry};

/// Routes inbound frames to the registry and context manager, and writes
/// response frames back through the connection manager.
pub struct Dispatcher {
    connections: Arc<ConnectionManager>,
    contexts: Arc<ContextManager>,
    tools: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(
        connections: Arc<ConnectionManager>,
        contexts: Arc<ContextManager>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            connections,
            contexts,
            tools,
        }
    }

    /// Begin a session for a newly accepted connection.
    ///
    /// Registers the outbound channel and eagerly creates the session's
    /// context, so the context exists even before the first frame arrives.
    pub fn open_session(&self, channel: OutboundSender) -> Uuid {
        let session_id = self.connections.connect(channel);
        self.contexts.create_context(session_id);
        tracing::debug!(%session_id, "Session opened");
        session_id
    }

    /// End a session after transport disconnect.
    ///
    /// Releases the connection entry only. The context is retained so its
    /// history stays queryable; callers wishing to discard it must clear it
    /// explicitly.
    pub fn close_session(&self, session_id: Uuid) {
        self.connections.disconnect(session_id);
        tracing::debug!(%session_id, "Session closed");
    }

    /// Process one inbound text frame.
    ///
    /// Never fails: protocol and tool errors are reported to the client as
    /// `error` frames and the caller continues its read loop.
    pub async fn dispatch(&self, session_id: Uuid, raw: &str) {
        let request: ClientRequest = match serde_json::from_str(raw) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(%session_id, error = %err, "Rejecting malformed frame");
                self.send_error(session_id, format!("Invalid request format: {err}"));
                return;
            }
        };

        match request.kind.as_str() {
            "message" => self.handle_message(session_id, request.message),
            "tool" => {
                self.handle_tool(session_id, request.tool, request.parameters)
                    .await;
            }
            "list_tools" => {
                let tools = self.tools.list_tools().await;
                self.connections
                    .send(session_id, &ServerFrame::ToolsList { tools });
            }
            other => {
                self.send_error(session_id, format!("Unknown request type: {other}"));
            }
        }
    }

    /// "message" request: record it and acknowledge.
    fn handle_message(&self, session_id: Uuid, message: Option<String>) {
        let Some(message) = message.filter(|m| !m.is_empty()) else {
            self.send_error(
                session_id,
                "Message field is required for message type requests".to_string(),
            );
            return;
        };

        self.contexts.add_message(session_id, "user", &message);
        self.connections.send(
            session_id,
            &ServerFrame::Message {
                message: format!("Received: {message}"),
            },
        );
    }

    /// "tool" request: resolve, execute, record on success.
    async fn handle_tool(
        &self,
        session_id: Uuid,
        tool: Option<String>,
        parameters: Option<ToolParams>,
    ) {
        // Both fields must be present. An empty parameter mapping is fine;
        // an absent one is not.
        let (Some(tool_name), Some(parameters)) = (tool, parameters) else {
            self.send_error(
                session_id,
                "Tool and parameters are required for tool type requests".to_string(),
            );
            return;
        };

        let Some(tool) = self.tools.get_tool(&tool_name).await else {
            self.send_error(session_id, format!("Tool not found: {tool_name}"));
            return;
        };

        match tool.execute(&parameters).await {
            Ok(result) => {
                let record = serde_json::json!({
                    "tool": &tool_name,
                    "parameters": &parameters,
                    "result": &result,
                });
                self.contexts
                    .add_message(session_id, "tool", record.to_string());
                self.connections.send(
                    session_id,
                    &ServerFrame::ToolResult {
                        tool: tool_name,
                        result,
                    },
                );
            }
            Err(err) => {
                // No context entry for a failed call.
                tracing::debug!(%session_id, tool = %tool_name, error = %err, "Tool execution failed");
                self.send_error(session_id, format!("Tool execution failed: {err}"));
            }
        }
    }

    fn send_error(&self, session_id: Uuid, message: String) {
        self.connections
            .send(session_id, &ServerFrame::Error { message });
    }
}
