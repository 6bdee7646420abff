//! Per-session context bookkeeping.
//!
//! [`ContextManager`] owns the session→context map: pure in-memory CRUD
//! keyed by session id. Each session's context is only ever mutated by that
//! session's own connection task; the `DashMap` gives the map itself safe
//! concurrent insert/lookup/delete across tasks, with per-entry locking.
//!
//! Contexts are auto-created lazily: any write against an unknown session id
//! first creates an empty context for it.

use std::collections::HashMap;

use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use toolbus_types::context::SessionContext;

/// In-memory store of per-session contexts.
#[derive(Debug, Default)]
pub struct ContextManager {
    contexts: DashMap<Uuid, SessionContext>,
}

impl ContextManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self {
            contexts: DashMap::new(),
        }
    }

    /// Get-or-create the context for a session.
    ///
    /// Idempotent: a second call for the same id returns the same underlying
    /// context (with its accumulated history). Returns a snapshot clone.
    pub fn create_context(&self, session_id: Uuid) -> SessionContext {
        self.contexts
            .entry(session_id)
            .or_insert_with(|| SessionContext::new(session_id))
            .clone()
    }

    /// Look up a session's context, if one exists. No side effect.
    pub fn get_context(&self, session_id: Uuid) -> Option<SessionContext> {
        self.contexts.get(&session_id).map(|ctx| ctx.clone())
    }

    /// Append a message to a session's context, creating the context if
    /// absent. Messages for a given session observe append order.
    pub fn add_message(
        &self,
        session_id: Uuid,
        role: impl Into<String>,
        content: impl Into<String>,
    ) {
        self.contexts
            .entry(session_id)
            .or_insert_with(|| SessionContext::new(session_id))
            .push_message(role, content);
    }

    /// Merge metadata into a session's context (last-write-wins per key),
    /// creating the context if absent.
    pub fn update_metadata(&self, session_id: Uuid, metadata: HashMap<String, Value>) {
        self.contexts
            .entry(session_id)
            .or_insert_with(|| SessionContext::new(session_id))
            .merge_metadata(metadata);
    }

    /// Remove a session's context entirely. Irreversible -- history is
    /// lost, not archived. A no-op if the context is already absent.
    pub fn clear_context(&self, session_id: Uuid) {
        self.contexts.remove(&session_id);
    }
}
