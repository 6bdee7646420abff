//! Session context types: accumulated message history and metadata.
//!
//! A [`SessionContext`] exists for every session that has connected or sent
//! at least one message or tool call. Contexts survive disconnection and are
//! only discarded when explicitly cleared.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A single entry in a session's message log.
///
/// Immutable once appended. The timestamp is computed at construction time,
/// once per instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextMessage {
    /// Who produced the message. "user" and "tool" are written by the
    /// dispatcher; the set is open -- callers may supply any label.
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ContextMessage {
    /// Construct a message stamped with the current time.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Accumulated state for one session.
///
/// Messages are append-only; insertion order is chronological order.
/// Metadata merges are last-write-wins per key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: Uuid,
    pub messages: Vec<ContextMessage>,
    pub metadata: HashMap<String, Value>,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every message append or metadata update.
    pub last_updated: DateTime<Utc>,
}

impl SessionContext {
    /// Construct an empty context for a session, stamped with the current time.
    pub fn new(session_id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            messages: Vec::new(),
            metadata: HashMap::new(),
            created_at: now,
            last_updated: now,
        }
    }

    /// Append a message and refresh `last_updated`.
    pub fn push_message(&mut self, role: impl Into<String>, content: impl Into<String>) {
        self.messages.push(ContextMessage::new(role, content));
        self.last_updated = Utc::now();
    }

    /// Merge key/value pairs into the metadata (overwriting on collision)
    /// and refresh `last_updated`.
    pub fn merge_metadata(&mut self, metadata: HashMap<String, Value>) {
        self.metadata.extend(metadata);
        self.last_updated = Utc::now();
    }
}
