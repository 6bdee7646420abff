//! Live connection registry and outbound delivery.
//!
//! [`ConnectionManager`] exclusively owns the session→channel mapping. The
//! channel is an unbounded mpsc sender of serialized text frames; the
//! transport layer drains the receiving end into the actual socket. Keeping
//! the manager on the mpsc side means it never touches a WebSocket type.
//!
//! Sending to a session that is gone is a silent drop, not an error -- the
//! peer has disconnected and there is nobody left to tell.

use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

use toolbus_types::frame::ServerFrame;

/// Outbound half of a session's channel, carrying serialized frames.
pub type OutboundSender = mpsc::UnboundedSender<String>;

/// Maps session ids to live outbound channels.
#[derive(Debug, Default)]
pub struct ConnectionManager {
    active: DashMap<Uuid, OutboundSender>,
}

impl ConnectionManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self {
            active: DashMap::new(),
        }
    }

    /// Register a new client's outbound channel and mint its session id.
    ///
    /// The id is globally unique; no two calls ever return the same value.
    /// Uniqueness is load-bearing for session isolation.
    pub fn connect(&self, channel: OutboundSender) -> Uuid {
        let session_id = Uuid::now_v7();
        self.active.insert(session_id, channel);
        session_id
    }

    /// Remove a session's channel. Idempotent: a no-op if already absent.
    pub fn disconnect(&self, session_id: Uuid) {
        self.active.remove(&session_id);
    }

    /// Serialize a frame and deliver it to a session's channel.
    ///
    /// If the session is absent (or its receiver is gone), the frame is
    /// silently dropped.
    pub fn send(&self, session_id: Uuid, frame: &ServerFrame) {
        let Some(channel) = self.active.get(&session_id) else {
            return;
        };
        match serde_json::to_string(frame) {
            Ok(text) => {
                // Receiver dropped means the peer is mid-disconnect.
                let _ = channel.send(text);
            }
            Err(err) => {
                tracing::warn!(%session_id, error = %err, "Failed to serialize outbound frame");
            }
        }
    }

    /// Number of live connections.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Whether any connection is live.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn channel() -> (OutboundSender, mpsc::UnboundedReceiver<String>) {
        mpsc::unbounded_channel()
    }

    #[test]
    fn connect_mints_unique_session_ids() {
        let manager = ConnectionManager::new();
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let (tx, _rx) = channel();
            assert!(seen.insert(manager.connect(tx)));
        }
        assert_eq!(manager.len(), 100);
    }

    #[tokio::test]
    async fn send_delivers_serialized_frame() {
        let manager = ConnectionManager::new();
        let (tx, mut rx) = channel();
        let id = manager.connect(tx);

        manager.send(
            id,
            &ServerFrame::Message {
                message: "Received: hi".to_string(),
            },
        );

        let text = rx.recv().await.unwrap();
        let frame: ServerFrame = serde_json::from_str(&text).unwrap();
        assert_eq!(
            frame,
            ServerFrame::Message {
                message: "Received: hi".to_string()
            }
        );
    }

    #[test]
    fn send_to_unknown_session_is_a_silent_no_op() {
        let manager = ConnectionManager::new();
        manager.send(
            Uuid::now_v7(),
            &ServerFrame::Error {
                message: "nobody home".to_string(),
            },
        );
    }

    #[test]
    fn disconnect_is_idempotent() {
        let manager = ConnectionManager::new();
        let (tx, _rx) = channel();
        let id = manager.connect(tx);

        manager.disconnect(id);
        assert!(manager.is_empty());
        manager.disconnect(id);
    }

    #[tokio::test]
    async fn send_after_disconnect_drops_frame() {
        let manager = ConnectionManager::new();
        let (tx, mut rx) = channel();
        let id = manager.connect(tx);
        manager.disconnect(id);

        manager.send(
            id,
            &ServerFrame::Message {
                message: "lost".to_string(),
            },
        );
        assert!(rx.try_recv().is_err());
    }
}
