//! Protocol core for toolbus.
//!
//! This crate holds everything between the wire and the transport: the tool
//! capability trait and registry, the per-session context manager, the
//! connection manager brokering outbound delivery, and the dispatcher that
//! ties them together. It has no HTTP or WebSocket dependency -- the
//! transport layer feeds it text frames and an outbound channel.

pub mod connection;
pub mod context;
pub mod dispatch;
pub mod tool;
