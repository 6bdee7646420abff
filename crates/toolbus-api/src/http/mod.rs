//! HTTP layer for toolbus: the WebSocket endpoint and the health check.

pub mod handlers;
pub mod router;
