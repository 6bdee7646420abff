//! Shared domain types for toolbus.
//!
//! This crate contains the types exchanged between the protocol core and the
//! transport layer: wire frames, session contexts, tool descriptors, server
//! configuration, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod context;
pub mod error;
pub mod frame;
