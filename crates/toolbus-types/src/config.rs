//! Server configuration types for toolbus.
//!
//! [`ServerConfig`] represents the optional `toolbus.toml` that controls the
//! listen address. All fields have defaults matching the reference
//! deployment (`0.0.0.0:8000`).

use serde::{Deserialize, Serialize};

/// Top-level configuration for the toolbus server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// The bind address in `host:port` form.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
