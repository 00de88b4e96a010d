//! Bridge configuration.
//!
//! The original deployment scraped its port and buffer size out of the
//! editor plugin's constants header at import time. Here every knob lives in
//! an explicit [`BridgeConfig`] built once at process start and passed by
//! reference into [`BridgeClient`](crate::bridge::BridgeClient) — never
//! re-derived per call.

use std::time::Duration;

/// Default host of the editor command server.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default TCP port of the editor command server.
///
/// Historical clients drifted between 1337, 9876 and 13377; the port carries
/// no meaning beyond "the value the plugin is currently configured with", so
/// treat it as pure configuration. 13377 is the plugin's shipped default.
pub const DEFAULT_PORT: u16 = 13377;

/// Default per-call timeout, applied to both the connect and the read budget.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default read chunk size (64 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Maximum accumulated response size (8 MiB) to prevent OOM from a runaway
/// or misbehaving peer. Real responses top out in the low hundreds of KB.
pub const DEFAULT_MAX_RESPONSE_SIZE: usize = 8 * 1024 * 1024;

/// Connection settings for the editor command server.
///
/// Read-only after startup; safe to share between concurrent calls.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    /// Host the command server listens on.
    pub host: String,
    /// TCP port of the command server.
    pub port: u16,
    /// Per-call budget for connecting and for assembling the response.
    pub timeout: Duration,
    /// Size of each read into the reassembly buffer.
    pub chunk_size: usize,
    /// Hard cap on the accumulated response buffer.
    pub max_response_size: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            timeout: DEFAULT_TIMEOUT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
        }
    }
}

impl BridgeConfig {
    /// Configuration for a server at `host:port` with default budgets.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Build a configuration from the environment, falling back to defaults
    /// for anything unset or unparsable.
    ///
    /// Recognized variables:
    ///
    /// - `UNREAL_BRIDGE_HOST`
    /// - `UNREAL_BRIDGE_PORT`
    /// - `UNREAL_BRIDGE_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("UNREAL_BRIDGE_HOST") {
            if !host.is_empty() {
                config.host = host;
            }
        }
        if let Ok(port) = std::env::var("UNREAL_BRIDGE_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }
        if let Ok(secs) = std::env::var("UNREAL_BRIDGE_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.timeout = Duration::from_secs(secs);
            }
        }
        config
    }

    /// The `host:port` address string used for connecting and diagnostics.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Override the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
