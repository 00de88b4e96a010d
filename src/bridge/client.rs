//! Client façade for the editor command server.
//!
//! [`BridgeClient`] is the single synchronous entry point every higher-level
//! tool uses: build the request envelope, run one framed exchange over a
//! fresh connection, hand back the decoded envelope. The façade never
//! inspects `status` — interpreting success/error stays with the caller, so
//! this layer remains a pure transport concern.

use std::io;
use std::time::Duration;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::bridge::transport::exchange;
use crate::config::BridgeConfig;
use crate::protocol::{self, ResponseEnvelope};

/// Bridge-specific error types.
///
/// The three wire-failure causes (connect refused, timed out, closed early)
/// stay distinguishable because upstream tools print different remediation
/// guidance for each.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Could not reach the command server (refused or unreachable).
    #[error("could not connect to editor command server at {addr}: {source} (is the editor running with the bridge plugin enabled?)")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Connect or read budget exhausted before a complete response arrived.
    #[error("timed out after {elapsed:?} waiting for {addr} ({buffered} bytes buffered)")]
    Timeout {
        addr: String,
        elapsed: Duration,
        buffered: usize,
    },

    /// Peer closed the connection before a complete response was assembled.
    /// The partial bytes are attached for diagnostics.
    #[error("connection to {addr} closed before a complete response ({} bytes received)", .partial.len())]
    ConnectionClosed { addr: String, partial: Vec<u8> },

    /// The response was complete JSON but not a recognizable envelope, or
    /// another protocol-level violation (oversized response, encode failure).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// A request rejected by local validation, before any network traffic.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// I/O failure mid-exchange.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Client for the editor command server.
///
/// Each call opens a fresh TCP connection, sends one request, assembles one
/// response and closes — no pooling or reuse. That is a deliberate
/// simplicity/robustness trade-off against an embedded host server that has
/// been observed dropping idle connections. The client itself holds nothing
/// but the read-only configuration, so it is cheap to clone and safe to
/// share between concurrent tasks.
///
/// # Example
///
/// ```ignore
/// use unreal_bridge::{BridgeClient, BridgeConfig};
///
/// let client = BridgeClient::new(BridgeConfig::default());
/// let response = client.call("get_scene_info", None).await?;
/// if let Some(message) = response.message() {
///     eprintln!("Error: {message}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BridgeClient {
    config: BridgeConfig,
}

impl BridgeClient {
    /// Create a client around a configuration built once at startup.
    pub fn new(config: BridgeConfig) -> Self {
        Self { config }
    }

    /// The configuration this client connects with.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Send one command and return the decoded response envelope.
    ///
    /// Uses the configured per-call timeout for both the connect and the
    /// read budget. The envelope is returned as-is, success or error.
    pub async fn call(
        &self,
        command_type: &str,
        params: Option<Map<String, Value>>,
    ) -> Result<ResponseEnvelope, BridgeError> {
        self.call_with_timeout(command_type, params, self.config.timeout)
            .await
    }

    /// [`call`](Self::call) with an explicit timeout for this one exchange.
    ///
    /// Long-running host operations (blueprint compilation, bulk Python)
    /// need more headroom than the default.
    pub async fn call_with_timeout(
        &self,
        command_type: &str,
        params: Option<Map<String, Value>>,
        timeout: Duration,
    ) -> Result<ResponseEnvelope, BridgeError> {
        let request = protocol::encode_request(command_type, params)
            .map_err(|e| BridgeError::Protocol(format!("failed to encode request: {e}")))?;

        debug!(command = command_type, "dispatching command");
        let bytes = exchange(&self.config, &request, timeout).await?;

        protocol::decode_response(&bytes)
            .map_err(|e| BridgeError::Protocol(format!("response is not a valid envelope: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let timeout = BridgeError::Timeout {
            addr: "127.0.0.1:13377".to_string(),
            elapsed: Duration::from_secs(10),
            buffered: 42,
        };
        assert_eq!(
            timeout.to_string(),
            "timed out after 10s waiting for 127.0.0.1:13377 (42 bytes buffered)"
        );

        let closed = BridgeError::ConnectionClosed {
            addr: "127.0.0.1:13377".to_string(),
            partial: vec![b'{'; 7],
        };
        assert_eq!(
            closed.to_string(),
            "connection to 127.0.0.1:13377 closed before a complete response (7 bytes received)"
        );

        let invalid = BridgeError::InvalidRequest("provide either 'code' or 'file'".to_string());
        assert_eq!(
            invalid.to_string(),
            "invalid request: provide either 'code' or 'file'"
        );
    }

    #[test]
    fn test_connect_error_mentions_remediation() {
        let err = BridgeError::Connect {
            addr: "127.0.0.1:13377".to_string(),
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        };
        let text = err.to_string();
        assert!(text.contains("127.0.0.1:13377"), "missing addr: {text}");
        assert!(text.contains("is the editor running"), "missing guidance: {text}");
    }

    #[test]
    fn test_client_is_cheap_to_clone() {
        let client = BridgeClient::new(BridgeConfig::default());
        let clone = client.clone();
        assert_eq!(clone.config(), client.config());
    }
}
