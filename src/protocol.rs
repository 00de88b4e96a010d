//! Wire envelope codec for the editor command protocol.
//!
//! Each direction carries exactly one UTF-8 JSON object per connection, with
//! no length prefix and no guaranteed terminator (some historical peers
//! append `\n`; nothing may depend on it).
//!
//! # Wire Format
//!
//! ```text
//! client -> server: {"type": "<command>", "params": {...}}
//! server -> client: {"status": "success", "result": {...}}
//!                   {"status": "error", "message": "<text>"}
//! ```
//!
//! Because the server declares no payload length, response completion is
//! detected by incrementally re-parsing the accumulated buffer: a successful
//! parse *is* the end-of-message signal. [`try_decode`] exposes that check as
//! an explicit three-way result so the transport's read loop is a plain state
//! machine rather than error handling used as control flow.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request envelope: a command name plus free-form parameters.
///
/// `type` is always present; a request without one is a client-side
/// programming error, not a wire condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRequest {
    /// Command name, e.g. `get_scene_info` or `execute_python`.
    #[serde(rename = "type")]
    pub command_type: String,
    /// Command-specific arguments. Always encoded, defaulting to `{}`.
    #[serde(default)]
    pub params: Map<String, Value>,
}

impl CommandRequest {
    /// A request with no parameters.
    pub fn new(command_type: impl Into<String>) -> Self {
        Self {
            command_type: command_type.into(),
            params: Map::new(),
        }
    }

    /// A request with the given parameters.
    pub fn with_params(command_type: impl Into<String>, params: Map<String, Value>) -> Self {
        Self {
            command_type: command_type.into(),
            params,
        }
    }
}

/// Response envelope, discriminated by its `status` field.
///
/// Exactly one of `result` (useful payload) or `message` (human-readable
/// failure) is meaningful on any given response, but both are modeled as
/// optional because peers have been observed omitting either. The one
/// exception is `execute_python`'s partial failure, which reports
/// `status = "error"` together with a `result` carrying the captured output
/// and error text (see [`PythonOutput`](crate::models::PythonOutput)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ResponseEnvelope {
    /// The command executed; `result` holds the command-specific payload.
    Success {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<Value>,
    },
    /// The command failed on the host side.
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        /// Partial-failure payload, populated by `execute_python`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<Value>,
    },
}

impl ResponseEnvelope {
    /// Whether the host reported success.
    pub fn is_success(&self) -> bool {
        matches!(self, ResponseEnvelope::Success { .. })
    }

    /// The structured payload, if any (present on success and on
    /// `execute_python` partial failures).
    pub fn result(&self) -> Option<&Value> {
        match self {
            ResponseEnvelope::Success { result } => result.as_ref(),
            ResponseEnvelope::Error { result, .. } => result.as_ref(),
        }
    }

    /// The human-readable failure message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ResponseEnvelope::Success { .. } => None,
            ResponseEnvelope::Error { message, .. } => message.as_deref(),
        }
    }
}

/// Outcome of attempting to decode a (possibly partial) response buffer.
#[derive(Debug)]
pub enum TryDecode {
    /// The buffer holds one complete JSON value.
    Complete(Value),
    /// The buffer is a prefix of a JSON value; keep reading. Covers chunk
    /// boundaries anywhere in the value, including inside a multi-byte
    /// character.
    Incomplete,
    /// The buffer can never become valid JSON as-is. The read loop does not
    /// treat this as terminal either: the peer may still close the
    /// connection, and the terminal error then carries the raw bytes.
    Malformed(String),
}

/// Serialize a request envelope to wire bytes.
///
/// Produces `{"type": <command_type>, "params": <params or {}>}` as compact
/// UTF-8 JSON with no trailing delimiter.
pub fn encode_request(
    command_type: &str,
    params: Option<Map<String, Value>>,
) -> Result<Vec<u8>, serde_json::Error> {
    let request = CommandRequest {
        command_type: command_type.to_string(),
        params: params.unwrap_or_default(),
    };
    serde_json::to_vec(&request)
}

/// Incrementally check whether `buf` holds a complete JSON value.
///
/// The parser's unexpected-EOF condition distinguishes "not yet complete"
/// from "never going to parse". Trailing whitespace (including the optional
/// `\n` some peers append) is accepted.
pub fn try_decode(buf: &[u8]) -> TryDecode {
    if buf.is_empty() {
        return TryDecode::Incomplete;
    }
    match serde_json::from_slice::<Value>(buf) {
        Ok(value) => TryDecode::Complete(value),
        Err(e) if e.is_eof() => TryDecode::Incomplete,
        Err(e) => TryDecode::Malformed(e.to_string()),
    }
}

/// Deserialize complete response bytes into a typed envelope.
///
/// Fails if the bytes are not complete JSON, or if they parse but are not a
/// recognizable envelope (`status` missing or unrecognized) — the latter is
/// a protocol-shape violation distinct from any transport failure.
pub fn decode_response(buf: &[u8]) -> Result<ResponseEnvelope, serde_json::Error> {
    serde_json::from_slice(buf)
}
