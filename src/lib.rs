//! unreal-bridge — TCP client library for the editor command server.
//!
//! This crate consolidates the socket plumbing shared by every tool that
//! drives the editor's embedded command server:
//!
//! - `config` - connection settings, built once at startup
//! - `protocol` - the JSON request/response envelope codec
//! - `models` - typed parameters and results for each command
//! - `bridge` - the framed transport and the [`BridgeClient`] façade
//!
//! # Quick Start
//!
//! ```ignore
//! use unreal_bridge::{BridgeClient, BridgeConfig};
//! use unreal_bridge::models::CreateObjectParams;
//!
//! let client = BridgeClient::new(BridgeConfig::from_env());
//!
//! let response = client
//!     .create_object(CreateObjectParams::new("StaticMeshActor").at([0.0, 0.0, 100.0]))
//!     .await?;
//!
//! match response.message() {
//!     None => println!("created: {:?}", response.result()),
//!     Some(message) => eprintln!("Error: {message}"),
//! }
//! ```
//!
//! Interpretation of the response (`status`, `result`, `message`) is the
//! caller's responsibility; the client returns envelopes unmodified. Calls
//! are independently fallible — multi-step workflows should abort on the
//! first failure rather than guessing host state, and any retry policy
//! belongs to the caller as well.

pub mod bridge;
pub mod config;
pub mod models;
pub mod protocol;

pub use bridge::{BridgeClient, BridgeError};
pub use config::BridgeConfig;
pub use protocol::{CommandRequest, ResponseEnvelope};
