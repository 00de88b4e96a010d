//! Client bridge to the editor's TCP command server.
//!
//! This module is the single socket-touching surface of the crate. Every
//! higher-level tool goes through [`BridgeClient`] instead of opening its own
//! connection:
//!
//! ```text
//! ┌──────────────────┐          TCP           ┌──────────────────────┐
//! │  external tools  │ ◄─────────────────────►│ editor command server│
//! │  (BridgeClient)  │   one JSON per side    │   (plugin, opaque)   │
//! └──────────────────┘                        └──────────────────────┘
//! ```
//!
//! # Protocol
//!
//! One request object and one response object per connection, UTF-8 JSON,
//! no length prefix. Response completion is detected by incrementally
//! parsing the receive buffer (see [`crate::protocol::try_decode`]); the
//! connection is closed after every exchange.
//!
//! # Usage
//!
//! ```ignore
//! use unreal_bridge::{BridgeClient, BridgeConfig};
//!
//! let client = BridgeClient::new(BridgeConfig::from_env());
//! let response = client.get_scene_info().await?;
//! ```

pub mod client;
mod commands;
mod transport;

pub use client::{BridgeClient, BridgeError};
pub use transport::{exchange, read_until_complete};
