// Messaging client boundary
//
// The chat service itself lives behind the `ChatClient` trait; this crate
// ships only the in-process loopback implementation used by tests and the
// demo wiring.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::room::ConnectionDescriptor;

// Public API - what other modules can use
pub use loopback::LoopbackChatClient;

// Internal modules
mod loopback;

/// Errors delivered on the configuration failure channel.
///
/// Configuration failures are not retried automatically; the caller decides
/// what to do with them.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConfigureError {
    #[error("invalid client credentials: {0}")]
    InvalidCredentials(String),

    #[error("configuration request failed: {0}")]
    Network(String),
}

/// Errors produced by an established or attempted chatroom connection.
///
/// These ride inside `RoomEvent::ConnectFailed` and `RoomEvent::Error`, so
/// they are cloneable and serializable.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChatError {
    #[error("chat client is not configured")]
    NotConfigured,

    #[error("member token rejected: {0}")]
    TokenRejected(String),

    #[error("chatroom {room} rejected connection: {reason}")]
    RoomRejected { room: String, reason: String },

    #[error("connection lost: {0}")]
    ConnectionLost(String),

    #[error("chat service error: {0}")]
    Service(String),
}

/// Boundary trait for the external messaging client.
///
/// Implementations emit `RoomEvent`s into the `EventBus` they were wired
/// with; the relay subscribes to the room it is connecting before calling
/// `connect`, so no event is lost. Connection rejection is asynchronous: a
/// `connect` that the service turns down reports `Ok(())` here and a
/// `ConnectFailed` event on the bus.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Set up the client environment. Must complete successfully before any
    /// `connect` call.
    async fn configure(&self) -> Result<(), ConfigureError>;

    /// Establish a connection to the room named by the descriptor.
    async fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<(), ChatError>;

    /// Tear down the connection to the named room.
    async fn disconnect(&self, room_name: &str) -> Result<(), ChatError>;

    /// Get a human-readable name for this client (for logging/debugging)
    fn client_name(&self) -> &'static str;
}
