use async_trait::async_trait;
use thiserror::Error;

use super::events::RoomEvent;

/// Errors that can occur when handling room events
#[derive(Debug, Error)]
pub enum RoomEventError {
    /// The event targets a room the handler no longer tracks. Fatal for the
    /// subscription delivering it: the handler will never accept events for
    /// that room again.
    #[error("no active connection for room: {0}")]
    InactiveRoom(String),

    #[error("handler error: {0}")]
    HandlerFailed(String),
}

impl RoomEventError {
    /// Whether the subscription delivering events to this handler should
    /// stop rather than deliver further events.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RoomEventError::InactiveRoom(_))
    }
}

/// Trait for components that consume chatroom events.
///
/// Handlers receive events for one room, in arrival order, from a
/// `RoomSubscription`. They should process the event and return `Ok(())`,
/// or a `RoomEventError` on failure. Errors are not retried.
#[async_trait]
pub trait RoomEventHandler: Send + Sync {
    async fn handle_room_event(
        &self,
        room_name: &str,
        event: RoomEvent,
    ) -> Result<(), RoomEventError>;

    /// Get a human-readable name for this handler (for logging/debugging)
    fn handler_name(&self) -> &'static str;
}

/// A no-op event handler for tests that need a handler but no behavior.
pub struct NoOpRoomEventHandler;

#[async_trait]
impl RoomEventHandler for NoOpRoomEventHandler {
    async fn handle_room_event(
        &self,
        _room_name: &str,
        _event: RoomEvent,
    ) -> Result<(), RoomEventError> {
        Ok(())
    }

    fn handler_name(&self) -> &'static str {
        "NoOpRoomEventHandler"
    }
}
