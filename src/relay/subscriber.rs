use async_trait::async_trait;
use std::sync::Arc;

use super::room_relay::RelayInner;
use crate::event::{RoomEvent, RoomEventError, RoomEventHandler};

/// Adapter feeding a room's bus events into the relay's dispatch.
///
/// Dispatch is the non-overridable entry point: it runs the relay's
/// bookkeeping and widget forwarding before any hook fires, so a hook
/// implementation cannot skip the base behavior.
pub(crate) struct RelayRoomSubscriber {
    inner: Arc<RelayInner>,
}

impl RelayRoomSubscriber {
    pub(crate) fn new(inner: Arc<RelayInner>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl RoomEventHandler for RelayRoomSubscriber {
    async fn handle_room_event(
        &self,
        room_name: &str,
        event: RoomEvent,
    ) -> Result<(), RoomEventError> {
        self.inner.dispatch_room_event(room_name, event).await
    }

    fn handler_name(&self) -> &'static str {
        "RoomRelay"
    }
}
