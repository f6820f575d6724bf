use async_trait::async_trait;

use crate::client::{ChatError, ConfigureError};
use crate::room::{ChatMessage, ChatRoom, ChatUser, InputMode, MessageId, UserLabel};
use crate::sticker::Sticker;

/// Customization surface for chatroom events.
///
/// The relay always runs its own bookkeeping (and widget forwarding) before
/// a hook fires; implementing a method here adds behavior on top of that
/// base, it can never replace it. Every method defaults to a no-op, so an
/// implementation overrides exactly the events it cares about.
///
/// Hooks are called from the relay's subscription task, one event at a
/// time, in arrival order.
#[async_trait]
pub trait RoomEventHooks: Send + Sync {
    /// The chat environment finished configuring successfully.
    async fn configured(&self) {}

    /// The chat environment failed to configure. Not retried; reacting is
    /// up to the implementation.
    async fn configure_failed(&self, _error: &ConfigureError) {}

    /// The connection to the chatroom has been established.
    async fn connected(&self, _room: &ChatRoom) {}

    /// The connection to the chatroom has ended.
    async fn disconnected(&self, _room: &ChatRoom) {}

    /// The chat service rejected the connection attempt.
    async fn connect_failed(&self, _room: &ChatRoom, _error: &ChatError) {}

    /// A runtime error occurred on the established connection.
    async fn room_error(&self, _room: &ChatRoom, _error: &ChatError) {}

    /// The chatroom's input mode changed.
    async fn input_mode_changed(&self, _room: &ChatRoom, _mode: InputMode) {}

    /// Users joined the chatroom; full records are delivered.
    async fn users_joined(&self, _room: &ChatRoom, _users: &[ChatUser]) {}

    /// Existing users changed; full records are delivered.
    async fn users_updated(&self, _room: &ChatRoom, _users: &[ChatUser]) {}

    /// Users left the chatroom; only their labels are delivered.
    async fn users_left(&self, _room: &ChatRoom, _labels: &[UserLabel]) {}

    /// The server-side aggregate user count changed.
    async fn user_count_changed(&self, _room: &ChatRoom, _count: u64) {}

    /// A message was added to the chatroom.
    async fn message_added(&self, _room: &ChatRoom, _message: &ChatMessage) {}

    /// A single message was removed.
    async fn message_removed(&self, _room: &ChatRoom, _message_id: &MessageId) {}

    /// All messages were flushed from the chatroom.
    async fn messages_flushed(&self, _room: &ChatRoom) {}

    /// Aggregated side-channel data arrived; the payload is opaque.
    async fn aggregated_data_added(&self, _room: &ChatRoom, _payload: &serde_json::Value) {}

    /// Raw side-channel data arrived; the payload is opaque.
    async fn raw_data_added(&self, _room: &ChatRoom, _payload: &serde_json::Value) {}
}

/// Customization surface for sticker-panel events.
///
/// Independent from `RoomEventHooks`; one type may implement both.
#[async_trait]
pub trait StickerEventHooks: Send + Sync {
    /// The sticker catalog finished loading. Fires once per relay.
    async fn stickers_loaded(&self, _stickers: &[Sticker]) {}

    /// The sticker panel was shown.
    async fn sticker_panel_shown(&self, _animated: bool) {}

    /// The sticker panel was dismissed.
    async fn sticker_panel_dismissed(&self, _animated: bool) {}
}

/// Hook object that customizes nothing. Used when a relay is built without
/// caller-supplied hooks.
pub struct NoOpRelayHooks;

#[async_trait]
impl RoomEventHooks for NoOpRelayHooks {}

#[async_trait]
impl StickerEventHooks for NoOpRelayHooks {}
