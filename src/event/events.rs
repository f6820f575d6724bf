use serde::{Deserialize, Serialize};

use crate::client::ChatError;
use crate::room::{ChatMessage, ChatUser, InputMode, MessageId, UserLabel};

/// Events a chat client emits for a connected chatroom.
///
/// Events represent facts about things that have already happened on the
/// chat service. They are delivered per room, in arrival order, through the
/// `EventBus`. The room itself is identified by the bus channel the event
/// arrives on, so events carry only their payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RoomEvent {
    // Lifecycle
    /// The connection to the chatroom has been established.
    Connected,

    /// The connection to the chatroom has ended.
    Disconnected,

    /// The chat service rejected the connection attempt.
    ConnectFailed { error: ChatError },

    /// A runtime error occurred on an established connection.
    Error { error: ChatError },

    /// The chatroom's input mode changed.
    InputModeChanged { mode: InputMode },

    // Roster
    /// Users joined the chatroom. Full records are delivered.
    UsersJoined { users: Vec<ChatUser> },

    /// Existing users changed (name, role). Full records are delivered.
    UsersUpdated { users: Vec<ChatUser> },

    /// Users left the chatroom. Only their labels are delivered.
    UsersLeft { labels: Vec<UserLabel> },

    /// The server-side aggregate user count changed.
    UserCountChanged { count: u64 },

    // Messages
    /// A message was added to the chatroom.
    MessageAdded { message: ChatMessage },

    /// A single message was removed.
    MessageRemoved { message_id: MessageId },

    /// All messages were flushed from the chatroom.
    MessagesFlushed,

    /// Aggregated side-channel data arrived. The payload is opaque and
    /// passed through untouched.
    AggregatedDataAdded { payload: serde_json::Value },

    /// Raw side-channel data arrived. The payload is opaque and passed
    /// through untouched.
    RawDataAdded { payload: serde_json::Value },
}

impl RoomEvent {
    /// Get a human-readable description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            RoomEvent::Connected => "connected",
            RoomEvent::Disconnected => "disconnected",
            RoomEvent::ConnectFailed { .. } => "connect_failed",
            RoomEvent::Error { .. } => "error",
            RoomEvent::InputModeChanged { .. } => "input_mode_changed",
            RoomEvent::UsersJoined { .. } => "users_joined",
            RoomEvent::UsersUpdated { .. } => "users_updated",
            RoomEvent::UsersLeft { .. } => "users_left",
            RoomEvent::UserCountChanged { .. } => "user_count_changed",
            RoomEvent::MessageAdded { .. } => "message_added",
            RoomEvent::MessageRemoved { .. } => "message_removed",
            RoomEvent::MessagesFlushed => "messages_flushed",
            RoomEvent::AggregatedDataAdded { .. } => "aggregated_data_added",
            RoomEvent::RawDataAdded { .. } => "raw_data_added",
        }
    }
}
