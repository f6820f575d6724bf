use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Identity and parameters for one chatroom connection.
///
/// A relay holds exactly one descriptor at a time; reconnecting replaces it
/// wholesale rather than mutating it in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    /// Member token. Empty string means "connect as guest".
    pub member_token: String,
    /// Name of the chatroom to connect to.
    pub room_name: String,
    /// Options controlling how the connection is established.
    pub options: ConnectionOptions,
}

impl ConnectionDescriptor {
    pub fn new(
        member_token: impl Into<String>,
        room_name: impl Into<String>,
        options: ConnectionOptions,
    ) -> Self {
        Self {
            member_token: member_token.into(),
            room_name: room_name.into(),
            options,
        }
    }

    /// Whether this descriptor connects as a guest (no member token).
    pub fn is_guest(&self) -> bool {
        self.member_token.is_empty()
    }
}

/// Options bundle for establishing a chatroom connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionOptions {
    /// Connect to the member's personal chat channel instead of the
    /// public chatroom.
    pub personal_chat: bool,
}

impl ConnectionOptions {
    pub fn personal_chat() -> Self {
        Self {
            personal_chat: true,
        }
    }
}

/// Snapshot of the currently connected chatroom, handed to event hooks.
///
/// Only valid while the connection is active; a disconnect invalidates the
/// handle held by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRoom {
    pub name: String,
    /// Server-reported aggregate user count (includes guests not present
    /// in the roster).
    pub user_count: u64,
    pub input_mode: InputMode,
}

impl ChatRoom {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            user_count: 0,
            input_mode: InputMode::default(),
        }
    }
}

/// Who is allowed to write to the chatroom.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    /// Everyone may send messages.
    #[default]
    All,
    /// Only members may send messages.
    Member,
    /// Only the room master may send messages.
    Master,
}

/// Opaque identifier the chat service assigns to a connected user.
///
/// Roster-leave notifications carry only these labels, never full user
/// records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserLabel(pub u64);

impl std::fmt::Display for UserLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Normal,
    Moderator,
    Master,
}

/// A user record as delivered by roster events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUser {
    pub label: UserLabel,
    pub name: String,
    pub role: UserRole,
}

impl ChatUser {
    pub fn new(label: UserLabel, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            label,
            name: name.into(),
            role,
        }
    }
}

/// Unique message identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

impl MessageId {
    /// Generates a fresh random message id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A chat message as delivered by message events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub creator: ChatUser,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(creator: ChatUser, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::generate(),
            creator,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_input_mode_parses_server_strings() {
        assert_eq!(InputMode::from_str("all").unwrap(), InputMode::All);
        assert_eq!(InputMode::from_str("member").unwrap(), InputMode::Member);
        assert_eq!(InputMode::from_str("master").unwrap(), InputMode::Master);
        assert!(InputMode::from_str("everyone").is_err());
    }

    #[test]
    fn test_guest_descriptor_detection() {
        let guest = ConnectionDescriptor::new("", "lobby", ConnectionOptions::default());
        assert!(guest.is_guest());

        let member = ConnectionDescriptor::new("a.b.c", "lobby", ConnectionOptions::default());
        assert!(!member.is_guest());
    }

    #[test]
    fn test_generated_message_ids_are_unique() {
        let user = ChatUser::new(UserLabel(1), "alice", UserRole::Normal);
        let m1 = ChatMessage::new(user.clone(), "hello");
        let m2 = ChatMessage::new(user, "hello");
        assert_ne!(m1.id, m2.id);
    }
}
