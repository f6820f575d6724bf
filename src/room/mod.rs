// Chatroom domain types and roster bookkeeping

// Public API - what other modules can use
pub use roster::Roster;
pub use types::{
    ChatMessage, ChatRoom, ChatUser, ConnectionDescriptor, ConnectionOptions, InputMode, MessageId,
    UserLabel, UserRole,
};

// Internal modules
mod roster;
mod types;
