// Library crate for the sticker chat relay
// This file exposes the public API for integration tests

pub mod auth;
pub mod client;
pub mod event;
pub mod relay;
pub mod room;
pub mod sticker;
pub mod widget;

// Re-export commonly used types for easier access in tests
pub use client::{ChatClient, ChatError, ConfigureError, LoopbackChatClient};
pub use event::{EventBus, RoomEvent, RoomSubscription};
pub use relay::{
    NoOpRelayHooks, RelayConfig, RoomEventHooks, RoomRelay, RoomRelayBuilder, StickerEventHooks,
};
pub use room::{
    ChatMessage, ChatRoom, ChatUser, ConnectionDescriptor, ConnectionOptions, InputMode, MessageId,
    UserLabel, UserRole,
};
pub use sticker::{EmbeddedStickerPanel, Sticker, StickerPanelView};
pub use widget::{ChatWidget, TranscriptChatWidget};
