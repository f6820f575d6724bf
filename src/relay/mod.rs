// The chatroom event relay
//
// Owns the connection descriptor and sticker panel state, and re-dispatches
// chat client and sticker events through a non-overridable bookkeeping
// phase before the caller's hooks run.

// Public API - what other modules can use
pub use builder::RoomRelayBuilder;
pub use config::RelayConfig;
pub use hooks::{NoOpRelayHooks, RoomEventHooks, StickerEventHooks};
pub use room_relay::RoomRelay;

// Internal modules
mod builder;
mod config;
mod hooks;
mod room_relay;
mod subscriber;
