// Event-driven infrastructure
//
// Per-room broadcast channels plus the subscription task that routes a
// room's events, in arrival order, to a handler.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::RoomEvent;
pub use handler::{NoOpRoomEventHandler, RoomEventError, RoomEventHandler};
pub use subscription::RoomSubscription;

// Internal modules
mod bus;
mod events;
mod handler;
mod subscription;
