use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use super::events::RoomEvent;

/// Default per-room channel capacity. A slow subscriber further behind than
/// this loses the oldest events (reported as lag, see `RoomSubscription`).
const DEFAULT_CAPACITY: usize = 256;

/// Event bus distributing chatroom events to per-room subscribers.
///
/// Each room name maps to its own broadcast channel; channels are created
/// lazily on first emit or subscribe. Clones share the same channels.
#[derive(Debug, Clone)]
pub struct EventBus {
    capacity: usize,
    channels: Arc<RwLock<HashMap<String, broadcast::Sender<RoomEvent>>>>,
}

impl EventBus {
    /// Creates a new event bus with the specified per-room capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            channels: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Emits an event to all subscribers of the named room.
    pub async fn emit_to_room(&self, room_name: &str, event: RoomEvent) {
        let event_type = event.event_type();
        let sender = self.sender_for(room_name).await;

        match sender.send(event) {
            Ok(receivers) => {
                debug!(
                    room = %room_name,
                    event_type = event_type,
                    receivers = receivers,
                    "Room event emitted"
                );
            }
            Err(_) => {
                debug!(
                    room = %room_name,
                    event_type = event_type,
                    "Room event emitted with no receivers"
                );
            }
        }
    }

    /// Subscribes to events for the named room. Only events emitted after
    /// this call are received.
    pub async fn subscribe_to_room(&self, room_name: &str) -> broadcast::Receiver<RoomEvent> {
        self.sender_for(room_name).await.subscribe()
    }

    /// Returns the sender for a room, creating the channel if needed.
    async fn sender_for(&self, room_name: &str) -> broadcast::Sender<RoomEvent> {
        {
            let channels = self.channels.read().await;
            if let Some(sender) = channels.get(room_name) {
                return sender.clone();
            }
        }

        let mut channels = self.channels.write().await;
        channels
            .entry(room_name.to_string())
            .or_insert_with(|| {
                debug!(room = %room_name, "Creating room event channel");
                broadcast::channel(self.capacity).0
            })
            .clone()
    }
}
