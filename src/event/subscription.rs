use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{bus::EventBus, handler::RoomEventHandler};

/// Routes one room's events from the bus to a handler, in arrival order.
///
/// Events are delivered sequentially on a single background task, so a
/// handler observes exactly the order the bus received. The task ends when
/// the handler reports a fatal error or the room channel closes.
pub struct RoomSubscription {
    room_name: String,
    handler: Arc<dyn RoomEventHandler>,
    event_bus: EventBus,
}

impl RoomSubscription {
    pub fn new(
        room_name: impl Into<String>,
        handler: Arc<dyn RoomEventHandler>,
        event_bus: EventBus,
    ) -> Self {
        Self {
            room_name: room_name.into(),
            handler,
            event_bus,
        }
    }

    /// Start the subscription - spawns a background task that listens to
    /// room events and routes them to the handler.
    pub async fn start(self) -> JoinHandle<()> {
        let room_name = self.room_name;
        let handler = self.handler;
        let handler_name = handler.handler_name();

        let mut receiver = self.event_bus.subscribe_to_room(&room_name).await;

        info!(
            room = %room_name,
            handler = handler_name,
            "Starting room subscription"
        );

        tokio::spawn(async move {
            loop {
                let event = match receiver.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(missed)) => {
                        warn!(
                            room = %room_name,
                            handler = handler_name,
                            missed = missed,
                            "Subscriber lagged behind, events were dropped"
                        );
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                debug!(
                    room = %room_name,
                    handler = handler_name,
                    event_type = event.event_type(),
                    "Routing room event"
                );

                if let Err(e) = handler.handle_room_event(&room_name, event).await {
                    if e.is_fatal() {
                        info!(
                            room = %room_name,
                            handler = handler_name,
                            error = %e,
                            "Room subscription ended by handler"
                        );
                        break;
                    }
                    warn!(
                        room = %room_name,
                        handler = handler_name,
                        error = %e,
                        "Room event handler failed"
                    );
                }
            }

            debug!(
                room = %room_name,
                handler = handler_name,
                "Room subscription task finished"
            );
        })
    }
}
