use std::sync::Arc;
use tokio::time::{sleep, Duration};

use stickerchat::{
    ConnectionOptions, EmbeddedStickerPanel, EventBus, LoopbackChatClient, RoomEvent, RoomRelay,
    Sticker, TranscriptChatWidget,
};

use super::hooks::RecordingHooks;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub relay: RoomRelay,
    pub event_bus: EventBus,
    pub client: Arc<LoopbackChatClient>,
    pub widget: Arc<TranscriptChatWidget>,
    pub hooks: Arc<RecordingHooks>,
    pub room_name: String,
}

impl TestSetup {
    /// Emit a room event to the setup's room and wait for processing
    pub async fn emit(&self, event: RoomEvent) {
        self.event_bus.emit_to_room(&self.room_name, event).await;
        sleep(Duration::from_millis(10)).await;
    }

    /// Emit a room event to an arbitrary room and wait for processing
    pub async fn emit_to(&self, room_name: &str, event: RoomEvent) {
        self.event_bus.emit_to_room(room_name, event).await;
        sleep(Duration::from_millis(10)).await;
    }

    /// Wait for in-flight subscription work to settle
    pub async fn settle(&self) {
        sleep(Duration::from_millis(50)).await;
    }

    /// Configure the environment and connect to the setup's room
    pub async fn configure_and_connect(&self) {
        self.relay.configure().await.unwrap();
        self.relay.connect().await.unwrap();
        self.settle().await;
    }
}

pub struct TestSetupBuilder {
    member_token: String,
    room_name: String,
    stickers: Vec<Sticker>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            member_token: String::new(),
            room_name: "room-123".to_string(),
            stickers: vec![Sticker::new("smile", "https://stickers.test/smile.png")],
        }
    }

    pub fn with_member_token(mut self, token: &str) -> Self {
        self.member_token = token.to_string();
        self
    }

    pub fn with_room(mut self, room_name: &str) -> Self {
        self.room_name = room_name.to_string();
        self
    }

    pub fn with_stickers(mut self, stickers: Vec<Sticker>) -> Self {
        self.stickers = stickers;
        self
    }

    pub fn build(self) -> TestSetup {
        let event_bus = EventBus::with_default_capacity();
        let client = Arc::new(LoopbackChatClient::new(event_bus.clone()));
        let widget = Arc::new(TranscriptChatWidget::new());
        let hooks = Arc::new(RecordingHooks::new());
        let panel = Arc::new(EmbeddedStickerPanel::with_catalog(self.stickers));

        let relay = RoomRelay::builder(
            self.member_token,
            self.room_name.clone(),
            ConnectionOptions::default(),
        )
        .with_event_bus(event_bus.clone())
        .with_client(client.clone())
        .with_widget(widget.clone())
        .with_sticker_panel(panel)
        .with_room_hooks(hooks.clone())
        .with_sticker_hooks(hooks.clone())
        .build();

        TestSetup {
            relay,
            event_bus,
            client,
            widget,
            hooks,
            room_name: self.room_name,
        }
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}
