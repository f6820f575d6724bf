use std::sync::Arc;
use tokio::sync::RwLock;

use super::config::RelayConfig;
use super::hooks::{NoOpRelayHooks, RoomEventHooks, StickerEventHooks};
use super::room_relay::{RelayInner, RelayState, RoomRelay};
use crate::client::{ChatClient, LoopbackChatClient};
use crate::event::EventBus;
use crate::room::{ConnectionDescriptor, ConnectionOptions};
use crate::sticker::{EmbeddedStickerPanel, StickerPanelState, StickerPanelView};
use crate::widget::{ChatWidget, TranscriptChatWidget};

/// Builder for `RoomRelay`.
///
/// Member token, room name, and connection options are required and taken
/// by `new`; the builder has no `Default`, so a relay without credentials
/// cannot be expressed. Every collaborator can be swapped: callers that
/// need to customize the chat widget (or any other piece) inject their own
/// implementation, everyone else gets the embedded defaults.
pub struct RoomRelayBuilder {
    descriptor: ConnectionDescriptor,
    config: RelayConfig,
    event_bus: Option<EventBus>,
    client: Option<Arc<dyn ChatClient>>,
    widget: Option<Arc<dyn ChatWidget>>,
    sticker_panel: Option<Arc<dyn StickerPanelView>>,
    room_hooks: Option<Arc<dyn RoomEventHooks>>,
    sticker_hooks: Option<Arc<dyn StickerEventHooks>>,
}

impl RoomRelayBuilder {
    pub fn new(
        member_token: impl Into<String>,
        room_name: impl Into<String>,
        options: ConnectionOptions,
    ) -> Self {
        Self {
            descriptor: ConnectionDescriptor::new(member_token, room_name, options),
            config: RelayConfig::new(),
            event_bus: None,
            client: None,
            widget: None,
            sticker_panel: None,
            room_hooks: None,
            sticker_hooks: None,
        }
    }

    pub fn with_config(mut self, config: RelayConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an existing event bus. Required when wiring a caller-provided
    /// chat client, which must emit into the same bus.
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn with_client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Supply a customized chat widget instead of the default transcript
    /// widget.
    pub fn with_widget(mut self, widget: Arc<dyn ChatWidget>) -> Self {
        self.widget = Some(widget);
        self
    }

    pub fn with_sticker_panel(mut self, panel: Arc<dyn StickerPanelView>) -> Self {
        self.sticker_panel = Some(panel);
        self
    }

    pub fn with_room_hooks(mut self, hooks: Arc<dyn RoomEventHooks>) -> Self {
        self.room_hooks = Some(hooks);
        self
    }

    pub fn with_sticker_hooks(mut self, hooks: Arc<dyn StickerEventHooks>) -> Self {
        self.sticker_hooks = Some(hooks);
        self
    }

    pub fn build(self) -> RoomRelay {
        let event_bus = self
            .event_bus
            .unwrap_or_else(|| EventBus::new(self.config.event_capacity));
        let client = self
            .client
            .unwrap_or_else(|| Arc::new(LoopbackChatClient::new(event_bus.clone())));
        let widget = self
            .widget
            .unwrap_or_else(|| Arc::new(TranscriptChatWidget::new()));
        let sticker_panel = self
            .sticker_panel
            .unwrap_or_else(|| Arc::new(EmbeddedStickerPanel::new()));
        let room_hooks = self.room_hooks.unwrap_or_else(|| Arc::new(NoOpRelayHooks));
        let sticker_hooks = self
            .sticker_hooks
            .unwrap_or_else(|| Arc::new(NoOpRelayHooks));

        RoomRelay::from_inner(RelayInner {
            client,
            widget,
            sticker_panel,
            room_hooks,
            sticker_hooks,
            event_bus,
            descriptor: RwLock::new(self.descriptor),
            state: RwLock::new(RelayState::default()),
            panel_state: RwLock::new(StickerPanelState::hidden(self.config.panel_height)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_with_defaults_keeps_credentials() {
        let relay = RoomRelayBuilder::new("", "lobby", ConnectionOptions::default()).build();

        let descriptor = relay.descriptor().await;
        assert_eq!(descriptor.room_name, "lobby");
        assert!(descriptor.is_guest());
        assert!(!relay.is_configured().await);
    }

    #[tokio::test]
    async fn test_build_honors_config_panel_height() {
        let config = RelayConfig {
            event_capacity: 16,
            panel_height: 180,
        };
        let relay = RoomRelayBuilder::new("", "lobby", ConnectionOptions::default())
            .with_config(config)
            .build();

        assert_eq!(relay.sticker_panel_height().await, 180);
        assert!(!relay.is_sticker_panel_showing().await);
    }
}
