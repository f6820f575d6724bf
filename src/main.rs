use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::{sleep, Duration};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stickerchat::{
    ChatMessage, ChatRoom, ChatUser, ConnectionOptions, EmbeddedStickerPanel, RoomEvent,
    RoomEventHooks, RoomRelay, Sticker, StickerEventHooks, TranscriptChatWidget, UserLabel,
    UserRole,
};

/// Hooks that narrate room activity to the log.
struct LoggingHooks;

#[async_trait]
impl RoomEventHooks for LoggingHooks {
    async fn connected(&self, room: &ChatRoom) {
        info!(room = %room.name, "Joined chatroom");
    }

    async fn disconnected(&self, room: &ChatRoom) {
        info!(room = %room.name, "Left chatroom");
    }

    async fn users_joined(&self, room: &ChatRoom, users: &[ChatUser]) {
        for user in users {
            info!(room = %room.name, user = %user.name, role = %user.role, "User joined");
        }
    }

    async fn message_added(&self, room: &ChatRoom, message: &ChatMessage) {
        info!(room = %room.name, from = %message.creator.name, text = %message.text, "Message");
    }
}

#[async_trait]
impl StickerEventHooks for LoggingHooks {
    async fn stickers_loaded(&self, stickers: &[Sticker]) {
        info!(stickers = stickers.len(), "Sticker catalog ready");
    }

    async fn sticker_panel_shown(&self, animated: bool) {
        info!(animated = animated, "Sticker panel shown");
    }

    async fn sticker_panel_dismissed(&self, animated: bool) {
        info!(animated = animated, "Sticker panel dismissed");
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stickerchat=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting sticker chat demo");

    let widget = Arc::new(TranscriptChatWidget::new());
    let panel = Arc::new(EmbeddedStickerPanel::with_catalog(vec![
        Sticker::new("smile", "https://stickers.example.com/smile.png"),
        Sticker::new("wave", "https://stickers.example.com/wave.png"),
    ]));

    let relay = RoomRelay::builder("", "demo-room", ConnectionOptions::default())
        .with_widget(widget.clone())
        .with_sticker_panel(panel)
        .with_room_hooks(Arc::new(LoggingHooks))
        .with_sticker_hooks(Arc::new(LoggingHooks))
        .build();

    relay.configure().await.unwrap();
    relay.connect().await.unwrap();
    sleep(Duration::from_millis(50)).await;

    // Script some room activity through the loopback bus.
    let bus = relay.event_bus();
    let neighbor = ChatUser::new(UserLabel(42), "neighbor", UserRole::Normal);
    bus.emit_to_room(
        "demo-room",
        RoomEvent::UsersJoined {
            users: vec![neighbor.clone()],
        },
    )
    .await;
    bus.emit_to_room(
        "demo-room",
        RoomEvent::MessageAdded {
            message: ChatMessage::new(neighbor, "hello from the loopback"),
        },
    )
    .await;
    sleep(Duration::from_millis(50)).await;

    relay.show_sticker_panel(true).await;
    info!(
        showing = relay.is_sticker_panel_showing().await,
        height = relay.sticker_panel_height().await,
        "Panel state"
    );
    relay.dismiss_sticker_panel(true).await;

    relay.disconnect().await;

    info!(
        transcript_len = widget.messages().await.len(),
        "Demo finished"
    );
}
