use async_trait::async_trait;
use tokio::sync::Mutex;

use stickerchat::{
    ChatError, ChatMessage, ChatRoom, ChatUser, ConfigureError, InputMode, MessageId,
    RoomEventHooks, Sticker, StickerEventHooks, UserLabel,
};

// ============================================================================
// Recording Hooks
// ============================================================================

/// Hook object that overrides every event to record it, in arrival order,
/// as a compact `kind:detail` entry. Because every method is overridden,
/// any relay bookkeeping observed alongside these records proves the base
/// behavior cannot be skipped.
#[derive(Default)]
pub struct RecordingHooks {
    entries: Mutex<Vec<String>>,
}

impl RecordingHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<String> {
        self.entries.lock().await.clone()
    }

    /// Entries whose kind matches the given prefix.
    pub async fn entries_of(&self, kind: &str) -> Vec<String> {
        let prefix = format!("{}:", kind);
        self.entries
            .lock()
            .await
            .iter()
            .filter(|e| e.starts_with(&prefix) || e.as_str() == kind)
            .cloned()
            .collect()
    }

    async fn record(&self, entry: String) {
        self.entries.lock().await.push(entry);
    }
}

#[async_trait]
impl RoomEventHooks for RecordingHooks {
    async fn configured(&self) {
        self.record("configured".to_string()).await;
    }

    async fn configure_failed(&self, error: &ConfigureError) {
        self.record(format!("configure_failed:{}", error)).await;
    }

    async fn connected(&self, room: &ChatRoom) {
        self.record(format!("connected:{}", room.name)).await;
    }

    async fn disconnected(&self, room: &ChatRoom) {
        self.record(format!("disconnected:{}", room.name)).await;
    }

    async fn connect_failed(&self, room: &ChatRoom, error: &ChatError) {
        self.record(format!("connect_failed:{}:{}", room.name, error))
            .await;
    }

    async fn room_error(&self, room: &ChatRoom, error: &ChatError) {
        self.record(format!("room_error:{}:{}", room.name, error))
            .await;
    }

    async fn input_mode_changed(&self, room: &ChatRoom, mode: InputMode) {
        self.record(format!("input_mode_changed:{}:{}", room.name, mode))
            .await;
    }

    async fn users_joined(&self, _room: &ChatRoom, users: &[ChatUser]) {
        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        self.record(format!("users_joined:{}", names.join(","))).await;
    }

    async fn users_updated(&self, _room: &ChatRoom, users: &[ChatUser]) {
        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        self.record(format!("users_updated:{}", names.join(","))).await;
    }

    async fn users_left(&self, _room: &ChatRoom, labels: &[UserLabel]) {
        let labels: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        self.record(format!("users_left:{}", labels.join(","))).await;
    }

    async fn user_count_changed(&self, _room: &ChatRoom, count: u64) {
        self.record(format!("user_count_changed:{}", count)).await;
    }

    async fn message_added(&self, _room: &ChatRoom, message: &ChatMessage) {
        self.record(format!("message_added:{}", message.text)).await;
    }

    async fn message_removed(&self, _room: &ChatRoom, message_id: &MessageId) {
        self.record(format!("message_removed:{}", message_id)).await;
    }

    async fn messages_flushed(&self, _room: &ChatRoom) {
        self.record("messages_flushed".to_string()).await;
    }

    async fn aggregated_data_added(&self, _room: &ChatRoom, payload: &serde_json::Value) {
        self.record(format!("aggregated_data_added:{}", payload))
            .await;
    }

    async fn raw_data_added(&self, _room: &ChatRoom, payload: &serde_json::Value) {
        self.record(format!("raw_data_added:{}", payload)).await;
    }
}

#[async_trait]
impl StickerEventHooks for RecordingHooks {
    async fn stickers_loaded(&self, stickers: &[Sticker]) {
        self.record(format!("stickers_loaded:{}", stickers.len()))
            .await;
    }

    async fn sticker_panel_shown(&self, animated: bool) {
        self.record(format!("sticker_panel_shown:{}", animated))
            .await;
    }

    async fn sticker_panel_dismissed(&self, animated: bool) {
        self.record(format!("sticker_panel_dismissed:{}", animated))
            .await;
    }
}
