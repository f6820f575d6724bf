use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::RwLock;
use tracing::debug;

use super::ChatWidget;
use crate::room::{ChatMessage, MessageId};

/// Default transcript capacity. Matches the number of recent messages the
/// chat service replays on join.
const DEFAULT_CAPACITY: usize = 500;

/// Default chat widget keeping a capped in-memory transcript.
///
/// The relay forwards message events here as part of its base dispatch;
/// the embedding UI reads the transcript back out through `messages()`.
pub struct TranscriptChatWidget {
    capacity: usize,
    transcript: RwLock<VecDeque<ChatMessage>>,
}

impl TranscriptChatWidget {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            transcript: RwLock::new(VecDeque::new()),
        }
    }

    /// Current transcript, oldest message first.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.transcript.read().await.iter().cloned().collect()
    }
}

impl Default for TranscriptChatWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatWidget for TranscriptChatWidget {
    async fn message_added(&self, message: &ChatMessage) {
        let mut transcript = self.transcript.write().await;
        if transcript.len() == self.capacity {
            transcript.pop_front();
        }
        transcript.push_back(message.clone());
    }

    async fn message_removed(&self, message_id: &MessageId) {
        let mut transcript = self.transcript.write().await;
        transcript.retain(|m| &m.id != message_id);
    }

    async fn messages_flushed(&self) {
        let mut transcript = self.transcript.write().await;
        let dropped = transcript.len();
        transcript.clear();
        debug!(dropped = dropped, "Transcript flushed");
    }

    fn widget_name(&self) -> &'static str {
        "TranscriptChatWidget"
    }
}
