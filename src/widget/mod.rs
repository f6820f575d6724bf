// Embeddable chat widget boundary
//
// The widget is the swappable display surface for the chatroom. The relay
// forwards message events to whichever implementation it was built with.

use async_trait::async_trait;

use crate::room::{ChatMessage, MessageId};

// Public API - what other modules can use
pub use transcript::TranscriptChatWidget;

// Internal modules
mod transcript;

/// Display contract for the embedded chat widget.
#[async_trait]
pub trait ChatWidget: Send + Sync {
    /// A message was added to the room and should be displayed.
    async fn message_added(&self, message: &ChatMessage);

    /// A single message was removed and should disappear.
    async fn message_removed(&self, message_id: &MessageId);

    /// Every message was flushed; the display should be cleared.
    async fn messages_flushed(&self);

    /// Get a human-readable name for this widget (for logging/debugging)
    fn widget_name(&self) -> &'static str;
}
