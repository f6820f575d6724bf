// Sticker catalog types and the picker-panel collaborator

// Public API - what other modules can use
pub use panel::{EmbeddedStickerPanel, StickerError, StickerPanelView};
pub use types::{Sticker, StickerPanelState};

// Internal modules
mod panel;
mod types;
