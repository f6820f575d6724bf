use serde::{Deserialize, Serialize};

/// One selectable sticker in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sticker {
    /// Short name the sticker is sent as (e.g. `"smile"`).
    pub name: String,
    /// Location of the sticker image.
    pub image_url: String,
}

impl Sticker {
    pub fn new(name: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            image_url: image_url.into(),
        }
    }
}

/// Visibility and sizing of the sticker picker overlay.
///
/// Owned by the relay; mutated only through its show/dismiss operations and
/// the height setter. Survives reconnects untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StickerPanelState {
    pub is_showing: bool,
    /// Height of the panel while showing, in points.
    pub height: u32,
}

impl StickerPanelState {
    pub fn hidden(height: u32) -> Self {
        Self {
            is_showing: false,
            height,
        }
    }
}
