use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::debug;

use super::types::Sticker;

/// Errors raised by the sticker collaborator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StickerError {
    #[error("sticker catalog unavailable: {0}")]
    CatalogUnavailable(String),
}

/// Boundary trait for the sticker picker component.
///
/// The relay drives visibility through `show`/`dismiss` and keeps its own
/// panel bookkeeping; `is_showing` reports the component's view of itself,
/// which a custom implementation may animate lazily.
#[async_trait]
pub trait StickerPanelView: Send + Sync {
    /// Retrieve the sticker catalog this panel presents.
    async fn load_catalog(&self) -> Result<Vec<Sticker>, StickerError>;

    async fn show(&self, animated: bool);

    async fn dismiss(&self, animated: bool);

    fn is_showing(&self) -> bool;
}

/// Default sticker panel holding a fixed catalog in memory.
pub struct EmbeddedStickerPanel {
    catalog: Vec<Sticker>,
    showing: AtomicBool,
}

impl EmbeddedStickerPanel {
    pub fn new() -> Self {
        Self::with_catalog(Vec::new())
    }

    pub fn with_catalog(catalog: Vec<Sticker>) -> Self {
        Self {
            catalog,
            showing: AtomicBool::new(false),
        }
    }
}

impl Default for EmbeddedStickerPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StickerPanelView for EmbeddedStickerPanel {
    async fn load_catalog(&self) -> Result<Vec<Sticker>, StickerError> {
        debug!(stickers = self.catalog.len(), "Sticker catalog loaded");
        Ok(self.catalog.clone())
    }

    async fn show(&self, animated: bool) {
        self.showing.store(true, Ordering::SeqCst);
        debug!(animated = animated, "Sticker panel shown");
    }

    async fn dismiss(&self, animated: bool) {
        self.showing.store(false, Ordering::SeqCst);
        debug!(animated = animated, "Sticker panel dismissed");
    }

    fn is_showing(&self) -> bool {
        self.showing.load(Ordering::SeqCst)
    }
}
