/// Tunables applied at relay construction.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Per-room event channel capacity.
    pub event_capacity: usize,
    /// Initial sticker panel height, in points.
    pub panel_height: u32,
}

impl RelayConfig {
    pub fn new() -> Self {
        // Allow overriding via env vars; fall back to the built-in defaults.
        let event_capacity = std::env::var("CHAT_EVENT_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256);

        let panel_height = std::env::var("STICKER_PANEL_HEIGHT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(220);

        Self {
            event_capacity,
            panel_height,
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::new()
    }
}
