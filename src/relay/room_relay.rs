use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use super::builder::RoomRelayBuilder;
use super::hooks::{RoomEventHooks, StickerEventHooks};
use super::subscriber::RelayRoomSubscriber;
use crate::auth::{classify_token, AuthError, MemberIdentity};
use crate::client::{ChatClient, ChatError, ConfigureError};
use crate::event::{EventBus, RoomEvent, RoomEventError, RoomSubscription};
use crate::room::{ChatRoom, ChatUser, ConnectionDescriptor, ConnectionOptions, Roster};
use crate::sticker::{Sticker, StickerPanelState, StickerPanelView};
use crate::widget::ChatWidget;

/// Chatroom event relay with an embedded chat widget and sticker panel.
///
/// The relay owns the connection descriptor and the sticker panel state,
/// subscribes to the active room's events, and dispatches each event in two
/// phases: mandatory bookkeeping (connection flag, roster, widget
/// forwarding) followed by the caller's hook. The relay connects one
/// chatroom at a time; a new `connect` tears down the current connection
/// first.
///
/// Cloning is cheap; clones share the same state.
#[derive(Clone)]
pub struct RoomRelay {
    inner: Arc<RelayInner>,
}

pub(crate) struct RelayInner {
    pub(super) client: Arc<dyn ChatClient>,
    pub(super) widget: Arc<dyn ChatWidget>,
    pub(super) sticker_panel: Arc<dyn StickerPanelView>,
    pub(super) room_hooks: Arc<dyn RoomEventHooks>,
    pub(super) sticker_hooks: Arc<dyn StickerEventHooks>,
    pub(super) event_bus: EventBus,
    pub(super) descriptor: RwLock<ConnectionDescriptor>,
    pub(super) state: RwLock<RelayState>,
    pub(super) panel_state: RwLock<StickerPanelState>,
}

#[derive(Default)]
pub(super) struct RelayState {
    pub(super) configured: bool,
    pub(super) stickers: Vec<Sticker>,
    pub(super) stickers_loaded: bool,
    pub(super) connection: Option<ActiveConnection>,
}

pub(super) struct ActiveConnection {
    pub(super) room: ChatRoom,
    pub(super) connected: bool,
    pub(super) roster: Roster,
    pub(super) subscription: JoinHandle<()>,
}

impl RoomRelay {
    /// Starts building a relay. Credentials are required up front; there is
    /// no way to construct a relay without them.
    pub fn builder(
        member_token: impl Into<String>,
        room_name: impl Into<String>,
        options: ConnectionOptions,
    ) -> RoomRelayBuilder {
        RoomRelayBuilder::new(member_token, room_name, options)
    }

    pub(super) fn from_inner(inner: RelayInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    /// Configure the chat environment.
    ///
    /// On success the `configured` hook fires and the sticker catalog is
    /// retrieved (once per relay). On failure the `configure_failed` hook
    /// fires with the cause and the error is returned; nothing is retried.
    #[instrument(skip(self))]
    pub async fn configure(&self) -> Result<(), ConfigureError> {
        match self.inner.client.configure().await {
            Ok(()) => {
                self.inner.state.write().await.configured = true;
                info!("Chat environment configured");
                self.inner.room_hooks.configured().await;
                self.load_stickers().await;
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "Chat environment configuration failed");
                self.inner.room_hooks.configure_failed(&error).await;
                Err(error)
            }
        }
    }

    async fn load_stickers(&self) {
        if self.inner.state.read().await.stickers_loaded {
            debug!("Sticker catalog already loaded, skipping retrieval");
            return;
        }

        match self.inner.sticker_panel.load_catalog().await {
            Ok(stickers) => {
                {
                    let mut state = self.inner.state.write().await;
                    state.stickers = stickers.clone();
                    state.stickers_loaded = true;
                }
                info!(stickers = stickers.len(), "Sticker catalog loaded");
                self.inner.sticker_hooks.stickers_loaded(&stickers).await;
            }
            Err(error) => {
                warn!(error = %error, "Sticker catalog retrieval failed");
            }
        }
    }

    /// Connect to the chatroom named by the current descriptor.
    pub async fn connect(&self) -> Result<(), ChatError> {
        let descriptor = self.inner.descriptor.read().await.clone();
        self.connect_with(descriptor).await
    }

    /// Connect to a chatroom with a new descriptor, replacing the current
    /// one wholesale.
    ///
    /// The relay connects one chatroom only: any existing connection is
    /// torn down (with its `disconnected` hook, if it had been established)
    /// before the new connection is attempted. Rejection by the chat
    /// service arrives asynchronously as a `connect_failed` hook.
    #[instrument(skip(self, descriptor), fields(room = %descriptor.room_name))]
    pub async fn connect_with(&self, descriptor: ConnectionDescriptor) -> Result<(), ChatError> {
        self.teardown_active().await;

        *self.inner.descriptor.write().await = descriptor.clone();

        // Subscribe before asking the client to connect so the first
        // events cannot be missed.
        let subscriber = Arc::new(RelayRoomSubscriber::new(Arc::clone(&self.inner)));
        let subscription = RoomSubscription::new(
            descriptor.room_name.clone(),
            subscriber,
            self.inner.event_bus.clone(),
        )
        .start()
        .await;

        {
            let mut state = self.inner.state.write().await;
            state.connection = Some(ActiveConnection {
                room: ChatRoom::new(descriptor.room_name.clone()),
                connected: false,
                roster: Roster::new(),
                subscription,
            });
        }

        if let Err(error) = self.inner.client.connect(&descriptor).await {
            warn!(error = %error, "Chat client refused connect call");
            if let Some(conn) = self.inner.state.write().await.connection.take() {
                conn.subscription.abort();
            }
            return Err(error);
        }

        Ok(())
    }

    /// Tear down the active connection, if any.
    #[instrument(skip(self))]
    pub async fn disconnect(&self) {
        self.teardown_active().await;
    }

    async fn teardown_active(&self) {
        let existing = self.inner.state.write().await.connection.take();
        let Some(conn) = existing else {
            return;
        };

        conn.subscription.abort();
        if let Err(error) = self.inner.client.disconnect(&conn.room.name).await {
            warn!(room = %conn.room.name, error = %error, "Disconnect during teardown failed");
        }

        // A superseded connection that never reached connected state has no
        // transition to report.
        if conn.connected {
            info!(room = %conn.room.name, "Chatroom connection torn down");
            self.inner.room_hooks.disconnected(&conn.room).await;
        }
    }

    /// Show the sticker panel. Updates the relay's panel state, then fires
    /// the `sticker_panel_shown` hook.
    pub async fn show_sticker_panel(&self, animated: bool) {
        self.inner.sticker_panel.show(animated).await;
        self.inner.panel_state.write().await.is_showing = true;
        self.inner.sticker_hooks.sticker_panel_shown(animated).await;
    }

    /// Dismiss the sticker panel. Updates the relay's panel state, then
    /// fires the `sticker_panel_dismissed` hook.
    pub async fn dismiss_sticker_panel(&self, animated: bool) {
        self.inner.sticker_panel.dismiss(animated).await;
        self.inner.panel_state.write().await.is_showing = false;
        self.inner
            .sticker_hooks
            .sticker_panel_dismissed(animated)
            .await;
    }

    /// Whether the sticker panel is currently showing. Pure query.
    pub async fn is_sticker_panel_showing(&self) -> bool {
        self.inner.panel_state.read().await.is_showing
    }

    /// Height of the sticker panel while showing, in points.
    pub async fn sticker_panel_height(&self) -> u32 {
        self.inner.panel_state.read().await.height
    }

    pub async fn set_sticker_panel_height(&self, height: u32) {
        self.inner.panel_state.write().await.height = height;
    }

    pub async fn is_configured(&self) -> bool {
        self.inner.state.read().await.configured
    }

    pub async fn is_connected(&self) -> bool {
        self.inner
            .state
            .read()
            .await
            .connection
            .as_ref()
            .is_some_and(|c| c.connected)
    }

    /// Handle to the currently connected room. `None` unless a connection
    /// is established; a disconnect invalidates the handle.
    pub async fn current_room(&self) -> Option<ChatRoom> {
        self.inner
            .state
            .read()
            .await
            .connection
            .as_ref()
            .filter(|c| c.connected)
            .map(|c| c.room.clone())
    }

    /// The descriptor the relay will connect with (or is connected with).
    pub async fn descriptor(&self) -> ConnectionDescriptor {
        self.inner.descriptor.read().await.clone()
    }

    /// Users currently tracked on the roster of the active room.
    pub async fn roster_users(&self) -> Vec<ChatUser> {
        self.inner
            .state
            .read()
            .await
            .connection
            .as_ref()
            .map(|c| c.roster.users())
            .unwrap_or_default()
    }

    /// Sticker catalog, empty until loaded.
    pub async fn stickers(&self) -> Vec<Sticker> {
        self.inner.state.read().await.stickers.clone()
    }

    /// Identity the current descriptor connects as.
    pub async fn member_identity(&self) -> Result<MemberIdentity, AuthError> {
        let descriptor = self.inner.descriptor.read().await;
        classify_token(&descriptor.member_token)
    }

    /// Bus the relay listens on; the chat client emits events here.
    pub fn event_bus(&self) -> EventBus {
        self.inner.event_bus.clone()
    }
}

impl RelayInner {
    /// Non-overridable dispatch entry point.
    ///
    /// Phase one updates the relay's bookkeeping under the state lock,
    /// phase two forwards display events to the widget, phase three invokes
    /// the caller's hook. Hooks run last so they observe the updated state,
    /// and nothing they do can skip the earlier phases.
    pub(crate) async fn dispatch_room_event(
        &self,
        room_name: &str,
        event: RoomEvent,
    ) -> Result<(), RoomEventError> {
        let room_snapshot = {
            let mut state = self.state.write().await;
            let conn = match state.connection.as_mut() {
                Some(conn) if conn.room.name == room_name => conn,
                _ => {
                    debug!(
                        room = %room_name,
                        event_type = event.event_type(),
                        "Dropping event for inactive room"
                    );
                    return Err(RoomEventError::InactiveRoom(room_name.to_string()));
                }
            };

            match &event {
                RoomEvent::Connected => conn.connected = true,
                RoomEvent::InputModeChanged { mode } => conn.room.input_mode = *mode,
                RoomEvent::UsersJoined { users } => conn.roster.apply_joined(users),
                RoomEvent::UsersUpdated { users } => conn.roster.apply_updated(users),
                RoomEvent::UsersLeft { labels } => conn.roster.apply_left(labels),
                RoomEvent::UserCountChanged { count } => {
                    conn.roster.set_reported_count(*count);
                    conn.room.user_count = *count;
                }
                _ => {}
            }

            let snapshot = conn.room.clone();

            // Terminal events invalidate the room handle.
            if matches!(
                event,
                RoomEvent::Disconnected | RoomEvent::ConnectFailed { .. }
            ) {
                state.connection = None;
            }

            snapshot
        };

        match &event {
            RoomEvent::MessageAdded { message } => self.widget.message_added(message).await,
            RoomEvent::MessageRemoved { message_id } => {
                self.widget.message_removed(message_id).await;
            }
            RoomEvent::MessagesFlushed => self.widget.messages_flushed().await,
            _ => {}
        }

        let hooks = &self.room_hooks;
        match event {
            RoomEvent::Connected => hooks.connected(&room_snapshot).await,
            RoomEvent::Disconnected => hooks.disconnected(&room_snapshot).await,
            RoomEvent::ConnectFailed { error } => {
                hooks.connect_failed(&room_snapshot, &error).await;
            }
            RoomEvent::Error { error } => hooks.room_error(&room_snapshot, &error).await,
            RoomEvent::InputModeChanged { mode } => {
                hooks.input_mode_changed(&room_snapshot, mode).await;
            }
            RoomEvent::UsersJoined { users } => hooks.users_joined(&room_snapshot, &users).await,
            RoomEvent::UsersUpdated { users } => hooks.users_updated(&room_snapshot, &users).await,
            RoomEvent::UsersLeft { labels } => hooks.users_left(&room_snapshot, &labels).await,
            RoomEvent::UserCountChanged { count } => {
                hooks.user_count_changed(&room_snapshot, count).await;
            }
            RoomEvent::MessageAdded { message } => {
                hooks.message_added(&room_snapshot, &message).await;
            }
            RoomEvent::MessageRemoved { message_id } => {
                hooks.message_removed(&room_snapshot, &message_id).await;
            }
            RoomEvent::MessagesFlushed => hooks.messages_flushed(&room_snapshot).await,
            RoomEvent::AggregatedDataAdded { payload } => {
                hooks.aggregated_data_added(&room_snapshot, &payload).await;
            }
            RoomEvent::RawDataAdded { payload } => {
                hooks.raw_data_added(&room_snapshot, &payload).await;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LoopbackChatClient;
    use crate::room::{InputMode, UserLabel, UserRole};
    use crate::sticker::EmbeddedStickerPanel;
    use async_trait::async_trait;
    use rstest::rstest;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::sync::Mutex;
    use tokio::time::{sleep, Duration};

    /// Hook object that overrides every room event to do its own work, so
    /// tests can verify the relay's bookkeeping still ran underneath.
    #[derive(Default)]
    struct BusyHooks {
        connected_seen: AtomicU32,
        configure_failures: Mutex<Vec<String>>,
        left_labels: Mutex<Vec<UserLabel>>,
    }

    #[async_trait]
    impl RoomEventHooks for BusyHooks {
        async fn connected(&self, _room: &ChatRoom) {
            self.connected_seen.fetch_add(1, Ordering::SeqCst);
        }

        async fn configure_failed(&self, error: &ConfigureError) {
            self.configure_failures.lock().await.push(error.to_string());
        }

        async fn users_left(&self, _room: &ChatRoom, labels: &[UserLabel]) {
            self.left_labels.lock().await.extend_from_slice(labels);
        }
    }

    #[async_trait]
    impl StickerEventHooks for BusyHooks {}

    fn guest_relay(hooks: Arc<BusyHooks>) -> RoomRelay {
        RoomRelay::builder("", "lobby", ConnectionOptions::default())
            .with_room_hooks(hooks.clone())
            .with_sticker_hooks(hooks)
            .build()
    }

    fn user(label: u64, name: &str) -> ChatUser {
        ChatUser::new(UserLabel(label), name, UserRole::Normal)
    }

    #[tokio::test]
    async fn test_configure_failure_uses_failure_channel_only() {
        let bus = EventBus::with_default_capacity();
        let client = Arc::new(LoopbackChatClient::new(bus.clone()));
        client
            .script_configure_failure(ConfigureError::Network("dns down".to_string()))
            .await;

        let hooks = Arc::new(BusyHooks::default());
        let relay = RoomRelay::builder("", "lobby", ConnectionOptions::default())
            .with_event_bus(bus)
            .with_client(client)
            .with_room_hooks(hooks.clone())
            .build();

        let result = relay.configure().await;

        assert!(result.is_err());
        assert!(!relay.is_configured().await);
        let failures = hooks.configure_failures.lock().await;
        assert_eq!(failures.len(), 1);
        assert!(!failures[0].is_empty());
    }

    #[tokio::test]
    async fn test_bookkeeping_runs_even_with_overridden_hooks() {
        let hooks = Arc::new(BusyHooks::default());
        let relay = guest_relay(hooks.clone());

        relay.configure().await.unwrap();
        relay.connect().await.unwrap();
        sleep(Duration::from_millis(50)).await;

        // The override ran...
        assert_eq!(hooks.connected_seen.load(Ordering::SeqCst), 1);
        // ...and the relay's own connected flag was still updated.
        assert!(relay.is_connected().await);
        assert_eq!(relay.current_room().await.unwrap().name, "lobby");
    }

    #[tokio::test]
    async fn test_users_left_updates_roster_and_delivers_labels_only() {
        let hooks = Arc::new(BusyHooks::default());
        let relay = guest_relay(hooks.clone());
        relay.configure().await.unwrap();
        relay.connect().await.unwrap();
        sleep(Duration::from_millis(50)).await;

        let bus = relay.event_bus();
        bus.emit_to_room(
            "lobby",
            RoomEvent::UsersJoined {
                users: vec![user(10, "alice"), user(11, "bob")],
            },
        )
        .await;
        bus.emit_to_room(
            "lobby",
            RoomEvent::UsersLeft {
                labels: vec![UserLabel(10)],
            },
        )
        .await;
        sleep(Duration::from_millis(50)).await;

        assert_eq!(*hooks.left_labels.lock().await, vec![UserLabel(10)]);
        let remaining = relay.roster_users().await;
        let named: Vec<&str> = remaining.iter().map(|u| u.name.as_str()).collect();
        assert!(named.contains(&"bob"));
        assert!(!named.contains(&"alice"));
    }

    #[tokio::test]
    async fn test_reconnect_replaces_descriptor() {
        let hooks = Arc::new(BusyHooks::default());
        let relay = guest_relay(hooks);
        relay.configure().await.unwrap();

        relay.connect().await.unwrap();
        sleep(Duration::from_millis(50)).await;

        let second = ConnectionDescriptor::new("", "side-room", ConnectionOptions::personal_chat());
        relay.connect_with(second.clone()).await.unwrap();
        sleep(Duration::from_millis(50)).await;

        assert_eq!(relay.descriptor().await, second);
        assert_eq!(relay.current_room().await.unwrap().name, "side-room");
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    #[tokio::test]
    async fn test_panel_query_tracks_show_and_dismiss(#[case] animated: bool) {
        let hooks = Arc::new(BusyHooks::default());
        let relay = guest_relay(hooks);

        assert!(!relay.is_sticker_panel_showing().await);

        relay.show_sticker_panel(animated).await;
        assert!(relay.is_sticker_panel_showing().await);

        relay.dismiss_sticker_panel(animated).await;
        assert!(!relay.is_sticker_panel_showing().await);
    }

    #[tokio::test]
    async fn test_panel_height_survives_reconnect() {
        let hooks = Arc::new(BusyHooks::default());
        let relay = guest_relay(hooks);
        relay.configure().await.unwrap();

        relay.set_sticker_panel_height(300).await;
        relay.show_sticker_panel(false).await;

        relay.connect().await.unwrap();
        sleep(Duration::from_millis(50)).await;
        relay
            .connect_with(ConnectionDescriptor::new(
                "",
                "side-room",
                ConnectionOptions::default(),
            ))
            .await
            .unwrap();
        sleep(Duration::from_millis(50)).await;

        assert_eq!(relay.sticker_panel_height().await, 300);
        assert!(relay.is_sticker_panel_showing().await);
    }

    #[tokio::test]
    async fn test_input_mode_bookkeeping_follows_events() {
        let hooks = Arc::new(BusyHooks::default());
        let relay = guest_relay(hooks);
        relay.configure().await.unwrap();
        relay.connect().await.unwrap();
        sleep(Duration::from_millis(50)).await;

        relay
            .event_bus()
            .emit_to_room(
                "lobby",
                RoomEvent::InputModeChanged {
                    mode: InputMode::Member,
                },
            )
            .await;
        sleep(Duration::from_millis(50)).await;

        assert_eq!(
            relay.current_room().await.unwrap().input_mode,
            InputMode::Member
        );
    }

    #[tokio::test]
    async fn test_stickers_loaded_fires_once_across_reconfigures() {
        struct CountingStickerHooks {
            loads: AtomicU32,
        }

        #[async_trait]
        impl StickerEventHooks for CountingStickerHooks {
            async fn stickers_loaded(&self, _stickers: &[Sticker]) {
                self.loads.fetch_add(1, Ordering::SeqCst);
            }
        }

        let sticker_hooks = Arc::new(CountingStickerHooks {
            loads: AtomicU32::new(0),
        });
        let panel = Arc::new(EmbeddedStickerPanel::with_catalog(vec![Sticker::new(
            "smile",
            "https://stickers.test/smile.png",
        )]));

        let relay = RoomRelay::builder("", "lobby", ConnectionOptions::default())
            .with_sticker_panel(panel)
            .with_sticker_hooks(sticker_hooks.clone())
            .build();

        relay.configure().await.unwrap();
        relay.configure().await.unwrap();

        assert_eq!(sticker_hooks.loads.load(Ordering::SeqCst), 1);
        assert_eq!(relay.stickers().await.len(), 1);
    }
}
