use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use super::{ChatClient, ChatError, ConfigureError};
use crate::auth::{
    classify_token, AuthError, MemberIdentity, NicknameGenerator, PetNameNicknameGenerator,
};
use crate::event::{EventBus, RoomEvent};
use crate::room::{ChatUser, ConnectionDescriptor, UserLabel, UserRole};

/// In-process chat client that loops events straight back onto the bus.
///
/// Stands in for the real messaging service in tests and the demo binary:
/// it honors the configure-before-connect contract, rejects dead member
/// tokens the way the service would (asynchronously, via `ConnectFailed`),
/// and announces the connecting user on the roster.
pub struct LoopbackChatClient {
    event_bus: EventBus,
    configured: AtomicBool,
    connected_room: Mutex<Option<String>>,
    scripted_configure_failure: Mutex<Option<ConfigureError>>,
    nicknames: PetNameNicknameGenerator,
}

impl LoopbackChatClient {
    pub fn new(event_bus: EventBus) -> Self {
        Self {
            event_bus,
            configured: AtomicBool::new(false),
            connected_room: Mutex::new(None),
            scripted_configure_failure: Mutex::new(None),
            nicknames: PetNameNicknameGenerator::new(),
        }
    }

    /// Makes the next `configure` call fail with the given error.
    pub async fn script_configure_failure(&self, error: ConfigureError) {
        *self.scripted_configure_failure.lock().await = Some(error);
    }

    /// Room this client currently considers connected, if any.
    pub async fn connected_room(&self) -> Option<String> {
        self.connected_room.lock().await.clone()
    }

    /// Resolves the local user the service would announce for a descriptor.
    async fn local_user(&self, identity: &MemberIdentity) -> ChatUser {
        let label = UserLabel(u64::from(rand::random::<u32>()));
        match identity {
            MemberIdentity::Guest => {
                ChatUser::new(label, self.nicknames.generate().await, UserRole::Normal)
            }
            MemberIdentity::Member(claims) => {
                ChatUser::new(label, claims.display_name(), UserRole::Normal)
            }
        }
    }
}

#[async_trait]
impl ChatClient for LoopbackChatClient {
    #[instrument(skip(self))]
    async fn configure(&self) -> Result<(), ConfigureError> {
        if let Some(error) = self.scripted_configure_failure.lock().await.take() {
            debug!(error = %error, "Loopback configure failing as scripted");
            return Err(error);
        }

        self.configured.store(true, Ordering::SeqCst);
        info!("Loopback chat client configured");
        Ok(())
    }

    #[instrument(skip(self, descriptor), fields(room = %descriptor.room_name))]
    async fn connect(&self, descriptor: &ConnectionDescriptor) -> Result<(), ChatError> {
        if !self.configured.load(Ordering::SeqCst) {
            return Err(ChatError::NotConfigured);
        }

        let room = descriptor.room_name.clone();
        *self.connected_room.lock().await = Some(room.clone());

        // Token rejection is a service-side decision, so it surfaces on the
        // event channel rather than as a synchronous error.
        let identity = match classify_token(&descriptor.member_token) {
            Ok(identity) => identity,
            Err(auth_error) => {
                let reason = match auth_error {
                    AuthError::Expired => "member token is expired".to_string(),
                    AuthError::Malformed(cause) => cause,
                };
                debug!(reason = %reason, "Loopback rejecting connection");
                self.event_bus
                    .emit_to_room(
                        &room,
                        RoomEvent::ConnectFailed {
                            error: ChatError::TokenRejected(reason),
                        },
                    )
                    .await;
                *self.connected_room.lock().await = None;
                return Ok(());
            }
        };

        let user = self.local_user(&identity).await;
        info!(room = %room, user = %user.name, "Loopback connection established");

        self.event_bus.emit_to_room(&room, RoomEvent::Connected).await;
        self.event_bus
            .emit_to_room(&room, RoomEvent::UsersJoined { users: vec![user] })
            .await;
        self.event_bus
            .emit_to_room(&room, RoomEvent::UserCountChanged { count: 1 })
            .await;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn disconnect(&self, room_name: &str) -> Result<(), ChatError> {
        let mut connected = self.connected_room.lock().await;
        if connected.as_deref() == Some(room_name) {
            *connected = None;
            drop(connected);
            self.event_bus
                .emit_to_room(room_name, RoomEvent::Disconnected)
                .await;
            info!(room = %room_name, "Loopback connection closed");
        }
        Ok(())
    }

    fn client_name(&self) -> &'static str {
        "LoopbackChatClient"
    }
}
