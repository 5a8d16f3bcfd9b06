//! The operation catalog and its host-backed implementation.

use std::sync::Arc;

use async_trait::async_trait;
use memslot_common::{ops, BridgeError, InitInfo, SettingsListItem};
use serde_json::json;
use tracing::info;

use crate::bridge::Bridge;
use crate::dispatcher::HostBinding;
use crate::offline::OfflineSlotService;
use crate::router::InboundRouter;
use crate::status::StatusListener;

/// Everything the panel can ask of the host.
#[async_trait]
pub trait SlotService: Send + Sync {
    /// Current slot list, in slot order.
    async fn list_settings(&self) -> Result<Vec<SettingsListItem>, BridgeError>;

    async fn rename_slot(&self, index: usize, name: &str) -> Result<(), BridgeError>;

    /// Capture the game's current settings into slot `index`.
    async fn save_slot(&self, index: usize) -> Result<(), BridgeError>;

    /// Write slot `index` back into the game.
    async fn load_slot(&self, index: usize) -> Result<(), BridgeError>;

    async fn open_link(&self, url: &str) -> Result<(), BridgeError>;

    /// External resource URL and the initial list, in one round trip.
    async fn init(&self) -> Result<InitInfo, BridgeError>;

    /// Replace the status listener; `None` deregisters.
    fn set_status_listener(&self, listener: Option<StatusListener>);
}

/// [`SlotService`] backed by a live host binding.
pub struct HostSlotService {
    bridge: Bridge,
}

impl HostSlotService {
    pub fn new(binding: Arc<dyn HostBinding>) -> Self {
        Self {
            bridge: Bridge::new(binding),
        }
    }

    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }
}

#[async_trait]
impl SlotService for HostSlotService {
    async fn list_settings(&self) -> Result<Vec<SettingsListItem>, BridgeError> {
        self.bridge
            .dispatcher()
            .call(ops::GAME_SETTINGS_LIST, &json!({}))
            .await
    }

    async fn rename_slot(&self, index: usize, name: &str) -> Result<(), BridgeError> {
        self.bridge
            .dispatcher()
            .call(
                ops::SET_GAME_SETTINGS_NAME,
                &json!({ "index": index, "name": name }),
            )
            .await
    }

    async fn save_slot(&self, index: usize) -> Result<(), BridgeError> {
        self.bridge
            .dispatcher()
            .call(ops::SAVE_MEMORY_TO_FILE, &json!({ "index": index }))
            .await
    }

    async fn load_slot(&self, index: usize) -> Result<(), BridgeError> {
        self.bridge
            .dispatcher()
            .call(ops::LOAD_MEMORY_FROM_FILE, &json!({ "index": index }))
            .await
    }

    async fn open_link(&self, url: &str) -> Result<(), BridgeError> {
        self.bridge
            .dispatcher()
            .call(ops::OPEN_EXTERNAL_LINK, &json!({ "url": url }))
            .await
    }

    async fn init(&self) -> Result<InitInfo, BridgeError> {
        self.bridge.dispatcher().call(ops::INIT, &json!({})).await
    }

    fn set_status_listener(&self, listener: Option<StatusListener>) {
        self.bridge.status().set_listener(listener);
    }
}

/// A selected service plus, when a host is present, the router its
/// messages must be fed to.
pub struct Connection {
    pub service: Arc<dyn SlotService>,
    pub router: Option<InboundRouter>,
}

impl Connection {
    pub fn is_offline(&self) -> bool {
        self.router.is_none()
    }
}

/// Pick the host-backed service when a binding exists, the offline
/// stand-in otherwise. Decided once.
pub fn connect(binding: Option<Arc<dyn HostBinding>>) -> Connection {
    match binding {
        Some(binding) => {
            let service = HostSlotService::new(binding);
            let router = service.bridge().router();
            info!("host binding present, using host-backed slot service");
            Connection {
                service: Arc::new(service),
                router: Some(router),
            }
        }
        None => {
            info!("no host binding, using offline slot service");
            Connection {
                service: Arc::new(OfflineSlotService::new()),
                router: None,
            }
        }
    }
}
