//! Stand-in used when no host binding exists.
//!
//! Serves a fixed synthetic slot list and accepts every mutation without
//! doing anything, so the panel runs unmodified outside its host.

use async_trait::async_trait;
use memslot_common::{BridgeError, InitInfo, SettingsListItem};
use serde_json::Value;
use tracing::debug;

use crate::service::SlotService;
use crate::status::{StatusChannel, StatusListener};

const OFFLINE_SLOT_COUNT: usize = 10;

/// URL reported by [`OfflineSlotService::init`].
pub const OFFLINE_URL: &str = "https://github.com/memslot/memslot";

/// The synthetic list: `Mock 1`..`Mock 10`, even rows saved-but-empty,
/// odd rows never saved.
pub fn offline_slots() -> Vec<SettingsListItem> {
    (0..OFFLINE_SLOT_COUNT)
        .map(|i| SettingsListItem {
            name: format!("Mock {}", i + 1),
            game_settings: (i % 2 == 0).then(|| Value::String(String::new())),
        })
        .collect()
}

#[derive(Default)]
pub struct OfflineSlotService {
    // Never fed.
    status: StatusChannel,
}

impl OfflineSlotService {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SlotService for OfflineSlotService {
    async fn list_settings(&self) -> Result<Vec<SettingsListItem>, BridgeError> {
        Ok(offline_slots())
    }

    async fn rename_slot(&self, index: usize, name: &str) -> Result<(), BridgeError> {
        debug!(index, name, "offline: rename ignored");
        Ok(())
    }

    async fn save_slot(&self, index: usize) -> Result<(), BridgeError> {
        debug!(index, "offline: save ignored");
        Ok(())
    }

    async fn load_slot(&self, index: usize) -> Result<(), BridgeError> {
        debug!(index, "offline: load ignored");
        Ok(())
    }

    async fn open_link(&self, url: &str) -> Result<(), BridgeError> {
        debug!(url, "offline: open link ignored");
        Ok(())
    }

    async fn init(&self) -> Result<InitInfo, BridgeError> {
        Ok(InitInfo {
            url: OFFLINE_URL.to_string(),
            game_settings_list: offline_slots(),
        })
    }

    fn set_status_listener(&self, listener: Option<StatusListener>) {
        self.status.set_listener(listener);
    }
}
