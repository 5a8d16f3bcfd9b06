//! Headless slot panel: the state a list UI renders, driven through a
//! [`SlotService`].

use std::sync::{Arc, Mutex, PoisonError};

use memslot_common::{BridgeError, ProcessStatus, SettingsListItem, SettingsState};
use serde_json::Value;
use tracing::{info, warn};

use crate::service::SlotService;

pub struct SlotPanel {
    service: Arc<dyn SlotService>,
    /// `None` until the first successful load.
    items: Option<Vec<SettingsListItem>>,
    url: Option<String>,
    status: Arc<Mutex<Option<ProcessStatus>>>,
}

impl SlotPanel {
    pub fn new(service: Arc<dyn SlotService>) -> Self {
        Self {
            service,
            items: None,
            url: None,
            status: Arc::new(Mutex::new(None)),
        }
    }

    /// Fetch the resource URL and slot list together.
    pub async fn init(&mut self) -> Result<(), BridgeError> {
        let info = self.service.init().await.inspect_err(|e| {
            warn!(error = %e, "panel init failed");
        })?;
        info!(slots = info.game_settings_list.len(), "panel initialized");
        self.url = Some(info.url);
        self.items = Some(info.game_settings_list);
        Ok(())
    }

    /// Re-read the slot list from the host.
    pub async fn refresh(&mut self) -> Result<(), BridgeError> {
        let items = self.service.list_settings().await.inspect_err(|e| {
            warn!(error = %e, "slot list refresh failed");
        })?;
        self.items = Some(items);
        Ok(())
    }

    pub async fn rename(&mut self, index: usize, name: &str) -> Result<(), BridgeError> {
        self.service
            .rename_slot(index, name)
            .await
            .inspect_err(|e| warn!(index, error = %e, "rename failed"))?;
        if let Some(item) = self.items.as_mut().and_then(|items| items.get_mut(index)) {
            item.name = name.to_string();
        }
        Ok(())
    }

    /// Save into slot `index`. On success a never-saved row is marked as
    /// saved locally so Load becomes available without a refresh.
    pub async fn save(&mut self, index: usize) -> Result<(), BridgeError> {
        self.service
            .save_slot(index)
            .await
            .inspect_err(|e| warn!(index, error = %e, "save failed"))?;
        if let Some(item) = self.items.as_mut().and_then(|items| items.get_mut(index)) {
            if item.state() == SettingsState::Absent {
                item.game_settings = Some(Value::Object(Default::default()));
            }
        }
        Ok(())
    }

    pub async fn load(&self, index: usize) -> Result<(), BridgeError> {
        self.service
            .load_slot(index)
            .await
            .inspect_err(|e| warn!(index, error = %e, "load failed"))
    }

    /// Open the resource URL received from `init`. Does nothing before init.
    pub async fn open_link(&self) -> Result<(), BridgeError> {
        match &self.url {
            Some(url) => self
                .service
                .open_link(url)
                .await
                .inspect_err(|e| warn!(error = %e, "open link failed")),
            None => Ok(()),
        }
    }

    pub fn service(&self) -> &Arc<dyn SlotService> {
        &self.service
    }

    pub fn items(&self) -> Option<&[SettingsListItem]> {
        self.items.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Whether the Load action is enabled for row `index`.
    pub fn can_load(&self, index: usize) -> bool {
        self.items
            .as_ref()
            .and_then(|items| items.get(index))
            .is_some_and(SettingsListItem::can_load)
    }

    /// Start recording status pushes.
    pub fn watch_status(&self) {
        let latest = Arc::clone(&self.status);
        self.service
            .set_status_listener(Some(Arc::new(move |status: ProcessStatus| {
                *latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(status);
            })));
    }

    pub fn unwatch_status(&self) {
        self.service.set_status_listener(None);
    }

    /// Most recent status push, if any arrived while watching.
    pub fn latest_status(&self) -> Option<ProcessStatus> {
        *self.status.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
