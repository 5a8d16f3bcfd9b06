//! JSON file holding the named slots.

use std::fs;
use std::path::{Path, PathBuf};

use memslot_common::{SettingsListItem, StorageError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::game_settings::GameSettings;

/// Platform default location of the slot file.
pub fn default_data_path() -> Result<PathBuf, StorageError> {
    let data_dir = dirs::data_dir().ok_or(StorageError::PathUnavailable)?;
    Ok(data_dir.join("memslot").join("slots.json"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSlot {
    pub name: String,
    #[serde(default)]
    pub game_settings: Option<GameSettings>,
}

impl StoredSlot {
    fn to_list_item(&self) -> SettingsListItem {
        SettingsListItem {
            name: self.name.clone(),
            game_settings: self
                .game_settings
                .as_ref()
                .and_then(|s| serde_json::to_value(s).ok()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotFile {
    pub game_settings_list: Vec<StoredSlot>,
}

impl SlotFile {
    /// Fresh slots named `Settings 1`..`Settings N`.
    pub fn with_defaults(slot_count: usize) -> Self {
        Self {
            game_settings_list: (0..slot_count)
                .map(|i| StoredSlot {
                    name: format!("Settings {}", i + 1),
                    game_settings: None,
                })
                .collect(),
        }
    }

    pub fn list_items(&self) -> Vec<SettingsListItem> {
        self.game_settings_list
            .iter()
            .map(StoredSlot::to_list_item)
            .collect()
    }
}

/// Reads and writes the slot file. Callers reload before every change.
#[derive(Debug, Clone)]
pub struct SlotStore {
    path: PathBuf,
    slot_count: usize,
}

impl SlotStore {
    pub fn new(path: impl Into<PathBuf>, slot_count: usize) -> Self {
        Self {
            path: path.into(),
            slot_count,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the slot file. A missing or unreadable file yields the default
    /// slots; a short list is padded up to the configured count.
    pub fn load(&self) -> SlotFile {
        let mut file = match fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<SlotFile>(&content) {
                Ok(file) => file,
                Err(e) => {
                    warn!(
                        path = %self.path.display(),
                        error = %e,
                        "slot file corrupt, using defaults"
                    );
                    SlotFile::with_defaults(self.slot_count)
                }
            },
            Err(_) => SlotFile::with_defaults(self.slot_count),
        };

        let defaults = SlotFile::with_defaults(self.slot_count);
        let have = file.game_settings_list.len();
        file.game_settings_list
            .extend(defaults.game_settings_list.into_iter().skip(have));
        file
    }

    pub fn save(&self, file: &SlotFile) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(file)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, json)?;
        info!(path = %self.path.display(), "slot file saved");
        Ok(())
    }
}
