use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Host-reported readiness flags, pushed whenever either one changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStatus {
    /// The memory offsets for the running game build have been resolved.
    pub offsets_loaded: bool,
    /// The target game process is attached.
    pub process_attached: bool,
}

/// Whether a slot holds saved settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsState {
    /// Nothing has ever been saved to the slot.
    Absent,
    /// Saved, but the blob carries no fields (or the panel patched it locally).
    Empty,
    Populated,
}

/// One row of the slot list as the host reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsListItem {
    pub name: String,
    /// Opaque settings blob; `None` when the slot was never saved.
    #[serde(default)]
    pub game_settings: Option<Value>,
}

impl SettingsListItem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            game_settings: None,
        }
    }

    pub fn state(&self) -> SettingsState {
        match &self.game_settings {
            None | Some(Value::Null) => SettingsState::Absent,
            Some(Value::String(s)) if s.is_empty() => SettingsState::Empty,
            Some(Value::Object(map)) if map.is_empty() => SettingsState::Empty,
            Some(Value::Array(items)) if items.is_empty() => SettingsState::Empty,
            Some(_) => SettingsState::Populated,
        }
    }

    /// Load is offered for every slot that has been saved at least once.
    pub fn can_load(&self) -> bool {
        self.state() != SettingsState::Absent
    }
}

/// Result of the combined startup call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitInfo {
    /// External resource URL shown by the panel.
    pub url: String,
    pub game_settings_list: Vec<SettingsListItem>,
}
