//! Access to the running game's settings.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use memslot_common::ProcessStatus;

use crate::game_settings::GameSettings;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessError {
    #[error("offsets not loaded")]
    OffsetsUnavailable,

    #[error("process not attached")]
    NotAttached,
}

/// A game process whose lobby settings can be read and written.
pub trait GameProcess: Send + Sync {
    fn status(&self) -> ProcessStatus;

    fn read_settings(&self) -> Result<GameSettings, ProcessError>;

    fn write_settings(&self, settings: &GameSettings) -> Result<(), ProcessError>;
}

/// In-memory game process. Starts detached with offsets unresolved.
#[derive(Default)]
pub struct MemoryProcess {
    offsets_loaded: AtomicBool,
    attached: AtomicBool,
    settings: Mutex<GameSettings>,
}

impl MemoryProcess {
    pub fn new() -> Self {
        Self::default()
    }

    /// A process that is already attached with offsets resolved.
    pub fn ready(settings: GameSettings) -> Self {
        Self {
            offsets_loaded: AtomicBool::new(true),
            attached: AtomicBool::new(true),
            settings: Mutex::new(settings),
        }
    }

    pub fn set_offsets_loaded(&self, loaded: bool) {
        self.offsets_loaded.store(loaded, Ordering::SeqCst);
    }

    pub fn set_attached(&self, attached: bool) {
        self.attached.store(attached, Ordering::SeqCst);
    }

    /// Replace the live settings, as if changed in the game lobby.
    pub fn set_live_settings(&self, settings: GameSettings) {
        *self.settings.lock().unwrap_or_else(PoisonError::into_inner) = settings;
    }

    pub fn live_settings(&self) -> GameSettings {
        self.settings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn ensure_ready(&self) -> Result<(), ProcessError> {
        let status = self.status();
        if !status.offsets_loaded {
            return Err(ProcessError::OffsetsUnavailable);
        }
        if !status.process_attached {
            return Err(ProcessError::NotAttached);
        }
        Ok(())
    }
}

impl GameProcess for MemoryProcess {
    fn status(&self) -> ProcessStatus {
        ProcessStatus {
            offsets_loaded: self.offsets_loaded.load(Ordering::SeqCst),
            process_attached: self.attached.load(Ordering::SeqCst),
        }
    }

    fn read_settings(&self) -> Result<GameSettings, ProcessError> {
        self.ensure_ready()?;
        Ok(self.live_settings())
    }

    fn write_settings(&self, settings: &GameSettings) -> Result<(), ProcessError> {
        self.ensure_ready()?;
        let mut live = self.settings.lock().unwrap_or_else(PoisonError::into_inner);
        settings.apply_to(&mut live);
        Ok(())
    }
}
