//! Host side of memslot.
//!
//! Owns the slot file and the game process handle, executes the envelopes
//! the panel sends, and pushes process status changes back.

pub mod endpoint;
pub mod game_settings;
pub mod monitor;
pub mod opener;
pub mod process;
pub mod storage;

pub use endpoint::{ClientSink, EndpointError, HostEndpoint};
pub use game_settings::GameSettings;
pub use monitor::StatusMonitor;
pub use opener::{is_openable, SystemUrlOpener, UrlOpener};
pub use process::{GameProcess, MemoryProcess, ProcessError};
pub use storage::{default_data_path, SlotFile, SlotStore, StoredSlot};
