//! Client side of the memslot host bridge.
//!
//! Turns the host's single fire-and-forget entry point into awaitable
//! calls:
//! - [`CallDispatcher`] registers a pending call under a fresh token and
//!   sends `{type, callback, payload}` to the host
//! - [`InboundRouter`] takes every host message, settling the matching
//!   pending call or forwarding a status push
//! - [`StatusChannel`] is the single listener slot for status pushes
//! - [`SlotService`] is the operation catalog, served either by the host
//!   ([`HostSlotService`]) or by [`OfflineSlotService`], chosen once by
//!   [`connect`]

pub mod bridge;
pub mod dispatcher;
pub mod offline;
pub mod panel;
pub mod pending;
pub mod router;
pub mod service;
pub mod status;

pub use bridge::Bridge;
pub use dispatcher::{CallDispatcher, HostBinding, ReplyFuture};
pub use offline::{offline_slots, OfflineSlotService, OFFLINE_URL};
pub use panel::SlotPanel;
pub use pending::PendingCalls;
pub use router::InboundRouter;
pub use service::{connect, Connection, HostSlotService, SlotService};
pub use status::{StatusChannel, StatusListener};
