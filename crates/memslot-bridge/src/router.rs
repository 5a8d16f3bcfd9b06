//! Inbound half of the bridge: every host-originated message enters here.

use memslot_common::{CallToken, HostError, InboundMessage, ProcessStatus};
use serde_json::Value;
use tracing::{debug, warn};

use crate::pending::PendingCalls;
use crate::status::StatusChannel;

/// Routes replies to their pending call and status pushes to the listener.
#[derive(Clone)]
pub struct InboundRouter {
    pending: PendingCalls,
    status: StatusChannel,
}

impl InboundRouter {
    pub fn new(pending: PendingCalls, status: StatusChannel) -> Self {
        Self { pending, status }
    }

    /// Settle the call registered under `token`.
    ///
    /// The entry is removed before settling, so a second reply with the same
    /// token finds nothing. Unknown tokens are ignored.
    pub fn deliver_reply(&self, token: &CallToken, error: Option<Value>, value: Option<Value>) {
        let Some(resolver) = self.pending.take(token) else {
            debug!(%token, "reply for unknown call token dropped");
            return;
        };

        let outcome = match error {
            Some(error) if !error.is_null() => Err(HostError(error)),
            _ => Ok(value.unwrap_or(Value::Null)),
        };
        let failed = outcome.is_err();

        if resolver.send(outcome).is_err() {
            debug!(%token, "reply arrived after its future was dropped");
        } else {
            debug!(%token, failed, "host call settled");
        }
    }

    /// Forward a status push to the registered listener, if any.
    pub fn deliver_status(&self, status: ProcessStatus) {
        self.status.deliver(status);
    }

    /// Parse one raw inbound message and dispatch it.
    pub fn route(&self, raw: &str) {
        match InboundMessage::from_json(raw) {
            Some(message) => self.route_message(message),
            None => warn!(body_len = raw.len(), "inbound message rejected: failed to parse"),
        }
    }

    pub fn route_message(&self, message: InboundMessage) {
        match message {
            InboundMessage::Reply {
                token,
                error,
                value,
            } => self.deliver_reply(&token, error, value),
            InboundMessage::Status { status } => self.deliver_status(status),
        }
    }

    pub fn status(&self) -> &StatusChannel {
        &self.status
    }
}
