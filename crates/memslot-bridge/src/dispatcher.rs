//! Outbound half of the bridge: issue a host call, hand back a future.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use memslot_common::{BridgeError, CallToken, HostError, OutboundEnvelope};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::pending::PendingCalls;

/// The host's synchronous entry point. Takes one serialized envelope and
/// returns once the host has accepted it; the reply arrives later through
/// the [`InboundRouter`](crate::InboundRouter).
pub trait HostBinding: Send + Sync {
    fn invoke(&self, message: &str) -> Result<(), BridgeError>;
}

impl<F> HostBinding for F
where
    F: Fn(&str) -> Result<(), BridgeError> + Send + Sync,
{
    fn invoke(&self, message: &str) -> Result<(), BridgeError> {
        self(message)
    }
}

/// Issues calls to the host, one envelope per call.
#[derive(Clone)]
pub struct CallDispatcher {
    binding: Arc<dyn HostBinding>,
    pending: PendingCalls,
}

impl CallDispatcher {
    pub fn new(binding: Arc<dyn HostBinding>, pending: PendingCalls) -> Self {
        Self { binding, pending }
    }

    /// Send `{type, callback, payload}` to the host and return a future for
    /// the reply.
    ///
    /// The pending entry exists before the host sees the envelope, so a reply
    /// routed from inside the binding call still finds it.
    pub fn invoke(&self, operation: &str, payload: Value) -> ReplyFuture {
        let (tx, rx) = oneshot::channel();
        let token = self.pending.register(tx);

        let raw = match OutboundEnvelope::new(operation, token.clone(), payload).to_json() {
            Ok(raw) => raw,
            Err(e) => {
                self.pending.take(&token);
                return ReplyFuture::failed(token, BridgeError::Encode(e.to_string()));
            }
        };

        debug!(operation, %token, "host call issued");
        if let Err(e) = self.binding.invoke(&raw) {
            warn!(operation, %token, error = %e, "host binding rejected call");
            self.pending.take(&token);
            return ReplyFuture::failed(token, e);
        }

        ReplyFuture {
            token,
            state: ReplyState::Waiting(rx),
        }
    }

    /// Typed wrapper over [`invoke`](Self::invoke).
    pub async fn call<P, T>(&self, operation: &str, payload: &P) -> Result<T, BridgeError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload =
            serde_json::to_value(payload).map_err(|e| BridgeError::Encode(e.to_string()))?;
        let value = self.invoke(operation, payload).await?;
        serde_json::from_value(value).map_err(|e| BridgeError::Decode(e.to_string()))
    }

    pub fn pending(&self) -> &PendingCalls {
        &self.pending
    }
}

enum ReplyState {
    Waiting(oneshot::Receiver<Result<Value, HostError>>),
    Failed(Option<BridgeError>),
}

/// Settles once with the host's reply: the value on success, or
/// [`BridgeError::Host`] when the reply carried an error.
///
/// Dropping the future does not withdraw the call.
pub struct ReplyFuture {
    token: CallToken,
    state: ReplyState,
}

impl ReplyFuture {
    fn failed(token: CallToken, error: BridgeError) -> Self {
        Self {
            token,
            state: ReplyState::Failed(Some(error)),
        }
    }

    /// Token the host will echo back.
    pub fn token(&self) -> &CallToken {
        &self.token
    }
}

impl Future for ReplyFuture {
    type Output = Result<Value, BridgeError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            ReplyState::Waiting(rx) => match Pin::new(rx).poll(cx) {
                Poll::Ready(Ok(Ok(value))) => Poll::Ready(Ok(value)),
                Poll::Ready(Ok(Err(host))) => Poll::Ready(Err(BridgeError::Host(host))),
                Poll::Ready(Err(_)) => Poll::Ready(Err(BridgeError::Disconnected)),
                Poll::Pending => Poll::Pending,
            },
            ReplyState::Failed(error) => {
                Poll::Ready(Err(error.take().unwrap_or(BridgeError::Disconnected)))
            }
        }
    }
}
