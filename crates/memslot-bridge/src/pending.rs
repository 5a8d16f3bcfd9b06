//! Table of calls awaiting a host reply.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use memslot_common::{new_call_token, CallToken, HostError};
use serde_json::Value;
use tokio::sync::oneshot;

/// Settles one outstanding call.
pub(crate) type Resolver = oneshot::Sender<Result<Value, HostError>>;

/// Outstanding calls keyed by token.
///
/// Cloning creates another handle to the same table. Entries are inserted
/// when a call is issued and removed when its reply is routed; a call that
/// never gets a reply stays resident.
#[derive(Clone, Default)]
pub struct PendingCalls {
    entries: Arc<Mutex<HashMap<CallToken, Resolver>>>,
}

impl PendingCalls {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<CallToken, Resolver>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a resolver under a token not held by any outstanding call.
    pub(crate) fn register(&self, resolver: Resolver) -> CallToken {
        let mut entries = self.lock();
        let mut token = new_call_token();
        while entries.contains_key(&token) {
            token = new_call_token();
        }
        entries.insert(token.clone(), resolver);
        token
    }

    /// Remove and return the resolver for `token`, if still outstanding.
    pub(crate) fn take(&self, token: &CallToken) -> Option<Resolver> {
        self.lock().remove(token)
    }

    pub fn contains(&self, token: &CallToken) -> bool {
        self.lock().contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
