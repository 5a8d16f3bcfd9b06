//! The assembled bridge: one dispatcher and one router sharing a
//! pending-call table.

use std::sync::Arc;

use crate::dispatcher::{CallDispatcher, HostBinding};
use crate::pending::PendingCalls;
use crate::router::InboundRouter;
use crate::status::StatusChannel;

pub struct Bridge {
    dispatcher: CallDispatcher,
    router: InboundRouter,
}

impl Bridge {
    /// Build a bridge over an existing host binding. Feed host messages to
    /// [`router`](Self::router).
    pub fn new(binding: Arc<dyn HostBinding>) -> Self {
        let pending = PendingCalls::new();
        Self {
            dispatcher: CallDispatcher::new(binding, pending.clone()),
            router: InboundRouter::new(pending, StatusChannel::new()),
        }
    }

    pub fn dispatcher(&self) -> &CallDispatcher {
        &self.dispatcher
    }

    /// A handle for delivering host messages.
    pub fn router(&self) -> InboundRouter {
        self.router.clone()
    }

    pub fn status(&self) -> &StatusChannel {
        self.router.status()
    }

    /// Calls issued but not yet answered.
    pub fn pending_count(&self) -> usize {
        self.dispatcher.pending().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memslot_common::{BridgeError, CallToken, OutboundEnvelope};
    use serde_json::json;
    use std::sync::{Mutex, OnceLock};

    /// Binding that keeps envelopes for the test to answer.
    #[derive(Default)]
    struct Outbox {
        sent: Mutex<Vec<OutboundEnvelope>>,
    }

    impl Outbox {
        fn token_of(&self, kind: &str) -> CallToken {
            self.sent
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.kind == kind)
                .map(|e| e.callback.clone())
                .unwrap()
        }
    }

    impl HostBinding for Outbox {
        fn invoke(&self, message: &str) -> Result<(), BridgeError> {
            let env = OutboundEnvelope::from_json(message)
                .ok_or_else(|| BridgeError::Transport("bad envelope".into()))?;
            self.sent.lock().unwrap().push(env);
            Ok(())
        }
    }

    fn setup() -> (Bridge, Arc<Outbox>) {
        let outbox = Arc::new(Outbox::default());
        (Bridge::new(outbox.clone()), outbox)
    }

    #[tokio::test]
    async fn list_resolves_to_exact_reply() {
        let (bridge, outbox) = setup();
        let fut = bridge.dispatcher().invoke("list-settings", json!({}));

        let list = json!([{"name": "A", "settingsState": "empty"}]);
        bridge
            .router()
            .deliver_reply(&outbox.token_of("list-settings"), None, Some(list.clone()));

        assert_eq!(fut.await.unwrap(), list);
        assert_eq!(bridge.pending_count(), 0);
    }

    #[tokio::test]
    async fn replies_in_reverse_order_settle_independently() {
        let (bridge, outbox) = setup();
        let first = bridge.dispatcher().invoke("game_settings_list", json!({}));
        let second = bridge.dispatcher().invoke("init", json!({}));
        assert_eq!(bridge.pending_count(), 2);

        let router = bridge.router();
        router.deliver_reply(&outbox.token_of("init"), None, Some(json!("second")));
        router.deliver_reply(
            &outbox.token_of("game_settings_list"),
            None,
            Some(json!("first")),
        );

        assert_eq!(second.await.unwrap(), json!("second"));
        assert_eq!(first.await.unwrap(), json!("first"));
    }

    #[tokio::test]
    async fn same_operation_overlapping_calls() {
        let (bridge, outbox) = setup();
        let a = bridge.dispatcher().invoke("save_memory_to_file", json!({"index": 0}));
        let b = bridge.dispatcher().invoke("save_memory_to_file", json!({"index": 1}));
        let (ta, tb) = (a.token().clone(), b.token().clone());
        assert_eq!(outbox.sent.lock().unwrap().len(), 2);

        let router = bridge.router();
        router.deliver_reply(&tb, None, Some(json!(1)));
        router.deliver_reply(&ta, None, Some(json!(0)));

        assert_eq!(a.await.unwrap(), json!(0));
        assert_eq!(b.await.unwrap(), json!(1));
    }

    #[tokio::test]
    async fn host_error_rejects_and_clears_entry() {
        let (bridge, _outbox) = setup();
        let fut = bridge
            .dispatcher()
            .invoke("save-to-slot", json!({"index": 2}));
        let token = fut.token().clone();

        bridge
            .router()
            .deliver_reply(&token, Some(json!("disk full")), None);

        let err = fut.await.unwrap_err();
        match err {
            BridgeError::Host(host) => assert_eq!(host.to_string(), "disk full"),
            other => panic!("expected host error, got {other:?}"),
        }
        assert!(!bridge.dispatcher().pending().contains(&token));
    }

    #[tokio::test]
    async fn synchronous_reply_inside_binding_is_routed() {
        let router_cell: Arc<OnceLock<InboundRouter>> = Arc::new(OnceLock::new());
        let cell = Arc::clone(&router_cell);
        let binding = move |raw: &str| -> Result<(), BridgeError> {
            let env = OutboundEnvelope::from_json(raw).unwrap();
            if let Some(router) = cell.get() {
                router.deliver_reply(&env.callback, None, Some(json!("same tick")));
            }
            Ok(())
        };

        let bridge = Bridge::new(Arc::new(binding));
        let _ = router_cell.set(bridge.router());

        let value = bridge.dispatcher().invoke("init", json!({})).await.unwrap();
        assert_eq!(value, json!("same tick"));
        assert_eq!(bridge.pending_count(), 0);
    }

    #[tokio::test]
    async fn unanswered_call_stays_pending() {
        let (bridge, _outbox) = setup();
        let fut = bridge.dispatcher().invoke("init", json!({}));
        let token = fut.token().clone();
        drop(fut);

        assert!(bridge.dispatcher().pending().contains(&token));

        // The late reply is consumed and discarded.
        bridge.router().deliver_reply(&token, None, Some(json!(1)));
        assert_eq!(bridge.pending_count(), 0);
    }

    #[tokio::test]
    async fn typed_call_decodes_reply() {
        let (bridge, outbox) = setup();
        let router = bridge.router();
        let dispatcher = bridge.dispatcher().clone();

        let call = tokio::spawn(async move {
            dispatcher
                .call::<_, Vec<String>>("names", &json!({}))
                .await
        });

        // Wait until the envelope is out.
        while outbox.sent.lock().unwrap().is_empty() {
            tokio::task::yield_now().await;
        }
        router.deliver_reply(&outbox.token_of("names"), None, Some(json!(["a", "b"])));

        assert_eq!(call.await.unwrap().unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn typed_call_reports_decode_error() {
        let (bridge, outbox) = setup();
        let router = bridge.router();
        let dispatcher = bridge.dispatcher().clone();

        let call =
            tokio::spawn(async move { dispatcher.call::<_, u32>("count", &json!({})).await });

        while outbox.sent.lock().unwrap().is_empty() {
            tokio::task::yield_now().await;
        }
        router.deliver_reply(&outbox.token_of("count"), None, Some(json!("nope")));

        assert!(matches!(call.await.unwrap(), Err(BridgeError::Decode(_))));
    }

    #[test]
    fn hundred_thousand_calls_get_unique_tokens() {
        let (bridge, _outbox) = setup();
        let futures: Vec<_> = (0..100_000)
            .map(|_| bridge.dispatcher().invoke("game_settings_list", json!({})))
            .collect();
        let tokens: std::collections::HashSet<_> =
            futures.iter().map(|f| f.token().clone()).collect();
        assert_eq!(tokens.len(), 100_000);
        assert_eq!(bridge.pending_count(), 100_000);
    }
}
