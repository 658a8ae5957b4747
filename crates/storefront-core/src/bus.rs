//! In-process publish/subscribe channel.
//!
//! Delivery is synchronous and single-threaded: `publish` runs every handler
//! registered for the event's kind, in registration order, before returning.
//! Handlers may publish, subscribe or unsubscribe while being invoked. A
//! handler subscribed during a publication first runs on the next one; a
//! handler unsubscribed during a publication is not run for the rest of it.

use crate::error_handling::log_error;
use crate::events::{EventKind, StoreEvent};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Handler failures are reported by the bus, never returned to the publisher.
pub type EventHandler = Rc<dyn Fn(&StoreEvent) -> anyhow::Result<()>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Cheap to clone; clones share one registry.
#[derive(Clone, Default)]
pub struct EventBus {
    inner: Rc<RefCell<Registry>>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

struct Subscription {
    id: SubscriptionId,
    kind: EventKind,
    handler: EventHandler,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: Fn(&StoreEvent) -> anyhow::Result<()> + 'static,
    {
        let mut registry = self.inner.borrow_mut();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.subscriptions.push(Subscription {
            id,
            kind,
            handler: Rc::new(handler),
        });
        id
    }

    /// Returns false if `id` was not (or no longer) registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.inner.borrow_mut();
        let before = registry.subscriptions.len();
        registry.subscriptions.retain(|sub| sub.id != id);
        registry.subscriptions.len() != before
    }

    /// Fire-and-forget. A failing handler is logged and the remaining
    /// handlers still run.
    pub fn publish(&self, event: StoreEvent) {
        let kind = event.kind();
        let handlers: Vec<(SubscriptionId, EventHandler)> = self
            .inner
            .borrow()
            .subscriptions
            .iter()
            .filter(|sub| sub.kind == kind)
            .map(|sub| (sub.id, Rc::clone(&sub.handler)))
            .collect();

        tracing::trace!(event = kind.as_str(), handlers = handlers.len(), "publish");

        for (id, handler) in handlers {
            if !self.is_subscribed(id) {
                continue;
            }
            if let Err(e) = handler(&event) {
                log_error(kind.as_str(), &*e);
            }
        }
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.inner
            .borrow()
            .subscriptions
            .iter()
            .any(|sub| sub.id == id)
    }

    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.inner
            .borrow()
            .subscriptions
            .iter()
            .filter(|sub| sub.kind == kind)
            .count()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.inner.borrow();
        f.debug_struct("EventBus")
            .field("subscriptions", &registry.subscriptions.len())
            .finish()
    }
}
