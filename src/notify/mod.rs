//! In-process publish/subscribe for transient status notifications.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use strum::Display;
use uuid::Uuid;

/// How long an item stays visible in a feed before it expires.
pub const DISPLAY_WINDOW: Duration = Duration::from_millis(2600);

/// Severity of a published notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
    Info,
}

/// One transient message, as delivered to every subscriber.
#[derive(Debug, Clone)]
pub struct NotificationItem {
    pub id: Uuid,
    pub level: NotificationLevel,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

type Listener = Box<dyn Fn(&NotificationItem) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: HashMap<u64, Listener>,
}

/// Publish/subscribe channel for status messages.
///
/// Cloning shares the underlying registry, so one bus can be handed to
/// every workflow while any number of feeds observe it. An explicit
/// context object — construction and teardown are the caller's.
#[derive(Clone, Default)]
pub struct NotificationBus {
    registry: Arc<Mutex<Registry>>,
}

impl NotificationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. The listener is removed when the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(
        &self,
        listener: impl Fn(&NotificationItem) + Send + Sync + 'static,
    ) -> Subscription {
        let mut registry = self.registry.lock().unwrap();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.insert(id, Box::new(listener));
        Subscription {
            registry: Arc::downgrade(&self.registry),
            id,
        }
    }

    /// Deliver a message to every current subscriber.
    pub fn publish(&self, level: NotificationLevel, message: impl Into<String>) -> NotificationItem {
        let item = NotificationItem {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            created_at: Utc::now(),
        };
        let registry = self.registry.lock().unwrap();
        for listener in registry.listeners.values() {
            listener(&item);
        }
        item
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationItem {
        self.publish(NotificationLevel::Success, message)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationItem {
        self.publish(NotificationLevel::Error, message)
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationItem {
        self.publish(NotificationLevel::Info, message)
    }
}

/// Handle for a registered listener; unsubscribes on drop.
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.lock().unwrap().listeners.remove(&self.id);
        }
    }
}

/// The display list a UI renders: items arrive in publish (FIFO) order and
/// each is removed by its own timer once [`DISPLAY_WINDOW`] elapses.
///
/// Expiry is per item, not a global sweep, so two feeds may drop the same
/// item at slightly different moments.
pub struct NotificationFeed {
    items: Arc<Mutex<Vec<NotificationItem>>>,
    _subscription: Subscription,
}

impl NotificationFeed {
    /// Subscribe a new feed to `bus`. Must be called within a tokio
    /// runtime; expiry timers are spawned on it.
    pub fn attach(bus: &NotificationBus) -> Self {
        let items: Arc<Mutex<Vec<NotificationItem>>> = Arc::default();
        let sink = Arc::clone(&items);
        let subscription = bus.subscribe(move |item| {
            sink.lock().unwrap().push(item.clone());
            let sink = Arc::clone(&sink);
            let id = item.id;
            tokio::spawn(async move {
                tokio::time::sleep(DISPLAY_WINDOW).await;
                sink.lock().unwrap().retain(|held| held.id != id);
            });
        });
        Self {
            items,
            _subscription: subscription,
        }
    }

    /// Snapshot of the currently visible items.
    pub fn items(&self) -> Vec<NotificationItem> {
        self.items.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.items.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().unwrap().is_empty()
    }
}
