//! Change-notification hub for registry updates.
//!
//! The hub provides:
//! - Unique subscriber identifiers ([`SubscriberId`])
//! - Subscriptions ([`ChangeWatch`]) for receiving generation updates
//! - Fan-out management ([`ChangeHub`]) for multiple subscriptions
//!
//! Notifications carry only the new [`Generation`]; staleness is decided by
//! token equality on access, so a dropped or duplicated notification never
//! affects correctness.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use select_core::{Generation, SelectError};
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

/// Unique identifier for a change subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

impl SubscriberId {
    /// Create a new unique subscriber ID.
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the numeric value of this subscriber ID.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscriber-{}", self.0)
    }
}

/// A subscription receiving generation-change notifications.
///
/// Each registry publish sends the new generation to every active
/// subscription. The channel is bounded; when a subscriber lags, older
/// notifications are dropped in its favor of newer ones.
#[derive(Debug)]
pub struct ChangeWatch {
    id: SubscriberId,
    receiver: mpsc::Receiver<Generation>,
}

impl ChangeWatch {
    /// Get the unique identifier for this subscription.
    #[inline]
    #[must_use]
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Receive the next generation change.
    ///
    /// Returns `None` if the subscription has been cancelled.
    pub async fn changed(&mut self) -> Option<Generation> {
        self.receiver.recv().await
    }

    /// Try to receive a generation change without waiting.
    pub fn try_changed(&mut self) -> Result<Generation, mpsc::error::TryRecvError> {
        self.receiver.try_recv()
    }
}

/// Sender half of a subscription, used internally for fan-out.
#[derive(Debug)]
struct ChangeSender {
    id: SubscriberId,
    sender: mpsc::Sender<Generation>,
}

impl ChangeSender {
    /// Try to send a generation notification.
    ///
    /// Uses `try_send` to avoid blocking. A full channel drops the
    /// notification; the subscriber re-syncs on its next token check.
    fn try_send(&self, generation: Generation) -> Result<(), SelectError> {
        match self.sender.try_send(generation) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                trace!(subscriber = %self.id, "change channel full, dropping notification");
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(SelectError::SubscriptionClosed {
                subscriber_id: self.id.0,
            }),
        }
    }
}

/// Fan-out manager for change subscriptions.
///
/// Subscriptions live in a `DashMap`, so subscribe/cancel/notify are safe
/// to call concurrently without an outer lock.
#[derive(Debug)]
pub struct ChangeHub {
    subscribers: DashMap<SubscriberId, ChangeSender>,
    channel_buffer: usize,
}

impl Default for ChangeHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeHub {
    /// Create a hub with the default channel buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::with_buffer_size(16)
    }

    /// Create a hub with a custom channel buffer size.
    #[must_use]
    pub fn with_buffer_size(buffer_size: usize) -> Self {
        Self {
            subscribers: DashMap::new(),
            channel_buffer: buffer_size,
        }
    }

    /// Create a new subscription.
    pub fn subscribe(&self) -> ChangeWatch {
        let id = SubscriberId::next();
        let (sender, receiver) = mpsc::channel(self.channel_buffer);

        self.subscribers.insert(id, ChangeSender { id, sender });
        debug!(subscriber = %id, "created change subscription");

        ChangeWatch { id, receiver }
    }

    /// Cancel a subscription.
    ///
    /// The subscription will no longer receive notifications.
    pub fn unsubscribe(&self, id: SubscriberId) {
        if self.subscribers.remove(&id).is_some() {
            debug!(subscriber = %id, "cancelled change subscription");
        } else {
            warn!(subscriber = %id, "attempted to cancel unknown subscription");
        }
    }

    /// Notify all subscribers of a generation change.
    ///
    /// Removes any closed subscriptions automatically.
    pub fn notify(&self, generation: Generation) {
        let mut closed = Vec::new();

        for entry in self.subscribers.iter() {
            if let Err(SelectError::SubscriptionClosed { subscriber_id }) =
                entry.value().try_send(generation)
            {
                closed.push(SubscriberId(subscriber_id));
            }
        }

        for id in &closed {
            self.subscribers.remove(id);
        }
        if !closed.is_empty() {
            debug!(count = closed.len(), "removed closed subscriptions");
        }

        trace!(
            generation = %generation,
            subscriber_count = self.subscribers.len(),
            "notified subscribers of generation change"
        );
    }

    /// Get the number of active subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
