//! A shared value holder that notifies subscribers on every write.
//!
//! `Observable<T>` is a cheap handle: clones share one cell. Writes are
//! delivered to every live subscriber in registration order. A write issued
//! while a delivery round is already running (from inside a callback, or
//! from another thread) is queued and delivered after that round, so each
//! subscriber sees values exactly in write order and callbacks never
//! re-enter.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::trace;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Identifier handed out to each subscriber of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

struct Subscriber<T> {
    id: SubscriberId,
    /// Sequence number of the value handed over on subscribe; older queued
    /// writes are not delivered to this subscriber.
    since: u64,
    callback: Callback<T>,
}

struct Shared<T> {
    value: T,
    /// Sequence number of `value`. The initial value is 0.
    seq: u64,
    subscribers: Vec<Subscriber<T>>,
    pending: VecDeque<(u64, T)>,
    delivering: bool,
    next_id: u64,
}

impl<T> Shared<T> {
    fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.subscribers.iter().any(|sub| sub.id == id)
    }
}

trait Detach: Send + Sync {
    fn detach(&self, id: SubscriberId);
}

impl<T: Send> Detach for Mutex<Shared<T>> {
    fn detach(&self, id: SubscriberId) {
        let mut shared = self.lock();
        let before = shared.subscribers.len();
        shared.subscribers.retain(|sub| sub.id != id);
        if shared.subscribers.len() != before {
            trace!(subscriber = %id, "unsubscribed");
        }
    }
}

/// A mutable value with change notification.
pub struct Observable<T> {
    inner: Arc<Mutex<Shared<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default + Clone + Send + Sync + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.inner.lock();
        f.debug_struct("Observable")
            .field("value", &shared.value)
            .field("subscribers", &shared.subscribers.len())
            .finish()
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// Create a cell holding `initial`.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Shared {
                value: initial,
                seq: 0,
                subscribers: Vec::new(),
                pending: VecDeque::new(),
                delivering: false,
                next_id: 0,
            })),
        }
    }

    /// Return a copy of the current value.
    pub fn get(&self) -> T {
        self.inner.lock().value.clone()
    }

    /// Read the current value by reference.
    ///
    /// The cell is locked while `f` runs, so `f` must not touch this cell.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.lock().value)
    }

    /// Replace the value and notify every subscriber.
    ///
    /// The write is visible to `get` immediately. Equal values are still
    /// delivered.
    pub fn set(&self, value: T) {
        let must_deliver = Self::enqueue(&mut self.inner.lock(), value);
        if must_deliver {
            self.deliver();
        }
    }

    /// Compute a new value from the current one and [`set`](Self::set) it.
    ///
    /// The read and the write happen under one lock, so no other write can
    /// land in between. `f` must not touch this cell.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        let must_deliver = {
            let mut shared = self.inner.lock();
            let next = f(&shared.value);
            Self::enqueue(&mut shared, next)
        };
        if must_deliver {
            self.deliver();
        }
    }

    /// Like [`update`](Self::update), but `f` may refuse the write.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns; the value is then left untouched and no
    /// one is notified.
    pub fn try_update<E>(
        &self,
        f: impl FnOnce(&T) -> std::result::Result<T, E>,
    ) -> std::result::Result<(), E> {
        let must_deliver = {
            let mut shared = self.inner.lock();
            let next = f(&shared.value)?;
            Self::enqueue(&mut shared, next)
        };
        if must_deliver {
            self.deliver();
        }
        Ok(())
    }

    /// Register `callback` and call it right away with the current value.
    ///
    /// The callback keeps receiving every later write until the returned
    /// [`Subscription`] is dropped or unsubscribed.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let callback: Callback<T> = Arc::new(callback);
        let (id, current) = {
            let mut shared = self.inner.lock();
            let id = SubscriberId(shared.next_id);
            shared.next_id += 1;
            let since = shared.seq;
            shared.subscribers.push(Subscriber {
                id,
                since,
                callback: Arc::clone(&callback),
            });
            (id, shared.value.clone())
        };
        trace!(subscriber = %id, "subscribed");

        // Built first so a panicking callback unregisters on unwind.
        let weak = Arc::downgrade(&self.inner);
        let owner: Weak<dyn Detach> = weak;
        let subscription = Subscription { id, owner };

        callback(&current);
        subscription
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().subscribers.len()
    }

    /// Store `value` and queue it for delivery. Returns `true` when the
    /// caller has to run the delivery round itself.
    fn enqueue(shared: &mut Shared<T>, value: T) -> bool {
        shared.seq += 1;
        shared.value = value.clone();
        let seq = shared.seq;
        shared.pending.push_back((seq, value));
        if shared.delivering {
            trace!(queued = shared.pending.len(), "write queued behind delivery");
            return false;
        }
        shared.delivering = true;
        true
    }

    fn deliver(&self) {
        let _guard = DeliveryGuard { cell: &self.inner };

        loop {
            let (value, round) = {
                let mut shared = self.inner.lock();
                match shared.pending.pop_front() {
                    Some((seq, value)) => {
                        let round: Vec<_> = shared
                            .subscribers
                            .iter()
                            .filter(|sub| sub.since < seq)
                            .map(|sub| (sub.id, Arc::clone(&sub.callback)))
                            .collect();
                        (value, round)
                    }
                    None => {
                        shared.delivering = false;
                        return;
                    }
                }
            };

            trace!(subscribers = round.len(), "delivering write");
            for (id, callback) in round {
                // Skip anyone who unsubscribed earlier in this round.
                if !self.inner.lock().is_subscribed(id) {
                    continue;
                }
                callback(&value);
            }
        }
    }
}

/// Resets the delivery flag if a callback panics mid-round.
struct DeliveryGuard<'a, T> {
    cell: &'a Mutex<Shared<T>>,
}

impl<T> Drop for DeliveryGuard<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut shared = self.cell.lock();
            shared.pending.clear();
            shared.delivering = false;
        }
    }
}

/// Handle returned by [`Observable::subscribe`].
///
/// Dropping it unsubscribes. If the cell is already gone this is a no-op.
pub struct Subscription {
    id: SubscriberId,
    owner: Weak<dyn Detach>,
}

impl Subscription {
    /// The subscriber's identifier within its cell.
    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Stop receiving notifications.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(owner) = self.owner.upgrade() {
            owner.detach(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &(self.owner.strong_count() > 0))
            .finish()
    }
}
