//! Push-based observable state container
//!
//! A minimal publish/subscribe primitive: a mutex-guarded value whose
//! subscribers are invoked synchronously on every mutation, so a presentation
//! layer re-renders from state it can never observe mid-write.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Callback<T> = Box<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: Mutex<T>,
    subscribers: Mutex<HashMap<u64, Callback<T>>>,
    next_id: AtomicU64,
}

/// Observable state container
///
/// Clones share the same underlying value and subscriber list.
pub struct Observable<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T: Clone + Send + 'static> Observable<T> {
    /// Create a new observable holding `value`
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: Mutex::new(value),
                subscribers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Get a snapshot of the current value
    pub fn get(&self) -> T {
        self.inner.value.lock().clone()
    }

    /// Replace the value and notify all subscribers
    pub fn set(&self, value: T) {
        {
            let mut guard = self.inner.value.lock();
            *guard = value.clone();
        }
        self.notify(&value);
    }

    /// Mutate the value in place and notify all subscribers
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let snapshot = {
            let mut guard = self.inner.value.lock();
            f(&mut guard);
            guard.clone()
        };
        self.notify(&snapshot);
    }

    /// Register a subscriber invoked synchronously on every mutation
    ///
    /// The returned handle deregisters the callback when dropped or when
    /// [`Subscription::unsubscribe`] is called. Callbacks must not subscribe
    /// or unsubscribe from within the notification.
    pub fn subscribe(&self, f: impl Fn(&T) + Send + Sync + 'static) -> Subscription<T> {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner.subscribers.lock().insert(id, Box::new(f));

        Subscription { inner: Arc::downgrade(&self.inner), id }
    }

    fn notify(&self, value: &T) {
        let subscribers = self.inner.subscribers.lock();
        for callback in subscribers.values() {
            callback(value);
        }
    }
}

impl<T: Clone + Default + Send + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Handle deregistering a subscriber
///
/// Dropping the handle unsubscribes; `unsubscribe` makes that explicit at the
/// call site.
pub struct Subscription<T> {
    inner: Weak<Inner<T>>,
    id: u64,
}

impl<T> Subscription<T> {
    /// Deregister the subscriber now
    pub fn unsubscribe(self) {}
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.subscribers.lock().remove(&self.id);
        }
    }
}
