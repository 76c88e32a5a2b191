//! Subscription — the disposable handle returned by every `subscribe`.
//!
//! A subscription owns a list of teardown closures. `unsubscribe()` flips the
//! closed flag first and then runs each teardown exactly once, so deliveries
//! guarded by `is_closed()` stop before any teardown runs. Dropping a handle
//! does NOT unsubscribe.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// An owned one-shot closure that releases a subscription's resources.
pub type Teardown = Box<dyn FnOnce() + Send + Sync>;

struct SubscriptionInner {
    closed: AtomicBool,
    teardowns: Mutex<Vec<Teardown>>,
}

/// Cloneable disposable handle. Clones share state.
#[derive(Clone)]
pub struct Subscription {
    inner: Arc<SubscriptionInner>,
}

impl Subscription {
    /// An open subscription with no teardown.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SubscriptionInner {
                closed: AtomicBool::new(false),
                teardowns: Mutex::new(Vec::new()),
            }),
        }
    }

    /// An open subscription that runs `teardown` on unsubscribe.
    pub fn from_teardown(teardown: impl FnOnce() + Send + Sync + 'static) -> Self {
        let sub = Self::new();
        sub.add(Box::new(teardown));
        sub
    }

    /// A subscription that is already closed.
    pub fn closed() -> Self {
        let sub = Self::new();
        sub.inner.closed.store(true, Ordering::Release);
        sub
    }

    /// Register another teardown.
    ///
    /// If the subscription is already closed, `teardown` runs immediately.
    pub fn add(&self, teardown: Teardown) {
        {
            let mut guard = self.inner.teardowns.lock();
            // Checked under the lock: unsubscribe() sets `closed` before it
            // takes the list, so a teardown is either drained or run here.
            if !self.inner.closed.load(Ordering::Acquire) {
                guard.push(teardown);
                return;
            }
        }
        teardown();
    }

    /// Close the subscription and run its teardowns.
    ///
    /// Idempotent: a second call has no effect.
    pub fn unsubscribe(&self) {
        if self.inner.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        let teardowns: Vec<Teardown> = std::mem::take(&mut *self.inner.teardowns.lock());
        for teardown in teardowns {
            teardown();
        }
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::Acquire)
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("closed", &self.is_closed())
            .finish()
    }
}
