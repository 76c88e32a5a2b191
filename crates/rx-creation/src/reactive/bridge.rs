//! EventBridge<T> — presents one named event of an [`EventEmitter`] as a
//! subscribable sequence of payloads.
//!
//! # Listener lifecycle
//!
//! Creating a bridge installs nothing. The first live subscription installs a
//! single listener on the emitter; every later subscription joins the same
//! fan-out set. When the last subscription ends, the listener is removed.
//! Both transitions happen under the bridge's state lock, so at most one
//! listener exists per bridge at any time.
//!
//! # Delivery
//!
//! Each emitted payload is cloned once per observer and delivered inline,
//! inside the emitter's `emit` call, in subscription order. The fan-out set
//! is snapshotted under the lock and the lock is released before any handler
//! runs, so handlers may subscribe or unsubscribe freely. A slot disposed
//! mid-loop is skipped for the rest of that loop. Subscriptions never see
//! payloads emitted before they were created.
//!
//! # Threading model
//!
//! `EventBridge<T>` is `Send + Sync` and cheap to clone (clones share state).
//! The bridge holds the emitter weakly; the emitter's listener holds the
//! bridge's shared state strongly until it is removed.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::error::{Result, RxError};
use crate::observable::{Observer, Subscription};
use crate::types::{BridgeOptions, DeliveryPolicy};

use super::event::EventName;
use super::event_emitter::{EventEmitter, ListenerId};

// ============================================================================
// Internal state
// ============================================================================

struct ObserverSlot<T> {
    id: u64,
    observer: Observer<T>,
    live: AtomicBool,
    /// Handle given to the subscriber; closed by `dispose`.
    subscription: Subscription,
}

struct BridgeState<T> {
    /// Listener installed on the emitter while `slots` is non-empty.
    listener: Option<ListenerId>,
    /// Live observers in subscription order.
    slots: Vec<Arc<ObserverSlot<T>>>,
    next_id: u64,
    disposed: bool,
}

impl<T> BridgeState<T> {
    fn new() -> Self {
        Self {
            listener: None,
            slots: Vec::new(),
            next_id: 1,
            disposed: false,
        }
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

struct BridgeShared<T> {
    name: EventName,
    source: Weak<EventEmitter<T>>,
    options: BridgeOptions,
    state: Mutex<BridgeState<T>>,
}

// ============================================================================
// EventBridge
// ============================================================================

/// Reference-counted adapter from a named event to a subscribable sequence.
pub struct EventBridge<T> {
    shared: Arc<BridgeShared<T>>,
}

impl<T> Clone for EventBridge<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> EventBridge<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Bridge `name` on `source` with default options.
    ///
    /// No listener is installed until the first [`subscribe`](Self::subscribe).
    pub fn new(source: &Arc<EventEmitter<T>>, name: impl Into<String>) -> Result<Self> {
        Self::with_options(Arc::downgrade(source), name, BridgeOptions::default())
    }

    /// Bridge `name` on a weakly held `source`.
    ///
    /// Fails with [`RxError::InvalidSource`] if `source` no longer upgrades
    /// and with [`RxError::InvalidEventName`] if `name` is empty.
    pub fn with_options(
        source: Weak<EventEmitter<T>>,
        name: impl Into<String>,
        options: BridgeOptions,
    ) -> Result<Self> {
        if source.strong_count() == 0 {
            return Err(RxError::InvalidSource(
                "event emitter reference is absent".to_string(),
            ));
        }
        let name = EventName::new(name)?;
        Ok(Self {
            shared: Arc::new(BridgeShared {
                name,
                source,
                options,
                state: Mutex::new(BridgeState::new()),
            }),
        })
    }

    /// Register `observer` and return its [`Subscription`].
    ///
    /// Installs the emitter listener on the first live subscription.
    pub fn subscribe(&self, observer: impl Into<Observer<T>>) -> Result<Subscription> {
        let observer = observer.into();
        let shared = &self.shared;
        let source = shared.source.upgrade().ok_or_else(|| RxError::SourceDropped {
            event: shared.name.to_string(),
        })?;

        // Single lock acquisition: allocate ID, register slot, install listener.
        let mut st = shared.state.lock();
        if st.disposed {
            return Err(RxError::BridgeDisposed {
                event: shared.name.to_string(),
            });
        }
        let slot_id = st.next_id();
        // Weak, because the slot keeps a clone of this handle.
        let for_release = Arc::downgrade(shared);
        let subscription = Subscription::from_teardown(move || {
            if let Some(shared) = for_release.upgrade() {
                shared.release(slot_id);
            }
        });
        st.slots.push(Arc::new(ObserverSlot {
            id: slot_id,
            observer,
            live: AtomicBool::new(true),
            subscription: subscription.clone(),
        }));

        if st.listener.is_none() {
            let for_listener = Arc::clone(shared);
            let listener_id = source.on(shared.name.as_str(), move |payload: &T| {
                for_listener.deliver(payload);
            });
            st.listener = Some(listener_id);
            tracing::debug!(event = %shared.name, listener_id, "installed bridge listener");
        }
        drop(st);

        Ok(subscription)
    }

    /// End every subscription and remove the listener. Idempotent.
    ///
    /// Every handle returned by [`subscribe`](Self::subscribe) reports
    /// closed afterwards; no `complete` is sent. Later `subscribe` calls fail
    /// with [`RxError::BridgeDisposed`].
    pub fn dispose(&self) {
        let shared = &self.shared;
        let released = {
            let mut st = shared.state.lock();
            if st.disposed {
                return;
            }
            st.disposed = true;
            let slots = std::mem::take(&mut st.slots);
            for slot in &slots {
                slot.live.store(false, Ordering::Release);
            }
            shared.remove_listener(&mut st);
            slots
        };
        // Outside the lock: teardowns chained onto these handles may call
        // back into the bridge. `release` finds no slot and returns.
        for slot in &released {
            slot.subscription.unsubscribe();
        }
        tracing::debug!(event = %shared.name, subscriptions = released.len(), "disposed bridge");
    }

    pub fn event_name(&self) -> &str {
        self.shared.name.as_str()
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.shared.state.lock().slots.len()
    }

    /// Whether a listener is currently installed on the emitter.
    pub fn is_listening(&self) -> bool {
        self.shared.state.lock().listener.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.state.lock().disposed
    }
}

impl<T> BridgeShared<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Fan `payload` out to the observers live at this moment.
    fn deliver(&self, payload: &T) {
        let slots: Vec<Arc<ObserverSlot<T>>> = self.state.lock().slots.clone();

        let mut first_panic: Option<Box<dyn Any + Send>> = None;
        for slot in slots {
            if !slot.live.load(Ordering::Acquire) {
                continue;
            }
            let value = payload.clone();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| slot.observer.next(value)));
            let Err(cause) = outcome else {
                continue;
            };
            // Under Propagate only the first panic is resumed; any later one
            // is reported like an isolated failure.
            if self.options.delivery_policy == DeliveryPolicy::Propagate && first_panic.is_none() {
                first_panic = Some(cause);
                continue;
            }
            self.report(&RxError::ObserverDelivery {
                event: self.name.to_string(),
                observer: slot.id,
                message: panic_message(&*cause),
            });
        }

        if let Some(cause) = first_panic {
            panic::resume_unwind(cause);
        }
    }

    fn report(&self, err: &RxError) {
        match &self.options.on_delivery_error {
            Some(hook) => hook(err),
            None => tracing::error!(error = %err, "observer delivery failed"),
        }
    }

    /// Drop slot `id`; removes the listener when it was the last one.
    fn release(&self, id: u64) {
        // The slot is dropped after the lock so observer captures never drop
        // under it.
        let _released = {
            let mut st = self.state.lock();
            let Some(pos) = st.slots.iter().position(|s| s.id == id) else {
                return;
            };
            let slot = st.slots.remove(pos);
            slot.live.store(false, Ordering::Release);
            if st.slots.is_empty() {
                self.remove_listener(&mut st);
            }
            slot
        };
    }

    /// Called with the state lock held so a concurrent subscribe cannot
    /// install a second listener before this one is gone.
    fn remove_listener(&self, st: &mut BridgeState<T>) {
        let Some(listener_id) = st.listener.take() else {
            return;
        };
        if let Some(source) = self.source.upgrade() {
            source.off(self.name.as_str(), listener_id);
        }
        tracing::debug!(event = %self.name, listener_id, "removed bridge listener");
    }
}

fn panic_message(cause: &(dyn Any + Send)) -> String {
    if let Some(s) = cause.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
