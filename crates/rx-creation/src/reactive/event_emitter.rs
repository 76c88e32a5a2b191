//! Named-event source that bridges attach to.
//!
//! Each event name owns an ordered list of listeners. `emit` copies the list
//! for that name out of the lock and then runs it, which gives two rules:
//! a listener removed while an emission is running still hears that payload,
//! and a listener added while it is running first hears the next one.
//!
//! Nothing here catches listener panics; they unwind out of `emit`.
//! [`EventBridge`](super::EventBridge) applies its delivery policy on top.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

/// Handle for a registered listener, unique within one emitter.
pub type ListenerId = u64;

pub type ListenerFn<T> = dyn Fn(&T) + Send + Sync;

type Listeners<T> = Vec<(ListenerId, Arc<ListenerFn<T>>)>;

/// Synchronous emitter of `T` payloads keyed by event name.
///
/// Shared by `&self`; listeners may call [`on`](Self::on) or
/// [`off`](Self::off) on the same emitter while being run.
pub struct EventEmitter<T> {
    by_name: Mutex<HashMap<String, Listeners<T>>>,
    next_id: AtomicU64,
}

impl<T> EventEmitter<T> {
    pub fn new() -> Self {
        Self {
            by_name: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Add `callback` to the listeners of `name`.
    ///
    /// IDs are unique across all names of this emitter.
    pub fn on(
        &self,
        name: impl Into<String>,
        callback: impl Fn(&T) + Send + Sync + 'static,
    ) -> ListenerId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.by_name
            .lock()
            .entry(name.into())
            .or_default()
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove listener `id` from `name`. Unknown ids are ignored.
    pub fn off(&self, name: &str, id: ListenerId) {
        let mut by_name = self.by_name.lock();
        let Some(list) = by_name.get_mut(name) else {
            return;
        };
        list.retain(|(lid, _)| *lid != id);
        if list.is_empty() {
            by_name.remove(name);
        }
    }

    /// Run every listener of `name` with `payload`, in registration order.
    pub fn emit(&self, name: &str, payload: &T) {
        let targets: Vec<Arc<ListenerFn<T>>> = self
            .by_name
            .lock()
            .get(name)
            .map(|list| list.iter().map(|(_, f)| Arc::clone(f)).collect())
            .unwrap_or_default();
        targets.iter().for_each(|listener| listener(payload));
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.by_name.lock().get(name).map_or(0, Vec::len)
    }

    /// Listeners across all names.
    pub fn size(&self) -> usize {
        self.by_name.lock().values().map(Vec::len).sum()
    }

    /// Names that currently have at least one listener, sorted.
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.by_name.lock().keys().cloned().collect();
        names.sort();
        names
    }
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}
