//! Reactive layer — named events and the bridge that turns them into
//! subscribable sequences.
//!
//! # Overview
//!
//! [`EventEmitter`] is the push-based event source. [`EventBridge`] adapts
//! one event name on an emitter into a sequence: subscribing installs a
//! listener (once, reference counted), unsubscribing removes it when the last
//! subscriber leaves. Payloads are delivered synchronously inside `emit`.
//!
//! # Modules
//!
//! - [`event`] — [`EventName`] validated topic.
//! - [`event_emitter`] — Named typed pub/sub ([`EventEmitter<T>`]).
//! - [`bridge`] — [`EventBridge<T>`].

pub mod bridge;
pub mod event;
pub mod event_emitter;

pub use bridge::EventBridge;
pub use event::EventName;
pub use event_emitter::{EventEmitter, ListenerFn, ListenerId};
