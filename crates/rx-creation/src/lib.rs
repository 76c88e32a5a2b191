//! Observable creation patterns over a small synchronous reactive core.
//!
//! - [`observable`] — [`Observable`](observable::Observable) and its creation
//!   operators (`new`, `of`, `from_values`, `defer`, `empty`, `from_event`).
//! - [`reactive`] — [`EventEmitter`](reactive::EventEmitter) and
//!   [`EventBridge`](reactive::EventBridge), which exposes a named event as a
//!   subscribable sequence.

pub mod error;
pub mod types;

pub mod observable;
pub mod reactive;

pub use error::{Result, RxError};
