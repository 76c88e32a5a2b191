use thiserror::Error;

// ---------------------------------------------------------------------------
// RxError
// ---------------------------------------------------------------------------

/// Errors raised while building sequences, subscribing to them, or
/// delivering values to observers.
///
/// `Clone` so the same error can be handed to an observer's `error` handler
/// and to a delivery-error hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RxError {
    /// The event source handed to a bridge is absent.
    #[error("Invalid event source: {0}")]
    InvalidSource(String),

    /// Event names must be non-empty.
    #[error("Invalid event name {0:?}: event names must be non-empty")]
    InvalidEventName(String),

    /// The event source was dropped after the bridge was created.
    #[error("Event source for \"{event}\" has been dropped")]
    SourceDropped { event: String },

    /// `dispose()` was called on the bridge.
    #[error("Bridge for \"{event}\" has been disposed")]
    BridgeDisposed { event: String },

    /// An observer's `next` handler panicked while handling an event.
    #[error("Observer #{observer} failed while handling \"{event}\": {message}")]
    ObserverDelivery {
        event: String,
        observer: u64,
        message: String,
    },

    /// Error signalled by a custom producer.
    #[error("Producer error: {0}")]
    Producer(String),
}

impl RxError {
    /// Shorthand for [`RxError::Producer`].
    pub fn producer(message: impl Into<String>) -> Self {
        Self::Producer(message.into())
    }
}

/// Convenience alias — the default error type is `RxError`.
pub type Result<T, E = RxError> = std::result::Result<T, E>;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
