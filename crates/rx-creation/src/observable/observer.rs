//! Observer<T> — the consumer side of a sequence.
//!
//! `next` is required; `error` and `complete` are optional and attached with
//! builder methods. Any `Fn(T)` closure converts into an observer with only a
//! `next` handler.

use std::sync::Arc;

use crate::error::RxError;

/// Closure type for `next` handlers.
pub type NextFn<T> = dyn Fn(T) + Send + Sync;
/// Closure type for `error` handlers.
pub type ErrorFn = dyn Fn(RxError) + Send + Sync;
/// Closure type for `complete` handlers.
pub type CompleteFn = dyn Fn() + Send + Sync;

/// A set of handlers receiving values, errors and completion.
pub struct Observer<T> {
    next: Arc<NextFn<T>>,
    error: Option<Arc<ErrorFn>>,
    complete: Option<Arc<CompleteFn>>,
}

impl<T> Observer<T> {
    /// Build an observer from its `next` handler.
    pub fn new(next: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self {
            next: Arc::new(next),
            error: None,
            complete: None,
        }
    }

    /// Attach an `error` handler.
    pub fn on_error(mut self, error: impl Fn(RxError) + Send + Sync + 'static) -> Self {
        self.error = Some(Arc::new(error));
        self
    }

    /// Attach a `complete` handler.
    pub fn on_complete(mut self, complete: impl Fn() + Send + Sync + 'static) -> Self {
        self.complete = Some(Arc::new(complete));
        self
    }

    pub fn next(&self, value: T) {
        (self.next)(value);
    }

    /// Deliver `err`, or log it when no `error` handler is attached.
    pub fn error(&self, err: RxError) {
        match &self.error {
            Some(on_error) => on_error(err),
            None => tracing::error!(error = %err, "unhandled error reached an observer"),
        }
    }

    pub fn complete(&self) {
        if let Some(on_complete) = &self.complete {
            on_complete();
        }
    }
}

impl<T> Clone for Observer<T> {
    fn clone(&self) -> Self {
        Self {
            next: Arc::clone(&self.next),
            error: self.error.clone(),
            complete: self.complete.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Observer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observer")
            .field("error", &self.error.is_some())
            .field("complete", &self.complete.is_some())
            .finish_non_exhaustive()
    }
}

impl<T, F> From<F> for Observer<T>
where
    F: Fn(T) + Send + Sync + 'static,
{
    fn from(next: F) -> Self {
        Self::new(next)
    }
}
