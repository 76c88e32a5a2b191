//! Subscriber<T> — the sink a producer pushes into.
//!
//! Wraps the consumer's [`Observer`] and enforces the sequence contract: no
//! values after `error`/`complete` or after the subscription is closed, and
//! at most one terminal notification. A terminal notification closes the
//! subscription, which runs the producer's teardown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::RxError;

use super::observer::Observer;
use super::subscription::Subscription;

pub struct Subscriber<T> {
    observer: Observer<T>,
    subscription: Subscription,
    stopped: Arc<AtomicBool>,
}

impl<T> Subscriber<T> {
    pub(crate) fn new(observer: Observer<T>, subscription: Subscription) -> Self {
        Self {
            observer,
            subscription,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Deliver `value` unless the sequence has stopped.
    pub fn next(&self, value: T) {
        if !self.is_closed() {
            self.observer.next(value);
        }
    }

    /// Terminate with `err`.
    pub fn error(&self, err: RxError) {
        if self.stop() {
            self.observer.error(err);
            self.subscription.unsubscribe();
        }
    }

    /// Terminate successfully.
    pub fn complete(&self) {
        if self.stop() {
            self.observer.complete();
            self.subscription.unsubscribe();
        }
    }

    /// `true` once the sequence terminated or the consumer unsubscribed.
    /// Long-running producers should poll this and stop early.
    pub fn is_closed(&self) -> bool {
        self.stopped.load(Ordering::Acquire) || self.subscription.is_closed()
    }

    /// The consumer's subscription handle.
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    /// An observer that forwards every notification into this subscriber.
    pub fn to_observer(&self) -> Observer<T>
    where
        T: 'static,
    {
        let on_next = self.clone();
        let on_error = self.clone();
        let on_complete = self.clone();
        Observer::new(move |value| on_next.next(value))
            .on_error(move |err| on_error.error(err))
            .on_complete(move || on_complete.complete())
    }

    /// Returns `true` for the caller that performed the transition.
    fn stop(&self) -> bool {
        !self.subscription.is_closed() && !self.stopped.swap(true, Ordering::AcqRel)
    }
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            observer: self.observer.clone(),
            subscription: self.subscription.clone(),
            stopped: Arc::clone(&self.stopped),
        }
    }
}
