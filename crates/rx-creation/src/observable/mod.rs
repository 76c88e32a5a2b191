//! Observable sequences and their creation operators.
//!
//! # Overview
//!
//! [`Observable<T>`] is cold and synchronous: every [`subscribe`] runs the
//! producer afresh on the calling thread and hands it a [`Subscriber`]. The
//! producer may return a [`Teardown`], which runs when the subscription is
//! closed (by the consumer, or by `error`/`complete`).
//!
//! Creation operators:
//!
//! | operator | emits |
//! |---|---|
//! | [`Observable::new`] | whatever the producer pushes |
//! | [`Observable::of`] | the given values, then completes |
//! | [`Observable::from_values`] | a fresh pass over the iterable, then completes |
//! | [`Observable::defer`] | the observable built by the factory at subscribe time |
//! | [`Observable::empty`] | nothing; completes immediately |
//! | [`Observable::from_event`] | payloads of a named event, never completes |
//!
//! # Modules
//!
//! - [`observer`] — [`Observer<T>`] handler set.
//! - [`subscriber`] — [`Subscriber<T>`] producer-side sink.
//! - [`subscription`] — [`Subscription`] disposable handle.
//!
//! [`subscribe`]: Observable::subscribe

pub mod observer;
pub mod subscriber;
pub mod subscription;

use std::sync::Arc;

pub use observer::Observer;
pub use subscriber::Subscriber;
pub use subscription::{Subscription, Teardown};

use crate::error::Result;
use crate::reactive::{EventBridge, EventEmitter};
use crate::types::BridgeOptions;

/// Producer closure run on every subscription.
pub type ProducerFn<T> = dyn Fn(Subscriber<T>) -> Option<Teardown> + Send + Sync;

/// A cold sequence of `T` values.
pub struct Observable<T> {
    producer: Arc<ProducerFn<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            producer: Arc::clone(&self.producer),
        }
    }
}

impl<T> Observable<T>
where
    T: Send + Sync + 'static,
{
    /// Build an observable from a producer.
    ///
    /// ```
    /// use rx_creation::observable::Observable;
    ///
    /// let numbers = Observable::<i32>::new(|subscriber| {
    ///     subscriber.next(1);
    ///     subscriber.next(2);
    ///     subscriber.next(3);
    ///     subscriber.complete();
    ///     None
    /// });
    /// numbers.subscribe(|n: i32| assert!(n <= 3));
    /// ```
    pub fn new(
        producer: impl Fn(Subscriber<T>) -> Option<Teardown> + Send + Sync + 'static,
    ) -> Self {
        Self {
            producer: Arc::new(producer),
        }
    }

    /// Emit `values` in order, then complete.
    pub fn of(values: impl Into<Vec<T>>) -> Self
    where
        T: Clone,
    {
        let values: Vec<T> = values.into();
        Self::from_values(values)
    }

    /// Iterate `iterable` on every subscription, then complete.
    ///
    /// Stops early if the consumer unsubscribes mid-iteration.
    pub fn from_values<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
    {
        Self::new(move |subscriber| {
            for value in iterable.clone() {
                if subscriber.is_closed() {
                    return None;
                }
                subscriber.next(value);
            }
            subscriber.complete();
            None
        })
    }

    /// Call `factory` on every subscription and subscribe to its result.
    ///
    /// The factory is never memoized: each subscriber sees a freshly built
    /// observable.
    pub fn defer(factory: impl Fn() -> Observable<T> + Send + Sync + 'static) -> Self {
        Self::new(move |subscriber| {
            let inner = factory().subscribe(subscriber.to_observer());
            Some(Box::new(move || inner.unsubscribe()))
        })
    }

    /// Complete immediately without emitting.
    pub fn empty() -> Self {
        Self::new(|subscriber| {
            subscriber.complete();
            None
        })
    }

    /// Subscribe `observer` and run the producer.
    pub fn subscribe(&self, observer: impl Into<Observer<T>>) -> Subscription {
        let subscription = Subscription::new();
        let subscriber = Subscriber::new(observer.into(), subscription.clone());
        if let Some(teardown) = (self.producer)(subscriber) {
            subscription.add(teardown);
        }
        subscription
    }
}

impl<T> Observable<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Observe payloads emitted under `name` on `source`.
    ///
    /// All subscriptions share one [`EventBridge`], so the emitter carries a
    /// single listener while any of them is live. The sequence never
    /// completes; end it by unsubscribing.
    pub fn from_event(source: &Arc<EventEmitter<T>>, name: impl Into<String>) -> Result<Self> {
        Ok(Self::from_bridge(EventBridge::new(source, name)?))
    }

    /// [`from_event`](Self::from_event) with explicit bridge options.
    pub fn from_event_with_options(
        source: &Arc<EventEmitter<T>>,
        name: impl Into<String>,
        options: BridgeOptions,
    ) -> Result<Self> {
        Ok(Self::from_bridge(EventBridge::with_options(
            Arc::downgrade(source),
            name,
            options,
        )?))
    }

    /// Wrap an existing bridge. Subscription failures (dropped source,
    /// disposed bridge) are delivered to the observer's `error` handler.
    ///
    /// Disposing the bridge closes the outer subscription too, silently.
    pub fn from_bridge(bridge: EventBridge<T>) -> Self {
        Self::new(move |subscriber| match bridge.subscribe(subscriber.to_observer()) {
            Ok(inner) => {
                let outer = subscriber.subscription().clone();
                inner.add(Box::new(move || outer.unsubscribe()));
                Some(Box::new(move || inner.unsubscribe()))
            }
            Err(err) => {
                subscriber.error(err);
                None
            }
        })
    }
}
