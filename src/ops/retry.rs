//! Retry operator
//!
//! On error the failed attempt is torn down and a fresh clone of the source
//! is subscribed. The error itself is never forwarded, so a source that
//! always fails is retried forever; bound it downstream (e.g. with `take`)
//! or make sure the source eventually succeeds.
//!
//! ```rust
//! use std::{cell::Cell, rc::Rc};
//!
//! use rxlite::prelude::*;
//!
//! let attempts = Rc::new(Cell::new(0));
//! let a = attempts.clone();
//! let source = observable::create(move |emitter: &mut dyn Emitter<i32, RxError>| {
//!   a.set(a.get() + 1);
//!   if a.get() < 3 {
//!     emitter.error(RxError::new("flaky"));
//!   } else {
//!     emitter.next(1);
//!     emitter.complete();
//!   }
//! });
//!
//! let mut values = vec![];
//! source.retry().subscribe(|v| values.push(v));
//! assert_eq!(values, vec![1]);
//! assert_eq!(attempts.get(), 3);
//! ```

use crate::{
  logging::debug,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
  subscription::{BoxedSubscription, SerialSubscription, Subscription},
};

#[derive(Clone)]
pub struct Retry<S> {
  pub source: S,
}

impl<S: ObservableType> ObservableType for Retry<S> {
  type Item = S::Item;
  type Err = S::Err;
}

pub struct RetryObserver<S, O> {
  source: S,
  observer: O,
  attempts: usize,
  serial: SerialSubscription,
  // use function pointer to avoid circular type bounds requirements
  subscribe_fn: fn(Self),
}

impl<S, O> RetryObserver<S, O>
where
  S: CoreObservable<Self> + Clone,
  S::Unsub: 'static,
{
  fn subscribe_impl(self) {
    let serial = self.serial.clone();
    let epoch = serial.begin();
    let source = self.source.clone();
    let subscription = source.actual_subscribe(self);
    serial.attach(epoch, BoxedSubscription::new(subscription));
  }
}

impl<S, O, Item, Err> Observer<Item, Err> for RetryObserver<S, O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(mut self, _err: Err) {
    if self.serial.is_closed() || self.observer.is_closed() {
      return;
    }
    self.attempts += 1;
    debug!(attempt = self.attempts, "retry resubscribing");
    (self.subscribe_fn)(self);
  }

  fn complete(self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.serial.is_closed() || self.observer.is_closed() }
}

impl<S, O> CoreObservable<O> for Retry<S>
where
  S: CoreObservable<RetryObserver<S, O>> + Clone,
  S::Unsub: 'static,
{
  type Unsub = SerialSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let serial = SerialSubscription::new();
    RetryObserver {
      source: self.source,
      observer,
      attempts: 0,
      serial: serial.clone(),
      subscribe_fn: RetryObserver::subscribe_impl,
    }
    .subscribe_impl();
    serial
  }
}
