//! Concat operator
//!
//! Subscribes to the source, and to each target in turn once the previous
//! one has completed. Values a target emits before it is subscribed are not
//! seen. An error ends the whole chain.

use std::collections::VecDeque;

use crate::{
  logging::debug,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
  subscription::{BoxedSubscription, SerialSubscription, Subscription},
};

#[derive(Clone)]
pub struct Concat<S, T> {
  pub source: S,
  pub targets: VecDeque<T>,
}

impl<S: ObservableType, T> ObservableType for Concat<S, T> {
  type Item = S::Item;
  type Err = S::Err;
}

pub struct ConcatObserver<T, O> {
  observer: O,
  targets: VecDeque<T>,
  serial: SerialSubscription,
  // use function pointer to avoid circular type bounds requirements
  subscribe_fn: fn(Self, T),
}

impl<T, O> ConcatObserver<T, O>
where
  T: CoreObservable<Self>,
  T::Unsub: 'static,
{
  fn subscribe_target(self, target: T) {
    let serial = self.serial.clone();
    let epoch = serial.begin();
    let subscription = target.actual_subscribe(self);
    serial.attach(epoch, BoxedSubscription::new(subscription));
  }
}

impl<T, O, Item, Err> Observer<Item, Err> for ConcatObserver<T, O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    match self.targets.pop_front() {
      Some(target) => {
        if self.serial.is_closed() || self.observer.is_closed() {
          return;
        }
        debug!(remaining = self.targets.len(), "concat switching to next target");
        (self.subscribe_fn)(self, target);
      }
      None => self.observer.complete(),
    }
  }

  fn is_closed(&self) -> bool { self.serial.is_closed() || self.observer.is_closed() }
}

impl<S, T, O> CoreObservable<O> for Concat<S, T>
where
  S: CoreObservable<ConcatObserver<T, O>>,
  S::Unsub: 'static,
  T: CoreObservable<ConcatObserver<T, O>>,
  T::Unsub: 'static,
{
  type Unsub = SerialSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Concat { source, targets } = self;
    let serial = SerialSubscription::new();
    let concat = ConcatObserver {
      observer,
      targets,
      serial: serial.clone(),
      subscribe_fn: ConcatObserver::subscribe_target,
    };
    let epoch = serial.begin();
    let subscription = source.actual_subscribe(concat);
    serial.attach(epoch, BoxedSubscription::new(subscription));
    serial
  }
}
