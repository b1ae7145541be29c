//! Repeat operator
//!
//! `repeat(n)` subscribes to the source `n` times in a row, each new
//! subscription starting when the previous one completes. `repeat(0)`
//! repeats forever. Errors are forwarded and end the chain.

use crate::{
  logging::debug,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
  subscription::{BoxedSubscription, SerialSubscription, Subscription},
};

#[derive(Clone)]
pub struct Repeat<S> {
  pub source: S,
  pub times: usize,
}

impl<S: ObservableType> ObservableType for Repeat<S> {
  type Item = S::Item;
  type Err = S::Err;
}

pub struct RepeatObserver<S, O> {
  source: S,
  observer: O,
  // Subscriptions still to start after the current one; `None` is unbounded.
  remaining: Option<usize>,
  serial: SerialSubscription,
  // use function pointer to avoid circular type bounds requirements
  subscribe_fn: fn(Self),
}

impl<S, O> RepeatObserver<S, O>
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

impl<S, O, Item, Err> Observer<Item, Err> for RepeatObserver<S, O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    if self.remaining == Some(0) {
      self.observer.complete();
      return;
    }
    if self.serial.is_closed() || self.observer.is_closed() {
      return;
    }
    if let Some(remaining) = self.remaining.as_mut() {
      *remaining -= 1;
    }
    debug!(remaining = ?self.remaining, "repeat resubscribing");
    (self.subscribe_fn)(self);
  }

  fn is_closed(&self) -> bool { self.serial.is_closed() || self.observer.is_closed() }
}

impl<S, O> CoreObservable<O> for Repeat<S>
where
  S: CoreObservable<RepeatObserver<S, O>> + Clone,
  S::Unsub: 'static,
{
  type Unsub = SerialSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let serial = SerialSubscription::new();
    RepeatObserver {
      source: self.source,
      observer,
      remaining: self.times.checked_sub(1),
      serial: serial.clone(),
      subscribe_fn: RepeatObserver::subscribe_impl,
    }
    .subscribe_impl();
    serial
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn repeats_n_times_then_completes_once() {
    let values = Rc::new(RefCell::new(vec![]));
    let completed = Rc::new(RefCell::new(0));
    let (v, c) = (values.clone(), completed.clone());

    observable::from_iter(vec![1, 2])
      .repeat(3)
      .subscribe_complete(move |x| v.borrow_mut().push(x), move || *c.borrow_mut() += 1);

    assert_eq!(*values.borrow(), vec![1, 2, 1, 2, 1, 2]);
    assert_eq!(*completed.borrow(), 1);
  }

  #[test]
  fn repeat_once_is_the_source() {
    let mut values = vec![];
    observable::range(0, 3)
      .repeat(1)
      .subscribe(|v| values.push(v));
    assert_eq!(values, vec![0, 1, 2]);
  }

  #[test]
  fn zero_repeats_forever_until_take() {
    let mut values = vec![];
    observable::of(7)
      .repeat(0)
      .take(5)
      .subscribe(|v| values.push(v));
    assert_eq!(values, vec![7; 5]);
  }

  #[test]
  fn error_ends_the_chain() {
    let subscriptions = Rc::new(RefCell::new(0));
    let s = subscriptions.clone();
    let source = observable::create(move |emitter: &mut dyn Emitter<i32, RxError>| {
      *s.borrow_mut() += 1;
      emitter.error(RxError::new("boom"));
    });

    let error = Rc::new(RefCell::new(None));
    let e = error.clone();
    source
      .repeat(3)
      .subscribe_err(|_| {}, move |err| *e.borrow_mut() = Some(err));

    assert_eq!(*subscriptions.borrow(), 1);
    assert_eq!(*error.borrow(), Some(RxError::new("boom")));
  }

  #[test]
  fn unsubscribe_stops_repeating_subject() {
    let subject = Subject::<i32, RxError>::new();
    let values = Rc::new(RefCell::new(vec![]));
    let v = values.clone();
    let subscription = subject
      .clone()
      .repeat(0)
      .subscribe(move |x| v.borrow_mut().push(x));

    subject.clone().next(1);
    subscription.unsubscribe();
    subject.clone().next(2);
    assert_eq!(*values.borrow(), vec![1]);
    assert_eq!(subject.subscribed_size(), 0);
  }

  #[test]
  fn completed_subject_is_not_resubscribed_in_a_loop() {
    let subject = Subject::<i32, RxError>::new();
    let values = Rc::new(RefCell::new(vec![]));
    let completed = Rc::new(RefCell::new(false));
    let (v, c) = (values.clone(), completed.clone());
    subject
      .clone()
      .repeat(0)
      .subscribe_complete(move |x| v.borrow_mut().push(x), move || *c.borrow_mut() = true);

    subject.clone().next(1);
    subject.clone().complete();

    assert_eq!(*values.borrow(), vec![1]);
    assert!(!*completed.borrow());
    assert_eq!(subject.subscribed_size(), 0);
  }
}
