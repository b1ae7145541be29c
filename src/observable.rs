//! Observable traits, the operator surface and the built-in sources.
//!
//! An observable is a plain value describing how to produce a sequence.
//! Nothing runs until it is subscribed; `actual_subscribe` consumes the value,
//! so a cold observable that should be subscribed more than once is cloned
//! first and every clone replays the whole sequence.

mod connectable;
mod create;
mod from_iter;
mod of;
mod trivial;

pub use connectable::*;
pub use create::*;
pub use from_iter::*;
pub use of::*;
pub use trivial::*;

pub use crate::ops::zip::zip_all;
use crate::{
  observer::{FnMutObserver, Observer, ObserverAll, ObserverComp, ObserverErr},
  ops::{
    buffer::Buffer, concat::Concat, filter::Filter, map::Map, ref_count::RefCount, repeat::Repeat,
    retry::Retry, take::Take, zip::Zip,
  },
};

// ============================================================================
// Core traits
// ============================================================================

/// The types a stream carries: its values and its error.
pub trait ObservableType {
  type Item;
  type Err;
}

/// An observable that can be subscribed by an observer of type `O`.
///
/// Operators implement this by wrapping `O` in their own observer and
/// subscribing their source with it.
pub trait CoreObservable<O>: ObservableType {
  type Unsub: crate::subscription::Subscription;

  /// Start the sequence, delivering every signal to `observer`.
  fn actual_subscribe(self, observer: O) -> Self::Unsub;
}

// ============================================================================
// Observable: user-facing methods
// ============================================================================

/// Subscribe helpers and operators, available on every observable.
pub trait Observable: ObservableType + Sized {
  /// Subscribe with a `next` handler only; errors and completion are
  /// ignored.
  fn subscribe<N>(self, next: N) -> <Self as CoreObservable<FnMutObserver<N>>>::Unsub
  where
    N: FnMut(Self::Item),
    Self: CoreObservable<FnMutObserver<N>>,
  {
    self.actual_subscribe(FnMutObserver(next))
  }

  fn subscribe_err<N, E>(self, next: N, error: E) -> <Self as CoreObservable<ObserverErr<N, E>>>::Unsub
  where
    N: FnMut(Self::Item),
    E: FnOnce(Self::Err),
    Self: CoreObservable<ObserverErr<N, E>>,
  {
    self.actual_subscribe(ObserverErr { next, error })
  }

  fn subscribe_complete<N, C>(
    self, next: N, complete: C,
  ) -> <Self as CoreObservable<ObserverComp<N, C>>>::Unsub
  where
    N: FnMut(Self::Item),
    C: FnOnce(),
    Self: CoreObservable<ObserverComp<N, C>>,
  {
    self.actual_subscribe(ObserverComp { next, complete })
  }

  fn subscribe_all<N, E, C>(
    self, next: N, error: E, complete: C,
  ) -> <Self as CoreObservable<ObserverAll<N, E, C>>>::Unsub
  where
    N: FnMut(Self::Item),
    E: FnOnce(Self::Err),
    C: FnOnce(),
    Self: CoreObservable<ObserverAll<N, E, C>>,
  {
    self.actual_subscribe(ObserverAll { next, error, complete })
  }

  /// Subscribe with a hand-written observer.
  fn subscribe_with<O>(self, observer: O) -> <Self as CoreObservable<O>>::Unsub
  where
    O: Observer<Self::Item, Self::Err>,
    Self: CoreObservable<O>,
  {
    self.actual_subscribe(observer)
  }

  /// Transform every value with `f`.
  fn map<B, F>(self, f: F) -> Map<Self, F>
  where
    F: FnMut(Self::Item) -> B,
  {
    Map { source: self, func: f }
  }

  /// Forward only the values for which `predicate` returns `true`.
  fn filter<P>(self, predicate: P) -> Filter<Self, P>
  where
    P: FnMut(&Self::Item) -> bool,
  {
    Filter { source: self, predicate }
  }

  /// Forward the first `count` values, then complete.
  fn take(self, count: usize) -> Take<Self> { Take { source: self, count } }

  /// Collect values into windows of `size`, starting a new window every
  /// `skip` values.
  ///
  /// A window is emitted as soon as it holds `size` values. When the source
  /// completes, a non-empty partial window is emitted once before the
  /// completion.
  ///
  /// # Panics
  ///
  /// Panics if `size` or `skip` is zero.
  fn buffer(self, size: usize, skip: usize) -> Buffer<Self> {
    assert!(size > 0, "buffer size must be greater than zero");
    assert!(skip > 0, "buffer skip must be greater than zero");
    Buffer { source: self, size, skip }
  }

  /// Disjoint windows of `size` values, `buffer(size, size)`.
  fn buffer_count(self, size: usize) -> Buffer<Self> { self.buffer(size, size) }

  /// Pair the n-th value of this stream with the n-th value of `other`.
  fn zip<S>(self, other: S) -> Zip<Self, S>
  where
    S: ObservableType<Err = Self::Err>,
  {
    Zip { source_a: self, source_b: other }
  }

  /// Continue with each of `targets` in order once the previous stream has
  /// completed.
  fn concat<I>(self, targets: I) -> Concat<Self, I::Item>
  where
    I: IntoIterator,
    I::Item: ObservableType<Item = Self::Item, Err = Self::Err>,
  {
    Concat { source: self, targets: targets.into_iter().collect() }
  }

  /// Resubscribe to the source every time it errors.
  fn retry(self) -> Retry<Self>
  where
    Self: Clone,
  {
    Retry { source: self }
  }

  /// Subscribe to the source `times` times in a row. Zero repeats forever.
  fn repeat(self, times: usize) -> Repeat<Self>
  where
    Self: Clone,
  {
    Repeat { source: self, times }
  }

  /// Share one subscription of this stream among many observers, started by
  /// [`ConnectableObservable::connect`].
  fn publish<'a>(self) -> ConnectableObservable<'a, Self, Self::Item, Self::Err>
  where
    Self: Clone,
  {
    ConnectableObservable::new(self)
  }

  /// `publish().ref_count()`: connect on the first subscriber, disconnect
  /// after the last one leaves.
  fn share<'a>(self) -> RefCount<'a, Self, Self::Item, Self::Err>
  where
    Self: Clone,
  {
    self.publish().ref_count()
  }
}

impl<T: ObservableType> Observable for T {}
