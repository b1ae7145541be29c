//! Subject: an observable that is also an observer.
//!
//! Every signal pushed into a [`Subject`] is broadcast synchronously to the
//! observers registered at that moment, in registration order. Nothing is
//! buffered: a value pushed while no observer is registered is lost.

mod subject_subscription;
mod subscribers;

pub use subject_subscription::SubjectSubscription;
pub use subscribers::Subscribers;
use subscribers::{broadcast_terminal, broadcast_value, Terminal};

use crate::{
  logging::trace,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
};

/// A hot multicast source driven by hand.
///
/// Cloned handles share one observer list, so a common pattern is to keep one
/// clone for pushing and subscribe through others.
///
/// # Re-entrancy
///
/// Observers may subscribe, unsubscribe (themselves or others) and push into
/// the subject from inside a callback:
///
/// - An observer added during a broadcast does not see that broadcast.
/// - An observer removed during a broadcast is skipped if it has not been
///   reached yet; no other observer is skipped or visited twice.
/// - A `next` pushed from inside an observer's own `next` is not delivered
///   to that observer.
/// - A terminal signal pushed from inside an observer's `next` reaches that
///   observer as soon as its `next` returns.
///
/// After `error` or `complete` the subject ignores every further signal. It
/// keeps no history: a late subscriber is not registered and receives
/// nothing, not even the terminal signal.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use rxlite::prelude::*;
///
/// let subject = Subject::<i32, RxError>::new();
/// let seen = Rc::new(RefCell::new(vec![]));
/// let s = seen.clone();
/// subject
///   .clone()
///   .subscribe(move |v| s.borrow_mut().push(v));
///
/// subject.clone().next(1);
/// subject.clone().next(2);
/// assert_eq!(*seen.borrow(), vec![1, 2]);
/// ```
pub struct Subject<'a, Item, Err> {
  observers: MutRc<Subscribers<'a, Item, Err>>,
}

impl<'a, Item, Err> Subject<'a, Item, Err> {
  pub fn new() -> Self { Self::default() }

  /// Number of observers currently registered.
  pub fn subscribed_size(&self) -> usize { self.observers.rc_deref().len() }

  /// Whether `error` or `complete` has been pushed.
  pub fn is_terminated(&self) -> bool { self.observers.rc_deref().is_terminated() }
}

impl<'a, Item, Err> Default for Subject<'a, Item, Err> {
  fn default() -> Self { Self { observers: MutRc::own(Subscribers::default()) } }
}

impl<'a, Item, Err> Clone for Subject<'a, Item, Err> {
  fn clone(&self) -> Self { Self { observers: self.observers.clone() } }
}

impl<'a, Item: Clone, Err: Clone> Observer<Item, Err> for Subject<'a, Item, Err> {
  fn next(&mut self, value: Item) {
    let snapshot = self.observers.rc_deref().snapshot();
    if let Some(snapshot) = snapshot {
      if broadcast_value(snapshot, value) {
        self.observers.rc_deref_mut().prune();
      }
    }
  }

  fn error(self, err: Err) {
    let snapshot = self.observers.rc_deref_mut().terminate();
    if let Some(snapshot) = snapshot {
      trace!(observers = snapshot.len(), "subject errored");
      broadcast_terminal::<Item, _>(snapshot, Terminal::Error(err));
    }
  }

  fn complete(self) {
    let snapshot = self.observers.rc_deref_mut().terminate();
    if let Some(snapshot) = snapshot {
      trace!(observers = snapshot.len(), "subject completed");
      broadcast_terminal::<Item, _>(snapshot, Terminal::Complete);
    }
  }

  fn is_closed(&self) -> bool { self.is_terminated() }
}

impl<'a, Item, Err> ObservableType for Subject<'a, Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<'a, Item, Err, O> CoreObservable<O> for Subject<'a, Item, Err>
where
  O: Observer<Item, Err> + 'a,
{
  type Unsub = SubjectSubscription<'a, Item, Err>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    if self.is_terminated() {
      // Nothing will ever be pushed again; the observer is dropped unsignalled.
      drop(observer);
      return SubjectSubscription::new(self.observers, None);
    }
    let id = self.observers.rc_deref_mut().add(Box::new(observer));
    SubjectSubscription::new(self.observers, Some(id))
  }
}
