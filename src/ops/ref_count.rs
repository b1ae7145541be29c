//! Reference-counted connection of a [`ConnectableObservable`].
//!
//! The first subscriber connects the source; when the last one leaves, by
//! unsubscribing or by receiving a terminal signal, the connection is
//! disposed. A later subscriber connects again, against a fresh subject if
//! the previous one has terminated.

use crate::{
  logging::debug,
  observable::{Connection, ConnectableObservable, CoreObservable, ObservableType},
  observer::Observer,
  rc::{CellRc, MutRc, RcDeref, RcDerefMut},
  subject::{Subject, SubjectSubscription},
  subscription::Subscription,
};

#[derive(Default)]
struct RefCountState {
  count: usize,
  // Bumped every time the count drops to zero.
  generation: usize,
  connection: Option<Connection>,
}

/// Observable returned by `ref_count` and `share`.
///
/// Clones share the same count and connection.
pub struct RefCount<'a, S, Item, Err> {
  connectable: ConnectableObservable<'a, S, Item, Err>,
  state: MutRc<RefCountState>,
}

impl<'a, S, Item, Err> RefCount<'a, S, Item, Err> {
  pub(crate) fn new(connectable: ConnectableObservable<'a, S, Item, Err>) -> Self {
    Self { connectable, state: MutRc::own(RefCountState::default()) }
  }

  /// Number of subscribers currently holding the connection open.
  pub fn subscriber_count(&self) -> usize { self.state.rc_deref().count }
}

impl<'a, S: Clone, Item, Err> Clone for RefCount<'a, S, Item, Err> {
  fn clone(&self) -> Self { Self { connectable: self.connectable.clone(), state: self.state.clone() } }
}

impl<'a, S, Item, Err> ObservableType for RefCount<'a, S, Item, Err> {
  type Item = Item;
  type Err = Err;
}

/// One subscriber's claim on the shared connection, released at most once.
#[derive(Clone)]
struct Lease {
  active: CellRc<bool>,
  state: MutRc<RefCountState>,
}

impl Lease {
  fn release(&self) {
    if !self.active.replace(false) {
      return;
    }
    let connection = {
      let mut state = self.state.rc_deref_mut();
      state.count -= 1;
      if state.count == 0 {
        state.generation += 1;
        state.connection.take()
      } else {
        None
      }
    };
    if connection.is_some() {
      debug!("last subscriber left, disconnecting");
    }
    connection.unsubscribe();
  }
}

/// Releases its lease when dropped, so a subscriber the subject prunes after
/// it reports closed gives its count back too.
struct LeaseGuard(Lease);

impl Drop for LeaseGuard {
  fn drop(&mut self) { self.0.release(); }
}

pub struct RefCountObserver<O> {
  observer: O,
  _lease: LeaseGuard,
}

impl<O, Item, Err> Observer<Item, Err> for RefCountObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

/// Subscription returned by [`RefCount`]: unregisters the observer and
/// releases its share of the connection.
pub struct RefCountSubscription<'a, Item, Err> {
  subscription: SubjectSubscription<'a, Item, Err>,
  lease: Lease,
}

impl<'a, Item, Err> Clone for RefCountSubscription<'a, Item, Err> {
  fn clone(&self) -> Self { Self { subscription: self.subscription.clone(), lease: self.lease.clone() } }
}

impl<'a, Item, Err> Subscription for RefCountSubscription<'a, Item, Err> {
  fn unsubscribe(self) {
    self.subscription.unsubscribe();
    self.lease.release();
  }

  fn is_closed(&self) -> bool { !self.lease.active.get() }
}

impl<'a, S, Item, Err, O> CoreObservable<O> for RefCount<'a, S, Item, Err>
where
  O: Observer<Item, Err> + 'a,
  S: Clone + CoreObservable<Subject<'a, Item, Err>>,
  S::Unsub: 'static,
{
  type Unsub = RefCountSubscription<'a, Item, Err>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let (first, generation) = {
      let mut state = self.state.rc_deref_mut();
      state.count += 1;
      (state.count == 1, state.generation)
    };
    if first {
      self.connectable.reset_if_terminated();
    }

    let lease = Lease { active: CellRc::own(true), state: self.state.clone() };
    let subscription = self
      .connectable
      .clone()
      .actual_subscribe(RefCountObserver { observer, _lease: LeaseGuard(lease.clone()) });

    if first {
      debug!("first subscriber, connecting");
      let connection = self.connectable.connect();
      let stale = {
        let mut state = self.state.rc_deref_mut();
        if state.generation == generation && state.count > 0 {
          state.connection = Some(connection);
          None
        } else if state
          .connection
          .as_ref()
          .map_or(false, |current| current.ptr_eq(&connection))
        {
          None
        } else {
          Some(connection)
        }
      };
      // Every subscriber already left while the source ran synchronously.
      stale.unsubscribe();
    }

    RefCountSubscription { subscription, lease }
  }
}
