//! Multicasting: one upstream subscription shared by many observers.
//!
//! A [`ConnectableObservable`] bridges a source and a [`Subject`].
//! Subscribing to it only registers on the subject; nothing upstream runs
//! until [`connect`](ConnectableObservable::connect) subscribes the subject
//! to the source.
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use rxlite::prelude::*;
//!
//! let seen = Rc::new(RefCell::new(vec![]));
//! let connectable = observable::range(0, 3).publish();
//!
//! let (a, b) = (seen.clone(), seen.clone());
//! connectable.fork().subscribe(move |v| a.borrow_mut().push(("a", v)));
//! connectable.fork().subscribe(move |v| b.borrow_mut().push(("b", v)));
//! assert!(seen.borrow().is_empty());
//!
//! connectable.connect();
//! assert_eq!(seen.borrow().len(), 6);
//! ```

use crate::{
  logging::debug,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
  ops::ref_count::RefCount,
  rc::{MutRc, RcDeref, RcDerefMut},
  subject::{Subject, SubjectSubscription},
  subscription::{BoxedSubscription, Subscription},
};

// ============================================================================
// Connection
// ============================================================================

#[derive(Default)]
struct ConnectionInner {
  closed: bool,
  subscription: Option<BoxedSubscription>,
}

/// The handle returned by `connect`: disposing it detaches the subject from
/// the source.
///
/// Clones refer to the same connection, and disposing it more than once does
/// nothing.
#[derive(Clone, Default)]
pub struct Connection(MutRc<ConnectionInner>);

impl Connection {
  fn attach(&self, subscription: BoxedSubscription) {
    let rejected = {
      let mut inner = self.0.rc_deref_mut();
      if inner.closed {
        Some(subscription)
      } else {
        inner.subscription = Some(subscription);
        None
      }
    };
    rejected.unsubscribe();
  }

  /// Whether both handles refer to the same connection.
  pub fn ptr_eq(&self, other: &Self) -> bool { self.0.ptr_eq(&other.0) }
}

impl Subscription for Connection {
  fn unsubscribe(self) {
    let subscription = {
      let mut inner = self.0.rc_deref_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      inner.subscription.take()
    };
    debug!("connection disposed");
    subscription.unsubscribe();
  }

  fn is_closed(&self) -> bool { self.0.rc_deref().closed }
}

// ============================================================================
// ConnectableObservable
// ============================================================================

struct ConnectableState<'a, Item, Err> {
  subject: Subject<'a, Item, Err>,
  connection: Option<Connection>,
}

/// A source plus the subject that multicasts it.
///
/// Clones (and [`fork`](Self::fork)s) share the subject and the connection,
/// so any of them can be subscribed or connected.
pub struct ConnectableObservable<'a, S, Item, Err> {
  source: S,
  state: MutRc<ConnectableState<'a, Item, Err>>,
}

impl<'a, S: Clone, Item, Err> Clone for ConnectableObservable<'a, S, Item, Err> {
  fn clone(&self) -> Self { Self { source: self.source.clone(), state: self.state.clone() } }
}

impl<'a, S, Item, Err> ConnectableObservable<'a, S, Item, Err> {
  pub fn new(source: S) -> Self {
    Self { source, state: MutRc::own(ConnectableState { subject: Subject::default(), connection: None }) }
  }

  /// A handle to subscribe through, sharing this connectable's subject.
  pub fn fork(&self) -> Self
  where
    S: Clone,
  {
    self.clone()
  }

  /// Subscribe the subject to the source.
  ///
  /// While a connection is live, calling `connect` again returns that same
  /// connection. After it has been disposed, `connect` subscribes the source
  /// afresh.
  pub fn connect(&self) -> Connection
  where
    S: Clone + CoreObservable<Subject<'a, Item, Err>>,
    S::Unsub: 'static,
  {
    let (subject, connection) = {
      let mut state = self.state.rc_deref_mut();
      if let Some(connection) = state.connection.as_ref().filter(|c| !c.is_closed()) {
        return connection.clone();
      }
      let connection = Connection::default();
      state.connection = Some(connection.clone());
      (state.subject.clone(), connection)
    };
    debug!("connecting");
    let subscription = self.source.clone().actual_subscribe(subject);
    connection.attach(BoxedSubscription::new(subscription));
    connection
  }

  /// Whether a live connection exists.
  pub fn is_connected(&self) -> bool {
    self
      .state
      .rc_deref()
      .connection
      .as_ref()
      .map_or(false, |c| !c.is_closed())
  }

  /// Swap in a fresh subject if the current one has terminated, so new
  /// observers see the next execution instead of a subject that stays
  /// silent forever.
  pub(crate) fn reset_if_terminated(&self) {
    let mut state = self.state.rc_deref_mut();
    if state.subject.is_terminated() {
      state.subject = Subject::default();
    }
  }

  /// Connect automatically while at least one observer is subscribed.
  pub fn ref_count(self) -> RefCount<'a, S, Item, Err> { RefCount::new(self) }
}

impl<'a, S, Item, Err> ObservableType for ConnectableObservable<'a, S, Item, Err> {
  type Item = Item;
  type Err = Err;
}

impl<'a, S, Item, Err, O> CoreObservable<O> for ConnectableObservable<'a, S, Item, Err>
where
  O: Observer<Item, Err> + 'a,
{
  type Unsub = SubjectSubscription<'a, Item, Err>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let subject = self.state.rc_deref().subject.clone();
    subject.actual_subscribe(observer)
  }
}
