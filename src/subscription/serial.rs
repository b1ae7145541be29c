use super::{BoxedSubscription, Subscription};
use crate::rc::{MutRc, RcDeref, RcDerefMut};

struct Inner {
  closed: bool,
  epoch: usize,
  current: Option<BoxedSubscription>,
}

/// Holds the subscription of the current attempt of a chain that switches
/// from one upstream to the next (`concat`, `retry`, `repeat`).
///
/// Switching is two-step because a synchronous upstream can finish, and
/// trigger the next switch, before its own subscribe call has returned:
///
/// 1. [`begin`](Self::begin) releases the previous attempt and opens a new
///    epoch.
/// 2. [`attach`](Self::attach) stores the handle returned by subscribe, but
///    only if no later epoch has begun and the serial is still open.
///    Otherwise the handle belongs to a finished attempt and is released.
#[derive(Clone)]
pub struct SerialSubscription(MutRc<Inner>);

impl Default for SerialSubscription {
  fn default() -> Self { Self(MutRc::own(Inner { closed: false, epoch: 0, current: None })) }
}

impl SerialSubscription {
  pub fn new() -> Self { Self::default() }

  /// Release the current attempt and return the epoch of the next one.
  pub fn begin(&self) -> usize {
    let (epoch, previous) = {
      let mut inner = self.0.rc_deref_mut();
      inner.epoch += 1;
      (inner.epoch, inner.current.take())
    };
    previous.unsubscribe();
    epoch
  }

  /// Store the handle of the attempt opened by `begin` at `epoch`.
  pub fn attach(&self, epoch: usize, subscription: BoxedSubscription) {
    let stale = {
      let mut inner = self.0.rc_deref_mut();
      if inner.closed || inner.epoch != epoch {
        Some(subscription)
      } else {
        inner.current = Some(subscription);
        None
      }
    };
    stale.unsubscribe();
  }
}

impl Subscription for SerialSubscription {
  fn unsubscribe(self) {
    let current = {
      let mut inner = self.0.rc_deref_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      inner.current.take()
    };
    current.unsubscribe();
  }

  fn is_closed(&self) -> bool { self.0.rc_deref().closed }
}
