use smallvec::SmallVec;

use super::{BoxedSubscription, Subscription};
use crate::rc::{MutRc, RcDeref, RcDerefMut};

struct Inner {
  closed: bool,
  teardown: SmallVec<[BoxedSubscription; 2]>,
}

/// A group of subscriptions released together.
///
/// Cloned handles share the group. Adding to a group that is already closed
/// releases the added subscription immediately.
#[derive(Clone)]
pub struct CompositeSubscription(MutRc<Inner>);

impl Default for CompositeSubscription {
  fn default() -> Self { Self(MutRc::own(Inner { closed: false, teardown: SmallVec::new() })) }
}

impl CompositeSubscription {
  pub fn new() -> Self { Self::default() }

  pub fn add<S: Subscription + 'static>(&self, subscription: S) {
    if subscription.is_closed() {
      return;
    }
    let rejected = {
      let mut inner = self.0.rc_deref_mut();
      if inner.closed {
        Some(subscription)
      } else {
        inner
          .teardown
          .retain(|s| !s.is_closed());
        inner
          .teardown
          .push(BoxedSubscription::new(subscription));
        None
      }
    };
    if let Some(subscription) = rejected {
      subscription.unsubscribe();
    }
  }

  /// Number of subscriptions still held.
  pub fn teardown_size(&self) -> usize { self.0.rc_deref().teardown.len() }
}

impl Subscription for CompositeSubscription {
  fn unsubscribe(self) {
    let teardown = {
      let mut inner = self.0.rc_deref_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      std::mem::take(&mut inner.teardown)
    };
    // Released outside the borrow: a teardown may reach back into this group.
    for subscription in teardown {
      subscription.unsubscribe();
    }
  }

  fn is_closed(&self) -> bool { self.0.rc_deref().closed }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{rc::CellRc, subscription::ClosureSubscription};

  fn counter(count: &CellRc<usize>) -> ClosureSubscription<impl FnOnce()> {
    let c = count.clone();
    ClosureSubscription(move || c.set(c.get() + 1))
  }

  #[test]
  fn releases_all_once() {
    let count = CellRc::own(0);
    let group = CompositeSubscription::new();
    group.add(counter(&count));
    group.add(counter(&count));
    assert_eq!(group.teardown_size(), 2);

    group.clone().unsubscribe();
    group.clone().unsubscribe();
    assert_eq!(count.get(), 2);
    assert!(group.is_closed());
  }

  #[test]
  fn add_after_close_releases_immediately() {
    let count = CellRc::own(0);
    let group = CompositeSubscription::new();
    group.clone().unsubscribe();
    group.add(counter(&count));
    assert_eq!(count.get(), 1);
    assert_eq!(group.teardown_size(), 0);
  }

  #[test]
  fn closed_members_are_not_kept() {
    let group = CompositeSubscription::new();
    group.add(());
    assert_eq!(group.teardown_size(), 0);
  }

  #[test]
  fn teardown_may_touch_the_group() {
    let group = CompositeSubscription::new();
    let g = group.clone();
    group.add(ClosureSubscription(move || {
      assert!(g.is_closed());
      g.add(());
    }));
    group.unsubscribe();
  }
}
