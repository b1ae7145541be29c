use super::subscribers::Subscribers;
use crate::{
  rc::{MutRc, RcDeref, RcDerefMut},
  subscription::Subscription,
};

/// Subscription handle for one observer of a [`Subject`](super::Subject).
///
/// Cloned handles refer to the same observer. Disposal removes the observer
/// only if the subject still tracks it, so disposing twice, or after the
/// subject has terminated, does nothing.
pub struct SubjectSubscription<'a, Item, Err> {
  subscribers: MutRc<Subscribers<'a, Item, Err>>,
  id: Option<usize>,
}

impl<'a, Item, Err> SubjectSubscription<'a, Item, Err> {
  pub(crate) fn new(subscribers: MutRc<Subscribers<'a, Item, Err>>, id: Option<usize>) -> Self {
    Self { subscribers, id }
  }
}

impl<'a, Item, Err> Clone for SubjectSubscription<'a, Item, Err> {
  fn clone(&self) -> Self { Self { subscribers: self.subscribers.clone(), id: self.id } }
}

impl<'a, Item, Err> Subscription for SubjectSubscription<'a, Item, Err> {
  fn unsubscribe(self) {
    let Some(id) = self.id else { return };
    let slot = self.subscribers.rc_deref_mut().remove(id);
    // The observer is dropped outside the borrow.
    let _observer = slot.and_then(|slot| slot.deactivate());
  }

  fn is_closed(&self) -> bool {
    self
      .id
      .map_or(true, |id| !self.subscribers.rc_deref().contains(id))
  }
}
