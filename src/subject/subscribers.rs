use std::{
  cell::{Cell, RefCell},
  rc::Rc,
};

use smallvec::SmallVec;

use crate::observer::{BoxedObserver, Observer};

/// A terminal signal on its way to the registered observers.
#[derive(Clone)]
pub(crate) enum Terminal<Err> {
  Error(Err),
  Complete,
}

impl<Err> Terminal<Err> {
  pub(crate) fn deliver<Item, O: Observer<Item, Err>>(self, observer: O) {
    match self {
      Terminal::Error(err) => observer.error(err),
      Terminal::Complete => observer.complete(),
    }
  }
}

/// One registered observer.
///
/// While the observer runs its own `next` it is taken out of `observer`, so
/// the subject never holds a borrow across a call into user code. A terminal
/// signal raised during that call is parked in `pending` and delivered when
/// the call returns.
pub(crate) struct ObserverSlot<'a, Item, Err> {
  observer: RefCell<Option<BoxedObserver<'a, Item, Err>>>,
  pending: RefCell<Option<Terminal<Err>>>,
  active: Cell<bool>,
}

pub(crate) type SlotRc<'a, Item, Err> = Rc<ObserverSlot<'a, Item, Err>>;
type Snapshot<'a, Item, Err> = SmallVec<[SlotRc<'a, Item, Err>; 2]>;

impl<'a, Item, Err> ObserverSlot<'a, Item, Err> {
  fn new(observer: BoxedObserver<'a, Item, Err>) -> Self {
    Self { observer: RefCell::new(Some(observer)), pending: RefCell::new(None), active: Cell::new(true) }
  }

  /// Stop delivering to this slot and hand back its observer, if it is not
  /// running right now.
  pub(crate) fn deactivate(&self) -> Option<BoxedObserver<'a, Item, Err>> {
    self.active.set(false);
    self.observer.borrow_mut().take()
  }

  /// Deliver one value. Returns `false` once the slot should be dropped from
  /// the subscriber list.
  fn deliver_next(&self, value: Item) -> bool {
    if !self.active.get() {
      return false;
    }
    // Taken by an outer `next` still running on this observer.
    let Some(mut observer) = self.observer.borrow_mut().take() else {
      return true;
    };
    observer.next(value);

    let pending = self.pending.borrow_mut().take();
    if let Some(terminal) = pending {
      terminal.deliver::<Item, _>(observer);
      return false;
    }
    if !self.active.get() || observer.is_closed() {
      self.active.set(false);
      return false;
    }
    *self.observer.borrow_mut() = Some(observer);
    true
  }

  fn deliver_terminal(&self, terminal: Terminal<Err>) {
    if !self.active.replace(false) {
      return;
    }
    let observer = self.observer.borrow_mut().take();
    match observer {
      Some(observer) => terminal.deliver::<Item, _>(observer),
      None => *self.pending.borrow_mut() = Some(terminal),
    }
  }
}

/// The observers of one subject plus its terminal state.
///
/// Slots are tagged with increasing ids and kept in registration order, so
/// lookups by id are binary searches. Ids are never reused.
pub struct Subscribers<'a, Item, Err> {
  next_id: usize,
  slots: SmallVec<[(usize, SlotRc<'a, Item, Err>); 2]>,
  terminated: bool,
}

impl<'a, Item, Err> Default for Subscribers<'a, Item, Err> {
  fn default() -> Self { Self { next_id: 0, slots: SmallVec::new(), terminated: false } }
}

impl<'a, Item, Err> Subscribers<'a, Item, Err> {
  pub(crate) fn add(&mut self, observer: BoxedObserver<'a, Item, Err>) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    self
      .slots
      .push((id, Rc::new(ObserverSlot::new(observer))));
    id
  }

  fn position(&self, id: usize) -> Option<usize> {
    self
      .slots
      .binary_search_by_key(&id, |(slot_id, _)| *slot_id)
      .ok()
  }

  pub(crate) fn remove(&mut self, id: usize) -> Option<SlotRc<'a, Item, Err>> {
    let pos = self.position(id)?;
    Some(self.slots.remove(pos).1)
  }

  pub(crate) fn contains(&self, id: usize) -> bool { self.position(id).is_some() }

  pub(crate) fn len(&self) -> usize { self.slots.len() }

  pub(crate) fn is_terminated(&self) -> bool { self.terminated }

  /// Active slots in registration order, or `None` once terminated.
  pub(crate) fn snapshot(&self) -> Option<Snapshot<'a, Item, Err>> {
    if self.is_terminated() {
      return None;
    }
    Some(self.slots.iter().map(|(_, slot)| slot.clone()).collect())
  }

  /// Mark the subject terminated and hand back every slot to be told about
  /// it. Returns `None` if already terminated.
  pub(crate) fn terminate(&mut self) -> Option<Snapshot<'a, Item, Err>> {
    if self.terminated {
      return None;
    }
    self.terminated = true;
    Some(self.slots.drain(..).map(|(_, slot)| slot).collect())
  }

  pub(crate) fn prune(&mut self) { self.slots.retain(|(_, slot)| slot.active.get()); }
}

/// Deliver `value` to every slot of `snapshot`, cloning for all but the
/// last. Returns whether any slot asked to be dropped.
pub(crate) fn broadcast_value<Item: Clone, Err>(mut snapshot: Snapshot<'_, Item, Err>, value: Item) -> bool {
  let Some(last) = snapshot.pop() else {
    return false;
  };
  let mut prune = false;
  for slot in snapshot {
    prune |= !slot.deliver_next(value.clone());
  }
  prune |= !last.deliver_next(value);
  prune
}

/// Deliver a terminal signal to every slot of `snapshot`.
pub(crate) fn broadcast_terminal<Item, Err: Clone>(snapshot: Snapshot<'_, Item, Err>, terminal: Terminal<Err>) {
  for slot in snapshot {
    slot.deliver_terminal(terminal.clone());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn silent() -> BoxedObserver<'static, i32, ()> { Box::new(crate::observer::FnMutObserver(|_: i32| {})) }

  #[test]
  fn ids_are_not_reused() {
    let mut subscribers = Subscribers::default();
    let a = subscribers.add(silent());
    let b = subscribers.add(silent());
    assert!(subscribers.remove(a).is_some());
    let c = subscribers.add(silent());

    assert!(a != b && a != c && b != c);
    assert!(!subscribers.contains(a));
    assert!(subscribers.remove(a).is_none());
    assert!(subscribers.contains(b) && subscribers.contains(c));
    assert_eq!(subscribers.len(), 2);
  }

  #[test]
  fn terminate_once_and_clear_slots() {
    let mut subscribers = Subscribers::<i32, ()>::default();
    subscribers.add(silent());
    subscribers.add(silent());

    let slots = subscribers.terminate();
    assert_eq!(slots.map(|s| s.len()), Some(2));
    assert!(subscribers.terminate().is_none());
    assert!(subscribers.snapshot().is_none());
    assert_eq!(subscribers.len(), 0);
  }

  #[test]
  fn prune_drops_inactive_slots() {
    let mut subscribers = Subscribers::default();
    let a = subscribers.add(silent());
    let b = subscribers.add(silent());
    if let Some(snapshot) = subscribers.snapshot() {
      snapshot[0].deactivate();
    }
    subscribers.prune();
    assert!(!subscribers.contains(a));
    assert!(subscribers.contains(b));
  }
}
