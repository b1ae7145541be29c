//! Shared-ownership cells used by observers, subjects and stateful operators.
//!
//! Everything in this crate runs on a single logical thread, so shared state
//! is `Rc<RefCell<T>>` / `Rc<Cell<T>>`. The newtypes keep borrow sites short
//! and uniform (`rc_deref` / `rc_deref_mut`).

use std::{
  cell::{Cell, Ref, RefCell, RefMut},
  rc::Rc,
};

use crate::{observer::Observer, subscription::Subscription};

pub trait RcDeref {
  type Target<'a>
  where
    Self: 'a;
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref<'a>(&'a self) -> Self::Target<'a>;
}

pub trait RcDerefMut {
  type Target<'a>
  where
    Self: 'a;
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref_mut<'a>(&'a self) -> Self::Target<'a>;
}

/// Shared mutable state: a cloneable handle to one `RefCell<T>`.
#[derive(Default)]
pub struct MutRc<T>(Rc<RefCell<T>>);

impl<T> MutRc<T> {
  pub fn own(t: T) -> Self { Self(Rc::new(RefCell::new(t))) }

  /// Whether both handles point at the same cell.
  pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }
}

impl<T> From<T> for MutRc<T> {
  #[inline]
  fn from(t: T) -> Self { Self::own(t) }
}

impl<T> Clone for MutRc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<T> RcDeref for MutRc<T> {
  type Target<'a>
    = Ref<'a, T>
  where
    Self: 'a;

  #[inline]
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref<'a>(&'a self) -> Self::Target<'a> { self.0.borrow() }
}

impl<T> RcDerefMut for MutRc<T> {
  type Target<'a>
    = RefMut<'a, T>
  where
    Self: 'a;

  #[inline]
  #[allow(clippy::needless_lifetimes)]
  fn rc_deref_mut<'a>(&'a self) -> Self::Target<'a> { self.0.borrow_mut() }
}

/// Shared `Copy` flag or counter.
pub struct CellRc<T: Copy>(Rc<Cell<T>>);

impl<T: Copy> CellRc<T> {
  pub fn own(t: T) -> Self { Self(Rc::new(Cell::new(t))) }

  #[inline]
  pub fn get(&self) -> T { self.0.get() }

  #[inline]
  pub fn set(&self, t: T) { self.0.set(t) }

  #[inline]
  pub fn replace(&self, t: T) -> T { self.0.replace(t) }
}

impl<T: Copy + Default> Default for CellRc<T> {
  fn default() -> Self { Self::own(T::default()) }
}

impl<T: Copy> Clone for CellRc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

/// `MutRc<Option<O>>` is an observer shared between several upstream
/// observers; the first terminal signal takes the inner observer out.
impl<O, Item, Err> Observer<Item, Err> for MutRc<Option<O>>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(observer) = self.rc_deref_mut().as_mut() {
      observer.next(value);
    }
  }

  fn error(self, err: Err) {
    let observer = self.rc_deref_mut().take();
    if let Some(observer) = observer {
      observer.error(err);
    }
  }

  fn complete(self) {
    let observer = self.rc_deref_mut().take();
    if let Some(observer) = observer {
      observer.complete();
    }
  }

  fn is_closed(&self) -> bool {
    self
      .rc_deref()
      .as_ref()
      .map_or(true, Observer::is_closed)
  }
}

/// A subscription slot that may be filled after the handle is handed out.
impl<S: Subscription> Subscription for MutRc<Option<S>> {
  fn unsubscribe(self) {
    let inner = self.rc_deref_mut().take();
    if let Some(inner) = inner {
      inner.unsubscribe();
    }
  }

  fn is_closed(&self) -> bool {
    self
      .rc_deref()
      .as_ref()
      .map_or(true, Subscription::is_closed)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mut_rc_shares_state() {
    let a = MutRc::own(1);
    let b = a.clone();
    *b.rc_deref_mut() += 1;
    assert_eq!(*a.rc_deref(), 2);
    assert!(a.ptr_eq(&b));
    assert!(!a.ptr_eq(&MutRc::own(2)));
  }

  #[test]
  fn cell_rc_replace() {
    let flag = CellRc::own(true);
    let other = flag.clone();
    assert!(other.replace(false));
    assert!(!flag.get());
  }

  #[test]
  fn option_slot_unsubscribes_once() {
    let closed = CellRc::own(0);
    let c = closed.clone();
    let slot = MutRc::own(Some(crate::subscription::ClosureSubscription(move || {
      c.set(c.get() + 1)
    })));
    assert!(!slot.is_closed());
    slot.clone().unsubscribe();
    slot.clone().unsubscribe();
    assert_eq!(closed.get(), 1);
    assert!(slot.is_closed());
  }
}
