use crate::{
  error::RxError,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Creates an observable producing a single value, then completing.
///
/// ```rust
/// use rxlite::prelude::*;
///
/// let mut value = 0;
/// observable::of(42).subscribe(|v| value = v);
/// assert_eq!(value, 42);
/// ```
pub fn of<Item>(value: Item) -> ObservableOf<Item> { ObservableOf(value) }

#[derive(Clone)]
pub struct ObservableOf<Item>(Item);

impl<Item> ObservableType for ObservableOf<Item> {
  type Item = Item;
  type Err = RxError;
}

impl<Item, O> CoreObservable<O> for ObservableOf<Item>
where
  O: Observer<Item, RxError>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) {
    if observer.is_closed() {
      return;
    }
    observer.next(self.0);
    if !observer.is_closed() {
      observer.complete();
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn emits_once_then_completes() {
    let log = Rc::new(RefCell::new(vec![]));
    let (n, c) = (log.clone(), log.clone());
    observable::of("a").subscribe_complete(
      move |v| n.borrow_mut().push(v.to_string()),
      move || c.borrow_mut().push("done".to_string()),
    );
    assert_eq!(*log.borrow(), vec!["a".to_string(), "done".to_string()]);
  }

  #[test]
  fn fork() {
    let source = observable::of(1);
    let mut sum = 0;
    source.clone().subscribe(|v| sum += v);
    source.subscribe(|v| sum += v);
    assert_eq!(sum, 2);
  }
}
