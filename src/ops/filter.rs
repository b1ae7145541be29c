use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Filter operator: forwards only the values matching a predicate.
#[derive(Clone)]
pub struct Filter<S, P> {
  pub source: S,
  pub predicate: P,
}

impl<S: ObservableType, P> ObservableType for Filter<S, P> {
  type Item = S::Item;
  type Err = S::Err;
}

pub struct FilterObserver<O, P> {
  observer: O,
  predicate: P,
}

impl<O, P, Item, Err> Observer<Item, Err> for FilterObserver<O, P>
where
  O: Observer<Item, Err>,
  P: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.predicate)(&value) {
      self.observer.next(value);
    }
  }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, P, O> CoreObservable<O> for Filter<S, P>
where
  S: CoreObservable<FilterObserver<O, P>>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Filter { source, predicate } = self;
    source.actual_subscribe(FilterObserver { observer, predicate })
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn keeps_matching_values() {
    let mut values = vec![];
    observable::range(0, 10)
      .filter(|v| v % 3 == 0)
      .subscribe(|v| values.push(v));
    assert_eq!(values, vec![0, 3, 6, 9]);
  }

  #[test]
  fn completion_passes_through() {
    let completed = Rc::new(RefCell::new(false));
    let c = completed.clone();
    observable::range(0, 3)
      .filter(|_| false)
      .subscribe_complete(|_| unreachable!(), move || *c.borrow_mut() = true);
    assert!(*completed.borrow());
  }
}
