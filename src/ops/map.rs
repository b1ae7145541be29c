use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Map operator: applies a function to every value.
#[derive(Clone)]
pub struct Map<S, F> {
  pub source: S,
  pub func: F,
}

impl<S, F, B> ObservableType for Map<S, F>
where
  S: ObservableType,
  F: FnMut(S::Item) -> B,
{
  type Item = B;
  type Err = S::Err;
}

pub struct MapObserver<O, F> {
  observer: O,
  func: F,
}

impl<O, F, Item, B, Err> Observer<Item, Err> for MapObserver<O, F>
where
  O: Observer<B, Err>,
  F: FnMut(Item) -> B,
{
  fn next(&mut self, value: Item) { self.observer.next((self.func)(value)) }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, F, B, O> CoreObservable<O> for Map<S, F>
where
  S: CoreObservable<MapObserver<O, F>>,
  F: FnMut(S::Item) -> B,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Map { source, func } = self;
    source.actual_subscribe(MapObserver { observer, func })
  }
}

#[cfg(test)]
mod tests {
  use crate::prelude::*;

  #[test]
  fn primitive_type() {
    let mut i = 0;
    observable::from_iter(100..101)
      .map(|v| v * 2)
      .subscribe(|v| i += v);
    assert_eq!(i, 200);
  }

  #[test]
  fn change_type() {
    let mut s = String::new();
    observable::range(1, 3)
      .map(|v| v.to_string())
      .subscribe(|v| s.push_str(&v));
    assert_eq!(s, "123");
  }

  #[test]
  fn passes_error_through() {
    let mut error = None;
    observable::throw_err::<i32, _>("e")
      .map(|v| v + 1)
      .subscribe_err(|_| {}, |e| error = Some(e));
    assert_eq!(error, Some("e"));
  }
}
