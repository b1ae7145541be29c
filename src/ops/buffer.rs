//! Count-based buffering.
//!
//! `buffer(size, skip)` collects values into windows of `size`, opening a new
//! window every `skip` values:
//!
//! - `skip < size`: overlapping (sliding) windows.
//! - `skip == size`: back-to-back windows.
//! - `skip > size`: the `skip - size` values after each window are dropped.
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! let mut windows = vec![];
//! observable::range(0, 5)
//!   .buffer(3, 1)
//!   .subscribe(|w| windows.push(w));
//! assert_eq!(windows, vec![vec![0, 1, 2], vec![1, 2, 3], vec![2, 3, 4], vec![3, 4]]);
//! ```

use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

#[derive(Clone)]
pub struct Buffer<S> {
  pub source: S,
  pub size: usize,
  pub skip: usize,
}

impl<S: ObservableType> ObservableType for Buffer<S> {
  type Item = Vec<S::Item>;
  type Err = S::Err;
}

pub struct BufferObserver<O, Item> {
  observer: O,
  buffer: Vec<Item>,
  size: usize,
  skip: usize,
  // Values still to drop before the next window opens, when skip > size.
  dropping: usize,
}

impl<O, Item, Err> Observer<Item, Err> for BufferObserver<O, Item>
where
  O: Observer<Vec<Item>, Err>,
  Item: Clone,
{
  fn next(&mut self, value: Item) {
    if self.dropping > 0 {
      self.dropping -= 1;
      return;
    }
    self.buffer.push(value);
    if self.buffer.len() < self.size {
      return;
    }
    if self.skip >= self.size {
      let window = std::mem::replace(&mut self.buffer, Vec::with_capacity(self.size));
      self.dropping = self.skip - self.size;
      self.observer.next(window);
    } else {
      let window = self.buffer.clone();
      self.buffer.drain(..self.skip);
      self.observer.next(window);
    }
  }

  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    if !self.buffer.is_empty() {
      self.observer.next(self.buffer);
    }
    self.observer.complete()
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

impl<S, O> CoreObservable<O> for Buffer<S>
where
  S: ObservableType + CoreObservable<BufferObserver<O, <S as ObservableType>::Item>>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Buffer { source, size, skip } = self;
    source.actual_subscribe(BufferObserver {
      observer,
      buffer: Vec::with_capacity(size),
      size,
      skip,
      dropping: 0,
    })
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use bencher::{benchmark_group, Bencher};

  use crate::prelude::*;

  fn windows(size: usize, skip: usize, count: usize) -> Vec<Vec<i64>> {
    let result = Rc::new(RefCell::new(vec![]));
    let r = result.clone();
    observable::range(0, count)
      .buffer(size, skip)
      .subscribe(move |w| r.borrow_mut().push(w));
    let result = result.borrow().clone();
    result
  }

  #[test]
  fn sliding_pairs() {
    let products: Vec<i64> = windows(2, 1, 5)
      .into_iter()
      .filter(|w| w.len() == 2)
      .map(|w| w[0] * w[1])
      .collect();
    assert_eq!(products, vec![0, 2, 6, 12]);
  }

  #[test]
  fn disjoint_windows() {
    let sums: Vec<i64> = windows(3, 3, 6)
      .into_iter()
      .filter(|w| w.len() == 3)
      .map(|w| w.iter().sum())
      .collect();
    assert_eq!(sums, vec![3, 12]);
  }

  #[test]
  fn partial_window_flushed_once_on_complete() {
    let log = Rc::new(RefCell::new(vec![]));
    let (n, c) = (log.clone(), log.clone());
    observable::range(0, 5)
      .buffer_count(2)
      .subscribe_complete(
        move |w| n.borrow_mut().push(format!("{w:?}")),
        move || c.borrow_mut().push("complete".to_string()),
      );
    assert_eq!(*log.borrow(), vec!["[0, 1]", "[2, 3]", "[4]", "complete"]);
  }

  #[test]
  fn skip_greater_than_size_drops_in_between() {
    assert_eq!(windows(2, 3, 8), vec![vec![0, 1], vec![3, 4], vec![6, 7]]);
    assert_eq!(windows(1, 4, 9), vec![vec![0], vec![4], vec![8]]);
  }

  #[test]
  fn empty_source_emits_nothing() {
    assert!(windows(2, 1, 0).is_empty());
  }

  #[test]
  fn error_is_forwarded_without_flush() {
    let subject = Subject::<i32, RxError>::new();
    let log = Rc::new(RefCell::new(vec![]));
    let (n, e) = (log.clone(), log.clone());
    subject.clone().buffer_count(3).subscribe_err(
      move |w| n.borrow_mut().push(format!("{w:?}")),
      move |err| e.borrow_mut().push(err.to_string()),
    );
    subject.clone().next(1);
    subject.clone().error(RxError::new("broken"));
    assert_eq!(*log.borrow(), vec!["broken"]);
  }

  #[test]
  #[should_panic]
  fn zero_size_panics() { let _ = observable::range(0, 3).buffer(0, 1); }

  #[test]
  fn bench() { do_bench(); }

  benchmark_group!(do_bench, bench_sliding);

  fn bench_sliding(b: &mut Bencher) { b.iter(sliding_pairs); }
}
