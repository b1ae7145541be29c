//! Zip operators
//!
//! Zip pairs the n-th value of every source. Each source gets a FIFO queue;
//! whenever every queue holds a value, the heads are popped and emitted
//! together.
//!
//! - The first error from any source is forwarded at once, queued values are
//!   dropped and every source is unsubscribed.
//! - Values without a partner are never emitted.
//! - Completion is forwarded once every source has completed. A source
//!   completing on its own does not end the zipped stream.

use std::collections::VecDeque;

use crate::{
  observable::{CoreObservable, ObservableType},
  observer::Observer,
  rc::{MutRc, RcDeref, RcDerefMut},
  subscription::{CompositeSubscription, Subscription},
};

// ==================== Zip Operator ====================

/// Zip of two sources, emitting `(ItemA, ItemB)`.
#[derive(Clone)]
pub struct Zip<A, B> {
  pub source_a: A,
  pub source_b: B,
}

impl<A, B> ObservableType for Zip<A, B>
where
  A: ObservableType,
  B: ObservableType<Err = A::Err>,
{
  type Item = (A::Item, B::Item);
  type Err = A::Err;
}

/// Shared state between A and B observers
pub struct ZipState<O, ItemA, ItemB> {
  observer: Option<O>,
  buffer_a: VecDeque<ItemA>,
  buffer_b: VecDeque<ItemB>,
  completed: usize,
}

impl<O, ItemA, ItemB> ZipState<O, ItemA, ItemB> {
  fn downstream_closed<Err>(&self) -> bool
  where
    O: Observer<(ItemA, ItemB), Err>,
  {
    self
      .observer
      .as_ref()
      .map_or(true, |observer| observer.is_closed())
  }

  fn complete_one<Err>(&mut self)
  where
    O: Observer<(ItemA, ItemB), Err>,
  {
    self.completed += 1;
    if self.completed == 2 {
      if let Some(observer) = self.observer.take() {
        observer.complete();
      }
    }
  }
}

type StateRc<O, A, B> = MutRc<ZipState<O, A, B>>;

/// Observer for source A
pub struct ZipAObserver<O, ItemA, ItemB> {
  state: StateRc<O, ItemA, ItemB>,
  teardown: CompositeSubscription,
}

/// Observer for source B
pub struct ZipBObserver<O, ItemA, ItemB> {
  state: StateRc<O, ItemA, ItemB>,
  teardown: CompositeSubscription,
}

fn zip_error<O, A, B, Err>(state: &StateRc<O, A, B>, teardown: CompositeSubscription, err: Err)
where
  O: Observer<(A, B), Err>,
{
  let observer = {
    let mut state = state.rc_deref_mut();
    state.buffer_a.clear();
    state.buffer_b.clear();
    state.observer.take()
  };
  if let Some(observer) = observer {
    teardown.unsubscribe();
    observer.error(err);
  }
}

impl<O, ItemA, ItemB, Err> Observer<ItemA, Err> for ZipAObserver<O, ItemA, ItemB>
where
  O: Observer<(ItemA, ItemB), Err>,
{
  fn next(&mut self, value: ItemA) {
    let closed = {
      let mut state = self.state.rc_deref_mut();
      if !state.downstream_closed::<Err>() {
        if let Some(b) = state.buffer_b.pop_front() {
          if let Some(observer) = state.observer.as_mut() {
            observer.next((value, b));
          }
        } else {
          state.buffer_a.push_back(value);
        }
      }
      state.downstream_closed::<Err>()
    };
    if closed {
      self.teardown.clone().unsubscribe();
    }
  }

  fn error(self, err: Err) { zip_error(&self.state, self.teardown, err) }

  fn complete(self) { self.state.rc_deref_mut().complete_one::<Err>() }

  fn is_closed(&self) -> bool { self.state.rc_deref().downstream_closed::<Err>() }
}

impl<O, ItemA, ItemB, Err> Observer<ItemB, Err> for ZipBObserver<O, ItemA, ItemB>
where
  O: Observer<(ItemA, ItemB), Err>,
{
  fn next(&mut self, value: ItemB) {
    let closed = {
      let mut state = self.state.rc_deref_mut();
      if !state.downstream_closed::<Err>() {
        if let Some(a) = state.buffer_a.pop_front() {
          if let Some(observer) = state.observer.as_mut() {
            observer.next((a, value));
          }
        } else {
          state.buffer_b.push_back(value);
        }
      }
      state.downstream_closed::<Err>()
    };
    if closed {
      self.teardown.clone().unsubscribe();
    }
  }

  fn error(self, err: Err) { zip_error(&self.state, self.teardown, err) }

  fn complete(self) { self.state.rc_deref_mut().complete_one::<Err>() }

  fn is_closed(&self) -> bool { self.state.rc_deref().downstream_closed::<Err>() }
}

type ItemOf<S> = <S as ObservableType>::Item;

impl<A, B, O> CoreObservable<O> for Zip<A, B>
where
  A: ObservableType + CoreObservable<ZipAObserver<O, ItemOf<A>, ItemOf<B>>>,
  B: ObservableType<Err = A::Err> + CoreObservable<ZipBObserver<O, ItemOf<A>, ItemOf<B>>>,
  A::Unsub: 'static,
  B::Unsub: 'static,
{
  type Unsub = CompositeSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let Zip { source_a, source_b } = self;
    let teardown = CompositeSubscription::new();
    let state = MutRc::own(ZipState {
      observer: Some(observer),
      buffer_a: VecDeque::new(),
      buffer_b: VecDeque::new(),
      completed: 0,
    });

    let a_observer = ZipAObserver { state: state.clone(), teardown: teardown.clone() };
    teardown.add(source_a.actual_subscribe(a_observer));
    if !teardown.is_closed() {
      let b_observer = ZipBObserver { state, teardown: teardown.clone() };
      teardown.add(source_b.actual_subscribe(b_observer));
    }
    teardown
  }
}

// ==================== ZipAll Operator ====================

/// Zip any number of sources of the same type, emitting one `Vec` holding
/// the n-th value of every source, in source order.
///
/// With no sources the stream completes immediately.
pub fn zip_all<S: ObservableType>(sources: impl IntoIterator<Item = S>) -> ZipAll<S> {
  ZipAll { sources: sources.into_iter().collect() }
}

#[derive(Clone)]
pub struct ZipAll<S> {
  pub sources: Vec<S>,
}

impl<S: ObservableType> ObservableType for ZipAll<S> {
  type Item = Vec<S::Item>;
  type Err = S::Err;
}

pub struct ZipAllState<O, Item> {
  observer: Option<O>,
  queues: Vec<VecDeque<Item>>,
  completed: usize,
}

impl<O, Item> ZipAllState<O, Item> {
  fn downstream_closed<Err>(&self) -> bool
  where
    O: Observer<Vec<Item>, Err>,
  {
    self
      .observer
      .as_ref()
      .map_or(true, |observer| observer.is_closed())
  }
}

pub struct ZipAllObserver<O, Item> {
  index: usize,
  state: MutRc<ZipAllState<O, Item>>,
  teardown: CompositeSubscription,
}

impl<O, Item, Err> Observer<Item, Err> for ZipAllObserver<O, Item>
where
  O: Observer<Vec<Item>, Err>,
{
  fn next(&mut self, value: Item) {
    let closed = {
      let mut state = self.state.rc_deref_mut();
      if !state.downstream_closed::<Err>() {
        state.queues[self.index].push_back(value);
        if state.queues.iter().all(|q| !q.is_empty()) {
          let heads: Vec<Item> = state
            .queues
            .iter_mut()
            .filter_map(VecDeque::pop_front)
            .collect();
          if let Some(observer) = state.observer.as_mut() {
            observer.next(heads);
          }
        }
      }
      state.downstream_closed::<Err>()
    };
    if closed {
      self.teardown.clone().unsubscribe();
    }
  }

  fn error(self, err: Err) {
    let observer = {
      let mut state = self.state.rc_deref_mut();
      state.queues.clear();
      state.observer.take()
    };
    if let Some(observer) = observer {
      self.teardown.unsubscribe();
      observer.error(err);
    }
  }

  fn complete(self) {
    let mut state = self.state.rc_deref_mut();
    state.completed += 1;
    if state.completed == state.queues.len() {
      if let Some(observer) = state.observer.take() {
        observer.complete();
      }
    }
  }

  fn is_closed(&self) -> bool { self.state.rc_deref().downstream_closed::<Err>() }
}

impl<S, O> CoreObservable<O> for ZipAll<S>
where
  S: ObservableType + CoreObservable<ZipAllObserver<O, ItemOf<S>>>,
  S::Unsub: 'static,
  O: Observer<Vec<ItemOf<S>>, S::Err>,
{
  type Unsub = CompositeSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let teardown = CompositeSubscription::new();
    if self.sources.is_empty() {
      observer.complete();
      return teardown;
    }
    let state = MutRc::own(ZipAllState {
      observer: Some(observer),
      queues: self.sources.iter().map(|_| VecDeque::new()).collect(),
      completed: 0,
    });
    for (index, source) in self.sources.into_iter().enumerate() {
      if teardown.is_closed() {
        break;
      }
      let observer = ZipAllObserver { index, state: state.clone(), teardown: teardown.clone() };
      teardown.add(source.actual_subscribe(observer));
    }
    teardown
  }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use bencher::{benchmark_group, Bencher};

  use crate::prelude::*;

  #[test]
  fn zip_basic() {
    let mut result = vec![];
    observable::from_iter([1, 2, 3])
      .zip(observable::from_iter([4, 5, 6]))
      .subscribe(|v| result.push(v));
    assert_eq!(result, vec![(1, 4), (2, 5), (3, 6)]);
  }

  #[test]
  fn unmatched_values_are_dropped() {
    let mut result = vec![];
    observable::from_iter([1, 2, 3, 4, 5])
      .zip(observable::from_iter([10, 20, 30]))
      .subscribe(|v| result.push(v));
    assert_eq!(result, vec![(1, 10), (2, 20), (3, 30)]);
  }

  #[test]
  fn interleaved_subjects() {
    let numbers = Subject::<i32, RxError>::new();
    let letters = Subject::<char, RxError>::new();
    let result = Rc::new(RefCell::new(vec![]));
    let r = result.clone();

    numbers
      .clone()
      .zip(letters.clone())
      .subscribe(move |(n, c)| r.borrow_mut().push(format!("{n}{c}")));

    numbers.clone().next(1);
    letters.clone().next('A');
    numbers.clone().next(2);
    letters.clone().next('B');
    letters.clone().next('C');
    letters.clone().next('D');
    numbers.clone().next(3);
    numbers.clone().next(4);
    numbers.clone().next(5);

    assert_eq!(*result.borrow(), vec!["1A", "2B", "3C", "4D"]);
  }

  #[test]
  fn closed_downstream_detaches_every_source() {
    let a = Subject::<i32, RxError>::new();
    let b = Subject::<i32, RxError>::new();
    let result = Rc::new(RefCell::new(vec![]));
    let r = result.clone();

    a.clone()
      .zip(b.clone())
      .take(1)
      .subscribe(move |v| r.borrow_mut().push(v));

    a.clone().next(1);
    b.clone().next(10);
    assert_eq!(a.subscribed_size(), 0);
    assert_eq!(b.subscribed_size(), 0);

    for v in 2..6 {
      a.clone().next(v);
    }
    assert_eq!(*result.borrow(), vec![(1, 10)]);
  }

  #[test]
  fn synchronous_sources_stop_once_downstream_closes() {
    let pulled = Rc::new(RefCell::new(0));
    let p = pulled.clone();
    let mut result = vec![];
    observable::range(0, 3)
      .zip(observable::from_iter((0..1000).inspect(move |_| *p.borrow_mut() += 1)))
      .take(2)
      .subscribe(|v| result.push(v));

    assert_eq!(result, vec![(0, 0), (1, 1)]);
    assert_eq!(*pulled.borrow(), 2);
  }

  #[test]
  fn zip_all_detaches_when_downstream_closes() {
    let sources: Vec<_> = (0..3).map(|_| Subject::<i32, RxError>::new()).collect();
    let emitted = Rc::new(RefCell::new(0));
    let e = emitted.clone();
    zip_all(sources.clone())
      .take(1)
      .subscribe(move |_| *e.borrow_mut() += 1);

    for source in &sources {
      source.clone().next(1);
    }
    assert_eq!(*emitted.borrow(), 1);
    assert!(sources.iter().all(|s| s.subscribed_size() == 0));
  }

  #[test]
  fn completes_only_after_every_source() {
    let a = Subject::<i32, RxError>::new();
    let b = Subject::<i32, RxError>::new();
    let completed = Rc::new(RefCell::new(false));
    let c = completed.clone();

    a.clone()
      .zip(b.clone())
      .subscribe_complete(|_| {}, move || *c.borrow_mut() = true);

    a.clone().next(1);
    a.clone().complete();
    assert!(!*completed.borrow());
    b.clone().complete();
    assert!(*completed.borrow());
  }

  #[test]
  fn first_error_tears_down_other_source() {
    let a = Subject::<i32, RxError>::new();
    let b = Subject::<i32, RxError>::new();
    let log = Rc::new(RefCell::new(vec![]));
    let (n, e) = (log.clone(), log.clone());

    a.clone().zip(b.clone()).subscribe_err(
      move |(x, y)| n.borrow_mut().push(format!("{x},{y}")),
      move |err| e.borrow_mut().push(err.to_string()),
    );
    assert_eq!(b.subscribed_size(), 1);

    a.clone().next(1);
    a.clone().error(RxError::new("a failed"));
    assert_eq!(b.subscribed_size(), 0);

    b.clone().next(2);
    b.clone().error(RxError::new("b failed"));
    assert_eq!(*log.borrow(), vec!["a failed"]);
  }

  #[test]
  fn synchronous_error_skips_second_source() {
    let subscribed = Rc::new(RefCell::new(false));
    let s = subscribed.clone();
    let second = observable::create(move |emitter: &mut dyn Emitter<i32, RxError>| {
      *s.borrow_mut() = true;
      emitter.complete();
    });

    let mut error = None;
    observable::throw_err::<i32, _>(RxError::new("early"))
      .zip(second)
      .subscribe_err(|_| {}, |e| error = Some(e));

    assert_eq!(error, Some(RxError::new("early")));
    assert!(!*subscribed.borrow());
  }

  #[test]
  fn zip_all_three_sources() {
    let mut result = vec![];
    zip_all(vec![
      observable::from_iter(vec![1, 2, 3]),
      observable::from_iter(vec![10, 20]),
      observable::from_iter(vec![100, 200, 300]),
    ])
    .subscribe(|v| result.push(v));
    assert_eq!(result, vec![vec![1, 10, 100], vec![2, 20, 200]]);
  }

  #[test]
  fn zip_all_of_nothing_completes() {
    let mut completed = false;
    zip_all(Vec::<ObservableIter<Vec<i32>>>::new()).subscribe_complete(|_| {}, || completed = true);
    assert!(completed);
  }

  #[test]
  fn zip_all_error_unsubscribes_every_source() {
    let sources: Vec<_> = (0..3).map(|_| Subject::<i32, RxError>::new()).collect();
    let error = Rc::new(RefCell::new(None));
    let e = error.clone();
    zip_all(sources.clone()).subscribe_err(|_| {}, move |err| *e.borrow_mut() = Some(err));

    sources[1].clone().error(RxError::new("middle"));
    assert!(sources.iter().all(|s| s.subscribed_size() == 0));
    assert_eq!(*error.borrow(), Some(RxError::new("middle")));
  }

  #[test]
  fn bench() { do_bench(); }

  benchmark_group!(do_bench, bench_zip);

  fn bench_zip(b: &mut Bencher) { b.iter(zip_basic); }
}
