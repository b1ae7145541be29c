use std::ops::Range;

use crate::{
  error::RxError,
  observable::{CoreObservable, ObservableType},
  observer::Observer,
};

/// Creates an observable producing every item of `iter`, then completing.
///
/// The iteration stops early once the observer reports closed, so
/// `from_iter(0..).take(3)` terminates.
pub fn from_iter<I>(iter: I) -> ObservableIter<I>
where
  I: IntoIterator,
{
  ObservableIter(iter)
}

/// Creates an observable producing `count` consecutive integers starting at
/// `start`, then completing.
///
/// The sequence stops short of `i64::MAX` instead of overflowing.
///
/// ```rust
/// use rxlite::prelude::*;
///
/// let mut values = vec![];
/// observable::range(3, 4).subscribe(|v| values.push(v));
/// assert_eq!(values, vec![3, 4, 5, 6]);
/// ```
pub fn range(start: i64, count: usize) -> ObservableIter<Range<i64>> {
  let count = i64::try_from(count).unwrap_or(i64::MAX);
  ObservableIter(start..start.saturating_add(count))
}

#[derive(Clone)]
pub struct ObservableIter<I>(I);

impl<I: IntoIterator> ObservableType for ObservableIter<I> {
  type Item = I::Item;
  type Err = RxError;
}

impl<I, O> CoreObservable<O> for ObservableIter<I>
where
  I: IntoIterator,
  O: Observer<I::Item, RxError>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) {
    let mut iter = self.0.into_iter();
    // Checked before every pull so a closed observer costs no extra item.
    while !observer.is_closed() {
      match iter.next() {
        Some(value) => observer.next(value),
        None => return observer.complete(),
      }
    }
  }
}
