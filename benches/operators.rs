use bencher::{benchmark_group, benchmark_main, black_box, Bencher};
use rxlite::prelude::*;

fn map_filter_chain(b: &mut Bencher) {
  b.iter(|| {
    let mut sum = 0;
    observable::range(0, 1000)
      .map(|v| v * 3)
      .filter(|v| v % 2 == 0)
      .subscribe(|v| sum += v);
    black_box(sum)
  });
}

fn sliding_buffer(b: &mut Bencher) {
  b.iter(|| {
    let mut windows = 0;
    observable::range(0, 1000)
      .buffer(4, 1)
      .subscribe(|w| windows += w.len());
    black_box(windows)
  });
}

fn zip_two_ranges(b: &mut Bencher) {
  b.iter(|| {
    let mut pairs = 0;
    observable::range(0, 1000)
      .zip(observable::range(0, 1000))
      .subscribe(|(x, y)| pairs += x + y);
    black_box(pairs)
  });
}

fn subject_broadcast(b: &mut Bencher) {
  b.iter(|| {
    let subject = Subject::<i64, RxError>::new();
    for _ in 0..8 {
      subject.clone().subscribe(|v| {
        black_box(v);
      });
    }
    let mut emitter = subject.clone();
    for v in 0..1000 {
      emitter.next(v);
    }
    emitter.complete();
  });
}

fn share_many_subscribers(b: &mut Bencher) {
  b.iter(|| {
    let upstream = Subject::<i64, RxError>::new();
    let shared = upstream.clone().share();
    let subscriptions: Vec<_> = (0..8)
      .map(|_| shared.clone().subscribe(|v| { black_box(v); }))
      .collect();
    let mut emitter = upstream.clone();
    for v in 0..1000 {
      emitter.next(v);
    }
    subscriptions.into_iter().for_each(Subscription::unsubscribe);
  });
}

benchmark_group!(
  operators,
  map_filter_chain,
  sliding_buffer,
  zip_two_ranges,
  subject_broadcast,
  share_many_subscribers
);
benchmark_main!(operators);
