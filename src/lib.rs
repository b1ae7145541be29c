//! # rxlite: single-threaded Reactive Extensions
//!
//! Composable push-based streams: a producer emits values followed by at
//! most one terminal signal (an error or a completion), and consumers
//! subscribe to derived views of it without the producer knowing about them.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! let mut values = vec![];
//! observable::range(0, 10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(|v| values.push(v));
//! assert_eq!(values, vec![0, 4, 8, 12, 16]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Subscribe helpers and every operator |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`Subject`] | Hand-driven hot source broadcasting to many observers |
//! | [`ConnectableObservable`] | Shares one upstream subscription (`publish`, `share`) |
//!
//! Everything runs synchronously on the calling thread; there are no
//! schedulers and no locks.
//!
//! ## Feature Flags
//!
//! - **`tracing`** (default): lifecycle events (connect, disconnect,
//!   resubscribe) are logged through `tracing`.
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`Subject`]: subject::Subject
//! [`ConnectableObservable`]: observable::ConnectableObservable

pub mod error;
mod logging;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod subject;
pub mod subscription;

#[cfg(doctest)]
mod readme {
  #![doc = include_str!("../README.md")]
}
