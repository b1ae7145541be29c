//! Prelude module for convenient imports

pub use crate::{
  error::RxError,
  observable::{
    self, ConnectableObservable, Connection, CoreObservable, Create, Empty, Observable, ObservableIter,
    ObservableOf, ObservableType, ThrowErr,
  },
  observer::{Emitter, Observer},
  ops::{ref_count::RefCount, zip::zip_all},
  subject::{Subject, SubjectSubscription},
  subscription::Subscription,
};
