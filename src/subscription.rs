//! Subscriptions: the handles returned by `subscribe` that stop delivery.
//!
//! A [`Subscription`] is consumed by `unsubscribe`, so a plain handle can
//! release its resources at most once. Handles that are shared between
//! several owners (`Clone`) keep a disposed flag behind the shared pointer,
//! which makes repeated disposal through any clone a no-op.

mod boxed;
mod composite;
mod serial;

pub use boxed::*;
pub use composite::*;
pub use serial::*;

/// Subscription returned from `Observable::subscribe` to allow
/// unsubscribing.
pub trait Subscription {
  /// Stop delivery to the observer this subscription belongs to and release
  /// every resource held for it.
  fn unsubscribe(self);

  /// Whether this subscription has nothing left to release.
  fn is_closed(&self) -> bool;

  /// Activates "RAII" behavior for this subscription. `unsubscribe()` will
  /// be called automatically as soon as the returned guard goes out of
  /// scope.
  ///
  /// **Attention:** If you don't bind the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  fn unsubscribe_when_dropped(self) -> SubscriptionGuard<Self>
  where
    Self: Sized,
  {
    SubscriptionGuard::new(self)
  }
}

/// The empty subscription, returned by sources that finish synchronously.
impl Subscription for () {
  #[inline]
  fn unsubscribe(self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

impl<S: Subscription> Subscription for Option<S> {
  #[inline]
  fn unsubscribe(self) {
    if let Some(inner) = self {
      inner.unsubscribe();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.as_ref().map_or(true, Subscription::is_closed) }
}

/// A subscription running a hand-written release action.
pub struct ClosureSubscription<F>(pub F);

impl<F: FnOnce()> Subscription for ClosureSubscription<F> {
  #[inline]
  fn unsubscribe(self) { (self.0)() }

  #[inline]
  fn is_closed(&self) -> bool { false }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[must_use]
pub struct SubscriptionGuard<T: Subscription>(Option<T>);

impl<T: Subscription> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(Some(subscription)) }

  /// Disarm the guard and hand back the subscription.
  pub fn into_inner(mut self) -> Option<T> { self.0.take() }
}

impl<T: Subscription> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) {
    if let Some(subscription) = self.0.take() {
      subscription.unsubscribe();
    }
  }
}
