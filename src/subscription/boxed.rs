use super::Subscription;

/// Object-safe face of [`Subscription`]: `unsubscribe(self)` needs a sized
/// receiver, so trait objects go through `Box<Self>` instead.
pub trait DynSubscription {
  fn dyn_unsubscribe(self: Box<Self>);
  fn dyn_is_closed(&self) -> bool;
}

impl<T: Subscription> DynSubscription for T {
  #[inline]
  fn dyn_unsubscribe(self: Box<Self>) { (*self).unsubscribe() }

  #[inline]
  fn dyn_is_closed(&self) -> bool { self.is_closed() }
}

/// A type-erased subscription.
///
/// `concat`, `retry` and `repeat` swap between upstream subscriptions of
/// different types, and `zip` holds one per source, so they keep them boxed.
/// The box is `'static`: a handle may be released long after the call that
/// produced it.
pub struct BoxedSubscription(Box<dyn DynSubscription>);

impl BoxedSubscription {
  #[inline]
  pub fn new(subscription: impl Subscription + 'static) -> Self { Self(Box::new(subscription)) }
}

impl Subscription for BoxedSubscription {
  #[inline]
  fn unsubscribe(self) { self.0.dyn_unsubscribe() }

  #[inline]
  fn is_closed(&self) -> bool { self.0.dyn_is_closed() }
}
