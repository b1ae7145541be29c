//! The error carried through the error channel by the built-in sources.
//!
//! Operators stay generic over `Err`; `RxError` is the uniform default: one
//! kind, one message. It is `Clone` because a [`Subject`](crate::subject::Subject)
//! hands the same error to every registered observer.

/// A failure signalled through an observer's error channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RxError {
  message: String,
}

impl RxError {
  /// Create an error with the given message.
  pub fn new(message: impl Into<String>) -> Self { Self { message: message.into() } }

  pub fn message(&self) -> &str { &self.message }
}

impl From<&str> for RxError {
  fn from(message: &str) -> Self { Self::new(message) }
}

impl From<String> for RxError {
  fn from(message: String) -> Self { Self::new(message) }
}
