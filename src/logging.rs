//! Lifecycle logging.
//!
//! Forwards to `tracing` when the `tracing` feature is enabled and expands to
//! nothing otherwise, so the hot paths carry no cost in minimal builds.

#[cfg(feature = "tracing")]
macro_rules! trace {
  ($($arg:tt)*) => {
    tracing::trace!($($arg)*)
  };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
  ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! debug {
  ($($arg:tt)*) => {
    tracing::debug!($($arg)*)
  };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
  ($($arg:tt)*) => {};
}

pub(crate) use debug;
pub(crate) use trace;
