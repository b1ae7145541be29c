//! Operators.
//!
//! Each operator is a plain struct wrapping its source. Subscribing it wraps
//! the downstream observer in the operator's own observer and subscribes the
//! source with that, so all per-subscription state lives in the observer and
//! is created fresh by every `subscribe` call.

pub mod buffer;
pub mod concat;
pub mod filter;
pub mod map;
pub mod ref_count;
pub mod repeat;
pub mod retry;
pub mod take;
pub mod zip;
