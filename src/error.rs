//! Error types of the crate itself.
//!
//! Stream errors travel as the generic `Err` parameter of an
//! [`Observable`](crate::observable::Observable); the types here describe
//! failures of the bridges out of the reactive world.
use thiserror::Error;

/// Why the future returned by
/// [`Observable::to_future`](crate::observable::Observable::to_future) did
/// not resolve to a value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ToFutureError<E> {
  /// The observable emitted an error.
  #[error("the observable emitted an error")]
  Source(E),
  /// The observable completed without emitting any value.
  #[error("the observable completed without emitting a value")]
  Empty,
  /// The execution was torn down before a terminal signal arrived.
  #[error("the observable was unsubscribed before it finished")]
  Cancelled,
}

impl<E> ToFutureError<E> {
  /// The source error, if the observable errored.
  pub fn into_source(self) -> Option<E> {
    match self {
      ToFutureError::Source(e) => Some(e),
      _ => None,
    }
  }
}
