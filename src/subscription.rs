//! Subscription handles and teardown logic.
//!
//! A [`Subscription`] is the handle returned by every `subscribe*` call. It
//! owns the teardown logic of one Observable execution and runs it at most
//! once, no matter how often `unsubscribe` is called.
use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
  rc::Rc,
};

use smallvec::SmallVec;

/// Resource cleanup attached to a subscription.
///
/// Producers return a `Teardown` describing what has to happen when the
/// execution is cancelled: nothing, a one-shot closure, or unsubscribing a
/// nested subscription.
#[derive(Default)]
pub enum Teardown {
  #[default]
  None,
  Fn(Box<dyn FnOnce()>),
  Subscription(Subscription),
}

impl Teardown {
  /// Wraps a cleanup closure.
  pub fn from_fn(f: impl FnOnce() + 'static) -> Self { Teardown::Fn(Box::new(f)) }

  /// Runs the cleanup. Consumes the teardown, so it can only run once.
  pub fn dispose(self) {
    match self {
      Teardown::None => {}
      Teardown::Fn(f) => f(),
      Teardown::Subscription(s) => s.unsubscribe(),
    }
  }

  fn is_closed(&self) -> bool {
    match self {
      Teardown::None => true,
      Teardown::Fn(_) => false,
      Teardown::Subscription(s) => s.is_closed(),
    }
  }
}

impl From<()> for Teardown {
  #[inline]
  fn from(_: ()) -> Self { Teardown::None }
}

impl From<Subscription> for Teardown {
  #[inline]
  fn from(s: Subscription) -> Self { Teardown::Subscription(s) }
}

impl<T: Into<Teardown>> From<Option<T>> for Teardown {
  #[inline]
  fn from(t: Option<T>) -> Self { t.map_or(Teardown::None, Into::into) }
}

impl Debug for Teardown {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Teardown::None => f.write_str("Teardown::None"),
      Teardown::Fn(_) => f.write_str("Teardown::Fn"),
      Teardown::Subscription(s) => f.debug_tuple("Teardown::Subscription").field(s).finish(),
    }
  }
}

#[derive(Default)]
struct Inner {
  closed: bool,
  teardown: SmallVec<[Teardown; 1]>,
}

/// Handle to cancel an active Observable execution.
///
/// Clones share the same state: unsubscribing any clone closes all of them.
#[derive(Clone, Default)]
pub struct Subscription(Rc<RefCell<Inner>>);

impl Subscription {
  /// A subscription that is already closed.
  pub fn closed() -> Self {
    let s = Subscription::default();
    s.unsubscribe();
    s
  }

  /// Stops the execution and runs every registered teardown exactly once.
  ///
  /// Calling it again is a no-op.
  pub fn unsubscribe(&self) {
    // Take the teardown list out first: running it may re-enter this handle.
    let teardown = {
      let mut inner = self.0.borrow_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      std::mem::take(&mut inner.teardown)
    };
    tracing::trace!(count = teardown.len(), "subscription disposed");
    for t in teardown {
      t.dispose();
    }
  }

  #[inline]
  pub fn is_closed(&self) -> bool { self.0.borrow().closed }

  /// Registers more teardown logic. If this subscription is already closed
  /// the teardown runs immediately.
  pub fn add(&self, teardown: impl Into<Teardown>) {
    let teardown = teardown.into();
    if let Teardown::Subscription(s) = &teardown {
      if self.is_same(s) {
        return;
      }
    }
    let rejected = {
      let mut inner = self.0.borrow_mut();
      if inner.closed {
        Some(teardown)
      } else {
        inner.teardown.retain(|t| !t.is_closed());
        inner.teardown.push(teardown);
        None
      }
    };
    if let Some(teardown) = rejected {
      teardown.dispose();
    }
  }

  /// Activates RAII behavior: the returned guard unsubscribes when dropped.
  ///
  /// **Attention:** if the guard is not bound to a variable it is dropped,
  /// and the subscription cancelled, immediately.
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard { SubscriptionGuard(self) }

  fn is_same(&self, other: &Subscription) -> bool { Rc::ptr_eq(&self.0, &other.0) }

  #[cfg(test)]
  pub(crate) fn teardown_size(&self) -> usize { self.0.borrow().teardown.len() }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.borrow();
    f.debug_struct("Subscription")
      .field("closed", &inner.closed)
      .field("teardown_count", &inner.teardown.len())
      .finish()
  }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard(Subscription);

impl SubscriptionGuard {
  pub fn new(subscription: Subscription) -> Self { SubscriptionGuard(subscription) }

  /// Gives the subscription back without unsubscribing it.
  pub fn into_inner(mut self) -> Subscription { std::mem::take(&mut self.0) }
}

impl Drop for SubscriptionGuard {
  #[inline]
  fn drop(&mut self) { self.0.unsubscribe() }
}
