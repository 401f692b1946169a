//! The `Observable` core and the creation factories.
//!
//! An [`Observable`] is a lazy, push-based producer of values. It is an
//! immutable wrapper around a producer function; nothing runs until one of
//! the `subscribe*` methods is called, and every call starts an independent
//! execution (observables are "cold").
//!
//! ```rust
//! use std::{cell::RefCell, convert::Infallible, rc::Rc};
//!
//! use bael_stream::prelude::*;
//!
//! let seen = Rc::new(RefCell::new(vec![]));
//! let c_seen = seen.clone();
//! observable::of::<_, Infallible>([1, 2, 3])
//!   .map(|v| v * 10)
//!   .subscribe(move |v| c_seen.borrow_mut().push(v));
//! assert_eq!(*seen.borrow(), vec![10, 20, 30]);
//! ```
use std::rc::Rc;

use crate::{
  observer::{AllObserver, FnObserver, Observer},
  subscriber::Subscriber,
  subscription::{Subscription, Teardown},
};

mod defer;
mod from_event;
mod from_future;
mod interval;
mod of;
mod timer;
mod trivial;

pub use defer::*;
pub use from_event::*;
pub use from_future::*;
pub use interval::*;
pub use of::*;
pub use timer::*;
pub use trivial::*;

pub use crate::ops::{
  combine_latest::combine_latest, concat::concat, fork_join::fork_join, merge::merge, race::race,
  zip::zip,
};
pub use crate::subject::{async_subject, behavior_subject, replay_subject, subject};

type Producer<Item, Err> = dyn Fn(Subscriber<Item, Err>) -> Teardown;

/// A representation of any set of values over any amount of time. This is the
/// most basic building block of bael-stream.
pub struct Observable<Item, Err> {
  producer: Rc<Producer<Item, Err>>,
}

impl<Item, Err> Clone for Observable<Item, Err> {
  #[inline]
  fn clone(&self) -> Self { Observable { producer: self.producer.clone() } }
}

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// `producer` is called on every subscription with the [`Subscriber`] to
  /// emit into, and returns the teardown logic of that execution.
  ///
  /// ```rust
  /// use bael_stream::prelude::*;
  ///
  /// let source = Observable::<i32, ()>::create(|subscriber| {
  ///   subscriber.next(1);
  ///   subscriber.complete();
  /// });
  /// source.subscribe(|v| assert_eq!(v, 1));
  /// ```
  pub fn create<F, T>(producer: F) -> Self
  where
    F: Fn(Subscriber<Item, Err>) -> T + 'static,
    T: Into<Teardown>,
  {
    Observable { producer: Rc::new(move |subscriber| producer(subscriber).into()) }
  }

  /// Like [`Observable::create`], but the producer may fail while setting
  /// up. The failure is delivered as the error signal instead of escaping
  /// from `subscribe`.
  pub fn try_create<F, T>(producer: F) -> Self
  where
    F: Fn(Subscriber<Item, Err>) -> Result<T, Err> + 'static,
    T: Into<Teardown>,
  {
    Self::create(move |subscriber: Subscriber<Item, Err>| match producer(subscriber.clone()) {
      Ok(teardown) => teardown.into(),
      Err(err) => {
        subscriber.error(err);
        Teardown::None
      }
    })
  }

  /// Subscribes a full observer.
  pub fn subscribe_with<O>(&self, observer: O) -> Subscription
  where
    O: Observer<Item, Err> + 'static,
  {
    let subscriber = Subscriber::new(observer);
    let teardown = (self.producer)(subscriber.clone());
    subscriber.add(teardown);
    subscriber.subscription()
  }

  /// Subscribes a `next` handler. Errors are dropped.
  pub fn subscribe<N>(&self, next: N) -> Subscription
  where
    N: FnMut(Item) + 'static,
  {
    self.subscribe_with(FnObserver(next))
  }

  pub fn subscribe_err<N, E>(&self, next: N, error: E) -> Subscription
  where
    N: FnMut(Item) + 'static,
    E: FnMut(Err) + 'static,
  {
    self.subscribe_with(AllObserver { next, error, complete: || {} })
  }

  pub fn subscribe_all<N, E, C>(&self, next: N, error: E, complete: C) -> Subscription
  where
    N: FnMut(Item) + 'static,
    E: FnMut(Err) + 'static,
    C: FnMut() + 'static,
  {
    self.subscribe_with(AllObserver { next, error, complete })
  }

  /// Applies an operator function. Chained calls apply left to right; see
  /// also the [`pipe!`](crate::pipe) macro.
  #[inline]
  pub fn pipe<R>(self, op: impl FnOnce(Self) -> R) -> R { op(self) }

  /// Builds an operator: every subscription subscribes to `self` with the
  /// observer produced by `make` for the downstream subscriber.
  pub(crate) fn lift<B, E2, O, F>(&self, make: F) -> Observable<B, E2>
  where
    B: 'static,
    E2: 'static,
    O: Observer<Item, Err> + 'static,
    F: Fn(Subscriber<B, E2>) -> O + 'static,
  {
    let source = self.clone();
    Observable::create(move |subscriber| source.subscribe_with(make(subscriber)))
  }
}

/// Applies operators left to right.
///
/// ```rust
/// use std::convert::Infallible;
///
/// use bael_stream::{pipe, prelude::*};
///
/// let doubled = pipe!(
///   observable::range::<Infallible>(1, 5),
///   |o: Observable<i64, _>| o.map(|v| v * 2),
///   |o: Observable<i64, _>| o.take(2),
/// );
/// doubled.to_array().subscribe(|v| assert_eq!(v, vec![2, 4]));
/// ```
#[macro_export]
macro_rules! pipe {
  ($source:expr $(, $op:expr)* $(,)?) => {{
    let source = $source;
    $(let source = $crate::observable::Observable::pipe(source, $op);)*
    source
  }};
}
