//! The safe observer handed to producers.
//!
//! Producers never talk to the caller's observer directly. They receive a
//! [`Subscriber`], which
//!
//! - ignores every call once a terminal signal was delivered or the
//!   subscription was cancelled,
//! - unsubscribes the execution right after `error`/`complete`,
//! - serialises re-entrant calls: a signal raised while the wrapped observer
//!   is still inside one of its own callbacks is queued and delivered after
//!   that callback returns, so ordering is kept and nothing is lost.
use std::{
  cell::{Cell, RefCell},
  collections::VecDeque,
  rc::Rc,
};

use crate::{
  observer::{Notification, Observer},
  subscription::{Subscription, Teardown},
};

type BoxedObserver<Item, Err> = Box<dyn Observer<Item, Err>>;

struct Inner<Item, Err> {
  observer: RefCell<Option<BoxedObserver<Item, Err>>>,
  pending: RefCell<VecDeque<Notification<Item, Err>>>,
  stopped: Cell<bool>,
  subscription: Subscription,
}

/// Clonable sink of one Observable execution.
pub struct Subscriber<Item, Err>(Rc<Inner<Item, Err>>);

impl<Item, Err> Clone for Subscriber<Item, Err> {
  #[inline]
  fn clone(&self) -> Self { Subscriber(self.0.clone()) }
}

impl<Item: 'static, Err: 'static> Subscriber<Item, Err> {
  pub fn new(observer: impl Observer<Item, Err> + 'static) -> Self {
    let inner = Rc::new(Inner {
      observer: RefCell::new(Some(Box::new(observer) as BoxedObserver<Item, Err>)),
      pending: RefCell::new(VecDeque::new()),
      stopped: Cell::new(false),
      subscription: Subscription::default(),
    });
    let weak = Rc::downgrade(&inner);
    inner.subscription.add(Teardown::from_fn(move || {
      if let Some(inner) = weak.upgrade() {
        // Busy means the observer is inside its own callback; `deliver`
        // releases it once that returns.
        let released = inner.observer.try_borrow_mut().ok().and_then(|mut slot| slot.take());
        inner.pending.borrow_mut().clear();
        drop(released);
      }
    }));
    Subscriber(inner)
  }
}

impl<Item, Err> Subscriber<Item, Err> {
  pub fn next(&self, value: Item) {
    if !self.is_closed() {
      self.deliver(Notification::Next(value));
    }
  }

  pub fn error(&self, err: Err) {
    if !self.begin_terminal() {
      self.deliver(Notification::Error(err));
    }
  }

  pub fn complete(&self) {
    if !self.begin_terminal() {
      self.deliver(Notification::Complete);
    }
  }

  /// `true` once the execution can no longer deliver anything.
  pub fn is_closed(&self) -> bool {
    let inner = &*self.0;
    inner.stopped.get()
      || inner.subscription.is_closed()
      || inner
        .observer
        .try_borrow()
        .map_or(false, |slot| slot.as_ref().map_or(true, |o| o.is_closed()))
  }

  /// The handle cancelling this execution.
  #[inline]
  pub fn subscription(&self) -> Subscription { self.0.subscription.clone() }

  /// Attaches teardown logic to this execution.
  #[inline]
  pub fn add(&self, teardown: impl Into<Teardown>) { self.0.subscription.add(teardown) }

  #[inline]
  pub fn unsubscribe(&self) { self.0.subscription.unsubscribe() }

  /// Returns `true` if a terminal signal was already accepted.
  fn begin_terminal(&self) -> bool {
    let inner = &*self.0;
    inner.subscription.is_closed() || inner.stopped.replace(true)
  }

  fn deliver(&self, notification: Notification<Item, Err>) {
    let inner = &*self.0;
    let Ok(mut slot) = inner.observer.try_borrow_mut() else {
      inner.pending.borrow_mut().push_back(notification);
      return;
    };

    let mut terminated = false;
    let mut current = Some(notification);
    while let Some(n) = current.take().or_else(|| inner.pending.borrow_mut().pop_front()) {
      if inner.subscription.is_closed() {
        continue;
      }
      let terminal = n.is_terminal();
      if let Some(observer) = slot.as_mut() {
        n.accept(&mut **observer);
      }
      if terminal {
        terminated = true;
        break;
      }
    }

    let released = if terminated || inner.subscription.is_closed() { slot.take() } else { None };
    drop(slot);
    if terminated {
      inner.pending.borrow_mut().clear();
      inner.subscription.unsubscribe();
    }
    drop(released);
  }
}

impl<Item, Err> Observer<Item, Err> for Subscriber<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { Subscriber::next(self, value) }

  #[inline]
  fn error(&mut self, err: Err) { Subscriber::error(self, err) }

  #[inline]
  fn complete(&mut self) { Subscriber::complete(self) }

  #[inline]
  fn is_closed(&self) -> bool { Subscriber::is_closed(self) }
}
