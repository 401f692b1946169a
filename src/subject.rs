//! Multicast: observables that are also observers.
//!
//! Every subject shares one core: a registry of subscribers plus a
//! lifecycle status, `Active` until the first `error` or `complete`, then
//! terminal for good. What differs between the subject kinds is only what a
//! newly arriving subscriber receives. That decision is delegated to a
//! [`SubjectPolicy`]:
//!
//! | type | policy | a new subscriber gets |
//! |---|---|---|
//! | [`Subject`] | [`Publish`] | nothing; only the terminal once finished |
//! | [`BehaviorSubject`] | [`Behavior`] | the current value while active; only the terminal once finished |
//! | [`ReplaySubject`] | [`Replay`] | the buffered values, then the terminal if finished |
//! | [`AsyncSubject`] | [`AsyncLast`] | the last value and completion once completed; nothing before |
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use bael_stream::prelude::*;
//!
//! let subject = observable::behavior_subject::<_, ()>(5);
//! let seen = Rc::new(RefCell::new(vec![]));
//! let c_seen = seen.clone();
//! subject.subscribe(move |v| c_seen.borrow_mut().push(v));
//! subject.next(6);
//! assert_eq!(*seen.borrow(), vec![5, 6]);
//! ```
//!
//! Emissions are serialised: a `next`, `error` or `complete` raised while the
//! subject is still delivering (from inside a subscriber callback, or while a
//! new subscriber is being replayed its history) is queued and handled once
//! the current delivery returns.
use std::{
  cell::{Cell, RefCell},
  collections::VecDeque,
  rc::Rc,
};

use crate::{
  observable::Observable,
  observer::{Notification, Observer},
  subscriber::Subscriber,
  subscription::{Subscription, Teardown},
};

mod async_subject;
mod behavior_subject;
mod replay_subject;
mod subscribers;

pub use async_subject::*;
pub use behavior_subject::*;
pub use replay_subject::*;
use subscribers::{broadcast_error, broadcast_value, Subscribers};

/// Lifecycle phase of a subject, as seen by a [`SubjectPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Active,
  Completed,
  Errored,
}

/// Decides what a subject remembers and what late subscribers receive.
pub trait SubjectPolicy<Item>: 'static {
  /// Called with every value the subject accepts while active.
  fn record(&mut self, value: &Item);

  /// Values a subscriber arriving in `phase` receives before anything else.
  fn replay(&self, phase: Phase) -> Vec<Item>;

  /// Whether accepted values reach current subscribers as they arrive.
  fn broadcasts_values(&self) -> bool { true }

  /// Values sent to current subscribers right before completion.
  fn on_complete(&mut self) -> Vec<Item> { Vec::new() }
}

/// Plain multicast: no memory at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct Publish;

impl<Item> SubjectPolicy<Item> for Publish {
  fn record(&mut self, _: &Item) {}

  fn replay(&self, _: Phase) -> Vec<Item> { Vec::new() }
}

enum Status<Err> {
  Active,
  Completed,
  Errored(Err),
}

struct SubjectCore<Item, Err, P> {
  subscribers: RefCell<Subscribers<Item, Err>>,
  status: RefCell<Status<Err>>,
  policy: RefCell<P>,
  emitting: Cell<bool>,
  pending: RefCell<VecDeque<Notification<Item, Err>>>,
}

/// A multicasting observable that is also an observer.
///
/// Clones share the same subject.
pub struct Subject<Item, Err, P = Publish> {
  core: Rc<SubjectCore<Item, Err, P>>,
}

impl<Item, Err, P> Clone for Subject<Item, Err, P> {
  #[inline]
  fn clone(&self) -> Self { Subject { core: self.core.clone() } }
}

impl<Item, Err, P: Default> Default for Subject<Item, Err, P> {
  fn default() -> Self { Self::with_policy(P::default()) }
}

/// Creates a plain [`Subject`].
pub fn subject<Item, Err>() -> Subject<Item, Err> { Subject::default() }

impl<Item, Err, P> Subject<Item, Err, P> {
  /// A subject driven by a custom policy.
  pub fn with_policy(policy: P) -> Self {
    Subject {
      core: Rc::new(SubjectCore {
        subscribers: RefCell::new(Subscribers::default()),
        status: RefCell::new(Status::Active),
        policy: RefCell::new(policy),
        emitting: Cell::new(false),
        pending: RefCell::new(VecDeque::new()),
      }),
    }
  }

  /// Number of currently registered subscribers.
  pub fn observer_count(&self) -> usize { self.core.subscribers.borrow().len() }

  /// `true` once the subject errored or completed.
  pub fn is_closed(&self) -> bool { !matches!(*self.core.status.borrow(), Status::Active) }

  pub(crate) fn policy(&self) -> std::cell::Ref<'_, P> { self.core.policy.borrow() }
}

impl<Item, Err, P> Subject<Item, Err, P>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
  P: SubjectPolicy<Item>,
{
  /// Sends a value to every current subscriber. Ignored once the subject
  /// is finished.
  pub fn next(&self, value: Item) { self.emit(Notification::Next(value)) }

  /// Finishes the subject with an error, delivered to every current
  /// subscriber and replayed to later ones.
  pub fn error(&self, err: Err) { self.emit(Notification::Error(err)) }

  /// Finishes the subject successfully.
  pub fn complete(&self) { self.emit(Notification::Complete) }

  /// The subject seen as a plain observable, for operator chains.
  pub fn as_observable(&self) -> Observable<Item, Err> {
    let subject = self.clone();
    Observable::create(move |subscriber| subject.register(subscriber))
  }

  pub fn subscribe_with<O>(&self, observer: O) -> Subscription
  where
    O: Observer<Item, Err> + 'static,
  {
    self.as_observable().subscribe_with(observer)
  }

  pub fn subscribe<N>(&self, next: N) -> Subscription
  where
    N: FnMut(Item) + 'static,
  {
    self.as_observable().subscribe(next)
  }

  pub fn subscribe_err<N, E>(&self, next: N, error: E) -> Subscription
  where
    N: FnMut(Item) + 'static,
    E: FnMut(Err) + 'static,
  {
    self.as_observable().subscribe_err(next, error)
  }

  pub fn subscribe_all<N, E, C>(&self, next: N, error: E, complete: C) -> Subscription
  where
    N: FnMut(Item) + 'static,
    E: FnMut(Err) + 'static,
    C: FnMut() + 'static,
  {
    self.as_observable().subscribe_all(next, error, complete)
  }

  fn emit(&self, notification: Notification<Item, Err>) {
    self.core.pending.borrow_mut().push_back(notification);
    self.drain();
  }

  /// Handles queued notifications unless an outer call is already doing so.
  fn drain(&self) {
    if self.core.emitting.replace(true) {
      return;
    }
    loop {
      let notification = self.core.pending.borrow_mut().pop_front();
      match notification {
        Some(notification) => self.dispatch(notification),
        None => break,
      }
    }
    self.core.emitting.set(false);
  }

  fn dispatch(&self, notification: Notification<Item, Err>) {
    if self.is_closed() {
      return;
    }
    match notification {
      Notification::Next(value) => {
        let live = {
          let mut policy = self.core.policy.borrow_mut();
          policy.record(&value);
          policy.broadcasts_values()
        };
        if live {
          let targets = self.core.subscribers.borrow().snapshot();
          broadcast_value(targets, value);
        }
      }
      Notification::Error(err) => {
        *self.core.status.borrow_mut() = Status::Errored(err.clone());
        let targets = self.core.subscribers.borrow_mut().drain();
        tracing::debug!(observers = targets.len(), "subject errored");
        broadcast_error(targets, err);
      }
      Notification::Complete => {
        *self.core.status.borrow_mut() = Status::Completed;
        let tail = self.core.policy.borrow_mut().on_complete();
        let targets = self.core.subscribers.borrow_mut().drain();
        tracing::debug!(observers = targets.len(), "subject completed");
        for subscriber in targets {
          for value in tail.iter().cloned() {
            subscriber.next(value);
          }
          subscriber.complete();
        }
      }
    }
  }

  fn register(&self, subscriber: Subscriber<Item, Err>) -> Teardown {
    // Hold the emission lock while replaying, so whatever the newcomer emits
    // in response reaches it after its history, in recorded order.
    let nested = self.core.emitting.replace(true);
    let teardown = self.attach(subscriber);
    if !nested {
      self.core.emitting.set(false);
      self.drain();
    }
    teardown
  }

  fn attach(&self, subscriber: Subscriber<Item, Err>) -> Teardown {
    let (phase, terminal) = match &*self.core.status.borrow() {
      Status::Active => (Phase::Active, None),
      Status::Completed => (Phase::Completed, Some(None)),
      Status::Errored(err) => (Phase::Errored, Some(Some(err.clone()))),
    };
    let replay = self.core.policy.borrow().replay(phase);
    for value in replay {
      subscriber.next(value);
    }
    match terminal {
      Some(Some(err)) => subscriber.error(err),
      Some(None) => subscriber.complete(),
      None if !subscriber.is_closed() => {
        let id = self.core.subscribers.borrow_mut().add(subscriber);
        tracing::trace!(id, "subject observer added");
        let core = Rc::downgrade(&self.core);
        return Teardown::from_fn(move || {
          if let Some(core) = core.upgrade() {
            core.subscribers.borrow_mut().remove(id);
            tracing::trace!(id, "subject observer removed");
          }
        });
      }
      None => {}
    }
    Teardown::None
  }
}

impl<Item, Err, P> Observer<Item, Err> for Subject<Item, Err, P>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
  P: SubjectPolicy<Item>,
{
  #[inline]
  fn next(&mut self, value: Item) { Subject::next(self, value) }

  #[inline]
  fn error(&mut self, err: Err) { Subject::error(self, err) }

  #[inline]
  fn complete(&mut self) { Subject::complete(self) }

  #[inline]
  fn is_closed(&self) -> bool { Subject::is_closed(self) }
}

#[cfg(test)]
mod test {
  use std::{
    cell::{Cell, RefCell},
    rc::Rc,
  };

  use super::subject;
  use crate::prelude::*;

  fn recorder(
    log: &Rc<RefCell<Vec<String>>>, tag: &'static str,
  ) -> (impl FnMut(i32), impl FnMut(&'static str), impl FnMut()) {
    let (n, e, c) = (log.clone(), log.clone(), log.clone());
    (
      move |v| n.borrow_mut().push(format!("{tag} next {v}")),
      move |err| e.borrow_mut().push(format!("{tag} error {err}")),
      move || c.borrow_mut().push(format!("{tag} complete")),
    )
  }

  #[test]
  fn multicasts_to_every_observer() {
    let subject = subject::<i32, &'static str>();
    let log = Rc::new(RefCell::new(vec![]));
    let (n, e, c) = recorder(&log, "a");
    subject.subscribe_all(n, e, c);
    let (n, e, c) = recorder(&log, "b");
    subject.subscribe_all(n, e, c);
    subject.next(1);
    subject.complete();
    assert_eq!(*log.borrow(), vec!["a next 1", "b next 1", "a complete", "b complete"]);
    assert_eq!(subject.observer_count(), 0);
  }

  #[test]
  fn next_after_terminal_is_ignored() {
    let subject = subject::<i32, &'static str>();
    let log = Rc::new(RefCell::new(vec![]));
    let (n, e, c) = recorder(&log, "a");
    subject.subscribe_all(n, e, c);
    subject.error("boom");
    subject.next(1);
    subject.complete();
    assert_eq!(*log.borrow(), vec!["a error boom"]);
    assert!(subject.is_closed());
  }

  #[test]
  fn late_subscriber_gets_terminal_only() {
    let subject = subject::<i32, &'static str>();
    subject.next(1);
    subject.error("boom");
    let log = Rc::new(RefCell::new(vec![]));
    let (n, e, c) = recorder(&log, "late");
    let subscription = subject.subscribe_all(n, e, c);
    assert_eq!(*log.borrow(), vec!["late error boom"]);
    assert!(subscription.is_closed());
    assert_eq!(subject.observer_count(), 0);
  }

  #[test]
  fn unsubscribe_removes_observer() {
    let subject = subject::<i32, ()>();
    let count = Rc::new(Cell::new(0));
    let c_count = count.clone();
    let subscription = subject.subscribe(move |_| c_count.set(c_count.get() + 1));
    subject.next(1);
    subscription.unsubscribe();
    subscription.unsubscribe();
    subject.next(2);
    assert_eq!(count.get(), 1);
    assert_eq!(subject.observer_count(), 0);
  }

  #[test]
  fn unsubscribe_self_during_broadcast() {
    let subject = subject::<i32, ()>();
    let log = Rc::new(RefCell::new(vec![]));
    let own: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let (c_log, c_own) = (log.clone(), own.clone());
    let first = subject.subscribe(move |v| {
      c_log.borrow_mut().push(format!("a{v}"));
      if let Some(s) = c_own.borrow().as_ref() {
        s.unsubscribe();
      }
    });
    *own.borrow_mut() = Some(first);
    for tag in ["b", "c"] {
      let log = log.clone();
      subject.subscribe(move |v| log.borrow_mut().push(format!("{tag}{v}")));
    }

    subject.next(1);
    subject.next(2);
    assert_eq!(*log.borrow(), vec!["a1", "b1", "c1", "b2", "c2"]);
    assert_eq!(subject.observer_count(), 2);
  }

  #[test]
  fn unsubscribe_other_during_broadcast_skips_it() {
    let subject = subject::<i32, ()>();
    let log = Rc::new(RefCell::new(vec![]));
    let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

    let (c_log, c_victim) = (log.clone(), victim.clone());
    subject.subscribe(move |v| {
      c_log.borrow_mut().push(format!("a{v}"));
      if let Some(s) = c_victim.borrow().as_ref() {
        s.unsubscribe();
      }
    });
    let c_log = log.clone();
    *victim.borrow_mut() = Some(subject.subscribe(move |v| c_log.borrow_mut().push(format!("b{v}"))));

    subject.next(1);
    assert_eq!(*log.borrow(), vec!["a1"]);
  }

  #[test]
  fn subscribe_during_broadcast_waits_for_next_value() {
    let subject = subject::<i32, ()>();
    let log = Rc::new(RefCell::new(vec![]));
    let (c_subject, c_log) = (subject.clone(), log.clone());
    subject.subscribe(move |v| {
      if v == 1 {
        let log = c_log.clone();
        c_subject.subscribe(move |v| log.borrow_mut().push(v));
      }
    });
    subject.next(1);
    subject.next(2);
    assert_eq!(*log.borrow(), vec![2]);
  }

  #[test]
  fn complete_from_inside_next_reaches_everyone_in_order() {
    let subject = subject::<i32, ()>();
    let log = Rc::new(RefCell::new(vec![]));
    let (c_subject, a_next, a_done) = (subject.clone(), log.clone(), log.clone());
    subject.subscribe_all(
      move |v| {
        a_next.borrow_mut().push(format!("a{v}"));
        c_subject.complete();
      },
      |_| {},
      move || a_done.borrow_mut().push("a done".to_owned()),
    );
    let (b_next, b_done) = (log.clone(), log.clone());
    subject.subscribe_all(
      move |v| b_next.borrow_mut().push(format!("b{v}")),
      |_| {},
      move || b_done.borrow_mut().push("b done".to_owned()),
    );

    subject.next(1);
    assert_eq!(*log.borrow(), vec!["a1", "b1", "a done", "b done"]);
    assert!(subject.is_closed());
  }

  #[test]
  fn reentrant_next_keeps_behavior_value_in_step() {
    let subject = observable::behavior_subject::<i32, ()>(0);
    let c_subject = subject.clone();
    subject.subscribe(move |v| {
      if v == 1 {
        c_subject.next(2);
      }
    });
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    subject.subscribe(move |v| c_seen.borrow_mut().push(v));

    subject.next(1);
    assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    assert_eq!(subject.value(), 2);
  }

  #[test]
  fn emission_during_replay_reaches_new_subscriber() {
    let subject = observable::replay_subject::<i32, ()>(None);
    subject.next(1);
    let seen = Rc::new(RefCell::new(vec![]));
    let (c_subject, c_seen) = (subject.clone(), seen.clone());
    subject.subscribe(move |v| {
      c_seen.borrow_mut().push(v);
      if v == 1 {
        c_subject.next(2);
      }
    });
    assert_eq!(*seen.borrow(), vec![1, 2]);
    assert_eq!(subject.observer_count(), 1);

    let late = Rc::new(RefCell::new(vec![]));
    let c_late = late.clone();
    subject.subscribe(move |v| c_late.borrow_mut().push(v));
    assert_eq!(*late.borrow(), vec![1, 2]);
  }

  #[test]
  fn subject_as_observer_of_source() {
    let subject = subject::<i32, ()>();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    subject.subscribe(move |v| c_seen.borrow_mut().push(v));
    observable::of([1, 2, 3]).subscribe_with(subject.clone());
    assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    assert!(subject.is_closed());
  }
}
