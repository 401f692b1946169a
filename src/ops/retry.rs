use std::{cell::Cell, rc::Rc};

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// On a source error, resubscribes to the source, at most `count` times.
  /// The error of the last attempt is forwarded.
  ///
  /// Values emitted by failed attempts are not withdrawn.
  pub fn retry(&self, count: usize) -> Observable<Item, Err> {
    let source = self.clone();
    Observable::create(move |subscriber: Subscriber<Item, Err>| {
      let state = Rc::new(RetryState {
        source: source.clone(),
        remaining: Cell::new(count),
        looping: Cell::new(false),
        requested: Cell::new(false),
      });
      attempt(&state, &subscriber);
    })
  }
}

struct RetryState<Item, Err> {
  source: Observable<Item, Err>,
  remaining: Cell<usize>,
  looping: Cell<bool>,
  requested: Cell<bool>,
}

/// Subscribes to the source again. A request made while an attempt is still
/// being subscribed, i.e. a synchronous failure, is picked up by the loop of
/// the outer call, so the stack stays flat however many attempts fail.
fn attempt<Item: 'static, Err: 'static>(
  state: &Rc<RetryState<Item, Err>>, subscriber: &Subscriber<Item, Err>,
) {
  state.requested.set(true);
  if state.looping.replace(true) {
    return;
  }
  while state.requested.replace(false) && !subscriber.is_closed() {
    let observer = RetryObserver { observer: subscriber.clone(), state: state.clone() };
    subscriber.add(state.source.subscribe_with(observer));
  }
  state.looping.set(false);
}

pub struct RetryObserver<Item, Err> {
  observer: Subscriber<Item, Err>,
  state: Rc<RetryState<Item, Err>>,
}

impl<Item: 'static, Err: 'static> Observer<Item, Err> for RetryObserver<Item, Err> {
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(&mut self, err: Err) {
    let remaining = self.state.remaining.get();
    if remaining == 0 || self.observer.is_closed() {
      self.observer.error(err);
    } else {
      self.state.remaining.set(remaining - 1);
      tracing::debug!(remaining = remaining - 1, "retry resubscribing");
      attempt(&self.state, &self.observer);
    }
  }

  fn complete(&mut self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod test {
  use std::{
    cell::{Cell, RefCell},
    rc::Rc,
  };

  use crate::prelude::*;

  fn flaky(failures: usize) -> (Observable<&'static str, String>, Rc<Cell<usize>>) {
    let attempts = Rc::new(Cell::new(0));
    let c_attempts = attempts.clone();
    let source = Observable::create(move |s: Subscriber<&'static str, String>| {
      let n = c_attempts.get();
      c_attempts.set(n + 1);
      if n < failures {
        s.error(format!("attempt {n} failed"));
      } else {
        s.next("ok");
        s.complete();
      }
    });
    (source, attempts)
  }

  #[test]
  fn succeeds_within_budget() {
    let (source, attempts) = flaky(2);
    let log = Rc::new(RefCell::new(vec![]));
    let (n, e, c) = (log.clone(), log.clone(), log.clone());
    source.retry(3).subscribe_all(
      move |v| n.borrow_mut().push(v.to_owned()),
      move |err| e.borrow_mut().push(err),
      move || c.borrow_mut().push("complete".to_owned()),
    );
    assert_eq!(*log.borrow(), vec!["ok", "complete"]);
    assert_eq!(attempts.get(), 3);
  }

  #[test]
  fn forwards_last_error_when_exhausted() {
    let (source, attempts) = flaky(10);
    let errors = Rc::new(RefCell::new(vec![]));
    let c_errors = errors.clone();
    source.retry(2).subscribe_err(|_| {}, move |e| c_errors.borrow_mut().push(e));
    assert_eq!(*errors.borrow(), vec!["attempt 2 failed".to_owned()]);
    assert_eq!(attempts.get(), 3);
  }

  #[test]
  fn retry_zero_is_passthrough() {
    let (source, attempts) = flaky(1);
    let errors = Rc::new(Cell::new(0));
    let c_errors = errors.clone();
    source.retry(0).subscribe_err(|_| {}, move |_| c_errors.set(c_errors.get() + 1));
    assert_eq!(errors.get(), 1);
    assert_eq!(attempts.get(), 1);
  }

  #[test]
  fn unsubscribe_stops_current_attempt() {
    let torn = Rc::new(Cell::new(0));
    let attempts = Rc::new(Cell::new(0));
    let (c_torn, c_attempts) = (torn.clone(), attempts.clone());
    let source = Observable::<i32, ()>::create(move |s| {
      c_attempts.set(c_attempts.get() + 1);
      if c_attempts.get() == 1 {
        s.error(());
      }
      let c_torn = c_torn.clone();
      Teardown::from_fn(move || c_torn.set(c_torn.get() + 1))
    });
    let subscription = source.retry(5).subscribe(|_| {});
    assert_eq!(attempts.get(), 2);
    assert_eq!(torn.get(), 1);
    subscription.unsubscribe();
    assert_eq!(torn.get(), 2);
  }

  #[test]
  fn many_synchronous_failures_do_not_nest() {
    let attempts = Rc::new(Cell::new(0));
    let c_attempts = attempts.clone();
    let source = Observable::<i32, &str>::create(move |s| {
      c_attempts.set(c_attempts.get() + 1);
      s.error("x");
    });
    let errors = Rc::new(Cell::new(0));
    let c_errors = errors.clone();
    source.retry(10_000).subscribe_err(|_| {}, move |_| c_errors.set(c_errors.get() + 1));
    assert_eq!(attempts.get(), 10_001);
    assert_eq!(errors.get(), 1);
  }
}
