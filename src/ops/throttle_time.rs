use std::{cell::Cell, rc::Rc};

use crate::{
  observable::Observable,
  observer::Observer,
  scheduler::{Duration, Scheduler},
  subscriber::Subscriber,
};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Emits a value, then ignores the source for `duration`. The next value
  /// arriving after the window closed is emitted and opens a new window.
  pub fn throttle_time<S: Scheduler>(&self, duration: Duration, scheduler: S) -> Observable<Item, Err> {
    self.lift(move |observer| ThrottleObserver {
      observer,
      scheduler: scheduler.clone(),
      duration,
      throttled: Rc::new(Cell::new(false)),
    })
  }
}

pub struct ThrottleObserver<Item, Err, S> {
  observer: Subscriber<Item, Err>,
  scheduler: S,
  duration: Duration,
  throttled: Rc<Cell<bool>>,
}

impl<Item: 'static, Err: 'static, S: Scheduler> Observer<Item, Err> for ThrottleObserver<Item, Err, S> {
  fn next(&mut self, value: Item) {
    if self.throttled.get() {
      return;
    }
    self.throttled.set(true);
    let throttled = self.throttled.clone();
    let window = self.scheduler.schedule(self.duration, move || throttled.set(false));
    self.observer.add(window);
    self.observer.next(value);
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::{prelude::*, scheduler::TestScheduler};

  #[test]
  fn leading_edge() {
    TestScheduler::init();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::interval::<()>(Duration::from_millis(10), TestScheduler)
      .take(10)
      .throttle_time(Duration::from_millis(25), TestScheduler)
      .subscribe(move |v| c_seen.borrow_mut().push(v));
    TestScheduler::advance_by(Duration::from_millis(100));
    // values at 10, 40, 70, 100 ms
    assert_eq!(*seen.borrow(), vec![0, 3, 6, 9]);
  }

  #[test]
  fn window_closes_after_duration() {
    TestScheduler::init();
    let source = Subject::<char, ()>::default();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    source
      .as_observable()
      .throttle_time(Duration::from_millis(10), TestScheduler)
      .subscribe(move |v| c_seen.borrow_mut().push(v));
    source.next('a');
    source.next('b');
    TestScheduler::advance_by(Duration::from_millis(10));
    source.next('c');
    assert_eq!(*seen.borrow(), vec!['a', 'c']);
  }

  #[test]
  fn complete_releases_window_timer() {
    TestScheduler::init();
    let source = Subject::<i32, ()>::default();
    source
      .as_observable()
      .throttle_time(Duration::from_millis(10), TestScheduler)
      .subscribe(|_| {});
    source.next(1);
    assert_eq!(TestScheduler::pending_count(), 1);
    source.complete();
    assert_eq!(TestScheduler::pending_count(), 0);
  }
}
