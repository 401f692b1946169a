use std::{cell::RefCell, rc::Rc};

use once_cell::unsync::OnceCell;

use crate::{
  observable::Observable, observer::Observer, subscriber::Subscriber, subscription::Subscription,
};

/// Mirrors the first source to send any notification (value, error or
/// completion) and unsubscribes all the others at that moment.
///
/// Notifications from the losers are dropped, even those already on their
/// way when the race was decided.
pub fn race<Item, Err>(sources: impl IntoIterator<Item = Observable<Item, Err>>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  let sources: Rc<[Observable<Item, Err>]> = sources.into_iter().collect();
  Observable::create(move |subscriber: Subscriber<Item, Err>| {
    if sources.is_empty() {
      subscriber.complete();
      return;
    }
    let race = Rc::new(RaceState { winner: OnceCell::new(), contenders: RefCell::new(Vec::new()) });
    for (index, source) in sources.iter().enumerate() {
      if race.winner.get().is_some() || subscriber.is_closed() {
        break;
      }
      let observer = RaceObserver { observer: subscriber.clone(), race: race.clone(), index };
      let subscription = source.subscribe_with(observer);
      if race.is_loser(index) {
        subscription.unsubscribe();
      } else {
        race.contenders.borrow_mut().push((index, subscription.clone()));
      }
      subscriber.add(subscription);
    }
  })
}

struct RaceState {
  winner: OnceCell<usize>,
  contenders: RefCell<Vec<(usize, Subscription)>>,
}

impl RaceState {
  fn is_loser(&self, index: usize) -> bool { self.winner.get().map_or(false, |w| *w != index) }

  /// Returns whether `index` may deliver, deciding the race if still open.
  fn claim(&self, index: usize) -> bool {
    if self.winner.set(index).is_err() {
      return !self.is_loser(index);
    }
    tracing::trace!(winner = index, "race decided");
    let losers: Vec<Subscription> = self
      .contenders
      .borrow_mut()
      .drain(..)
      .filter(|(i, _)| *i != index)
      .map(|(_, s)| s)
      .collect();
    for loser in losers {
      loser.unsubscribe();
    }
    true
  }
}

pub struct RaceObserver<Item, Err> {
  observer: Subscriber<Item, Err>,
  race: Rc<RaceState>,
  index: usize,
}

impl<Item, Err> Observer<Item, Err> for RaceObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    if self.race.claim(self.index) {
      self.observer.next(value);
    }
  }

  fn error(&mut self, err: Err) {
    if self.race.claim(self.index) {
      self.observer.error(err);
    }
  }

  fn complete(&mut self) {
    if self.race.claim(self.index) {
      self.observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.race.is_loser(self.index) || self.observer.is_closed() }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::{prelude::*, scheduler::TestScheduler};

  #[test]
  fn first_to_emit_wins() {
    let a = Subject::<&str, ()>::default();
    let b = Subject::<&str, ()>::default();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::race([a.as_observable(), b.as_observable()])
      .subscribe(move |v| c_seen.borrow_mut().push(v));

    b.next("b1");
    a.next("a1");
    b.next("b2");
    assert_eq!(*seen.borrow(), vec!["b1", "b2"]);
    assert_eq!(a.observer_count(), 0);
  }

  #[test]
  fn timed_sources() {
    TestScheduler::init();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    let slow = observable::interval::<()>(Duration::from_millis(30), TestScheduler).map(|v| v + 100);
    let fast = observable::interval::<()>(Duration::from_millis(10), TestScheduler).take(3);
    observable::race([slow, fast]).subscribe(move |v| c_seen.borrow_mut().push(v));
    TestScheduler::advance_by(Duration::from_millis(100));
    assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    assert!(TestScheduler::is_empty());
  }

  #[test]
  fn synchronous_winner_skips_the_rest() {
    let subscribed = Rc::new(RefCell::new(false));
    let c_subscribed = subscribed.clone();
    let late = Observable::<i32, ()>::create(move |_| *c_subscribed.borrow_mut() = true);
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::race([observable::of([1, 2]), late]).subscribe(move |v| c_seen.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![1, 2]);
    assert!(!*subscribed.borrow());
  }

  #[test]
  fn completion_also_decides() {
    let a = Subject::<i32, ()>::default();
    let completed = Rc::new(RefCell::new(false));
    let c_completed = completed.clone();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::race([a.as_observable(), observable::empty()]).subscribe_all(
      move |v| c_seen.borrow_mut().push(v),
      |_| {},
      move || *c_completed.borrow_mut() = true,
    );
    assert!(*completed.borrow());
    a.next(1);
    assert!(seen.borrow().is_empty());
  }

  #[test]
  fn race_is_decided_once() {
    let race = super::RaceState { winner: Default::default(), contenders: RefCell::new(vec![]) };
    let loser = Subscription::default();
    race.contenders.borrow_mut().push((1, loser.clone()));
    assert!(race.claim(0));
    assert!(loser.is_closed());
    assert!(race.claim(0));
    assert!(!race.claim(1));
    assert!(race.is_loser(1));
  }
}
