use std::collections::VecDeque;

use super::{Phase, Subject, SubjectPolicy};

/// Remembers the most recent values, all of them if unbounded.
#[derive(Debug, Clone)]
pub struct Replay<Item> {
  buffer: VecDeque<Item>,
  capacity: Option<usize>,
}

impl<Item: Clone + 'static> SubjectPolicy<Item> for Replay<Item> {
  fn record(&mut self, value: &Item) {
    if self.capacity == Some(0) {
      return;
    }
    self.buffer.push_back(value.clone());
    if let Some(capacity) = self.capacity {
      while self.buffer.len() > capacity {
        self.buffer.pop_front();
      }
    }
  }

  fn replay(&self, _: Phase) -> Vec<Item> { self.buffer.iter().cloned().collect() }
}

/// A subject replaying buffered values, oldest first, to every new
/// subscriber, even after it finished.
pub type ReplaySubject<Item, Err> = Subject<Item, Err, Replay<Item>>;

/// Creates a [`ReplaySubject`] keeping the last `size` values, or every
/// value when `size` is `None`.
pub fn replay_subject<Item, Err>(size: Option<usize>) -> ReplaySubject<Item, Err> {
  Subject::with_policy(Replay { buffer: VecDeque::new(), capacity: size })
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use super::replay_subject;
  use crate::prelude::*;

  #[test]
  fn keeps_last_values_oldest_first() {
    let subject = replay_subject::<_, ()>(Some(2));
    subject.next(1);
    subject.next(2);
    subject.next(3);
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    subject.subscribe(move |v| c_seen.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![2, 3]);

    subject.next(4);
    assert_eq!(*seen.borrow(), vec![2, 3, 4]);
  }

  #[test]
  fn unbounded_replays_everything_then_terminal() {
    let subject = replay_subject::<_, &str>(None);
    for v in 0..5 {
      subject.next(v);
    }
    subject.error("boom");
    let log = Rc::new(RefCell::new(vec![]));
    let (n, e) = (log.clone(), log.clone());
    subject.subscribe_err(
      move |v| n.borrow_mut().push(format!("next {v}")),
      move |err| e.borrow_mut().push(format!("error {err}")),
    );
    assert_eq!(
      *log.borrow(),
      vec!["next 0", "next 1", "next 2", "next 3", "next 4", "error boom"]
    );
  }

  #[test]
  fn zero_size_keeps_nothing() {
    let subject = replay_subject::<_, ()>(Some(0));
    subject.next(1);
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    subject.subscribe(move |v| c_seen.borrow_mut().push(v));
    assert!(seen.borrow().is_empty());
  }
}
