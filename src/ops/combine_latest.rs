use std::{cell::RefCell, rc::Rc};

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

/// Emits the latest value of every source, as a `Vec` in source order,
/// whenever any source emits.
///
/// Nothing is emitted until every source emitted at least once. Completes
/// when all sources completed, or as soon as one completes without having
/// emitted, since no combination can be formed after that.
///
/// ```
/// use std::{cell::RefCell, rc::Rc};
///
/// use bael_stream::prelude::*;
///
/// let a = observable::subject::<i32, ()>();
/// let b = observable::subject::<i32, ()>();
/// let seen = Rc::new(RefCell::new(vec![]));
/// let c_seen = seen.clone();
/// observable::combine_latest([a.as_observable(), b.as_observable()])
///   .subscribe(move |v| c_seen.borrow_mut().push(v));
///
/// a.next(1);
/// b.next(2);
/// a.next(3);
/// assert_eq!(*seen.borrow(), vec![vec![1, 2], vec![3, 2]]);
/// ```
pub fn combine_latest<Item, Err>(
  sources: impl IntoIterator<Item = Observable<Item, Err>>,
) -> Observable<Vec<Item>, Err>
where
  Item: Clone + 'static,
  Err: 'static,
{
  let sources: Rc<[Observable<Item, Err>]> = sources.into_iter().collect();
  Observable::create(move |subscriber: Subscriber<Vec<Item>, Err>| {
    if sources.is_empty() {
      subscriber.complete();
      return;
    }
    let state = Rc::new(RefCell::new(CombineState {
      latest: vec![None; sources.len()],
      completed: 0,
    }));
    for (index, source) in sources.iter().enumerate() {
      if subscriber.is_closed() {
        break;
      }
      let observer = CombineLatestObserver { observer: subscriber.clone(), state: state.clone(), index };
      subscriber.add(source.subscribe_with(observer));
    }
  })
}

struct CombineState<Item> {
  latest: Vec<Option<Item>>,
  completed: usize,
}

pub struct CombineLatestObserver<Item, Err> {
  observer: Subscriber<Vec<Item>, Err>,
  state: Rc<RefCell<CombineState<Item>>>,
  index: usize,
}

impl<Item: Clone, Err> Observer<Item, Err> for CombineLatestObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    let combined = {
      let mut state = self.state.borrow_mut();
      state.latest[self.index] = Some(value);
      state.latest.iter().cloned().collect::<Option<Vec<_>>>()
    };
    if let Some(combined) = combined {
      self.observer.next(combined);
    }
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) {
    let done = {
      let mut state = self.state.borrow_mut();
      state.completed += 1;
      state.completed == state.latest.len() || state.latest[self.index].is_none()
    };
    if done {
      self.observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
