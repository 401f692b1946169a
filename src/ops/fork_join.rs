use std::{cell::RefCell, rc::Rc};

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

/// Waits for every source to complete, then emits their last values as a
/// `Vec` in source order and completes.
///
/// If any source completes without a value, the result completes without
/// emitting.
pub fn fork_join<Item, Err>(
  sources: impl IntoIterator<Item = Observable<Item, Err>>,
) -> Observable<Vec<Item>, Err>
where
  Item: 'static,
  Err: 'static,
{
  let sources: Rc<[Observable<Item, Err>]> = sources.into_iter().collect();
  Observable::create(move |subscriber: Subscriber<Vec<Item>, Err>| {
    if sources.is_empty() {
      subscriber.complete();
      return;
    }
    let state = Rc::new(RefCell::new(ForkJoinState {
      last: (0..sources.len()).map(|_| None).collect(),
      completed: 0,
    }));
    for (index, source) in sources.iter().enumerate() {
      if subscriber.is_closed() {
        break;
      }
      let observer = ForkJoinObserver { observer: subscriber.clone(), state: state.clone(), index };
      subscriber.add(source.subscribe_with(observer));
    }
  })
}

struct ForkJoinState<Item> {
  last: Vec<Option<Item>>,
  completed: usize,
}

pub struct ForkJoinObserver<Item, Err> {
  observer: Subscriber<Vec<Item>, Err>,
  state: Rc<RefCell<ForkJoinState<Item>>>,
  index: usize,
}

impl<Item, Err> Observer<Item, Err> for ForkJoinObserver<Item, Err> {
  fn next(&mut self, value: Item) { self.state.borrow_mut().last[self.index] = Some(value); }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) {
    let joined = {
      let mut state = self.state.borrow_mut();
      if state.last[self.index].is_none() {
        None
      } else {
        state.completed += 1;
        if state.completed == state.last.len() {
          Some(state.last.iter_mut().filter_map(Option::take).collect::<Vec<_>>())
        } else {
          return;
        }
      }
    };
    if let Some(joined) = joined {
      self.observer.next(joined);
    }
    self.observer.complete();
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
