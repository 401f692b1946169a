use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

/// Pairs the n-th values of every source into a `Vec`, in source order.
///
/// Values wait in a per-source buffer until every source has one. The zip
/// completes as soon as some source completed with an empty buffer, since
/// no further combination can be formed.
pub fn zip<Item, Err>(sources: impl IntoIterator<Item = Observable<Item, Err>>) -> Observable<Vec<Item>, Err>
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
    let state = Rc::new(RefCell::new(ZipState {
      buffers: (0..sources.len()).map(|_| VecDeque::new()).collect(),
      completed: vec![false; sources.len()],
    }));
    for (index, source) in sources.iter().enumerate() {
      if subscriber.is_closed() {
        break;
      }
      let observer = ZipObserver { observer: subscriber.clone(), state: state.clone(), index };
      subscriber.add(source.subscribe_with(observer));
    }
  })
}

struct ZipState<Item> {
  buffers: Vec<VecDeque<Item>>,
  completed: Vec<bool>,
}

impl<Item> ZipState<Item> {
  fn exhausted(&self) -> bool {
    self.completed.iter().zip(&self.buffers).any(|(done, buffer)| *done && buffer.is_empty())
  }
}

pub struct ZipObserver<Item, Err> {
  observer: Subscriber<Vec<Item>, Err>,
  state: Rc<RefCell<ZipState<Item>>>,
  index: usize,
}

impl<Item, Err> Observer<Item, Err> for ZipObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    let (tuple, exhausted) = {
      let mut state = self.state.borrow_mut();
      state.buffers[self.index].push_back(value);
      if state.buffers.iter().all(|b| !b.is_empty()) {
        let tuple = state.buffers.iter_mut().filter_map(VecDeque::pop_front).collect::<Vec<_>>();
        (Some(tuple), state.exhausted())
      } else {
        (None, false)
      }
    };
    if let Some(tuple) = tuple {
      self.observer.next(tuple);
    }
    if exhausted {
      self.observer.complete();
    }
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) {
    let exhausted = {
      let mut state = self.state.borrow_mut();
      state.completed[self.index] = true;
      state.buffers[self.index].is_empty()
    };
    if exhausted {
      self.observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
