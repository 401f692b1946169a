use std::{cell::RefCell, rc::Rc};

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Maps every value to an inner observable and subscribes to all of them
  /// concurrently, merging their values.
  ///
  /// Completes once the source and every inner completed. The first error,
  /// from the source or any inner, is forwarded and tears everything down.
  pub fn merge_map<B, F>(&self, f: F) -> Observable<B, Err>
  where
    B: 'static,
    F: Fn(Item) -> Observable<B, Err> + 'static,
  {
    let f = Rc::new(f);
    self.lift(move |observer| MergeMapObserver {
      observer,
      f: f.clone(),
      state: Rc::new(RefCell::new(MergeState { active: 0, outer_done: false })),
    })
  }
}

struct MergeState {
  active: usize,
  outer_done: bool,
}

impl MergeState {
  fn is_done(&self) -> bool { self.outer_done && self.active == 0 }
}

pub struct MergeMapObserver<B, Err, F> {
  observer: Subscriber<B, Err>,
  f: Rc<F>,
  state: Rc<RefCell<MergeState>>,
}

impl<Item, B: 'static, Err: 'static, F> Observer<Item, Err> for MergeMapObserver<B, Err, F>
where
  F: Fn(Item) -> Observable<B, Err>,
{
  fn next(&mut self, value: Item) {
    let inner = (self.f)(value);
    self.state.borrow_mut().active += 1;
    let subscription = inner
      .subscribe_with(MergeInnerObserver { observer: self.observer.clone(), state: self.state.clone() });
    self.observer.add(subscription);
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) {
    let done = {
      let mut state = self.state.borrow_mut();
      state.outer_done = true;
      state.is_done()
    };
    if done {
      self.observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

struct MergeInnerObserver<B, Err> {
  observer: Subscriber<B, Err>,
  state: Rc<RefCell<MergeState>>,
}

impl<B, Err> Observer<B, Err> for MergeInnerObserver<B, Err> {
  fn next(&mut self, value: B) { self.observer.next(value) }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) {
    let done = {
      let mut state = self.state.borrow_mut();
      state.active -= 1;
      state.is_done()
    };
    if done {
      self.observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
