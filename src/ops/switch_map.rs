use std::{cell::RefCell, rc::Rc};

use crate::{
  observable::Observable, observer::Observer, subscriber::Subscriber, subscription::Subscription,
};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Maps every value to an inner observable and mirrors only the most
  /// recent one: a new outer value unsubscribes the previous inner.
  ///
  /// Completes once the source completed and the current inner (if any)
  /// completed too.
  pub fn switch_map<B, F>(&self, f: F) -> Observable<B, Err>
  where
    B: 'static,
    F: Fn(Item) -> Observable<B, Err> + 'static,
  {
    let f = Rc::new(f);
    self.lift(move |observer| SwitchMapObserver {
      observer,
      f: f.clone(),
      state: Rc::new(RefCell::new(SwitchState::default())),
    })
  }
}

#[derive(Default)]
struct SwitchState {
  current: usize,
  inner: Option<Subscription>,
  inner_active: bool,
  outer_done: bool,
}

pub struct SwitchMapObserver<B, Err, F> {
  observer: Subscriber<B, Err>,
  f: Rc<F>,
  state: Rc<RefCell<SwitchState>>,
}

impl<Item, B: 'static, Err: 'static, F> Observer<Item, Err> for SwitchMapObserver<B, Err, F>
where
  F: Fn(Item) -> Observable<B, Err>,
{
  fn next(&mut self, value: Item) {
    let inner = (self.f)(value);
    let (id, previous) = {
      let mut state = self.state.borrow_mut();
      state.current += 1;
      state.inner_active = true;
      (state.current, state.inner.take())
    };
    if let Some(previous) = previous {
      tracing::trace!(id, "switch_map dropped previous inner");
      previous.unsubscribe();
    }
    let subscription = inner.subscribe_with(SwitchInnerObserver {
      observer: self.observer.clone(),
      state: self.state.clone(),
      id,
    });
    self.observer.add(subscription.clone());
    let mut state = self.state.borrow_mut();
    if state.current == id {
      state.inner = Some(subscription);
    }
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) {
    let inner_active = {
      let mut state = self.state.borrow_mut();
      state.outer_done = true;
      state.inner_active
    };
    if !inner_active {
      self.observer.complete();
    }
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

struct SwitchInnerObserver<B, Err> {
  observer: Subscriber<B, Err>,
  state: Rc<RefCell<SwitchState>>,
  id: usize,
}

impl<B, Err> SwitchInnerObserver<B, Err> {
  fn is_current(&self) -> bool { self.state.borrow().current == self.id }
}

impl<B, Err> Observer<B, Err> for SwitchInnerObserver<B, Err> {
  fn next(&mut self, value: B) {
    if self.is_current() {
      self.observer.next(value);
    }
  }

  fn error(&mut self, err: Err) {
    if self.is_current() {
      self.observer.error(err);
    }
  }

  fn complete(&mut self) {
    let outer_done = {
      let mut state = self.state.borrow_mut();
      if state.current != self.id {
        return;
      }
      state.inner_active = false;
      state.inner = None;
      state.outer_done
    };
    if outer_done {
      self.observer.complete();
    }
  }

  fn is_closed(&self) -> bool { !self.is_current() || self.observer.is_closed() }
}
