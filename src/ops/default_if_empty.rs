use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Emits `default` if the source completes without emitting any value.
  pub fn default_if_empty(&self, default: Item) -> Observable<Item, Err>
  where
    Item: Clone,
  {
    self.lift(move |observer| DefaultIfEmptyObserver { observer, default: Some(default.clone()) })
  }
}

pub struct DefaultIfEmptyObserver<Item, Err> {
  observer: Subscriber<Item, Err>,
  default: Option<Item>,
}

impl<Item, Err> Observer<Item, Err> for DefaultIfEmptyObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    self.default = None;
    self.observer.next(value);
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) {
    if let Some(value) = self.default.take() {
      self.observer.next(value);
    }
    self.observer.complete()
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn base_function() {
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::of::<_, ()>([10, 20])
      .default_if_empty(5)
      .subscribe(move |v| c_seen.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![10, 20]);
  }

  #[test]
  fn base_empty_function() {
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::empty::<i32, ()>()
      .default_if_empty(5)
      .subscribe(move |v| c_seen.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![5]);
  }
}
