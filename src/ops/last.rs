use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Emits only the last value of the source, when it completes. An empty
  /// source completes without a value.
  pub fn last(&self) -> Observable<Item, Err> {
    self.lift(|observer| LastObserver { observer, last: None, default: None })
  }

  /// Like [`Observable::last`], but an empty source emits `default`.
  pub fn last_or(&self, default: Item) -> Observable<Item, Err>
  where
    Item: Clone,
  {
    self.lift(move |observer| LastObserver { observer, last: None, default: Some(default.clone()) })
  }
}

pub struct LastObserver<Item, Err> {
  observer: Subscriber<Item, Err>,
  last: Option<Item>,
  default: Option<Item>,
}

impl<Item, Err> Observer<Item, Err> for LastObserver<Item, Err> {
  fn next(&mut self, value: Item) { self.last = Some(value); }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) {
    if let Some(value) = self.last.take().or_else(|| self.default.take()) {
      self.observer.next(value);
    }
    self.observer.complete()
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

#[cfg(test)]
mod test {
  use std::{
    cell::{Cell, RefCell},
    rc::Rc,
  };

  use crate::prelude::*;

  #[test]
  fn last_or_hundered_items() {
    let completed = Rc::new(Cell::new(0));
    let last_item = Rc::new(Cell::new(None));
    let (c_completed, c_last) = (completed.clone(), last_item.clone());
    observable::range::<()>(0, 100).last_or(200).subscribe_all(
      move |v| c_last.set(Some(v)),
      |_| {},
      move || c_completed.set(c_completed.get() + 1),
    );
    assert_eq!(completed.get(), 1);
    assert_eq!(last_item.get(), Some(99));
  }

  #[test]
  fn last_or_no_items() {
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::empty::<i32, ()>()
      .last_or(100)
      .subscribe(move |v| c_seen.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![100]);
  }

  #[test]
  fn last_of_empty_only_completes() {
    let seen = Rc::new(RefCell::new(vec![]));
    let completed = Rc::new(Cell::new(false));
    let (c_seen, c_completed) = (seen.clone(), completed.clone());
    observable::empty::<i32, ()>().last().subscribe_all(
      move |v| c_seen.borrow_mut().push(v),
      |_| {},
      move || c_completed.set(true),
    );
    assert!(seen.borrow().is_empty());
    assert!(completed.get());
  }

  #[test]
  fn last_after_error_emits_nothing() {
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    Observable::create(|s: Subscriber<i32, &str>| {
      s.next(1);
      s.error("boom");
    })
    .last()
    .subscribe_err(move |v| c_seen.borrow_mut().push(v), |_| {});
    assert!(seen.borrow().is_empty());
  }
}
