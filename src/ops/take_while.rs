use std::rc::Rc;

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Emits values while `predicate` holds, and completes on the first value
  /// that fails it. That value is not emitted.
  pub fn take_while<F>(&self, predicate: F) -> Observable<Item, Err>
  where
    F: Fn(&Item) -> bool + 'static,
  {
    let predicate = Rc::new(predicate);
    self.lift(move |observer| TakeWhileObserver { observer, predicate: predicate.clone() })
  }
}

pub struct TakeWhileObserver<Item, Err, F> {
  observer: Subscriber<Item, Err>,
  predicate: Rc<F>,
}

impl<Item, Err, F> Observer<Item, Err> for TakeWhileObserver<Item, Err, F>
where
  F: Fn(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.predicate)(&value) {
      self.observer.next(value);
    } else {
      self.observer.complete();
    }
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

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
  fn completes_on_first_failure() {
    let seen = Rc::new(RefCell::new(vec![]));
    let completed = Rc::new(Cell::new(0));
    let (c_seen, c_completed) = (seen.clone(), completed.clone());
    observable::from_iter::<_, (), _>(0..)
      .take_while(|v| *v < 4)
      .subscribe_all(
        move |v| c_seen.borrow_mut().push(v),
        |_| {},
        move || c_completed.set(c_completed.get() + 1),
      );
    assert_eq!(*seen.borrow(), vec![0, 1, 2, 3]);
    assert_eq!(completed.get(), 1);
  }
}
