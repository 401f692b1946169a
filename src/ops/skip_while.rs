use std::rc::Rc;

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Drops values while `predicate` holds; from the first value that fails
  /// it on, every value passes through.
  pub fn skip_while<F>(&self, predicate: F) -> Observable<Item, Err>
  where
    F: Fn(&Item) -> bool + 'static,
  {
    let predicate = Rc::new(predicate);
    self.lift(move |observer| SkipWhileObserver {
      observer,
      predicate: predicate.clone(),
      done_skipping: false,
    })
  }
}

pub struct SkipWhileObserver<Item, Err, F> {
  observer: Subscriber<Item, Err>,
  predicate: Rc<F>,
  done_skipping: bool,
}

impl<Item, Err, F> Observer<Item, Err> for SkipWhileObserver<Item, Err, F>
where
  F: Fn(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if !self.done_skipping && !(self.predicate)(&value) {
      self.done_skipping = true;
    }
    if self.done_skipping {
      self.observer.next(value);
    }
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
