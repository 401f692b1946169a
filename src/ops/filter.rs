use std::rc::Rc;

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Emit only those items that pass the predicate.
  pub fn filter<F>(&self, predicate: F) -> Observable<Item, Err>
  where
    F: Fn(&Item) -> bool + 'static,
  {
    let predicate = Rc::new(predicate);
    self.lift(move |observer| FilterObserver { observer, predicate: predicate.clone() })
  }

  /// Like [`Observable::filter`], but the predicate may fail. A failure is
  /// sent downstream as the error signal.
  pub fn try_filter<F>(&self, predicate: F) -> Observable<Item, Err>
  where
    F: Fn(&Item) -> Result<bool, Err> + 'static,
  {
    let predicate = Rc::new(predicate);
    self.lift(move |observer: Subscriber<Item, Err>| {
      let predicate = predicate.clone();
      TryFilterObserver { observer, predicate }
    })
  }
}

pub struct FilterObserver<Item, Err, P> {
  observer: Subscriber<Item, Err>,
  predicate: Rc<P>,
}

impl<Item, Err, P> Observer<Item, Err> for FilterObserver<Item, Err, P>
where
  P: Fn(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if (self.predicate)(&value) {
      self.observer.next(value)
    }
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

pub struct TryFilterObserver<Item, Err, P> {
  observer: Subscriber<Item, Err>,
  predicate: Rc<P>,
}

impl<Item, Err, P> Observer<Item, Err> for TryFilterObserver<Item, Err, P>
where
  P: Fn(&Item) -> Result<bool, Err>,
{
  fn next(&mut self, value: Item) {
    match (self.predicate)(&value) {
      Ok(true) => self.observer.next(value),
      Ok(false) => {}
      Err(e) => self.observer.error(e),
    }
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
