use std::rc::Rc;

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Calls `f` with a reference to every value for its side effect; values
  /// pass through unchanged.
  pub fn tap<F>(&self, f: F) -> Observable<Item, Err>
  where
    F: Fn(&Item) + 'static,
  {
    let f = Rc::new(f);
    self.lift(move |observer| TapObserver { observer, f: f.clone() })
  }
}

pub struct TapObserver<Item, Err, F> {
  observer: Subscriber<Item, Err>,
  f: Rc<F>,
}

impl<Item, Err, F> Observer<Item, Err> for TapObserver<Item, Err, F>
where
  F: Fn(&Item),
{
  fn next(&mut self, value: Item) {
    (self.f)(&value);
    self.observer.next(value)
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
