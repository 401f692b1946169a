use std::rc::Rc;

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// On a source error, subscribes to the observable returned by `f` and
  /// mirrors it instead. The fallback may use a different error type.
  ///
  /// ```
  /// use bael_stream::prelude::*;
  ///
  /// observable::throw_error::<&str, _>("offline")
  ///   .catch_error(|_| observable::of::<_, ()>(["fallback"]))
  ///   .subscribe(|v| assert_eq!(v, "fallback"));
  /// ```
  pub fn catch_error<E2, F>(&self, f: F) -> Observable<Item, E2>
  where
    E2: 'static,
    F: Fn(Err) -> Observable<Item, E2> + 'static,
  {
    let f = Rc::new(f);
    self.lift(move |observer| CatchErrorObserver { observer, f: f.clone() })
  }
}

pub struct CatchErrorObserver<Item, E2, F> {
  observer: Subscriber<Item, E2>,
  f: Rc<F>,
}

impl<Item: 'static, Err, E2: 'static, F> Observer<Item, Err> for CatchErrorObserver<Item, E2, F>
where
  F: Fn(Err) -> Observable<Item, E2>,
{
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(&mut self, err: Err) {
    tracing::debug!("catch_error switching to fallback observable");
    let fallback = (self.f)(err);
    let subscription = fallback.subscribe_with(self.observer.clone());
    self.observer.add(subscription);
  }

  fn complete(&mut self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
