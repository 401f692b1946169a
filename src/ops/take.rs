use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Emits only the first `count` values, then completes and unsubscribes
  /// from the source.
  ///
  /// `take(0)` completes as soon as it is subscribed, without subscribing
  /// to the source at all.
  ///
  /// ```
  /// use bael_stream::prelude::*;
  ///
  /// observable::range::<()>(0, 10)
  ///   .take(5)
  ///   .subscribe(|v| println!("{}", v));
  ///
  /// // print logs:
  /// // 0
  /// // 1
  /// // 2
  /// // 3
  /// // 4
  /// ```
  pub fn take(&self, count: usize) -> Observable<Item, Err> {
    if count == 0 {
      return Observable::create(|subscriber: Subscriber<Item, Err>| subscriber.complete());
    }
    self.lift(move |observer| TakeObserver { observer, remaining: count })
  }

  /// Emits only the first value, then completes.
  #[inline]
  pub fn first(&self) -> Observable<Item, Err> { self.take(1) }
}

pub struct TakeObserver<Item, Err> {
  observer: Subscriber<Item, Err>,
  remaining: usize,
}

impl<Item, Err> Observer<Item, Err> for TakeObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    if self.remaining > 0 {
      self.remaining -= 1;
      self.observer.next(value);
      if self.remaining == 0 {
        self.observer.complete();
      }
    }
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.remaining == 0 || self.observer.is_closed() }
}
