use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Ignores the first `count` values emitted by the source.
  pub fn skip(&self, count: usize) -> Observable<Item, Err> {
    self.lift(move |observer| SkipObserver { observer, remaining: count })
  }
}

pub struct SkipObserver<Item, Err> {
  observer: Subscriber<Item, Err>,
  remaining: usize,
}

impl<Item, Err> Observer<Item, Err> for SkipObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    if self.remaining == 0 {
      self.observer.next(value);
    } else {
      self.remaining -= 1;
    }
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
