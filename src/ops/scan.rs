use std::rc::Rc;

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Applies a binary operator closure to each emitted item and an
  /// accumulator, emitting every intermediate accumulator.
  ///
  /// Each subscription starts from its own clone of `seed`.
  ///
  /// ```
  /// use bael_stream::prelude::*;
  ///
  /// observable::of::<_, ()>([1, 1, 1])
  ///   .scan(100, |acc, v| acc + v)
  ///   .subscribe(|v| println!("{}", v));
  /// // print log:
  /// // 101
  /// // 102
  /// // 103
  /// ```
  pub fn scan<Acc, F>(&self, seed: Acc, f: F) -> Observable<Acc, Err>
  where
    Acc: Clone + 'static,
    F: Fn(Acc, Item) -> Acc + 'static,
  {
    let f = Rc::new(f);
    self.lift(move |observer| ScanObserver { observer, f: f.clone(), acc: Some(seed.clone()) })
  }
}

pub struct ScanObserver<Acc, Err, F> {
  observer: Subscriber<Acc, Err>,
  f: Rc<F>,
  acc: Option<Acc>,
}

impl<Item, Acc, Err, F> Observer<Item, Err> for ScanObserver<Acc, Err, F>
where
  Acc: Clone,
  F: Fn(Acc, Item) -> Acc,
{
  fn next(&mut self, value: Item) {
    if let Some(acc) = self.acc.take() {
      let acc = (self.f)(acc, value);
      self.acc = Some(acc.clone());
      self.observer.next(acc);
    }
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
