use std::rc::Rc;

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Accumulates every value with `f` and emits the final accumulator once
  /// the source completes. An empty source emits `seed`.
  ///
  /// ```
  /// use bael_stream::prelude::*;
  ///
  /// observable::range::<()>(1, 4)
  ///   .reduce(0, |acc, v| acc + v)
  ///   .subscribe(|total| assert_eq!(total, 10));
  /// ```
  pub fn reduce<Acc, F>(&self, seed: Acc, f: F) -> Observable<Acc, Err>
  where
    Acc: Clone + 'static,
    F: Fn(Acc, Item) -> Acc + 'static,
  {
    let f = Rc::new(f);
    self.lift(move |observer| ReduceObserver { observer, f: f.clone(), acc: Some(seed.clone()) })
  }

  /// Collects every value into a `Vec`, emitted once on completion.
  pub fn to_array(&self) -> Observable<Vec<Item>, Err> {
    let push = Rc::new(|mut acc: Vec<Item>, v: Item| {
      acc.push(v);
      acc
    });
    self.lift(move |observer| ReduceObserver { observer, f: push.clone(), acc: Some(Vec::new()) })
  }
}

pub struct ReduceObserver<Acc, Err, F> {
  observer: Subscriber<Acc, Err>,
  f: Rc<F>,
  acc: Option<Acc>,
}

impl<Item, Acc, Err, F> Observer<Item, Err> for ReduceObserver<Acc, Err, F>
where
  F: Fn(Acc, Item) -> Acc,
{
  fn next(&mut self, value: Item) {
    if let Some(acc) = self.acc.take() {
      self.acc = Some((self.f)(acc, value));
    }
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) {
    if let Some(acc) = self.acc.take() {
      self.observer.next(acc);
    }
    self.observer.complete()
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
