use std::rc::Rc;

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Drops a value equal to the one emitted just before it.
  ///
  /// ```
  /// use bael_stream::prelude::*;
  ///
  /// observable::of::<_, ()>([1, 1, 2, 2, 1])
  ///   .distinct_until_changed()
  ///   .to_array()
  ///   .subscribe(|v| assert_eq!(v, vec![1, 2, 1]));
  /// ```
  pub fn distinct_until_changed(&self) -> Observable<Item, Err>
  where
    Item: PartialEq + Clone,
  {
    self.distinct_until_changed_by(|a: &Item, b: &Item| a == b)
  }

  /// Like [`Observable::distinct_until_changed`], with `same` deciding
  /// whether the previous and the current value count as equal.
  pub fn distinct_until_changed_by<F>(&self, same: F) -> Observable<Item, Err>
  where
    Item: Clone,
    F: Fn(&Item, &Item) -> bool + 'static,
  {
    let same = Rc::new(same);
    self.lift(move |observer| DistinctUntilChangedObserver {
      observer,
      same: same.clone(),
      last: None,
    })
  }
}

pub struct DistinctUntilChangedObserver<Item, Err, F> {
  observer: Subscriber<Item, Err>,
  same: Rc<F>,
  last: Option<Item>,
}

impl<Item, Err, F> Observer<Item, Err> for DistinctUntilChangedObserver<Item, Err, F>
where
  Item: Clone,
  F: Fn(&Item, &Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if self.last.as_ref().map_or(false, |last| (self.same)(last, &value)) {
      return;
    }
    self.last = Some(value.clone());
    self.observer.next(value);
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
