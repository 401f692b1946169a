use std::rc::Rc;

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Creates a new stream which calls a closure on each element and uses
  /// its return as the value.
  pub fn map<B, F>(&self, f: F) -> Observable<B, Err>
  where
    B: 'static,
    F: Fn(Item) -> B + 'static,
  {
    let map = Rc::new(f);
    self.lift(move |observer| MapObserver { observer, map: map.clone() })
  }

  /// Like [`Observable::map`], but the closure may fail. A failure is sent
  /// downstream as the error signal and ends the stream.
  pub fn try_map<B, F>(&self, f: F) -> Observable<B, Err>
  where
    B: 'static,
    F: Fn(Item) -> Result<B, Err> + 'static,
  {
    let map = Rc::new(f);
    self.lift(move |observer| TryMapObserver { observer, map: map.clone() })
  }
}

pub struct MapObserver<B, Err, M> {
  observer: Subscriber<B, Err>,
  map: Rc<M>,
}

impl<Item, B, Err, M> Observer<Item, Err> for MapObserver<B, Err, M>
where
  M: Fn(Item) -> B,
{
  fn next(&mut self, value: Item) { self.observer.next((self.map)(value)) }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}

pub struct TryMapObserver<B, Err, M> {
  observer: Subscriber<B, Err>,
  map: Rc<M>,
}

impl<Item, B, Err, M> Observer<Item, Err> for TryMapObserver<B, Err, M>
where
  M: Fn(Item) -> Result<B, Err>,
{
  fn next(&mut self, value: Item) {
    match (self.map)(value) {
      Ok(v) => self.observer.next(v),
      Err(e) => self.observer.error(e),
    }
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) { self.observer.complete() }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
