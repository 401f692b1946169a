use std::{cell::Cell, rc::Rc};

use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

/// Subscribes to the sources one after another: the next one only once the
/// previous completed.
pub fn concat<Item, Err>(sources: impl IntoIterator<Item = Observable<Item, Err>>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  let sources: Rc<[Observable<Item, Err>]> = sources.into_iter().collect();
  Observable::create(move |subscriber| {
    let sequence = Rc::new(Sequence {
      sources: sources.clone(),
      next: Cell::new(0),
      looping: Cell::new(false),
      requested: Cell::new(false),
    });
    advance(&sequence, &subscriber);
  })
}

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Emits the values of `other` after this observable completed.
  pub fn concat(&self, other: Observable<Item, Err>) -> Observable<Item, Err> {
    concat([self.clone(), other])
  }
}

/// Per-subscription cursor over the sources.
struct Sequence<Item, Err> {
  sources: Rc<[Observable<Item, Err>]>,
  next: Cell<usize>,
  looping: Cell<bool>,
  requested: Cell<bool>,
}

/// Moves on to the next source. When the previous source completed
/// synchronously, the outer call's loop subscribes the next one instead of
/// nesting another subscription on the stack.
fn advance<Item: 'static, Err: 'static>(
  sequence: &Rc<Sequence<Item, Err>>, subscriber: &Subscriber<Item, Err>,
) {
  sequence.requested.set(true);
  if sequence.looping.replace(true) {
    return;
  }
  while sequence.requested.replace(false) && !subscriber.is_closed() {
    let index = sequence.next.get();
    sequence.next.set(index + 1);
    let Some(source) = sequence.sources.get(index).cloned() else {
      subscriber.complete();
      break;
    };
    let observer = ConcatObserver { observer: subscriber.clone(), sequence: sequence.clone() };
    subscriber.add(source.subscribe_with(observer));
  }
  sequence.looping.set(false);
}

pub struct ConcatObserver<Item, Err> {
  observer: Subscriber<Item, Err>,
  sequence: Rc<Sequence<Item, Err>>,
}

impl<Item: 'static, Err: 'static> Observer<Item, Err> for ConcatObserver<Item, Err> {
  fn next(&mut self, value: Item) { self.observer.next(value) }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) {
    if !self.observer.is_closed() {
      advance(&self.sequence, &self.observer);
    }
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
