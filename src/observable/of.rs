use super::Observable;

/// Creates an observable producing the given values in order, then
/// completing. Never emits an error.
///
/// ```
/// use bael_stream::prelude::*;
///
/// observable::of::<_, ()>(["a", "b", "c"]).subscribe(|v| println!("{}", v));
/// // print log:
/// // a
/// // b
/// // c
/// ```
#[inline]
pub fn of<Item, Err>(values: impl IntoIterator<Item = Item> + Clone + 'static) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  from_iter(values)
}

/// Creates an observable that emits every item of an iterable.
///
/// The iterable is cloned for each subscription, so every subscriber sees
/// the full sequence. Emission stops as soon as the downstream is closed,
/// which makes unbounded iterators safe to combine with `take`.
pub fn from_iter<Item, Err, I>(iter: I) -> Observable<Item, Err>
where
  I: IntoIterator<Item = Item> + Clone + 'static,
  Item: 'static,
  Err: 'static,
{
  Observable::create(move |subscriber| {
    for v in iter.clone() {
      if subscriber.is_closed() {
        return;
      }
      subscriber.next(v);
    }
    subscriber.complete();
  })
}

/// Emits `count` consecutive integers starting at `start`. The sequence
/// stops short of `i64::MAX` rather than wrapping.
pub fn range<Err: 'static>(start: i64, count: usize) -> Observable<i64, Err> {
  let end = start.saturating_add(i64::try_from(count).unwrap_or(i64::MAX));
  from_iter(start..end)
}

/// Conversion used by [`from`].
pub trait IntoObservable<Item, Err> {
  fn into_observable(self) -> Observable<Item, Err>;
}

impl<Item, Err> IntoObservable<Item, Err> for Observable<Item, Err> {
  #[inline]
  fn into_observable(self) -> Observable<Item, Err> { self }
}

impl<Item, Err, I> IntoObservable<Item, Err> for I
where
  I: IntoIterator<Item = Item> + Clone + 'static,
  Item: 'static,
  Err: 'static,
{
  #[inline]
  fn into_observable(self) -> Observable<Item, Err> { from_iter(self) }
}

/// Converts an iterable, or passes an observable through unchanged.
///
/// Futures are converted with [`from_future`](super::from_future), which
/// needs a scheduler to run on.
#[inline]
pub fn from<Item, Err>(source: impl IntoObservable<Item, Err>) -> Observable<Item, Err> {
  source.into_observable()
}

#[cfg(test)]
mod test {
  use std::{
    cell::{Cell, RefCell},
    rc::Rc,
  };

  use crate::prelude::*;

  #[test]
  fn of_emits_in_order_then_completes() {
    let log = Rc::new(RefCell::new(vec![]));
    let (c_next, c_complete) = (log.clone(), log.clone());
    observable::of::<_, ()>([1, 2, 3]).subscribe_all(
      move |v| c_next.borrow_mut().push(v.to_string()),
      |_| {},
      move || c_complete.borrow_mut().push("complete".to_owned()),
    );
    // synchronous: everything happened inside `subscribe`
    assert_eq!(*log.borrow(), vec!["1", "2", "3", "complete"]);
  }

  #[test]
  fn from_iter_stops_when_closed() {
    let pulled = Rc::new(Cell::new(0));
    let c_pulled = pulled.clone();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::from_iter::<_, (), _>((0..).inspect(move |_| c_pulled.set(c_pulled.get() + 1)))
      .take(3)
      .subscribe(move |v| c_seen.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![0, 1, 2]);
    assert_eq!(pulled.get(), 4);
  }

  #[test]
  fn range_counts() {
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::range::<()>(5, 3).subscribe(move |v| c_seen.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![5, 6, 7]);

    let hits = Rc::new(Cell::new(0));
    let c_hits = hits.clone();
    observable::range::<()>(0, 0).subscribe(move |_| c_hits.set(c_hits.get() + 1));
    assert_eq!(hits.get(), 0);
  }

  #[test]
  fn range_count_beyond_i64_saturates() {
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    observable::range::<()>(i64::MAX - 2, usize::MAX).subscribe(move |v| c_seen.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![i64::MAX - 2, i64::MAX - 1]);
  }

  #[test]
  fn from_passes_observables_through() {
    let seen = Rc::new(RefCell::new(vec![]));
    let (a, b) = (seen.clone(), seen.clone());
    let source: Observable<i32, ()> = observable::from(vec![1, 2]);
    observable::from(source.clone()).subscribe(move |v| a.borrow_mut().push(v));
    source.subscribe(move |v| b.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![1, 2, 1, 2]);
  }
}
