use crate::observable::{self, Observable};

/// Subscribes to every source at once and forwards all their values as
/// they arrive.
///
/// Completes when every source completed; the first error ends everything.
///
/// ```
/// use bael_stream::prelude::*;
///
/// let evens = observable::of::<_, ()>([0, 2]);
/// let odds = observable::of::<_, ()>([1, 3]);
/// observable::merge([evens, odds])
///   .to_array()
///   .subscribe(|v| assert_eq!(v, vec![0, 2, 1, 3]));
/// ```
pub fn merge<Item, Err>(sources: impl IntoIterator<Item = Observable<Item, Err>>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  let sources: Vec<_> = sources.into_iter().collect();
  observable::from_iter(sources).merge_map(|source| source)
}

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Merges `other` into this observable. See [`merge`].
  pub fn merge(&self, other: Observable<Item, Err>) -> Observable<Item, Err> {
    merge([self.clone(), other])
  }
}

#[cfg(test)]
mod test {
  use std::{
    cell::{Cell, RefCell},
    rc::Rc,
  };

  use crate::{prelude::*, scheduler::TestScheduler};

  #[test]
  fn interleaves_by_time() {
    TestScheduler::init();
    let seen = Rc::new(RefCell::new(vec![]));
    let c_seen = seen.clone();
    let fast = observable::interval::<()>(Duration::from_millis(10), TestScheduler)
      .take(3)
      .map(|v| format!("fast{v}"));
    let slow = observable::interval::<()>(Duration::from_millis(25), TestScheduler)
      .take(2)
      .map(|v| format!("slow{v}"));
    fast.merge(slow).subscribe(move |v| c_seen.borrow_mut().push(v));
    TestScheduler::advance_by(Duration::from_millis(60));
    assert_eq!(*seen.borrow(), vec!["fast0", "fast1", "slow0", "fast2", "slow1"]);
  }

  #[test]
  fn completes_after_all_sources() {
    let a = Subject::<i32, ()>::default();
    let b = Subject::<i32, ()>::default();
    let completed = Rc::new(Cell::new(false));
    let c_completed = completed.clone();
    observable::merge([a.as_observable(), b.as_observable()]).subscribe_all(
      |_| {},
      |_| {},
      move || c_completed.set(true),
    );
    a.complete();
    assert!(!completed.get());
    b.complete();
    assert!(completed.get());
  }

  #[test]
  fn error_unsubscribes_other_sources() {
    let a = Subject::<i32, &str>::default();
    let b = Subject::<i32, &str>::default();
    let errors = Rc::new(RefCell::new(vec![]));
    let c_errors = errors.clone();
    observable::merge([a.as_observable(), b.as_observable()])
      .subscribe_err(|_| {}, move |e| c_errors.borrow_mut().push(e));
    a.error("boom");
    assert_eq!(*errors.borrow(), vec!["boom"]);
    assert_eq!(b.observer_count(), 0);
  }

  #[test]
  fn no_sources_completes() {
    let completed = Rc::new(Cell::new(false));
    let c_completed = completed.clone();
    observable::merge(Vec::<Observable<i32, ()>>::new()).subscribe_all(
      |_| {},
      |_| {},
      move || c_completed.set(true),
    );
    assert!(completed.get());
  }
}
