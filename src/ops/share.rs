use std::{cell::RefCell, rc::Rc};

use crate::{
  observable::Observable,
  observer::Observer,
  subject::Subject,
  subscriber::Subscriber,
  subscription::{Subscription, Teardown},
};

impl<Item, Err> Observable<Item, Err>
where
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  /// Shares one execution of the source between all subscribers.
  ///
  /// The first subscriber connects to the source through an internal
  /// [`Subject`]; later ones join the running execution. When the last
  /// subscriber leaves the source is unsubscribed, and when the source
  /// finishes the next subscriber starts a fresh execution.
  pub fn share(&self) -> Observable<Item, Err> {
    let source = self.clone();
    let state = Rc::new(RefCell::new(ShareState { subject: None, connection: None, ref_count: 0 }));
    Observable::create(move |subscriber: Subscriber<Item, Err>| {
      let (subject, connect) = {
        let mut state = state.borrow_mut();
        state.ref_count += 1;
        match &state.subject {
          Some(subject) => (subject.clone(), false),
          None => {
            let subject = Subject::default();
            state.subject = Some(subject.clone());
            (subject, true)
          }
        }
      };
      let inner = subject.as_observable().subscribe_with(subscriber);
      if connect {
        tracing::trace!("share connecting to source");
        let connection = source.subscribe_with(ShareSink { subject, state: state.clone() });
        if !connection.is_closed() {
          state.borrow_mut().connection = Some(connection);
        }
      }
      let state = state.clone();
      Teardown::from_fn(move || {
        inner.unsubscribe();
        let connection = {
          let mut state = state.borrow_mut();
          state.ref_count = state.ref_count.saturating_sub(1);
          if state.ref_count == 0 {
            state.subject = None;
            state.connection.take()
          } else {
            None
          }
        };
        if let Some(connection) = connection {
          tracing::trace!("share disconnecting from source");
          connection.unsubscribe();
        }
      })
    })
  }
}

struct ShareState<Item, Err> {
  subject: Option<Subject<Item, Err>>,
  connection: Option<Subscription>,
  ref_count: usize,
}

/// Feeds the shared subject and forgets the execution once it finishes.
struct ShareSink<Item, Err> {
  subject: Subject<Item, Err>,
  state: Rc<RefCell<ShareState<Item, Err>>>,
}

impl<Item, Err> ShareSink<Item, Err> {
  fn reset(&self) {
    let mut state = self.state.borrow_mut();
    state.subject = None;
    state.connection = None;
  }
}

impl<Item: Clone + 'static, Err: Clone + 'static> Observer<Item, Err> for ShareSink<Item, Err> {
  fn next(&mut self, value: Item) { self.subject.next(value) }

  fn error(&mut self, err: Err) {
    self.reset();
    self.subject.error(err)
  }

  fn complete(&mut self) {
    self.reset();
    self.subject.complete()
  }
}

#[cfg(test)]
mod test {
  use std::{
    cell::{Cell, RefCell},
    rc::Rc,
  };

  use crate::prelude::*;

  #[test]
  fn one_execution_for_all_subscribers() {
    let source = Subject::<i32, ()>::default();
    let runs = Rc::new(Cell::new(0));
    let c_runs = runs.clone();
    let c_source = source.clone();
    let shared = observable::defer(move || {
      c_runs.set(c_runs.get() + 1);
      c_source.as_observable()
    })
    .share();

    let seen = Rc::new(RefCell::new(vec![]));
    let (a, b) = (seen.clone(), seen.clone());
    shared.subscribe(move |v| a.borrow_mut().push(format!("a{v}")));
    shared.subscribe(move |v| b.borrow_mut().push(format!("b{v}")));
    source.next(1);

    assert_eq!(runs.get(), 1);
    assert_eq!(*seen.borrow(), vec!["a1", "b1"]);
  }

  #[test]
  fn last_unsubscribe_disconnects() {
    let source = Subject::<i32, ()>::default();
    let shared = source.as_observable().share();
    let first = shared.subscribe(|_| {});
    let second = shared.subscribe(|_| {});
    assert_eq!(source.observer_count(), 1);
    first.unsubscribe();
    assert_eq!(source.observer_count(), 1);
    second.unsubscribe();
    assert_eq!(source.observer_count(), 0);

    shared.subscribe(|_| {});
    assert_eq!(source.observer_count(), 1);
  }

  #[test]
  fn restarts_after_completion() {
    let runs = Rc::new(Cell::new(0));
    let c_runs = runs.clone();
    let shared = Observable::<i32, ()>::create(move |s| {
      c_runs.set(c_runs.get() + 1);
      s.next(c_runs.get() as i32);
      s.complete();
    })
    .share();

    let seen = Rc::new(RefCell::new(vec![]));
    let (a, b) = (seen.clone(), seen.clone());
    shared.subscribe(move |v| a.borrow_mut().push(v));
    shared.subscribe(move |v| b.borrow_mut().push(v));
    assert_eq!(runs.get(), 2);
    assert_eq!(*seen.borrow(), vec![1, 2]);
  }
}
