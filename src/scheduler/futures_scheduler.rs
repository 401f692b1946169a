//! `Scheduler` for the `futures` single-threaded executor.
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use bael_stream::prelude::*;
//! use futures::executor::LocalPool;
//!
//! let mut pool = LocalPool::new();
//! let ticks = Rc::new(RefCell::new(vec![]));
//! let c_ticks = ticks.clone();
//! observable::interval::<()>(Duration::from_millis(1), pool.spawner())
//!   .take(3)
//!   .subscribe(move |v| c_ticks.borrow_mut().push(v));
//! pool.run();
//! assert_eq!(*ticks.borrow(), vec![0, 1, 2]);
//! ```
use std::future::Future;

use futures::{
  executor::LocalSpawner,
  future::{abortable, FutureExt},
  task::LocalSpawnExt,
};

use super::{Duration, Scheduler};
use crate::subscription::{Subscription, Teardown};

impl Scheduler for LocalSpawner {
  fn schedule<F>(&self, delay: Duration, task: F) -> Subscription
  where
    F: FnOnce() + 'static,
  {
    let done = Subscription::default();
    let c_done = done.clone();
    let handle = Scheduler::spawn(self, async move {
      futures_time::task::sleep(delay.into()).await;
      task();
      c_done.unsubscribe();
    });
    done.add(handle);
    done
  }

  fn spawn<Fut>(&self, future: Fut) -> Subscription
  where
    Fut: Future<Output = ()> + 'static,
  {
    let (future, abort) = abortable(future);
    let subscription = Subscription::default();
    match self.spawn_local(future.map(|_| ())) {
      Ok(()) => subscription.add(Teardown::from_fn(move || abort.abort())),
      Err(err) => {
        tracing::warn!(%err, "executor refused to spawn task");
        subscription.unsubscribe();
      }
    }
    subscription
  }
}

#[cfg(test)]
mod tests {
  use std::{
    cell::{Cell, RefCell},
    rc::Rc,
    time::Instant,
  };

  use futures::executor::LocalPool;

  use super::*;

  #[test]
  fn delayed_task_runs() {
    let mut pool = LocalPool::new();
    let stamp = Instant::now();
    let ran = Rc::new(Cell::new(false));
    let c_ran = ran.clone();
    let handle = pool.spawner().schedule(Duration::from_millis(5), move || c_ran.set(true));
    pool.run();
    assert!(ran.get());
    assert!(handle.is_closed());
    assert!(stamp.elapsed() >= Duration::from_millis(5));
  }

  #[test]
  fn cancelled_task_is_dropped() {
    let mut pool = LocalPool::new();
    let ran = Rc::new(Cell::new(false));
    let c_ran = ran.clone();
    let handle = pool.spawner().schedule(Duration::from_millis(5), move || c_ran.set(true));
    handle.unsubscribe();
    pool.run();
    assert!(!ran.get());
  }

  #[test]
  fn periodic_ticks() {
    let mut pool = LocalPool::new();
    let ticks = Rc::new(RefCell::new(0));
    let c_ticks = ticks.clone();
    let handle = Rc::new(RefCell::new(None::<Subscription>));
    let c_handle = handle.clone();
    let sub = pool.spawner().schedule_periodic(Duration::ZERO, Duration::from_millis(1), move || {
      *c_ticks.borrow_mut() += 1;
      if *c_ticks.borrow() == 3 {
        if let Some(h) = c_handle.borrow().as_ref() {
          h.unsubscribe();
        }
      }
    });
    *handle.borrow_mut() = Some(sub);
    pool.run();
    assert_eq!(*ticks.borrow(), 3);
  }
}
