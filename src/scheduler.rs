//! Timers and task spawning.
//!
//! Time-based operators (`debounce_time`, `throttle_time`, `delay`) and
//! factories (`interval`, `timer`, `from_future`) never touch a global
//! clock. They take a [`Scheduler`] argument, which stands in for the host's
//! `setTimeout`/`setInterval` and promise continuations.
//!
//! Available schedulers:
//!
//! | Scheduler | Availability |
//! |---|---|
//! | [`TestScheduler`] | always; virtual time for deterministic tests |
//! | `futures::executor::LocalSpawner` | features `futures-scheduler` + `timer`, native targets |
//! | `TokioLocalScheduler` | feature `tokio-scheduler`, inside a `tokio::task::LocalSet` |
//! | `WasmScheduler` | `wasm32` targets |
use std::{cell::RefCell, future::Future, rc::Rc};

pub use std::time::Duration;

use crate::subscription::Subscription;

mod test_scheduler;
pub use test_scheduler::TestScheduler;

#[cfg(all(feature = "futures-scheduler", feature = "timer", not(target_arch = "wasm32")))]
mod futures_scheduler;

#[cfg(feature = "tokio-scheduler")]
mod tokio_scheduler;
#[cfg(feature = "tokio-scheduler")]
pub use tokio_scheduler::TokioLocalScheduler;

#[cfg(target_arch = "wasm32")]
mod wasm_scheduler;
#[cfg(target_arch = "wasm32")]
pub use wasm_scheduler::WasmScheduler;

/// A Scheduler runs work later: after a delay, or when a future resolves.
///
/// Every method returns a [`Subscription`]; unsubscribing it cancels the
/// work if it has not run yet. Handles of one-shot tasks close themselves
/// once the task has run.
pub trait Scheduler: Clone + 'static {
  /// Runs `task` once, `delay` from now.
  fn schedule<F>(&self, delay: Duration, task: F) -> Subscription
  where
    F: FnOnce() + 'static;

  /// Drives `future` to completion on this scheduler's executor.
  fn spawn<Fut>(&self, future: Fut) -> Subscription
  where
    Fut: Future<Output = ()> + 'static;

  /// Runs `task` after `delay`, then every `period` until the returned
  /// subscription is cancelled.
  fn schedule_periodic<F>(&self, delay: Duration, period: Duration, task: F) -> Subscription
  where
    F: FnMut() + 'static,
  {
    let handle = Subscription::default();
    repeat(self.clone(), delay, period, Rc::new(RefCell::new(task)), handle.clone());
    handle
  }
}

fn repeat<S, F>(scheduler: S, delay: Duration, period: Duration, task: Rc<RefCell<F>>, handle: Subscription)
where
  S: Scheduler,
  F: FnMut() + 'static,
{
  if handle.is_closed() {
    return;
  }
  let next_scheduler = scheduler.clone();
  let next_handle = handle.clone();
  let tick = scheduler.schedule(delay, move || {
    if next_handle.is_closed() {
      return;
    }
    if let Ok(mut task) = task.try_borrow_mut() {
      (*task)();
    }
    repeat(next_scheduler, period, period, task, next_handle);
  });
  handle.add(tick);
}

#[cfg(test)]
mod test {
  use std::cell::Cell;

  use super::*;

  #[test]
  fn periodic_until_cancelled() {
    TestScheduler::init();
    let ticks = Rc::new(Cell::new(0));
    let c_ticks = ticks.clone();
    let handle = TestScheduler.schedule_periodic(
      Duration::from_millis(5),
      Duration::from_millis(10),
      move || c_ticks.set(c_ticks.get() + 1),
    );

    TestScheduler::advance_by(Duration::from_millis(4));
    assert_eq!(ticks.get(), 0);
    TestScheduler::advance_by(Duration::from_millis(1));
    assert_eq!(ticks.get(), 1);
    TestScheduler::advance_by(Duration::from_millis(20));
    assert_eq!(ticks.get(), 3);

    handle.unsubscribe();
    TestScheduler::advance_by(Duration::from_millis(100));
    assert_eq!(ticks.get(), 3);
    assert_eq!(TestScheduler::pending_count(), 0);
  }
}
