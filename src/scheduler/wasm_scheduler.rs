//! `Scheduler` for the browser event loop.
use std::future::Future;

use futures::future::{abortable, FutureExt};

use super::{Duration, Scheduler};
use crate::subscription::{Subscription, Teardown};

/// Runs timers with `gloo-timers` and futures with
/// `wasm_bindgen_futures::spawn_local`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WasmScheduler;

impl Scheduler for WasmScheduler {
  fn schedule<F>(&self, delay: Duration, task: F) -> Subscription
  where
    F: FnOnce() + 'static,
  {
    let done = Subscription::default();
    let c_done = done.clone();
    let handle = self.spawn(async move {
      gloo_timers::future::sleep(delay).await;
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
    wasm_bindgen_futures::spawn_local(future.map(|_| ()));
    let subscription = Subscription::default();
    subscription.add(Teardown::from_fn(move || abort.abort()));
    subscription
  }
}
