//! `Scheduler` for a tokio `LocalSet`.
use std::future::Future;

use super::{Duration, Scheduler};
use crate::subscription::{Subscription, Teardown};

/// Runs timers and futures with `tokio::task::spawn_local`.
///
/// Every method must be called from inside a `tokio::task::LocalSet`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioLocalScheduler;

impl Scheduler for TokioLocalScheduler {
  fn schedule<F>(&self, delay: Duration, task: F) -> Subscription
  where
    F: FnOnce() + 'static,
  {
    let done = Subscription::default();
    let c_done = done.clone();
    let handle = self.spawn(async move {
      tokio::time::sleep(delay).await;
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
    let join = tokio::task::spawn_local(future);
    let subscription = Subscription::default();
    subscription.add(Teardown::from_fn(move || join.abort()));
    subscription
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use futures::channel::oneshot;
  use tokio::task::LocalSet;

  use super::*;
  use crate::prelude::*;

  #[tokio::test(flavor = "current_thread")]
  async fn interval_on_local_set() {
    let local = LocalSet::new();
    let ticks = Rc::new(RefCell::new(vec![]));
    let c_ticks = ticks.clone();
    local
      .run_until(async move {
        let (tx, rx) = oneshot::channel::<()>();
        let mut tx = Some(tx);
        observable::interval::<()>(Duration::from_millis(1), TokioLocalScheduler)
          .take(3)
          .subscribe_all(
            move |v| c_ticks.borrow_mut().push(v),
            |_| {},
            move || {
              if let Some(tx) = tx.take() {
                let _ = tx.send(());
              }
            },
          );
        let _ = rx.await;
      })
      .await;
    assert_eq!(*ticks.borrow(), vec![0, 1, 2]);
  }
}
