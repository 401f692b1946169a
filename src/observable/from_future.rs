use std::future::Future;

use futures::future::FutureExt;

use super::Observable;
use crate::scheduler::Scheduler;

/// Converts a `Future` resolving to a `Result` into an observable.
///
/// `Ok(v)` is emitted as a value followed by completion; `Err(e)` becomes the
/// error signal. Like a promise, the future runs at most once and every
/// subscriber observes the same outcome, which is why the output has to be
/// `Clone`. The continuation runs on `scheduler`; unsubscribing before the
/// future resolves cancels the continuation.
///
/// ```rust
/// use std::{cell::Cell, rc::Rc};
///
/// use bael_stream::{prelude::*, scheduler::TestScheduler};
/// use futures::future;
///
/// TestScheduler::init();
/// let res = Rc::new(Cell::new(0));
/// let c_res = res.clone();
/// observable::from_future(future::ready(Ok::<_, ()>(1)), TestScheduler)
///   .subscribe(move |v| c_res.set(v));
/// TestScheduler::run_until_stalled();
/// assert_eq!(res.get(), 1);
/// ```
pub fn from_future<Item, Err, F, S>(future: F, scheduler: S) -> Observable<Item, Err>
where
  F: Future<Output = Result<Item, Err>> + 'static,
  Item: Clone + 'static,
  Err: Clone + 'static,
  S: Scheduler,
{
  let shared = future.shared();
  Observable::create(move |subscriber| {
    let future = shared.clone();
    let settle = subscriber.clone();
    scheduler.spawn(async move {
      match future.await {
        Ok(v) => {
          settle.next(v);
          settle.complete();
        }
        Err(e) => settle.error(e),
      }
    })
  })
}
