use crate::{
  observable::Observable,
  observer::Observer,
  scheduler::{Duration, Scheduler},
  subscriber::Subscriber,
  subscription::Subscription,
};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Emits a value only after `duration` passed without the source emitting
  /// another one. Each new value restarts the timer.
  ///
  /// Completion and error cancel the pending timer: a value still waiting
  /// when the source ends is dropped.
  pub fn debounce_time<S: Scheduler>(&self, duration: Duration, scheduler: S) -> Observable<Item, Err> {
    self.lift(move |observer| DebounceObserver {
      observer,
      scheduler: scheduler.clone(),
      duration,
      pending: None,
    })
  }
}

pub struct DebounceObserver<Item, Err, S> {
  observer: Subscriber<Item, Err>,
  scheduler: S,
  duration: Duration,
  pending: Option<Subscription>,
}

impl<Item, Err, S> DebounceObserver<Item, Err, S> {
  fn cancel_pending(&mut self) {
    if let Some(handle) = self.pending.take() {
      handle.unsubscribe();
    }
  }
}

impl<Item: 'static, Err: 'static, S: Scheduler> Observer<Item, Err> for DebounceObserver<Item, Err, S> {
  fn next(&mut self, value: Item) {
    self.cancel_pending();
    let observer = self.observer.clone();
    let handle = self.scheduler.schedule(self.duration, move || observer.next(value));
    tracing::trace!(duration = ?self.duration, "debounce timer armed");
    self.observer.add(handle.clone());
    self.pending = Some(handle);
  }

  fn error(&mut self, err: Err) {
    self.cancel_pending();
    self.observer.error(err)
  }

  fn complete(&mut self) {
    self.cancel_pending();
    self.observer.complete()
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
