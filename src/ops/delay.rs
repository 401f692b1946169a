use crate::{
  observable::Observable,
  observer::Observer,
  scheduler::{Duration, Scheduler},
  subscriber::Subscriber,
};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Shifts every value and the completion `duration` later, keeping their
  /// order. Errors are forwarded at once and cancel what is still in
  /// flight.
  pub fn delay<S: Scheduler>(&self, duration: Duration, scheduler: S) -> Observable<Item, Err> {
    self.lift(move |observer| DelayObserver { observer, scheduler: scheduler.clone(), duration })
  }
}

pub struct DelayObserver<Item, Err, S> {
  observer: Subscriber<Item, Err>,
  scheduler: S,
  duration: Duration,
}

impl<Item: 'static, Err: 'static, S: Scheduler> Observer<Item, Err> for DelayObserver<Item, Err, S> {
  fn next(&mut self, value: Item) {
    let observer = self.observer.clone();
    let handle = self.scheduler.schedule(self.duration, move || observer.next(value));
    self.observer.add(handle);
  }

  fn error(&mut self, err: Err) { self.observer.error(err) }

  fn complete(&mut self) {
    let observer = self.observer.clone();
    let handle = self.scheduler.schedule(self.duration, move || observer.complete());
    self.observer.add(handle);
  }

  fn is_closed(&self) -> bool { self.observer.is_closed() }
}
