use super::Observable;
use crate::scheduler::{Duration, Scheduler};

/// Emits `0` after `delay`. With `period`, keeps emitting `1, 2, ...` every
/// `period` afterwards; without it, completes right after the first value.
pub fn timer<Err: 'static>(
  delay: Duration, period: Option<Duration>, scheduler: impl Scheduler,
) -> Observable<usize, Err> {
  match period {
    Some(period) => super::interval_at(delay, period, scheduler),
    None => Observable::create(move |subscriber| {
      let fire = subscriber.clone();
      scheduler.schedule(delay, move || {
        fire.next(0);
        fire.complete();
      })
    }),
  }
}
