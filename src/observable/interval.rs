use super::Observable;
use crate::scheduler::{Duration, Scheduler};

/// Creates an observable which emits `0, 1, 2, ...` every `period`, starting
/// one `period` after subscription. It never completes on its own.
///
/// Each subscription starts its own timer; unsubscribing (or a downstream
/// `take` completing) cancels it.
pub fn interval<Err: 'static>(period: Duration, scheduler: impl Scheduler) -> Observable<usize, Err> {
  interval_at(period, period, scheduler)
}

/// Like [`interval`], but the first value arrives after `delay`.
pub fn interval_at<Err: 'static>(
  delay: Duration, period: Duration, scheduler: impl Scheduler,
) -> Observable<usize, Err> {
  Observable::create(move |subscriber| {
    let mut seq = 0;
    let ticker = subscriber.clone();
    scheduler.schedule_periodic(delay, period, move || {
      ticker.next(seq);
      seq += 1;
    })
  })
}
