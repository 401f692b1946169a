//! Test Scheduler for deterministic testing of time-based operators.
//!
//! Provides virtual time that only advances when explicitly instructed,
//! enabling deterministic testing of `delay`, `debounce_time`, `interval`,
//! etc.
//!
//! # Usage
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use bael_stream::{prelude::*, scheduler::TestScheduler};
//!
//! // Reset virtual time and the task queue
//! TestScheduler::init();
//!
//! let seen = Rc::new(RefCell::new(vec![]));
//! let c_seen = seen.clone();
//! observable::of::<_, ()>([42])
//!   .delay(Duration::from_millis(100), TestScheduler)
//!   .subscribe(move |v| c_seen.borrow_mut().push(v));
//! assert!(seen.borrow().is_empty());
//!
//! // Advance virtual time to trigger the delayed emission
//! TestScheduler::advance_by(Duration::from_millis(100));
//! assert_eq!(*seen.borrow(), vec![42]);
//! ```
//!
//! # Thread Safety
//!
//! TestScheduler uses thread-local storage, so each thread has its own
//! independent virtual time and task queue. This ensures test isolation when
//! running tests in parallel across different threads.
use std::{
  cell::{Cell, RefCell},
  cmp::Ordering,
  collections::BinaryHeap,
  future::Future,
  rc::Rc,
};

use futures::{
  executor::{LocalPool, LocalSpawner},
  future::{abortable, FutureExt},
  task::LocalSpawnExt,
};

use super::{Duration, Scheduler};
use crate::subscription::{Subscription, Teardown};

struct TestSchedulerState {
  virtual_time: Duration,
  task_queue: BinaryHeap<ScheduledTask>,
  next_task_id: usize,
}

impl Default for TestSchedulerState {
  fn default() -> Self {
    Self { virtual_time: Duration::ZERO, task_queue: BinaryHeap::new(), next_task_id: 0 }
  }
}

struct ScheduledTask {
  scheduled_time: Duration,
  task_id: usize,
  task: Box<dyn FnOnce()>,
  cancelled: Rc<Cell<bool>>,
  handle: Subscription,
}

impl PartialEq for ScheduledTask {
  fn eq(&self, other: &Self) -> bool {
    self.scheduled_time == other.scheduled_time && self.task_id == other.task_id
  }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ScheduledTask {
  fn cmp(&self, other: &Self) -> Ordering {
    // Min-heap: earlier times first, then FIFO by task_id
    other
      .scheduled_time
      .cmp(&self.scheduled_time)
      .then_with(|| other.task_id.cmp(&self.task_id))
  }
}

thread_local! {
  static TEST_SCHEDULER_STATE: RefCell<TestSchedulerState>
    = RefCell::new(TestSchedulerState::default());
  static POOL: RefCell<LocalPool> = RefCell::new(LocalPool::new());
  static SPAWNER: RefCell<LocalSpawner> = POOL.with(|pool| RefCell::new(pool.borrow().spawner()));
}

/// A virtual time scheduler for deterministic testing.
///
/// This is a zero-sized type that accesses thread-local state.
/// All instances in the same thread share the same virtual time and task queue.
/// Spawned futures run on a thread-local `LocalPool` that is driven whenever
/// virtual time moves.
#[derive(Clone, Copy, Debug, Default)]
pub struct TestScheduler;

impl TestScheduler {
  /// Resets virtual time to zero and drops every pending task and future.
  ///
  /// Call it at the start of each test.
  pub fn init() {
    TEST_SCHEDULER_STATE.with(|state| {
      let mut state = state.borrow_mut();
      state.virtual_time = Duration::ZERO;
      state.task_queue.clear();
      state.next_task_id = 0;
    });
    let pool = LocalPool::new();
    let spawner = pool.spawner();
    POOL.with(|p| *p.borrow_mut() = pool);
    SPAWNER.with(|s| *s.borrow_mut() = spawner);
  }

  /// Get the current virtual time.
  pub fn now() -> Duration { TEST_SCHEDULER_STATE.with(|state| state.borrow().virtual_time) }

  /// Number of scheduled, not yet cancelled, timer tasks.
  pub fn pending_count() -> usize {
    TEST_SCHEDULER_STATE
      .with(|state| state.borrow().task_queue.iter().filter(|t| !t.cancelled.get()).count())
  }

  /// Check if there are no pending timer tasks.
  pub fn is_empty() -> bool { Self::pending_count() == 0 }

  /// Advance virtual time by `duration` and execute every task due by then.
  ///
  /// Tasks are executed in order of their scheduled time, with FIFO ordering
  /// for tasks scheduled at the same time. Virtual time is set to each
  /// task's due time while it runs.
  pub fn advance_by(duration: Duration) {
    let target_time = Self::now() + duration;
    Self::execute_tasks_until(Some(target_time));
    TEST_SCHEDULER_STATE.with(|state| {
      let mut state = state.borrow_mut();
      if state.virtual_time < target_time {
        state.virtual_time = target_time;
      }
    });
  }

  /// Execute all pending tasks by advancing time to each task's scheduled time.
  ///
  /// Never returns while an uncancelled periodic task is scheduled; use
  /// [`TestScheduler::advance_by`] for those.
  pub fn flush() { Self::execute_tasks_until(None); }

  /// Polls spawned futures until none of them can make progress.
  pub fn run_until_stalled() { POOL.with(|pool| pool.borrow_mut().run_until_stalled()); }

  fn execute_tasks_until(target_time: Option<Duration>) {
    Self::run_until_stalled();
    loop {
      let task = TEST_SCHEDULER_STATE.with(|state| {
        let mut state = state.borrow_mut();
        loop {
          let due = state
            .task_queue
            .peek()
            .is_some_and(|peek| target_time.map_or(true, |limit| peek.scheduled_time <= limit));
          if !due {
            return None;
          }
          let scheduled = state.task_queue.pop()?;
          if scheduled.cancelled.get() {
            continue;
          }
          state.virtual_time = scheduled.scheduled_time;
          return Some(scheduled);
        }
      });

      let Some(ScheduledTask { task, handle, .. }) = task else {
        break;
      };
      task();
      handle.unsubscribe();
      Self::run_until_stalled();
    }
  }
}

impl Scheduler for TestScheduler {
  fn schedule<F>(&self, delay: Duration, task: F) -> Subscription
  where
    F: FnOnce() + 'static,
  {
    let cancelled = Rc::new(Cell::new(false));
    let handle = Subscription::default();
    let c_cancelled = cancelled.clone();
    handle.add(Teardown::from_fn(move || c_cancelled.set(true)));

    TEST_SCHEDULER_STATE.with(|state| {
      let mut state = state.borrow_mut();
      let task_id = state.next_task_id;
      state.next_task_id += 1;
      let scheduled_time = state.virtual_time + delay;
      tracing::trace!(?scheduled_time, task_id, "test task scheduled");
      state.task_queue.push(ScheduledTask {
        scheduled_time,
        task_id,
        task: Box::new(task),
        cancelled,
        handle: handle.clone(),
      });
    });
    handle
  }

  fn spawn<Fut>(&self, future: Fut) -> Subscription
  where
    Fut: Future<Output = ()> + 'static,
  {
    let (future, abort) = abortable(future);
    let subscription = Subscription::default();
    let spawned = SPAWNER.with(|s| s.borrow().spawn_local(future.map(|_| ())));
    match spawned {
      Ok(()) => subscription.add(Teardown::from_fn(move || abort.abort())),
      Err(err) => {
        tracing::warn!(%err, "test scheduler could not spawn future");
        subscription.unsubscribe();
      }
    }
    subscription
  }
}
