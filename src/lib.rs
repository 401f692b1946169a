//! # bael-stream: reactive streams for single-threaded hosts
//!
//! Observables, operators and subjects in the style of
//! [Reactive Extensions](http://reactivex.io/), built for one event loop:
//! everything is `Rc`-based, runs synchronously inside the call that
//! triggered it, and reaches time only through an explicit
//! [`Scheduler`](scheduler::Scheduler).
//!
//! ## Quick Start
//!
//! ```rust
//! use bael_stream::prelude::*;
//!
//! observable::from_iter::<_, (), _>(0..10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(|v| println!("Value: {}", v));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Lazy producer of values; every subscription runs it anew |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`Subject`] | Multicast observable that is also an observer |
//! | [`Scheduler`] | Timers and future spawning for time-based operators |
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): `futures::executor::LocalSpawner` as
//!   a scheduler
//! - **`timer`** (default): `futures-time` sleeping for that scheduler
//! - **`tokio-scheduler`**: `TokioLocalScheduler`, for use inside a
//!   `tokio::task::LocalSet`
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`Subject`]: subject::Subject
//! [`Scheduler`]: scheduler::Scheduler
pub mod error;
pub mod event;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod scheduler;
pub mod subject;
pub mod subscriber;
pub mod subscription;

// Re-export the prelude module
pub use prelude::*;

#[cfg(all(doctest, not(target_arch = "wasm32")))]
mod __markdown_doctests {
  mod readme {
    #![doc = include_str!("../README.md")]
  }
}
