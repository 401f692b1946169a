//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.
pub use crate::{
  error::ToFutureError,
  event::{EventEmitter, EventListenerOptions, EventTarget, ListenerId},
  observable::{self, IntoObservable, Observable},
  observer::{Notification, Observer},
  ops::into_future::ObservableFuture,
  scheduler::{Duration, Scheduler},
  subject::{
    AsyncSubject, BehaviorSubject, Phase, Publish, ReplaySubject, Subject, SubjectPolicy,
  },
  subscriber::Subscriber,
  subscription::{Subscription, SubscriptionGuard, Teardown},
};
