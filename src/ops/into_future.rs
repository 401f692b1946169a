//! Bridges an observable into a `Future`.
//!
//! The future resolves with the last value once the observable completes,
//! with [`ToFutureError::Source`] if it errors and with
//! [`ToFutureError::Empty`] if it completes without a value. The
//! observable is subscribed eagerly, when `to_future` is called; dropping
//! the future unsubscribes.
//!
//! ```rust
//! use bael_stream::prelude::*;
//! use futures::executor::block_on;
//!
//! let last = block_on(observable::of::<_, ()>([1, 2, 3]).to_future());
//! assert_eq!(last, Ok(3));
//!
//! let empty = block_on(observable::empty::<i32, ()>().to_future());
//! assert_eq!(empty, Err(ToFutureError::Empty));
//! ```
use std::{
  future::Future,
  pin::Pin,
  task::{ready, Context, Poll},
};

use futures::channel::oneshot;
use pin_project_lite::pin_project;

use crate::{
  error::ToFutureError, observable::Observable, observer::Observer, subscription::Subscription,
};

type Outcome<Item, Err> = Result<Item, ToFutureError<Err>>;

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Subscribes now and returns a future of the last emitted value.
  pub fn to_future(&self) -> ObservableFuture<Item, Err> {
    let (sender, receiver) = oneshot::channel();
    let subscription = self.subscribe_with(ToFutureObserver { sender: Some(sender), last: None });
    ObservableFuture { receiver, subscription }
  }
}

pin_project! {
  /// Future returned by [`Observable::to_future`].
  #[must_use = "futures do nothing unless polled"]
  pub struct ObservableFuture<Item, Err> {
    #[pin]
    receiver: oneshot::Receiver<Outcome<Item, Err>>,
    subscription: Subscription,
  }

  impl<Item, Err> PinnedDrop for ObservableFuture<Item, Err> {
    fn drop(this: Pin<&mut Self>) {
      this.subscription.unsubscribe();
    }
  }
}

impl<Item, Err> Future for ObservableFuture<Item, Err> {
  type Output = Outcome<Item, Err>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    let this = self.project();
    match ready!(this.receiver.poll(cx)) {
      Ok(outcome) => Poll::Ready(outcome),
      Err(oneshot::Canceled) => Poll::Ready(Err(ToFutureError::Cancelled)),
    }
  }
}

struct ToFutureObserver<Item, Err> {
  sender: Option<oneshot::Sender<Outcome<Item, Err>>>,
  last: Option<Item>,
}

impl<Item, Err> ToFutureObserver<Item, Err> {
  fn resolve(&mut self, outcome: Outcome<Item, Err>) {
    if let Some(sender) = self.sender.take() {
      // the receiver is gone when the future was dropped
      let _ = sender.send(outcome);
    }
  }
}

impl<Item, Err> Observer<Item, Err> for ToFutureObserver<Item, Err> {
  fn next(&mut self, value: Item) { self.last = Some(value); }

  fn error(&mut self, err: Err) { self.resolve(Err(ToFutureError::Source(err))) }

  fn complete(&mut self) {
    let outcome = self.last.take().ok_or(ToFutureError::Empty);
    self.resolve(outcome)
  }

  fn is_closed(&self) -> bool { self.sender.as_ref().map_or(true, |s| s.is_canceled()) }
}
