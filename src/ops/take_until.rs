use crate::{observable::Observable, subscriber::Subscriber};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Mirrors the source until `notifier` emits its first value, then
  /// completes. An error from `notifier` is forwarded; its completion is
  /// ignored.
  pub fn take_until<N: 'static>(&self, notifier: Observable<N, Err>) -> Observable<Item, Err> {
    let source = self.clone();
    Observable::create(move |subscriber: Subscriber<Item, Err>| {
      let (on_next, on_error) = (subscriber.clone(), subscriber.clone());
      let stop = notifier.subscribe_err(move |_| on_next.complete(), move |err| on_error.error(err));
      subscriber.add(stop);
      if !subscriber.is_closed() {
        subscriber.add(source.subscribe_with(subscriber.clone()));
      }
    })
  }
}
