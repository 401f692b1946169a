use std::rc::Rc;

use crate::{observable::Observable, subscriber::Subscriber, subscription::Teardown};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Calls `f` once the execution ends, whatever the reason: completion,
  /// error or unsubscribe. It runs after the downstream saw the terminal
  /// signal and after the source was torn down.
  pub fn finalize<F>(&self, f: F) -> Observable<Item, Err>
  where
    F: Fn() + 'static,
  {
    let source = self.clone();
    let f = Rc::new(f);
    Observable::create(move |subscriber: Subscriber<Item, Err>| {
      let upstream = source.subscribe_with(subscriber.clone());
      let f = f.clone();
      Teardown::from_fn(move || {
        upstream.unsubscribe();
        f()
      })
    })
  }
}
