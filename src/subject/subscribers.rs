use crate::subscriber::Subscriber;

/// The observer registry of a Subject.
///
/// Every registration gets an id so it can remove itself on unsubscribe.
/// Broadcasts never iterate the registry directly: they take a snapshot
/// first, so observers may subscribe or unsubscribe while a broadcast runs.
pub(crate) struct Subscribers<Item, Err> {
  next_id: usize,
  entries: Vec<(usize, Subscriber<Item, Err>)>,
}

impl<Item, Err> Default for Subscribers<Item, Err> {
  fn default() -> Self { Self { next_id: 0, entries: Vec::new() } }
}

impl<Item, Err> Subscribers<Item, Err> {
  /// Add an observer and return its unique ID.
  pub fn add(&mut self, subscriber: Subscriber<Item, Err>) -> usize {
    let id = self.next_id;
    self.next_id += 1;
    self.entries.push((id, subscriber));
    id
  }

  /// Remove an observer by ID.
  pub fn remove(&mut self, id: usize) -> Option<Subscriber<Item, Err>> {
    let pos = self.entries.iter().position(|(i, _)| *i == id)?;
    Some(self.entries.remove(pos).1)
  }

  #[inline]
  pub fn len(&self) -> usize { self.entries.len() }

  /// Clones of the registered subscribers, in subscription order.
  pub fn snapshot(&self) -> Vec<Subscriber<Item, Err>> {
    self.entries.iter().map(|(_, s)| s.clone()).collect()
  }

  /// Empties the registry, returning what it held.
  pub fn drain(&mut self) -> Vec<Subscriber<Item, Err>> {
    self.entries.drain(..).map(|(_, s)| s).collect()
  }
}

/// Sends `value` to every target; the last one receives the moved value
/// instead of a clone.
pub(crate) fn broadcast_value<Item: Clone, Err>(targets: Vec<Subscriber<Item, Err>>, value: Item) {
  let mut iter = targets.into_iter().peekable();
  while let Some(subscriber) = iter.next() {
    if iter.peek().is_some() {
      subscriber.next(value.clone());
    } else {
      subscriber.next(value);
      break;
    }
  }
}

/// Sends `err` to every target, moving it into the last one.
pub(crate) fn broadcast_error<Item, Err: Clone>(targets: Vec<Subscriber<Item, Err>>, err: Err) {
  let mut iter = targets.into_iter().peekable();
  while let Some(subscriber) = iter.next() {
    if iter.peek().is_some() {
      subscriber.error(err.clone());
    } else {
      subscriber.error(err);
      break;
    }
  }
}
