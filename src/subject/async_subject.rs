use super::{Phase, Subject, SubjectPolicy};

/// Remembers only the last value, released on completion.
#[derive(Debug, Clone)]
pub struct AsyncLast<Item> {
  last: Option<Item>,
}

impl<Item> Default for AsyncLast<Item> {
  fn default() -> Self { AsyncLast { last: None } }
}

impl<Item: Clone + 'static> SubjectPolicy<Item> for AsyncLast<Item> {
  fn record(&mut self, value: &Item) { self.last = Some(value.clone()); }

  fn replay(&self, phase: Phase) -> Vec<Item> {
    match phase {
      Phase::Completed => self.last.iter().cloned().collect(),
      Phase::Active | Phase::Errored => Vec::new(),
    }
  }

  fn broadcasts_values(&self) -> bool { false }

  fn on_complete(&mut self) -> Vec<Item> { self.last.iter().cloned().collect() }
}

/// A subject emitting only its last value, and only when it completes.
pub type AsyncSubject<Item, Err> = Subject<Item, Err, AsyncLast<Item>>;

/// Creates an [`AsyncSubject`].
pub fn async_subject<Item, Err>() -> AsyncSubject<Item, Err> { Subject::default() }
