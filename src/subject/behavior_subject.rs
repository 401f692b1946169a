use super::{Phase, Subject, SubjectPolicy};

/// Remembers the current value, starting from a seed.
#[derive(Debug, Clone)]
pub struct Behavior<Item> {
  value: Item,
}

impl<Item: Clone + 'static> SubjectPolicy<Item> for Behavior<Item> {
  fn record(&mut self, value: &Item) { self.value = value.clone(); }

  fn replay(&self, phase: Phase) -> Vec<Item> {
    match phase {
      Phase::Active => vec![self.value.clone()],
      Phase::Completed | Phase::Errored => Vec::new(),
    }
  }
}

/// A subject that always holds a current value. New subscribers receive it
/// immediately.
pub type BehaviorSubject<Item, Err> = Subject<Item, Err, Behavior<Item>>;

/// Creates a [`BehaviorSubject`] holding `seed`.
pub fn behavior_subject<Item, Err>(seed: Item) -> BehaviorSubject<Item, Err> {
  Subject::with_policy(Behavior { value: seed })
}

impl<Item: Clone, Err> Subject<Item, Err, Behavior<Item>> {
  /// The current value: the seed, or the last value accepted.
  pub fn value(&self) -> Item { self.policy().value.clone() }
}
