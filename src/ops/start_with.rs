use crate::observable::{self, Observable};

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// Emits `values` before the values of the source.
  pub fn start_with(&self, values: impl IntoIterator<Item = Item> + Clone + 'static) -> Observable<Item, Err> {
    observable::concat([observable::from_iter(values), self.clone()])
  }
}
