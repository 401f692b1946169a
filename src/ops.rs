//! Operators.
//!
//! Every operator is a method on [`Observable`](crate::observable::Observable)
//! returning a new `Observable`; the source is never modified. Combination
//! factories taking several sources (`merge`, `concat`, `combine_latest`,
//! `zip`, `fork_join`, `race`) live here too and are re-exported from
//! [`observable`](crate::observable).
pub mod catch_error;
pub mod combine_latest;
pub mod concat;
pub mod debounce_time;
pub mod default_if_empty;
pub mod delay;
pub mod distinct_until_changed;
pub mod filter;
pub mod finalize;
pub mod fork_join;
pub mod into_future;
pub mod last;
pub mod map;
pub mod merge;
pub mod merge_map;
pub mod race;
pub mod reduce;
pub mod retry;
pub mod scan;
pub mod share;
pub mod skip;
pub mod skip_while;
pub mod start_with;
pub mod switch_map;
pub mod take;
pub mod take_until;
pub mod take_while;
pub mod tap;
pub mod throttle_time;
pub mod zip;

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn operators_preserve_single_terminal() {
    let log = Rc::new(RefCell::new(vec![]));
    let (n, e, c) = (log.clone(), log.clone(), log.clone());
    // misbehaving producer: keeps going after its terminal
    Observable::create(|s| {
      s.next(1);
      s.error("first");
      s.complete();
      s.error("second");
      s.next(2);
    })
    .map(|v: i32| v * 2)
    .filter(|_| true)
    .scan(0, |acc, v| acc + v)
    .subscribe_all(
      move |v| n.borrow_mut().push(format!("next {v}")),
      move |err: &str| e.borrow_mut().push(format!("error {err}")),
      move || c.borrow_mut().push("complete".to_owned()),
    );
    assert_eq!(*log.borrow(), vec!["next 2", "error first"]);
  }
}
