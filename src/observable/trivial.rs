use super::Observable;

/// Creates an observable that emits no items and completes immediately.
///
/// ```
/// use bael_stream::prelude::*;
///
/// observable::empty::<i32, ()>().subscribe(|v| println!("{},", v));
/// // Result: nothing printed
/// ```
pub fn empty<Item: 'static, Err: 'static>() -> Observable<Item, Err> {
  Observable::create(|subscriber| subscriber.complete())
}

/// Creates an observable that never emits anything, not even a terminal
/// signal.
pub fn never<Item: 'static, Err: 'static>() -> Observable<Item, Err> { Observable::create(|_| {}) }

/// Creates an observable that emits no items, just terminates with an error.
pub fn throw_error<Item, Err>(err: Err) -> Observable<Item, Err>
where
  Item: 'static,
  Err: Clone + 'static,
{
  Observable::create(move |subscriber| subscriber.error(err.clone()))
}
