use super::Observable;

/// Creates an observable that, on each subscription, calls `factory` and
/// subscribes to the observable it returns.
///
/// ```rust
/// use bael_stream::prelude::*;
///
/// observable::defer(|| {
///   println!("Hi!");
///   observable::of::<_, ()>(["Hello!"])
/// })
/// .subscribe(move |v| println!("{}", v));
/// // Prints: Hi!\nHello!\n
/// ```
pub fn defer<Item, Err, F>(factory: F) -> Observable<Item, Err>
where
  F: Fn() -> Observable<Item, Err> + 'static,
  Item: 'static,
  Err: 'static,
{
  Observable::create(move |subscriber| factory().subscribe_with(subscriber))
}
