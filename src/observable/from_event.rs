use super::Observable;
use crate::{
  event::{EventListenerOptions, EventTarget},
  subscription::Teardown,
};

/// Creates an observable of the events named `name` dispatched on `target`.
///
/// Each subscription registers its own listener; unsubscribing removes it
/// exactly once. The observable never completes on its own.
///
/// ```rust
/// use std::{cell::RefCell, rc::Rc};
///
/// use bael_stream::{
///   event::{EventEmitter, EventListenerOptions},
///   prelude::*,
/// };
///
/// let button = EventEmitter::<&str>::new();
/// let clicks = Rc::new(RefCell::new(vec![]));
/// let c_clicks = clicks.clone();
/// let sub = observable::from_event::<_, (), _>(button.clone(), "click", EventListenerOptions::default())
///   .subscribe(move |e| c_clicks.borrow_mut().push(e));
/// button.emit("click", "left");
/// sub.unsubscribe();
/// button.emit("click", "right");
/// assert_eq!(*clicks.borrow(), vec!["left"]);
/// ```
pub fn from_event<Event, Err, T>(
  target: T, name: impl Into<String>, options: EventListenerOptions,
) -> Observable<Event, Err>
where
  T: EventTarget<Event> + Clone + 'static,
  Event: 'static,
  Err: 'static,
{
  let name = name.into();
  Observable::create(move |subscriber| {
    let emit = subscriber.clone();
    let id = target.add_event_listener(&name, Box::new(move |e| emit.next(e)), options);
    tracing::trace!(event = %name, id, "event listener attached");
    let (target, name) = (target.clone(), name.clone());
    Teardown::from_fn(move || target.remove_event_listener(&name, id))
  })
}
