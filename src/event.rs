//! Event sources for [`from_event`](crate::observable::from_event).
//!
//! [`EventTarget`] mirrors the DOM `addEventListener`/`removeEventListener`
//! pair, so host bindings (a DOM node, a widget, a message bus) only need to
//! implement two methods. [`EventEmitter`] is an in-process implementation.
use std::{cell::RefCell, rc::Rc};

/// Identifies one registered listener.
pub type ListenerId = usize;

/// The DOM listener options object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventListenerOptions {
  pub capture: bool,
  /// Remove the listener after it fired once.
  pub once: bool,
  pub passive: bool,
}

pub type Listener<Event> = Box<dyn FnMut(Event)>;

/// Something listeners can be attached to.
pub trait EventTarget<Event> {
  fn add_event_listener(
    &self, name: &str, listener: Listener<Event>, options: EventListenerOptions,
  ) -> ListenerId;

  /// Removing an unknown (or already removed) listener is a no-op.
  fn remove_event_listener(&self, name: &str, id: ListenerId);
}

struct Registration<Event> {
  id: ListenerId,
  name: String,
  once: bool,
  callback: Rc<RefCell<Listener<Event>>>,
}

struct EmitterState<Event> {
  next_id: ListenerId,
  listeners: Vec<Registration<Event>>,
}

/// A single-threaded named event bus.
pub struct EventEmitter<Event>(Rc<RefCell<EmitterState<Event>>>);

impl<Event> Clone for EventEmitter<Event> {
  fn clone(&self) -> Self { EventEmitter(self.0.clone()) }
}

impl<Event> Default for EventEmitter<Event> {
  fn default() -> Self {
    EventEmitter(Rc::new(RefCell::new(EmitterState { next_id: 0, listeners: vec![] })))
  }
}

impl<Event: Clone> EventEmitter<Event> {
  pub fn new() -> Self { Self::default() }

  /// Dispatches `event` to every listener registered for `name`, in
  /// registration order. Listeners added or removed while dispatching take
  /// effect from the next dispatch on, except that a removed listener is
  /// never called.
  pub fn emit(&self, name: &str, event: Event) {
    let targets: Vec<_> = self
      .0
      .borrow()
      .listeners
      .iter()
      .filter(|r| r.name == name)
      .map(|r| (r.id, r.once, r.callback.clone()))
      .collect();
    for (id, once, callback) in targets {
      {
        let mut state = self.0.borrow_mut();
        let Some(pos) = state.listeners.iter().position(|r| r.id == id) else {
          continue;
        };
        if once {
          state.listeners.remove(pos);
        }
      }
      if let Ok(mut callback) = callback.try_borrow_mut() {
        (*callback)(event.clone());
      }
    }
  }

  pub fn listener_count(&self, name: &str) -> usize {
    self.0.borrow().listeners.iter().filter(|r| r.name == name).count()
  }
}

impl<Event> EventTarget<Event> for EventEmitter<Event> {
  fn add_event_listener(
    &self, name: &str, listener: Listener<Event>, options: EventListenerOptions,
  ) -> ListenerId {
    let mut state = self.0.borrow_mut();
    let id = state.next_id;
    state.next_id += 1;
    state.listeners.push(Registration {
      id,
      name: name.to_owned(),
      once: options.once,
      callback: Rc::new(RefCell::new(listener)),
    });
    id
  }

  fn remove_event_listener(&self, name: &str, id: ListenerId) {
    self.0.borrow_mut().listeners.retain(|r| !(r.id == id && r.name == name));
  }
}
