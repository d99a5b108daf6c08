//! Synchronous publish/subscribe registry keyed by event kind.

use std::{collections::HashMap, fmt, hash::Hash, rc::Rc};

/// Events that can be grouped by a copyable kind discriminant.
pub trait Categorised {
    /// Discriminant used as the subscription key.
    type Kind: Copy + Eq + Hash + fmt::Debug;

    /// Kind of this particular event.
    fn kind(&self) -> Self::Kind;
}

/// Subscription key: either one event kind or every event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Topic<K> {
    /// Receives every event regardless of its kind.
    All,
    /// Receives only events of exactly this kind.
    Kind(K),
}

/// Shared handler invoked with the event and a read-only context.
///
/// Handlers are identified by pointer, so registering a clone of the same
/// `Rc` twice under one topic has no effect.
pub type Listener<E, C> = Rc<dyn Fn(&E, &C)>;

/// Registry that delivers each event to the listeners of its kind and to the
/// listeners subscribed to [`Topic::All`].
///
/// Delivery is synchronous and happens on the caller's stack. Because
/// [`EventDispatcher::notify_listeners`] only needs `&self`, a listener that
/// can reach the dispatcher through its context may publish further events;
/// those nested deliveries complete before the outer call continues.
pub struct EventDispatcher<E: Categorised, C: ?Sized> {
    listeners: HashMap<Topic<E::Kind>, Vec<Listener<E, C>>>,
}

impl<E: Categorised, C: ?Sized> EventDispatcher<E, C> {
    /// Creates a dispatcher without any listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }

    /// Registers a listener for the provided topic.
    pub fn add_listener(&mut self, topic: Topic<E::Kind>, listener: Listener<E, C>) {
        let registered = self.listeners.entry(topic).or_default();
        if registered
            .iter()
            .any(|existing| same_listener(existing, &listener))
        {
            return;
        }
        registered.push(listener);
    }

    /// Unregisters a listener from the provided topic. Unknown listeners are ignored.
    pub fn remove_listener(&mut self, topic: Topic<E::Kind>, listener: &Listener<E, C>) {
        if let Some(registered) = self.listeners.get_mut(&topic) {
            registered.retain(|existing| !same_listener(existing, listener));
            if registered.is_empty() {
                let _ = self.listeners.remove(&topic);
            }
        }
    }

    /// Delivers the event to every matching listener exactly once per registration.
    pub fn notify_listeners(&self, event: &E, context: &C) {
        let exact = self.listeners.get(&Topic::Kind(event.kind()));
        let wildcard = self.listeners.get(&Topic::All);

        for listener in exact.into_iter().chain(wildcard).flatten() {
            (**listener)(event, context);
        }
    }

    /// Number of listeners registered under the provided topic.
    #[must_use]
    pub fn listener_count(&self, topic: Topic<E::Kind>) -> usize {
        self.listeners.get(&topic).map_or(0, Vec::len)
    }
}

impl<E: Categorised, C: ?Sized> Default for EventDispatcher<E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Categorised, C: ?Sized> fmt::Debug for EventDispatcher<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (topic, listeners) in &self.listeners {
            let _ = map.entry(topic, &listeners.len());
        }
        map.finish()
    }
}

fn same_listener<E, C: ?Sized>(left: &Listener<E, C>, right: &Listener<E, C>) -> bool {
    Rc::as_ptr(left).cast::<()>() == Rc::as_ptr(right).cast::<()>()
}
