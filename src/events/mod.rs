//! Route-change event hook
//!
//! Page emission is observable through an explicit emitter the caller
//! subscribes to at startup and unsubscribes from at teardown. There is no
//! process-wide mutable state; the emitter is owned by whoever drives the
//! build.

use std::collections::HashMap;

/// A route that was generated or visited during a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteChange {
    pub path: String,
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&RouteChange)>;

/// Explicit route-change emitter
#[derive(Default)]
pub struct RouteEvents {
    next_id: u64,
    listeners: HashMap<u64, Listener>,
}

impl RouteEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; returns the handle needed to remove it
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&RouteChange) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.insert(id, Box::new(listener));
        SubscriptionId(id)
    }

    /// Remove a listener; returns false if the handle was already removed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.remove(&id.0).is_some()
    }

    /// Notify all listeners of a route change
    pub fn emit(&self, path: &str) {
        let event = RouteChange {
            path: path.to_string(),
        };
        for listener in self.listeners.values() {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_emit_unsubscribe() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut events = RouteEvents::new();

        let seen_clone = Rc::clone(&seen);
        let id = events.subscribe(move |e| seen_clone.borrow_mut().push(e.path.clone()));

        events.emit("/page/1/");
        events.emit("/posts/hello/");
        assert_eq!(*seen.borrow(), vec!["/page/1/", "/posts/hello/"]);

        assert!(events.unsubscribe(id));
        events.emit("/page/2/");
        assert_eq!(seen.borrow().len(), 2);

        // Double unsubscribe is a no-op
        assert!(!events.unsubscribe(id));
    }

    #[test]
    fn test_emit_without_listeners() {
        let events = RouteEvents::new();
        events.emit("/"); // must not panic
    }
}
