//! Change handler management.
//!
//! Every `NotifyObject` owns a `SubscriptionManager` holding the handlers
//! registered for its change notifications. Handlers are notified in
//! registration order from a snapshot, so a handler may register or remove
//! handlers (including itself) while a notification is being delivered.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;

/// Unique identifier for a registered handler.
pub type HandlerId = u64;

/// Callback type for change notifications. Receives the changed member name.
pub type ChangeCallback = Rc<dyn Fn(&str)>;

/// A registered change handler.
struct Handler {
    /// Callback to invoke on changes
    callback: ChangeCallback,
    /// Shared with in-flight snapshots so removal takes effect immediately
    active: Rc<Cell<bool>>,
}

impl Handler {
    fn new<F>(callback: F) -> Self
    where
        F: Fn(&str) + 'static,
    {
        Self {
            callback: Rc::new(callback),
            active: Rc::new(Cell::new(true)),
        }
    }

    #[inline]
    fn is_active(&self) -> bool {
        self.active.get()
    }

    #[inline]
    fn deactivate(&self) {
        self.active.set(false);
    }

    fn pending(&self) -> PendingNotification {
        PendingNotification {
            callback: self.callback.clone(),
            active: self.active.clone(),
        }
    }
}

/// A handler captured for delivery outside the manager's borrow.
#[derive(Clone)]
pub struct PendingNotification {
    callback: ChangeCallback,
    active: Rc<Cell<bool>>,
}

impl PendingNotification {
    /// Delivers the change unless the handler was removed in the meantime.
    pub fn deliver(&self, member: &str) {
        if self.active.get() {
            (self.callback)(member);
        }
    }
}

/// Manages the change handlers of one object.
pub struct SubscriptionManager {
    /// Registered handlers
    handlers: BTreeMap<HandlerId, Handler>,
    /// Next handler ID to assign
    next_id: HandlerId,
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriptionManager {
    /// Creates a new subscription manager.
    pub fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Registers a handler.
    ///
    /// Returns the handler ID that can be used to unsubscribe.
    pub fn subscribe<F>(&mut self, callback: F) -> HandlerId
    where
        F: Fn(&str) + 'static,
    {
        let id = self.next_id;
        self.next_id += 1;

        self.handlers.insert(id, Handler::new(callback));
        id
    }

    /// Removes a handler by ID.
    ///
    /// Returns true if the handler was found and removed.
    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        match self.handlers.remove(&id) {
            Some(handler) => {
                handler.deactivate();
                true
            }
            None => false,
        }
    }

    /// Captures every active handler for delivery after the manager is released.
    pub fn snapshot(&self) -> Vec<PendingNotification> {
        self.handlers
            .values()
            .filter(|h| h.is_active())
            .map(Handler::pending)
            .collect()
    }

    /// Returns the number of registered handlers.
    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if there are no handlers.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use core::cell::RefCell;

    #[test]
    fn test_manager_subscribe_unsubscribe() {
        let mut manager = SubscriptionManager::new();
        let id1 = manager.subscribe(|_| {});
        let id2 = manager.subscribe(|_| {});

        assert_eq!(manager.len(), 2);
        assert_ne!(id1, id2);
        assert!(manager.unsubscribe(id1));
        assert!(!manager.unsubscribe(id1));
        assert_eq!(manager.len(), 1);
        assert!(manager.unsubscribe(id2));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_snapshot_delivers_member_name() {
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let seen_clone = seen.clone();

        let mut manager = SubscriptionManager::new();
        manager.subscribe(move |name| {
            seen_clone.borrow_mut().push(name.to_string());
        });

        for pending in manager.snapshot() {
            pending.deliver("Child");
        }
        assert_eq!(*seen.borrow(), vec!["Child".to_string()]);
    }

    #[test]
    fn test_snapshot_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut manager = SubscriptionManager::new();
        for i in 0..3 {
            let order = order.clone();
            manager.subscribe(move |_| order.borrow_mut().push(i));
        }

        for pending in manager.snapshot() {
            pending.deliver("Value");
        }
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn test_snapshot_skips_removed_handler() {
        let called = Rc::new(RefCell::new(0));
        let called_clone = called.clone();

        let mut manager = SubscriptionManager::new();
        let id = manager.subscribe(move |_| *called_clone.borrow_mut() += 1);

        let pending = manager.snapshot();
        manager.unsubscribe(id);
        for p in pending {
            p.deliver("Value");
        }
        assert_eq!(*called.borrow(), 0);
    }
}
