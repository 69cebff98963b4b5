//! Change-notifying host objects.
//!
//! `NotifyObject` is a dynamic stand-in for a class implementing a
//! property-changed event: named members, a raise-if-changed setter and a
//! list of handlers receiving the changed member's name.

use crate::subscription::{HandlerId, SubscriptionManager};
use crate::value::Value;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

/// An object that raises a notification when one of its members changes.
pub struct NotifyObject {
    type_name: String,
    members: RefCell<BTreeMap<String, Value>>,
    handlers: RefCell<SubscriptionManager>,
}

impl NotifyObject {
    /// Creates an object with no members set.
    pub fn new(type_name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            type_name: type_name.into(),
            members: RefCell::new(BTreeMap::new()),
            handlers: RefCell::new(SubscriptionManager::new()),
        })
    }

    /// Returns the object's type name.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns a member's current value, `Absent` if it was never set.
    pub fn get(&self, member: &str) -> Value {
        self.members
            .borrow()
            .get(member)
            .cloned()
            .unwrap_or_default()
    }

    /// Sets a member and raises a notification if the value changed.
    ///
    /// Returns true if a notification was raised.
    pub fn set(&self, member: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        {
            let mut members = self.members.borrow_mut();
            if members.get(member).unwrap_or(&Value::Absent) == &value {
                return false;
            }
            members.insert(member.into(), value);
        }
        self.raise(member);
        true
    }

    /// Raises a change notification for `member`.
    ///
    /// Handlers run after every borrow is released, so they may read members,
    /// set members and add or remove handlers.
    pub fn raise(&self, member: &str) {
        let pending = self.handlers.borrow().snapshot();
        for notification in pending {
            notification.deliver(member);
        }
    }

    /// Registers a change handler.
    pub fn on_change<F>(&self, handler: F) -> HandlerId
    where
        F: Fn(&str) + 'static,
    {
        self.handlers.borrow_mut().subscribe(handler)
    }

    /// Removes a change handler.
    pub fn remove_handler(&self, id: HandlerId) -> bool {
        self.handlers.borrow_mut().unsubscribe(id)
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_get_unset_is_absent() {
        let obj = NotifyObject::new("Host");
        assert!(obj.get("Value").is_absent());
        assert_eq!(obj.type_name(), "Host");
    }

    #[test]
    fn test_set_raises_once_per_change() {
        let obj = NotifyObject::new("Host");
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        obj.on_change(move |name| seen_clone.borrow_mut().push(name.to_string()));

        assert!(obj.set("Value", 1i64));
        assert!(!obj.set("Value", 1i64));
        assert!(obj.set("Value", 2i64));
        assert!(obj.set("Name", "a"));

        assert_eq!(
            *seen.borrow(),
            vec!["Value".to_string(), "Value".to_string(), "Name".to_string()]
        );
    }

    #[test]
    fn test_handler_may_mutate_during_raise() {
        let obj = NotifyObject::new("Host");
        let weak = Rc::downgrade(&obj);
        obj.on_change(move |name| {
            if name == "Value" {
                if let Some(obj) = weak.upgrade() {
                    obj.set("Mirror", obj.get("Value"));
                }
            }
        });

        obj.set("Value", 5i64);
        assert_eq!(obj.get("Mirror").as_i64(), Some(5));
    }

    #[test]
    fn test_handler_removed_during_raise_is_skipped() {
        let obj = NotifyObject::new("Host");
        let count = Rc::new(RefCell::new(0));

        let second = Rc::new(RefCell::new(None));
        let weak = Rc::downgrade(&obj);
        let second_clone = second.clone();
        obj.on_change(move |_| {
            if let (Some(obj), Some(id)) = (weak.upgrade(), *second_clone.borrow()) {
                obj.remove_handler(id);
            }
        });
        let count_clone = count.clone();
        let id = obj.on_change(move |_| *count_clone.borrow_mut() += 1);
        *second.borrow_mut() = Some(id);

        obj.set("Value", 1i64);
        assert_eq!(*count.borrow(), 0);
        assert_eq!(obj.handler_count(), 1);
    }
}
