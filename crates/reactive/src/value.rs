//! Member values carried through observation chains.

use crate::notify::NotifyObject;
use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

/// A member value.
///
/// `Absent` is what an observation yields when an intermediate object is
/// missing. Objects compare by identity.
#[derive(Clone, Default)]
pub enum Value {
    /// No value
    #[default]
    Absent,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int64(i64),
    /// UTF-8 string
    String(String),
    /// A change-notifying object
    Object(Rc<NotifyObject>),
}

impl Value {
    /// Returns true for `Absent`.
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Returns the contained object, if any.
    pub fn as_object(&self) -> Option<&Rc<NotifyObject>> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Returns the value as an i64, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Absent, Value::Absent) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => f.write_str("Absent"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int64(v) => write!(f, "Int64({})", v),
            Value::String(s) => write!(f, "String({:?})", s),
            Value::Object(obj) => write!(f, "Object({})", obj.type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Rc<NotifyObject>> for Value {
    fn from(v: Rc<NotifyObject>) -> Self {
        Value::Object(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_accessors() {
        assert!(Value::Absent.is_absent());
        assert_eq!(Value::from(7i64).as_i64(), Some(7));
        assert_eq!(Value::from("a").as_str(), Some("a"));
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert_eq!(Value::from(None::<i64>), Value::Absent);
    }

    #[test]
    fn test_objects_compare_by_identity() {
        let a = NotifyObject::new("Host");
        let b = NotifyObject::new("Host");
        assert_eq!(Value::from(a.clone()), Value::from(a.clone()));
        assert_ne!(Value::from(a), Value::from(b));
    }

    #[test]
    fn test_mixed_types_unequal() {
        assert_ne!(Value::from(1i64), Value::from("1"));
        assert_ne!(Value::Absent, Value::from(false));
    }
}
