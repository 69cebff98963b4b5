//! Error types for propwatch symbol tables and requests.

use crate::symbol::TypeId;
use alloc::string::String;
use thiserror::Error;

/// Result type alias for propwatch core operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while declaring symbols or assembling requests.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A type with the same display name was already declared.
    #[error("Type already declared: {display}")]
    DuplicateType { display: String },
    /// A handle that does not belong to this table.
    #[error("Unknown type handle: {id}")]
    UnknownType { id: TypeId },
    /// A member with the same name already exists on the owner type.
    #[error("Member {name} already declared on {owner}")]
    DuplicateMember { owner: String, name: String },
    /// A table already holds as many entries as a handle can address.
    #[error("Too many {kind} declarations")]
    CapacityExceeded { kind: &'static str },
    /// A request that cannot be analyzed as given.
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

impl Error {
    /// Creates a duplicate type error.
    pub fn duplicate_type(display: impl Into<String>) -> Self {
        Error::DuplicateType {
            display: display.into(),
        }
    }

    /// Creates an unknown type error.
    pub fn unknown_type(id: TypeId) -> Self {
        Error::UnknownType { id }
    }

    /// Creates a duplicate member error.
    pub fn duplicate_member(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Error::DuplicateMember {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Creates a capacity error for the named table.
    pub fn capacity_exceeded(kind: &'static str) -> Self {
        Error::CapacityExceeded { kind }
    }

    /// Creates an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Error::InvalidRequest {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let err = Error::duplicate_type("App.Host");
        assert!(err.to_string().contains("App.Host"));

        let err = Error::duplicate_member("App.Host", "Value");
        assert_eq!(err.to_string(), "Member Value already declared on App.Host");

        let err = Error::invalid_request("combiner arity 1");
        assert!(err.to_string().contains("arity"));

        let err = Error::capacity_exceeded("member");
        assert_eq!(err.to_string(), "Too many member declarations");
    }

    #[test]
    fn test_error_constructors() {
        match Error::unknown_type(TypeId::from_index(7)) {
            Error::UnknownType { id } => assert_eq!(id.index(), 7),
            _ => panic!("Wrong error type"),
        }
    }
}
