//! Propwatch Reactive - Reference runtime for property-chain observation.
//!
//! This crate executes the same protocol the generated wiring follows, so the
//! behavior of a chain can be checked without a host compiler:
//!
//! - `NotifyObject`: a host object raising a notification per changed member
//! - `Observable`: a cold stream; `member`, `when_changed`, `switch_map` and
//!   `combine_latest` build chain observations
//! - `Subscription`: disposes every handler a subscription registered
//! - `SubscriptionManager`: the per-object handler list
//!
//! # Example
//!
//! ```rust
//! use propwatch_reactive::{NotifyObject, Observable, Value};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let child = NotifyObject::new("Child");
//! child.set("Value", 1i64);
//! let host = NotifyObject::new("Host");
//! host.set("Child", child.clone());
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = seen.clone();
//! let _sub = Observable::when_changed(Value::from(host), &["Child", "Value"])
//!     .subscribe(move |v| sink.borrow_mut().push(v.as_i64()));
//!
//! child.set("Value", 2i64);
//! assert_eq!(*seen.borrow(), vec![Some(1), Some(2)]);
//! ```

#![no_std]

extern crate alloc;

pub mod notify;
pub mod observable;
pub mod subscription;
pub mod value;

pub use notify::NotifyObject;
pub use observable::{Observable, Observer, Subscription};
pub use subscription::{ChangeCallback, HandlerId, SubscriptionManager};
pub use value::Value;
