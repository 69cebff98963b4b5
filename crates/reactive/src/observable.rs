//! Cold observation streams.
//!
//! An `Observable` does nothing until subscribed. Each subscription gets its
//! own handlers, and disposing the returned `Subscription` removes every
//! handler it registered, including those of intermediate objects in a chain.
//!
//! Chain observation composes two steps:
//!
//! - `member(source, name)` yields `source.name` on subscribe and again on every
//!   change notification for `name`;
//! - `switch_map` disposes the previous inner subscription and subscribes the
//!   next one each time the outer stream emits.
//!
//! `when_changed(root, ["A", "B", "C"])` is therefore `member(root, "A")`
//! switched into `member(_, "B")` switched into `member(_, "C")`.

use crate::notify::NotifyObject;
use crate::value::Value;
use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use tracing::trace;

/// Receives emitted values.
pub type Observer = Rc<dyn Fn(&Value)>;

/// A live subscription. Dropping it disposes it.
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Creates a subscription that runs `teardown` on disposal.
    pub fn new<F>(teardown: F) -> Self
    where
        F: FnOnce() + 'static,
    {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Creates a subscription with nothing to release.
    pub fn empty() -> Self {
        Self { teardown: None }
    }

    /// Combines subscriptions into one that disposes all of them in order.
    pub fn all(subscriptions: Vec<Subscription>) -> Self {
        Self::new(move || drop(subscriptions))
    }

    /// Releases everything this subscription holds. Idempotent.
    pub fn dispose(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }

    /// Returns true once disposed, or if there was never anything to release.
    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.teardown.is_none()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// The live inner subscription of a `switch_map`.
#[derive(Default)]
struct SwitchSlot {
    generation: u64,
    current: Option<Subscription>,
    closed: bool,
}

/// A cold stream of values.
#[derive(Clone)]
pub struct Observable {
    subscribe_fn: Rc<dyn Fn(Observer) -> Subscription>,
}

impl Observable {
    /// Creates an observable from a subscribe function.
    pub fn create<F>(subscribe_fn: F) -> Self
    where
        F: Fn(Observer) -> Subscription + 'static,
    {
        Self {
            subscribe_fn: Rc::new(subscribe_fn),
        }
    }

    /// Emits `value` once on subscribe.
    pub fn just(value: Value) -> Self {
        Self::create(move |observer| {
            observer(&value);
            Subscription::empty()
        })
    }

    /// Subscribes `observer` to this stream.
    pub fn subscribe<F>(&self, observer: F) -> Subscription
    where
        F: Fn(&Value) + 'static,
    {
        (self.subscribe_fn)(Rc::new(observer))
    }

    fn subscribe_observer(&self, observer: Observer) -> Subscription {
        (self.subscribe_fn)(observer)
    }

    /// Observes one member of `source`.
    ///
    /// A source that is not an object emits `Absent` once and never again.
    pub fn member(source: Value, name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self::create(move |observer| {
            let Some(obj) = source.as_object() else {
                observer(&Value::Absent);
                return Subscription::empty();
            };

            let weak: Weak<NotifyObject> = Rc::downgrade(obj);
            let member = name.clone();
            let notify = observer.clone();
            let id = obj.on_change(move |changed| {
                if changed != member {
                    return;
                }
                if let Some(obj) = weak.upgrade() {
                    notify(&obj.get(&member));
                }
            });

            // Registered first: a change made while the current value is
            // being delivered is still observed.
            observer(&obj.get(&name));

            let weak = Rc::downgrade(obj);
            Subscription::new(move || {
                if let Some(obj) = weak.upgrade() {
                    obj.remove_handler(id);
                }
            })
        })
    }

    /// Maps each value to an inner stream and forwards only the latest one.
    ///
    /// The previous inner subscription is disposed before the next one is
    /// created. Each rebind takes a new generation; an inner subscription
    /// whose generation was superseded while it was being created (the
    /// observer rebound the chain re-entrantly) is dropped instead of kept.
    pub fn switch_map<F>(&self, select: F) -> Self
    where
        F: Fn(&Value) -> Observable + 'static,
    {
        let outer = self.clone();
        let select = Rc::new(select);
        Self::create(move |observer| {
            let inner: Rc<RefCell<SwitchSlot>> = Rc::new(RefCell::new(SwitchSlot::default()));

            let slot = inner.clone();
            let select = select.clone();
            let upstream = outer.subscribe(move |value| {
                let (generation, previous) = {
                    let mut slot = slot.borrow_mut();
                    slot.generation += 1;
                    (slot.generation, slot.current.take())
                };
                if previous.is_some() {
                    trace!(generation, "rebinding chain link");
                }
                drop(previous);

                let next = select(value).subscribe_observer(observer.clone());

                let stale = {
                    let mut slot = slot.borrow_mut();
                    if slot.generation == generation && !slot.closed {
                        slot.current = Some(next);
                        None
                    } else {
                        Some(next)
                    }
                };
                if stale.is_some() {
                    trace!(generation, "dropping superseded chain link");
                }
                drop(stale);
            });

            Subscription::new(move || {
                drop(upstream);
                let last = {
                    let mut slot = inner.borrow_mut();
                    slot.closed = true;
                    slot.current.take()
                };
                drop(last);
            })
        })
    }

    /// Observes the member path `names` starting at `root`.
    pub fn when_changed<S: AsRef<str>>(root: Value, names: &[S]) -> Self {
        let mut names = names.iter().map(|n| String::from(n.as_ref()));
        let Some(first) = names.next() else {
            return Self::just(root);
        };

        names.fold(Self::member(root, first), |chain, name| {
            chain.switch_map(move |value| Self::member(value.clone(), name.clone()))
        })
    }

    /// Emits `combine` over the latest value of every source, once each
    /// source has emitted at least once.
    pub fn combine_latest<F>(sources: Vec<Observable>, combine: F) -> Self
    where
        F: Fn(&[Value]) -> Value + 'static,
    {
        let combine = Rc::new(combine);
        Self::create(move |observer| {
            let latest: Rc<RefCell<Vec<Option<Value>>>> =
                Rc::new(RefCell::new(alloc::vec![None; sources.len()]));

            let subscriptions = sources
                .iter()
                .enumerate()
                .map(|(position, source)| {
                    let latest = latest.clone();
                    let combine = combine.clone();
                    let observer = observer.clone();
                    source.subscribe(move |value| {
                        let ready: Option<Vec<Value>> = {
                            let mut slots = latest.borrow_mut();
                            slots[position] = Some(value.clone());
                            slots.iter().cloned().collect()
                        };
                        if let Some(values) = ready {
                            observer(&combine(&values));
                        }
                    })
                })
                .collect();

            Subscription::all(subscriptions)
        })
    }
}
