//! Observable value containers for published client state.
//!
//! DESIGN
//! ======
//! A `Subject<T>` replaces the reactive-framework signal: it holds one
//! current value and a list of listeners notified synchronously on every
//! publish. Everything is single-threaded (`Rc<RefCell>`); handlers run to
//! completion before control returns to the publisher, matching the browser
//! event-loop model.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

struct SubjectInner<T> {
    value: T,
    next_listener_id: u64,
    listeners: Vec<(u64, Rc<dyn Fn(&T)>)>,
}

/// A single-threaded observable value.
///
/// Clones are cheap handles over the same shared value and listener list.
pub struct Subject<T> {
    inner: Rc<RefCell<SubjectInner<T>>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: Clone + 'static> Subject<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SubjectInner {
                value: initial,
                next_listener_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Replace the value and notify every listener with the new value.
    pub fn set(&self, value: T) {
        self.inner.borrow_mut().value = value;
        self.notify();
    }

    /// Mutate the value in place and notify every listener.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.inner.borrow_mut().value);
        self.notify();
    }

    /// Register a listener invoked on every publish, in registration order.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or explicitly unsubscribed.
    pub fn subscribe(&self, listener: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_listener_id;
            inner.next_listener_id += 1;
            inner.listeners.push((id, Rc::new(listener)));
            id
        };

        let weak: Weak<RefCell<SubjectInner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            remove: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.borrow_mut().listeners.retain(|(lid, _)| *lid != id);
                }
            })),
        }
    }

    fn notify(&self) {
        // Snapshot value and listeners so handlers can call get()/subscribe()
        // on this subject without hitting an outstanding borrow.
        let (value, listeners) = {
            let inner = self.inner.borrow();
            (inner.value.clone(), inner.listeners.clone())
        };
        for (_, listener) in listeners {
            listener(&value);
        }
    }
}

/// Handle for a registered listener; deregisters on drop.
pub struct Subscription {
    remove: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Deregister the listener now instead of at drop time.
    pub fn unsubscribe(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}
