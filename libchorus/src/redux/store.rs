//! Single-threaded store
//!
//! Holds the whole state tree, runs every dispatched action through the
//! combined reducer, and notifies subscribers after each successful
//! transition. Subscriptions are scoped: the returned [`Subscription`]
//! removes its callback when `unsubscribe` is called or when it is dropped.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::Result;

type Listener<S> = Rc<RefCell<dyn FnMut(&S)>>;

struct Registry<S> {
    next_id: u64,
    listeners: Vec<(u64, Listener<S>)>,
}

impl<S> Registry<S> {
    fn remove(&mut self, id: u64) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn contains(&self, id: u64) -> bool {
        self.listeners.iter().any(|(listener_id, _)| *listener_id == id)
    }
}

/// Store over state `S` and actions `A`
pub struct Store<S, A> {
    state: S,
    reducer: Box<dyn Fn(Option<S>, &A) -> Result<S>>,
    registry: Rc<RefCell<Registry<S>>>,
}

impl<S, A> Store<S, A>
where
    S: Clone + 'static,
    A: fmt::Debug,
{
    /// Create a store, building the initial state from `init`
    ///
    /// # Errors
    ///
    /// Returns the reducer's error if initialization is rejected.
    pub fn new<R>(reducer: R, init: &A) -> Result<Self>
    where
        R: Fn(Option<S>, &A) -> Result<S> + 'static,
    {
        let state = reducer(None, init)?;
        tracing::debug!(action = ?init, "Store initialized");
        Ok(Self {
            state,
            reducer: Box::new(reducer),
            registry: Rc::new(RefCell::new(Registry {
                next_id: 0,
                listeners: Vec::new(),
            })),
        })
    }

    /// Current state tree
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Run `action` through the reducer and notify subscribers
    ///
    /// # Errors
    ///
    /// If the reducer rejects the action, the error is returned, the
    /// previous state is kept, and no subscriber is called.
    pub fn dispatch(&mut self, action: A) -> Result<()> {
        tracing::debug!(action = ?action, "Dispatching");
        let next = match (self.reducer)(Some(self.state.clone()), &action) {
            Ok(next) => next,
            Err(e) => {
                tracing::warn!(action = ?action, error = %e, "Action rejected");
                return Err(e);
            }
        };
        self.state = next;
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        // Snapshot so callbacks may subscribe or unsubscribe while we iterate
        let snapshot: Vec<(u64, Listener<S>)> = self.registry.borrow().listeners.clone();
        for (id, listener) in snapshot {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            (&mut *listener.borrow_mut())(&self.state);
        }
    }

    /// Register `callback` to run after every successful dispatch
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&S) + 'static,
    {
        let id = {
            let mut registry = self.registry.borrow_mut();
            let id = registry.next_id;
            registry.next_id += 1;
            let listener: Listener<S> = Rc::new(RefCell::new(callback));
            registry.listeners.push((id, listener));
            id
        };
        tracing::trace!(id, "Subscriber registered");

        let registry: Weak<RefCell<Registry<S>>> = Rc::downgrade(&self.registry);
        Subscription {
            dispose: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.borrow_mut().remove(id);
                    tracing::trace!(id, "Subscriber removed");
                }
            })),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("subscribers", &self.registry.borrow().listeners.len())
            .finish()
    }
}

/// Scoped store registration
///
/// Dropping it unsubscribes. Outliving the store is harmless.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    dispose: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Remove the callback now
    pub fn unsubscribe(mut self) {
        self.dispose_now();
    }

    fn dispose_now(&mut self) {
        if let Some(dispose) = self.dispose.take() {
            dispose();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.dispose.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChorusError;
    use std::cell::Cell;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Op {
        Init,
        Add(i32),
        Reject,
    }

    fn counter(state: Option<i32>, op: &Op) -> Result<i32> {
        let current = state.unwrap_or(0);
        match op {
            Op::Init => Ok(current),
            Op::Add(n) => Ok(current + n),
            Op::Reject => Err(ChorusError::InvalidEvent("reject".to_string())),
        }
    }

    fn store() -> Store<i32, Op> {
        Store::new(counter, &Op::Init).unwrap()
    }

    #[test]
    fn test_new_runs_initialization() {
        let store = Store::new(|_: Option<i32>, _: &Op| Ok(42), &Op::Init).unwrap();
        assert_eq!(*store.state(), 42);
    }

    #[test]
    fn test_dispatch_updates_state() {
        let mut store = store();
        store.dispatch(Op::Add(2)).unwrap();
        store.dispatch(Op::Add(3)).unwrap();
        assert_eq!(*store.state(), 5);
    }

    #[test]
    fn test_subscriber_sees_new_state() {
        let mut store = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let _subscription = store.subscribe(move |state: &i32| sink.borrow_mut().push(*state));

        store.dispatch(Op::Add(1)).unwrap();
        store.dispatch(Op::Add(1)).unwrap();

        assert_eq!(*seen.borrow(), vec![1, 2]);
    }

    #[test]
    fn test_rejected_dispatch_keeps_state_and_skips_subscribers() {
        let mut store = store();
        store.dispatch(Op::Add(4)).unwrap();

        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let _subscription = store.subscribe(move |_: &i32| counter.set(counter.get() + 1));

        assert!(store.dispatch(Op::Reject).is_err());
        assert_eq!(*store.state(), 4);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = store();
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let subscription = store.subscribe(move |_: &i32| counter.set(counter.get() + 1));

        store.dispatch(Op::Add(1)).unwrap();
        subscription.unsubscribe();
        store.dispatch(Op::Add(1)).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let mut store = store();
        let calls = Rc::new(Cell::new(0));
        {
            let counter = Rc::clone(&calls);
            let _subscription = store.subscribe(move |_: &i32| counter.set(counter.get() + 1));
            assert_eq!(store.subscriber_count(), 1);
        }
        store.dispatch(Op::Add(1)).unwrap();

        assert_eq!(calls.get(), 0);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_subscribers_called_in_order() {
        let mut store = store();
        let order = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&order);
        let second = Rc::clone(&order);
        let _a = store.subscribe(move |_: &i32| first.borrow_mut().push("a"));
        let _b = store.subscribe(move |_: &i32| second.borrow_mut().push("b"));

        store.dispatch(Op::Add(1)).unwrap();

        assert_eq!(*order.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_subscription_outliving_store_is_harmless() {
        let store = store();
        let subscription = store.subscribe(|_: &i32| {});
        drop(store);
        subscription.unsubscribe();
    }

    #[test]
    fn test_unsubscribe_from_inside_callback() {
        let mut store = store();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let calls = Rc::new(Cell::new(0));

        let inner_slot = Rc::clone(&slot);
        let counter = Rc::clone(&calls);
        let subscription = store.subscribe(move |_: &i32| {
            counter.set(counter.get() + 1);
            inner_slot.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(subscription);

        store.dispatch(Op::Add(1)).unwrap();
        store.dispatch(Op::Add(1)).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }
}
