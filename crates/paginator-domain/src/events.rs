//! Collection event dispatch with scoped subscriptions.
//!
//! Listeners are registered on an [`EventHub`] and stay registered for as
//! long as the returned [`Subscription`] is alive. Dispatch is synchronous
//! and single-threaded.

use paginator_core::{CollectionEvent, PaginationState};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener = Box<dyn FnMut(CollectionEvent, &mut PaginationState)>;

struct Registration {
    id: u64,
    event: CollectionEvent,
    listener: Listener,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    listeners: Vec<Registration>,
    depth: usize,
    removed: Vec<u64>,
}

#[derive(Clone, Default)]
pub struct EventHub {
    inner: Rc<RefCell<HubInner>>,
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl EventHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` for `event`. Dropping the returned guard unregisters it.
    #[must_use = "the listener is removed as soon as the subscription is dropped"]
    pub fn subscribe<F>(&self, event: CollectionEvent, listener: F) -> Subscription
    where
        F: FnMut(CollectionEvent, &mut PaginationState) + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push(Registration {
            id,
            event,
            listener: Box::new(listener),
        });
        tracing::debug!("Subscribed listener {} to {}", id, event);

        Subscription {
            id,
            event,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `event` to every listener registered for it, in subscription order.
    ///
    /// Listeners added during dispatch are not called for the current event.
    /// Listeners removed during dispatch are skipped.
    pub fn emit(&self, event: CollectionEvent, state: &mut PaginationState) {
        let mut active = {
            let mut inner = self.inner.borrow_mut();
            inner.depth += 1;
            std::mem::take(&mut inner.listeners)
        };

        for registration in active.iter_mut() {
            if registration.event != event || self.is_removed(registration.id) {
                continue;
            }
            (registration.listener)(event, state);
        }

        let dropped = {
            let mut inner = self.inner.borrow_mut();
            inner.depth -= 1;
            let (dropped, mut kept): (Vec<_>, Vec<_>) = active
                .into_iter()
                .partition(|r| inner.removed.contains(&r.id));
            kept.append(&mut inner.listeners);
            inner.listeners = kept;
            if inner.depth == 0 {
                inner.removed.clear();
            }
            dropped
        };
        drop(dropped);
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    fn is_removed(&self, id: u64) -> bool {
        self.inner.borrow().removed.contains(&id)
    }
}

fn unsubscribe(inner: &RefCell<HubInner>, id: u64) {
    let dropped = {
        let mut inner = inner.borrow_mut();
        if inner.depth > 0 {
            inner.removed.push(id);
        }
        let (dropped, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut inner.listeners)
            .into_iter()
            .partition(|r| r.id == id);
        inner.listeners = kept;
        dropped
    };
    // Listener closures may own subscriptions themselves; release them unborrowed.
    drop(dropped);
}

/// Keeps a listener registered until dropped.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    event: CollectionEvent,
    hub: Weak<RefCell<HubInner>>,
}

impl Subscription {
    pub fn event(&self) -> CollectionEvent {
        self.event
    }

    /// False once the hub itself is gone.
    pub fn is_active(&self) -> bool {
        self.hub.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.hub.upgrade() {
            unsubscribe(&inner, self.id);
            tracing::debug!("Released listener {} for {}", self.id, self.event);
        }
    }
}
