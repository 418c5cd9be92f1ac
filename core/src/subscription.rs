//! Frame-synchronous subscribers to [`CursorState`] snapshots.

use crate::manager::CursorState;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::trace;

/// A subscriber callback. Receives an immutable snapshot, never a live reference.
pub type Callback = Box<dyn FnMut(&CursorState)>;

type SharedCallback = Rc<RefCell<Callback>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, SharedCallback)>,
}

impl Registry {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }
}

/// The set of subscribers owned by a manager.
///
/// Notification walks a snapshot of the set, so callbacks may subscribe, unsubscribe or clear the set while
/// being notified.
#[derive(Clone, Default)]
pub(crate) struct Subscribers {
    registry: Rc<RefCell<Registry>>,
}

impl Subscribers {
    pub fn insert(&self, callback: Callback) -> (Subscription, SharedCallback) {
        let callback = Rc::new(RefCell::new(callback));
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push((id, callback.clone()));
        (
            Subscription {
                id,
                registry: Rc::downgrade(&self.registry),
            },
            callback,
        )
    }

    pub fn clear(&self) {
        self.registry.borrow_mut().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    pub fn notify(&self, state: &CursorState) {
        let snapshot: Vec<(u64, SharedCallback)> = self.registry.borrow().entries.clone();
        for (id, callback) in snapshot {
            // Removed by an earlier callback in this pass
            if !self.registry.borrow().contains(id) {
                continue;
            }
            call(id, &callback, state);
        }
    }
}

pub(crate) fn call(id: u64, callback: &SharedCallback, state: &CursorState) {
    match callback.try_borrow_mut() {
        Ok(mut guard) => {
            let f = &mut *guard;
            f(state);
        }
        Err(_) => trace!(id, "subscriber is already running, skipping re-entrant notification"),
    }
}

/// Handle returned by [`CursorManager::subscribe`][crate::CursorManager::subscribe].
///
/// Dropping the handle does not unsubscribe.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Remove the callback. Unsubscribing an already removed callback does nothing.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .borrow_mut()
                .entries
                .retain(|(id, _)| *id != self.id);
        }
    }

    /// Whether the callback is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .map(|registry| registry.borrow().contains(self.id))
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("next_id", &self.next_id)
            .field("subscribers", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter(subscribers: &Subscribers) -> (Subscription, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        let (subscription, _) = subscribers.insert(Box::new(move |_| c.set(c.get() + 1)));
        (subscription, calls)
    }

    #[test]
    fn test_notify_all() {
        let subscribers = Subscribers::default();
        let (_a, a_calls) = counter(&subscribers);
        let (_b, b_calls) = counter(&subscribers);
        subscribers.notify(&CursorState::default());
        assert_eq!(a_calls.get(), 1);
        assert_eq!(b_calls.get(), 1);
    }

    #[test]
    fn test_unsubscribe_twice_is_noop() {
        let subscribers = Subscribers::default();
        let (a, a_calls) = counter(&subscribers);
        let (_b, _) = counter(&subscribers);
        a.unsubscribe();
        a.unsubscribe();
        assert!(!a.is_active());
        assert_eq!(subscribers.len(), 1);
        subscribers.notify(&CursorState::default());
        assert_eq!(a_calls.get(), 0);
    }

    #[test]
    fn test_unsubscribe_after_registry_dropped() {
        let subscribers = Subscribers::default();
        let (a, _) = counter(&subscribers);
        drop(subscribers);
        a.unsubscribe();
        assert!(!a.is_active());
    }

    #[test]
    fn test_removal_during_notify_skips_removed() {
        let subscribers = Subscribers::default();
        let victim: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let v = victim.clone();
        subscribers.insert(Box::new(move |_| {
            if let Some(subscription) = v.borrow().as_ref() {
                subscription.unsubscribe();
            }
        }));
        let (b, b_calls) = counter(&subscribers);
        *victim.borrow_mut() = Some(b);

        subscribers.notify(&CursorState::default());
        assert_eq!(b_calls.get(), 0);
        assert_eq!(subscribers.len(), 1);
    }

    #[test]
    fn test_clear_during_notify() {
        let subscribers = Subscribers::default();
        let s = subscribers.clone();
        subscribers.insert(Box::new(move |_| s.clear()));
        let (_b, b_calls) = counter(&subscribers);
        subscribers.notify(&CursorState::default());
        assert_eq!(b_calls.get(), 0);
        assert_eq!(subscribers.len(), 0);
    }
}
