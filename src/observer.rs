// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The observer surface a list consumer hangs off a delegate.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Receives change notifications from a [`TimelineDelegate`].
///
/// Register implementations with [`TimelineDelegate::register_observer`]. A
/// list-rendering layer typically reacts to `changed` by re-reading the
/// buffer through the delegate's query surface.
///
/// [`TimelineDelegate`]: ../delegate/struct.TimelineDelegate.html
/// [`TimelineDelegate::register_observer`]: ../delegate/struct.TimelineDelegate.html#method.register_observer
pub trait TimelineObserver: Send + Sync {
    /// The item buffer changed: items were prepended, appended, replaced
    /// wholesale, or updated in place.
    fn changed(&self);

    /// The buffered data is no longer valid at all.
    fn invalidated(&self) {}
}

/// A plain list of registered observers.
///
/// Notification takes a snapshot of the list before fanning out, so an
/// observer may register or unregister from inside its own callback.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    observers: Mutex<Vec<Arc<dyn TimelineObserver>>>,
}

impl ObserverRegistry {
    pub(crate) fn register(&self, observer: Arc<dyn TimelineObserver>) {
        self.list().push(observer);
    }

    pub(crate) fn unregister(&self, observer: &Arc<dyn TimelineObserver>) {
        self.list().retain(|entry| !Arc::ptr_eq(entry, observer));
    }

    pub(crate) fn notify_changed(&self) {
        for observer in self.snapshot() {
            observer.changed();
        }
    }

    pub(crate) fn notify_invalidated(&self) {
        for observer in self.snapshot() {
            observer.invalidated();
        }
    }

    fn snapshot(&self) -> Vec<Arc<dyn TimelineObserver>> {
        self.list().clone()
    }

    fn list(&self) -> MutexGuard<'_, Vec<Arc<dyn TimelineObserver>>> {
        self.observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::{ObserverRegistry, TimelineObserver};

    #[derive(Default)]
    struct Counting {
        changed: AtomicUsize,
        invalidated: AtomicUsize,
    }

    impl TimelineObserver for Counting {
        fn changed(&self) {
            self.changed.fetch_add(1, Ordering::SeqCst);
        }

        fn invalidated(&self) {
            self.invalidated.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn notifies_registered_observers() {
        let registry = ObserverRegistry::default();
        let observer = Arc::new(Counting::default());
        registry.register(observer.clone());

        registry.notify_changed();
        registry.notify_changed();
        registry.notify_invalidated();

        assert_eq!(observer.changed.load(Ordering::SeqCst), 2);
        assert_eq!(observer.invalidated.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unregistered_observers_stop_receiving() {
        let registry = ObserverRegistry::default();
        let observer = Arc::new(Counting::default());
        let handle: Arc<dyn TimelineObserver> = observer.clone();
        registry.register(handle.clone());

        registry.notify_changed();
        registry.unregister(&handle);
        registry.notify_changed();

        assert_eq!(observer.changed.load(Ordering::SeqCst), 1);
    }
}
