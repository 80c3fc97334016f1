//! Change notification toward the UI layer.
//!
//! The signal carries no payload — observers re-query after any store
//! mutation, poller-driven or user-driven.

use std::sync::{Arc, Mutex, RwLock};

/// Identifies a registered listener so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) usize);

#[derive(Default)]
pub struct ChangeNotifier {
    listeners: RwLock<Vec<(ListenerId, Arc<dyn Fn() + Send + Sync>)>>,
    next_listener_id: Mutex<usize>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback fired after every store mutation.
    pub fn subscribe<F>(&self, callback: F) -> ListenerId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = {
            let mut id_guard = self.next_listener_id.lock().unwrap();
            let id = ListenerId(*id_guard);
            *id_guard += 1;
            id
        };

        let mut listeners = self.listeners.write().unwrap();
        listeners.push((id, Arc::new(callback)));
        id
    }

    /// Remove a listener. Returns false when the id is unknown.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write().unwrap();
        let before_len = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        listeners.len() < before_len
    }

    /// Invoke every registered listener.
    pub fn notify(&self) {
        let listeners = self.listeners.read().unwrap();
        for (_, callback) in listeners.iter() {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_notify_reaches_all_listeners() {
        let notifier = ChangeNotifier::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let a = hits.clone();
        notifier.subscribe(move || {
            a.fetch_add(1, Ordering::SeqCst);
        });
        let b = hits.clone();
        notifier.subscribe(move || {
            b.fetch_add(1, Ordering::SeqCst);
        });

        notifier.notify();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let notifier = ChangeNotifier::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let a = hits.clone();
        let id = notifier.subscribe(move || {
            a.fetch_add(1, Ordering::SeqCst);
        });

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));

        notifier.notify();
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
