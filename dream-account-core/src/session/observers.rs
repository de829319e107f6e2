use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::broadcast;

const TOKEN_CHANNEL_CAPACITY: usize = 16;

/// Emitted after every token write, including writes of the same value.
///
/// Carries no payload; read the current value from the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenChanged;

/// Handle returned by [`AccountSession::on_token_changed`](super::AccountSession::on_token_changed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback = Arc<dyn Fn() + Send + Sync>;

pub(crate) struct TokenObservers {
    next_id: AtomicU64,
    callbacks: Mutex<Vec<(ObserverId, Callback)>>,
    sender: broadcast::Sender<TokenChanged>,
}

impl fmt::Debug for TokenObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenObservers")
            .field("callbacks", &self.callbacks.lock().len())
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

impl TokenObservers {
    pub(crate) fn new() -> Self {
        let (sender, _) = broadcast::channel(TOKEN_CHANNEL_CAPACITY);
        Self {
            next_id: AtomicU64::new(0),
            callbacks: Mutex::new(Vec::new()),
            sender,
        }
    }

    pub(crate) fn add(&self, callback: Callback) -> ObserverId {
        let id = ObserverId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.callbacks.lock().push((id, callback));
        id
    }

    pub(crate) fn remove(&self, id: ObserverId) -> bool {
        let mut callbacks = self.callbacks.lock();
        let before = callbacks.len();
        callbacks.retain(|(existing, _)| *existing != id);
        callbacks.len() != before
    }

    pub(crate) fn subscribe(&self) -> broadcast::Receiver<TokenChanged> {
        self.sender.subscribe()
    }

    /// Callbacks run on a snapshot so they may add or remove observers.
    pub(crate) fn notify(&self) {
        let snapshot: Vec<Callback> = self
            .callbacks
            .lock()
            .iter()
            .map(|(_, callback)| Arc::clone(callback))
            .collect();
        for callback in snapshot {
            callback();
        }
        let _ = self.sender.send(TokenChanged);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[test]
    fn removed_observers_stop_firing() {
        let observers = TokenObservers::new();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let id = observers.add(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        observers.notify();
        assert!(observers.remove(id));
        assert!(!observers.remove(id));
        observers.notify();

        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn notify_without_subscribers_is_fine() {
        let observers = TokenObservers::new();
        observers.notify();
        let mut rx = observers.subscribe();
        observers.notify();
        assert_eq!(rx.try_recv(), Ok(TokenChanged));
    }
}
