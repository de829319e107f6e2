//! Fire-once event objects on top of the session's callback API.
//!
//! An operation is built, gets any number of `on_succeeded` / `on_failed`
//! subscribers, and is then activated. Exactly one of the two subscriber
//! lists fires, exactly once, after which the operation holds nothing.

mod account;
mod ping;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};

use parking_lot::Mutex;
use tokio::sync::oneshot;

pub use account::AccountOperation;
pub use ping::{PING_FAILED, PingOperation};

/// Terminal event of an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationEvent<T> {
    /// The operation reported success.
    Succeeded(T),
    /// The operation reported failure, carrying the same kind of value.
    Failed(T),
}

impl<T> OperationEvent<T> {
    /// `true` for [`OperationEvent::Succeeded`].
    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }

    /// The carried value, whichever way the operation ended.
    pub fn into_inner(self) -> T {
        match self {
            Self::Succeeded(value) | Self::Failed(value) => value,
        }
    }
}

type Handler<T> = Box<dyn FnOnce(&T) + Send>;

struct Subscribers<T> {
    succeeded: Vec<Handler<T>>,
    failed: Vec<Handler<T>>,
    completion: Option<oneshot::Sender<OperationEvent<T>>>,
}

/// Shared fire-once state. Clones observe the same flag.
pub(crate) struct OneShot<T> {
    fired: Arc<AtomicBool>,
    subscribers: Arc<Mutex<Option<Subscribers<T>>>>,
}

impl<T> Clone for OneShot<T> {
    fn clone(&self) -> Self {
        Self {
            fired: Arc::clone(&self.fired),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T> fmt::Debug for OneShot<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneShot")
            .field("fired", &self.fired.load(Ordering::Acquire))
            .finish()
    }
}

impl<T> OneShot<T> {
    pub(crate) fn new() -> Self {
        Self {
            fired: Arc::new(AtomicBool::new(false)),
            subscribers: Arc::new(Mutex::new(Some(Subscribers {
                succeeded: Vec::new(),
                failed: Vec::new(),
                completion: None,
            }))),
        }
    }

    /// Subscribers added after firing are dropped unrun.
    pub(crate) fn on_succeeded(&self, handler: Handler<T>) {
        if let Some(subscribers) = self.subscribers.lock().as_mut() {
            subscribers.succeeded.push(handler);
        }
    }

    pub(crate) fn on_failed(&self, handler: Handler<T>) {
        if let Some(subscribers) = self.subscribers.lock().as_mut() {
            subscribers.failed.push(handler);
        }
    }

    pub(crate) fn completion(&self) -> OperationCompletion<T> {
        let (tx, rx) = oneshot::channel();
        match self.subscribers.lock().as_mut() {
            Some(subscribers) if subscribers.completion.is_none() => {
                subscribers.completion = Some(tx);
                OperationCompletion { receiver: Some(rx) }
            }
            _ => OperationCompletion { receiver: None },
        }
    }

    /// Returns `false` if this or a clone already fired.
    pub(crate) fn fire(&self, event: OperationEvent<T>) -> bool {
        if self.fired.swap(true, Ordering::AcqRel) {
            return false;
        }
        let Some(subscribers) = self.subscribers.lock().take() else {
            return false;
        };

        let (value, handlers, succeeded) = match &event {
            OperationEvent::Succeeded(value) => (value, subscribers.succeeded, true),
            OperationEvent::Failed(value) => (value, subscribers.failed, false),
        };
        for handler in handlers {
            handler(value);
        }
        tracing::debug!(succeeded, "operation settled");

        if let Some(completion) = subscribers.completion {
            let _ = completion.send(event);
        }
        true
    }
}

/// Awaitable outcome of an activated operation.
///
/// Resolves to `None` if a completion was already taken for the same
/// operation.
#[derive(Debug)]
pub struct OperationCompletion<T> {
    receiver: Option<oneshot::Receiver<OperationEvent<T>>>,
}

impl<T> Future for OperationCompletion<T> {
    type Output = Option<OperationEvent<T>>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.receiver.as_mut() {
            Some(receiver) => Pin::new(receiver).poll(cx).map(Result::ok),
            None => Poll::Ready(None),
        }
    }
}
