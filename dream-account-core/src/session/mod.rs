//! Session manager: the single owner of the account token.
//!
//! Operations never block the caller. Each one either rejects locally and
//! calls back immediately (no request is sent), or dispatches a request and
//! calls back once from a runtime worker. For a successful login the token
//! is stored and observers are notified *before* the caller's callback runs.

mod endpoint;
mod observers;

use std::fmt;
use std::sync::{Arc, Weak};

use dream_account_contracts::{HttpTransport, SettingsProvider};
use dream_account_model::{Credentials, ErrorKind, OperationKind, OperationResult};
use futures::Stream;
use parking_lot::Mutex;
use tokio::sync::{broadcast, oneshot};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, info, warn};

use crate::dispatcher::RequestDispatcher;
use endpoint::{Endpoint, resolve};

pub use observers::{ObserverId, TokenChanged};
use observers::TokenObservers;

struct SessionInner {
    dispatcher: RequestDispatcher,
    settings: Box<dyn SettingsProvider>,
    token: Mutex<Option<String>>,
    observers: TokenObservers,
}

impl SessionInner {
    fn store_token(&self, token: Option<String>) {
        let token = token.filter(|t| !t.is_empty());
        let has_token = token.is_some();
        *self.token.lock() = token;
        debug!(has_token, "session token changed");
        self.observers.notify();
    }
}

/// Handle to one account session. Clones share the same token.
#[derive(Clone)]
pub struct AccountSession {
    inner: Arc<SessionInner>,
}

impl fmt::Debug for AccountSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountSession")
            .field("has_token", &self.has_token())
            .field("observers", &self.inner.observers)
            .field("dispatcher", &self.inner.dispatcher)
            .finish()
    }
}

/// Non-owning reference used by operations that must not keep a session
/// alive on their own.
#[derive(Clone, Default)]
pub struct WeakSession {
    inner: Weak<SessionInner>,
}

impl fmt::Debug for WeakSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakSession")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl WeakSession {
    /// `None` once every [`AccountSession`] handle is gone.
    pub fn upgrade(&self) -> Option<AccountSession> {
        self.inner.upgrade().map(|inner| AccountSession { inner })
    }
}

impl AccountSession {
    /// Session over `transport`, reading settings from `settings` per call.
    pub fn new<T, S>(transport: T, settings: S) -> Self
    where
        T: HttpTransport + 'static,
        S: SettingsProvider + 'static,
    {
        Self::with_dispatcher(RequestDispatcher::new(transport), settings)
    }

    /// Session sharing an existing dispatcher.
    pub fn with_dispatcher<S>(dispatcher: RequestDispatcher, settings: S) -> Self
    where
        S: SettingsProvider + 'static,
    {
        Self {
            inner: Arc::new(SessionInner {
                dispatcher,
                settings: Box::new(settings),
                token: Mutex::new(None),
                observers: TokenObservers::new(),
            }),
        }
    }

    /// Non-owning handle to this session.
    pub fn downgrade(&self) -> WeakSession {
        WeakSession {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// The dispatcher every operation goes through.
    pub fn dispatcher(&self) -> &RequestDispatcher {
        &self.inner.dispatcher
    }

    /// The settings provider consulted before each request.
    pub fn settings(&self) -> &dyn SettingsProvider {
        self.inner.settings.as_ref()
    }

    /// Create an account. Never touches the token.
    pub fn register<F>(&self, credentials: Credentials, on_result: F)
    where
        F: FnOnce(OperationResult) + Send + 'static,
    {
        if !credentials.is_complete() {
            return reject(OperationKind::Register, ErrorKind::InputInvalid, on_result);
        }
        match Endpoint::register(&credentials) {
            Ok(endpoint) => self.execute(endpoint, on_result),
            Err(error) => reject(OperationKind::Register, error, on_result),
        }
    }

    /// Log in and, on success, store the returned token.
    pub fn login<F>(&self, credentials: Credentials, on_result: F)
    where
        F: FnOnce(OperationResult) + Send + 'static,
    {
        if !credentials.is_complete() {
            return reject(OperationKind::Login, ErrorKind::InputInvalid, on_result);
        }
        match Endpoint::login(&credentials) {
            Ok(endpoint) => self.execute(endpoint, on_result),
            Err(error) => reject(OperationKind::Login, error, on_result),
        }
    }

    /// Validate the stored token with the server. Never touches the token.
    pub fn authenticate<F>(&self, on_result: F)
    where
        F: FnOnce(OperationResult) + Send + 'static,
    {
        match self.token() {
            Some(token) => self.execute(Endpoint::auth(token), on_result),
            None => reject(OperationKind::Auth, ErrorKind::TokenInvalid, on_result),
        }
    }

    /// [`AccountSession::register`] as a future.
    pub async fn register_async(&self, credentials: Credentials) -> OperationResult {
        let (tx, rx) = oneshot::channel();
        self.register(credentials, move |result| {
            let _ = tx.send(result);
        });
        settle(OperationKind::Register, rx).await
    }

    /// [`AccountSession::login`] as a future.
    pub async fn login_async(&self, credentials: Credentials) -> OperationResult {
        let (tx, rx) = oneshot::channel();
        self.login(credentials, move |result| {
            let _ = tx.send(result);
        });
        settle(OperationKind::Login, rx).await
    }

    /// [`AccountSession::authenticate`] as a future.
    pub async fn authenticate_async(&self) -> OperationResult {
        let (tx, rx) = oneshot::channel();
        self.authenticate(move |result| {
            let _ = tx.send(result);
        });
        settle(OperationKind::Auth, rx).await
    }

    /// Forget the token locally. No request is sent; observers fire even if
    /// there was no token.
    pub fn logout(&self) {
        info!("logging out");
        self.clear_token();
    }

    /// Same as `set_token("")`.
    pub fn clear_token(&self) {
        self.inner.store_token(None);
    }

    /// Replace the token. An empty string clears it. Always notifies.
    pub fn set_token(&self, token: impl Into<String>) {
        self.inner.store_token(Some(token.into()));
    }

    /// Current token, if any.
    pub fn token(&self) -> Option<String> {
        self.inner.token.lock().clone()
    }

    /// `true` when a non-empty token is stored.
    pub fn has_token(&self) -> bool {
        self.inner.token.lock().is_some()
    }

    /// Register a callback run after every token write. Callbacks run on the
    /// thread that wrote the token, after the token lock is released.
    pub fn on_token_changed<F>(&self, callback: F) -> ObserverId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.observers.add(Arc::new(callback))
    }

    /// Returns `false` if `id` was already removed.
    pub fn remove_token_observer(&self, id: ObserverId) -> bool {
        self.inner.observers.remove(id)
    }

    /// One [`TokenChanged`] per token write.
    pub fn subscribe_token_changes(&self) -> broadcast::Receiver<TokenChanged> {
        self.inner.observers.subscribe()
    }

    /// Token changes as a stream. Lagged receivers skip the missed events.
    pub fn token_change_stream(&self) -> impl Stream<Item = TokenChanged> + Send + 'static {
        BroadcastStream::new(self.subscribe_token_changes())
            .filter_map(|event| event.ok())
    }

    fn execute<F>(&self, endpoint: Endpoint, on_result: F)
    where
        F: FnOnce(OperationResult) + Send + 'static,
    {
        let kind = endpoint.kind;
        let Some(settings) = self.inner.settings.settings() else {
            warn!(operation = %kind, "account settings unavailable");
            return reject(kind, endpoint.unavailable, on_result);
        };

        let strategy = endpoint.strategy();
        let request = endpoint.request(&settings);
        info!(operation = %kind, url = %request.url, "dispatching account request");

        let session = Arc::downgrade(&self.inner);
        self.inner.dispatcher.dispatch(request, move |outcome| {
            if let Err(err) = &outcome {
                warn!(operation = %kind, error = %err, "account request failed");
            }
            let result = resolve(kind, strategy, outcome);
            debug!(operation = %kind, error = %result.error(), "account request resolved");

            if kind == OperationKind::Login
                && result.is_success()
                && let Some(token) = result.token()
                && let Some(inner) = session.upgrade()
            {
                inner.store_token(Some(token.to_owned()));
            }
            on_result(result);
        });
    }
}

fn reject<F>(kind: OperationKind, error: ErrorKind, on_result: F)
where
    F: FnOnce(OperationResult),
{
    debug!(operation = %kind, error = %error, "rejected before dispatch");
    on_result(OperationResult::failure(kind, error));
}

async fn settle(
    kind: OperationKind,
    rx: oneshot::Receiver<OperationResult>,
) -> OperationResult {
    rx.await
        .unwrap_or_else(|_| OperationResult::failure(kind, ErrorKind::TransportError))
}
