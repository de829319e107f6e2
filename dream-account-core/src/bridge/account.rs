use dream_account_model::{Credentials, OperationResult};
use tracing::warn;

use super::{OneShot, OperationCompletion, OperationEvent};
use crate::session::WeakSession;

#[derive(Debug)]
enum Request {
    Register(Credentials),
    Login(Credentials),
    Authenticate,
}

/// One register, login or authenticate call as a fire-once event source.
///
/// ```no_run
/// # use dream_account_core::prelude::*;
/// # async fn demo(session: AccountSession) {
/// let mut operation =
///     AccountOperation::login(&session.downgrade(), Credentials::new("alice", "pw"))
///         .on_succeeded(|result| println!("welcome {}", result.user().name()))
///         .on_failed(|result| eprintln!("login failed: {}", result.error()));
/// let done = operation.completion();
/// operation.activate();
/// let _ = done.await;
/// # }
/// ```
#[derive(Debug)]
pub struct AccountOperation {
    session: WeakSession,
    request: Request,
    events: OneShot<OperationResult>,
}

impl AccountOperation {
    /// Register a new account through `session`.
    pub fn register(session: &WeakSession, credentials: Credentials) -> Self {
        Self::new(session, Request::Register(credentials))
    }

    /// Log in through `session`; a success also stores the token.
    pub fn login(session: &WeakSession, credentials: Credentials) -> Self {
        Self::new(session, Request::Login(credentials))
    }

    /// Validate the session's current token.
    pub fn authenticate(session: &WeakSession) -> Self {
        Self::new(session, Request::Authenticate)
    }

    fn new(session: &WeakSession, request: Request) -> Self {
        Self {
            session: session.clone(),
            request,
            events: OneShot::new(),
        }
    }

    /// Run `handler` if the call ends with `ErrorKind::Normal`.
    pub fn on_succeeded<F>(self, handler: F) -> Self
    where
        F: FnOnce(&OperationResult) + Send + 'static,
    {
        self.events.on_succeeded(Box::new(handler));
        self
    }

    /// Run `handler` for any other outcome.
    pub fn on_failed<F>(self, handler: F) -> Self
    where
        F: FnOnce(&OperationResult) + Send + 'static,
    {
        self.events.on_failed(Box::new(handler));
        self
    }

    /// Only the first call yields a live completion.
    pub fn completion(&mut self) -> OperationCompletion<OperationResult> {
        self.events.completion()
    }

    /// Start the call. A result with `ErrorKind::Normal` is `Succeeded`,
    /// anything else `Failed`. With no live session, `Failed` fires at once
    /// with a default (invalid) result.
    pub fn activate(self) {
        let Some(session) = self.session.upgrade() else {
            warn!("account operation activated without a live session");
            self.events.fire(OperationEvent::Failed(OperationResult::default()));
            return;
        };

        let events = self.events;
        let settle = move |result: OperationResult| {
            let event = if result.error().is_normal() {
                OperationEvent::Succeeded(result)
            } else {
                OperationEvent::Failed(result)
            };
            events.fire(event);
        };

        match self.request {
            Request::Register(credentials) => session.register(credentials, settle),
            Request::Login(credentials) => session.login(credentials, settle),
            Request::Authenticate => session.authenticate(settle),
        }
    }
}
