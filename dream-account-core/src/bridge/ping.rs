use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use dream_account_contracts::{
    DEFAULT_TIMEOUT, HttpRequest, HttpTransport, SettingsProvider,
};
use tracing::{debug, info};

use super::{OneShot, OperationCompletion, OperationEvent};
use crate::dispatcher::RequestDispatcher;
use crate::session::AccountSession;

/// Value carried by `Failed`.
pub const PING_FAILED: f64 = -1.0;

/// Round-trip latency probe against an arbitrary URL.
///
/// Any completed HTTP exchange counts as reachable, whatever the status.
/// `Succeeded` carries the elapsed milliseconds; `Failed` carries
/// [`PING_FAILED`].
pub struct PingOperation {
    dispatcher: RequestDispatcher,
    settings: Arc<dyn SettingsProvider>,
    url: String,
    events: OneShot<f64>,
}

impl fmt::Debug for PingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PingOperation")
            .field("url", &self.url)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl PingOperation {
    /// Probe `url` through its own dispatcher over `transport`.
    pub fn new<T, S>(transport: T, settings: S, url: impl Into<String>) -> Self
    where
        T: HttpTransport + 'static,
        S: SettingsProvider + 'static,
    {
        Self::with_dispatcher(RequestDispatcher::new(transport), Arc::new(settings), url)
    }

    /// Probe through the session's dispatcher and timeout settings. The
    /// session's token is neither read nor written.
    pub fn for_session(session: &AccountSession, url: impl Into<String>) -> Self {
        Self::with_dispatcher(
            session.dispatcher().clone(),
            Arc::new(session.settings().settings()),
            url,
        )
    }

    /// Probe `url` through an existing dispatcher.
    pub fn with_dispatcher(
        dispatcher: RequestDispatcher,
        settings: Arc<dyn SettingsProvider>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            dispatcher,
            settings,
            url: url.into(),
            events: OneShot::new(),
        }
    }

    /// Run `handler` with the elapsed milliseconds.
    pub fn on_succeeded<F>(self, handler: F) -> Self
    where
        F: FnOnce(&f64) + Send + 'static,
    {
        self.events.on_succeeded(Box::new(handler));
        self
    }

    /// Run `handler` with [`PING_FAILED`].
    pub fn on_failed<F>(self, handler: F) -> Self
    where
        F: FnOnce(&f64) + Send + 'static,
    {
        self.events.on_failed(Box::new(handler));
        self
    }

    /// Only the first call yields a live completion.
    pub fn completion(&mut self) -> OperationCompletion<f64> {
        self.events.completion()
    }

    /// Send the probe. An empty URL fails at once.
    pub fn activate(self) {
        let timeout = self
            .settings
            .settings()
            .map(|settings| settings.timeout())
            .unwrap_or(DEFAULT_TIMEOUT);

        if self.url.trim().is_empty() {
            debug!("ping without a target url");
            self.events.fire(OperationEvent::Failed(PING_FAILED));
            return;
        }

        info!(url = %self.url, ?timeout, "pinging");
        let events = self.events;
        let started = Instant::now();
        self.dispatcher
            .dispatch(HttpRequest::get(self.url, timeout), move |outcome| {
                match outcome {
                    Ok(response) => {
                        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                        debug!(status = response.status, elapsed_ms, "ping answered");
                        events.fire(OperationEvent::Succeeded(elapsed_ms));
                    }
                    Err(err) => {
                        debug!(error = %err, "ping failed");
                        events.fire(OperationEvent::Failed(PING_FAILED));
                    }
                }
            });
    }
}
