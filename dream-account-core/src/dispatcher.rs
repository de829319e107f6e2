//! Runs requests off the caller's thread and delivers each outcome once.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use dream_account_contracts::{
    HttpRequest, HttpResponse, HttpTransport, TransportError,
};
use futures::FutureExt;
use tokio::runtime::Handle;
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

/// What the dispatcher hands to a continuation.
pub type TransportOutcome = Result<HttpResponse, TransportError>;

/// Issues requests through an [`HttpTransport`] on a Tokio runtime.
///
/// Guarantees one outcome per request: the transport's own answer, a
/// [`TransportError::Timeout`] once `request.timeout` elapses, or
/// [`TransportError::Aborted`] if the transport panics or no runtime is
/// reachable.
#[derive(Clone)]
pub struct RequestDispatcher {
    transport: Arc<dyn HttpTransport>,
    handle: Option<Handle>,
}

impl fmt::Debug for RequestDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestDispatcher")
            .field("pinned_runtime", &self.handle.is_some())
            .finish_non_exhaustive()
    }
}

impl RequestDispatcher {
    /// Dispatch through `transport` on whichever runtime is current.
    pub fn new<T>(transport: T) -> Self
    where
        T: HttpTransport + 'static,
    {
        Self::from_arc(Arc::new(transport))
    }

    /// Like [`RequestDispatcher::new`] for an already shared transport.
    pub fn from_arc(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            handle: None,
        }
    }

    /// Spawn onto `handle` instead of whatever runtime is current at
    /// dispatch time. Needed when dispatching from non-runtime threads.
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Fire-and-forget dispatch. `continuation` runs exactly once on a
    /// runtime worker, or inline if no runtime is available. If the runtime
    /// shuts down before the request settles, the continuation receives
    /// [`TransportError::Aborted`] from whichever thread drops the task.
    pub fn dispatch<F>(&self, request: HttpRequest, continuation: F)
    where
        F: FnOnce(TransportOutcome) + Send + 'static,
    {
        let Some(handle) = self.handle.clone().or_else(|| Handle::try_current().ok())
        else {
            warn!(url = %request.url, "no tokio runtime available for dispatch");
            continuation(Err(TransportError::Aborted(
                "no tokio runtime available".to_string(),
            )));
            return;
        };

        let span = info_span!(
            "account_request",
            request_id = %Uuid::new_v4(),
            method = %request.method,
            url = %request.url
        );
        let dispatcher = self.clone();
        let continuation = Continuation::new(continuation);
        handle.spawn(
            async move {
                let outcome = dispatcher.dispatch_async(request).await;
                continuation.deliver(outcome);
            }
            .instrument(span),
        );
    }

    /// Await the outcome directly on the current task.
    pub async fn dispatch_async(&self, request: HttpRequest) -> TransportOutcome {
        let timeout = request.timeout;
        let exchange = AssertUnwindSafe(self.transport.execute(request)).catch_unwind();

        match tokio::time::timeout(timeout, exchange).await {
            Ok(Ok(outcome)) => {
                match &outcome {
                    Ok(response) => debug!(status = response.status, "request completed"),
                    Err(err) => debug!(error = %err, "request failed"),
                }
                outcome
            }
            Ok(Err(panic)) => {
                let reason = panic_reason(panic.as_ref());
                warn!(reason = %reason, "transport panicked");
                Err(TransportError::Aborted(reason))
            }
            Err(_) => {
                debug!(?timeout, "request deadline elapsed");
                Err(TransportError::Timeout(timeout))
            }
        }
    }
}

/// Runs the wrapped continuation once: with the real outcome, or with
/// `Aborted` when dropped undelivered (task cancelled by runtime shutdown).
struct Continuation<F>
where
    F: FnOnce(TransportOutcome),
{
    inner: Option<F>,
}

impl<F> Continuation<F>
where
    F: FnOnce(TransportOutcome),
{
    fn new(continuation: F) -> Self {
        Self {
            inner: Some(continuation),
        }
    }

    fn deliver(mut self, outcome: TransportOutcome) {
        if let Some(continuation) = self.inner.take() {
            continuation(outcome);
        }
    }
}

impl<F> Drop for Continuation<F>
where
    F: FnOnce(TransportOutcome),
{
    fn drop(&mut self) {
        if let Some(continuation) = self.inner.take() {
            warn!("request task dropped before completion");
            continuation(Err(TransportError::Aborted(
                "runtime shut down before the request completed".to_string(),
            )));
        }
    }
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(reason) = panic.downcast_ref::<&str>() {
        (*reason).to_string()
    } else if let Some(reason) = panic.downcast_ref::<String>() {
        reason.clone()
    } else {
        "transport panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::oneshot;

    use super::*;

    struct Fixed(u16);

    #[async_trait]
    impl HttpTransport for Fixed {
        async fn execute(
            &self,
            _request: HttpRequest,
        ) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse::new(self.0, b"{}".to_vec()))
        }
    }

    struct Panics;

    #[async_trait]
    impl HttpTransport for Panics {
        async fn execute(
            &self,
            _request: HttpRequest,
        ) -> Result<HttpResponse, TransportError> {
            panic!("socket exploded")
        }
    }

    struct Hangs;

    #[async_trait]
    impl HttpTransport for Hangs {
        async fn execute(
            &self,
            _request: HttpRequest,
        ) -> Result<HttpResponse, TransportError> {
            std::future::pending().await
        }
    }

    fn request(timeout: Duration) -> HttpRequest {
        HttpRequest::get("http://localhost/ping", timeout)
    }

    #[tokio::test]
    async fn continuation_receives_response() {
        let dispatcher = RequestDispatcher::new(Fixed(201));
        let (tx, rx) = oneshot::channel();
        dispatcher.dispatch(request(Duration::from_secs(5)), move |outcome| {
            let _ = tx.send(outcome);
        });
        let outcome = rx.await.unwrap();
        assert_eq!(outcome.unwrap().status, 201);
    }

    #[tokio::test]
    async fn panicking_transport_is_aborted() {
        let dispatcher = RequestDispatcher::new(Panics);
        let outcome = dispatcher.dispatch_async(request(Duration::from_secs(5))).await;
        assert_eq!(
            outcome,
            Err(TransportError::Aborted("socket exploded".to_string()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_is_enforced() {
        let dispatcher = RequestDispatcher::new(Hangs);
        let timeout = Duration::from_millis(250);
        let outcome = dispatcher.dispatch_async(request(timeout)).await;
        assert_eq!(outcome, Err(TransportError::Timeout(timeout)));
    }

    #[test]
    fn without_runtime_the_continuation_runs_inline() {
        let dispatcher = RequestDispatcher::new(Fixed(200));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        dispatcher.dispatch(request(Duration::from_secs(1)), move |outcome| {
            sink.lock().unwrap().push(outcome);
        });
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(matches!(seen[0], Err(TransportError::Aborted(_))));
    }

    #[test]
    fn pinned_runtime_is_used_from_plain_threads() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let dispatcher =
            RequestDispatcher::new(Fixed(200)).with_runtime(runtime.handle().clone());
        let (tx, rx) = std::sync::mpsc::channel();
        dispatcher.dispatch(request(Duration::from_secs(5)), move |outcome| {
            let _ = tx.send(outcome);
        });
        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(outcome.unwrap().status, 200);
    }

    #[test]
    fn shut_down_runtime_aborts_instead_of_dropping() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let handle = runtime.handle().clone();
        drop(runtime);

        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&calls);
        RequestDispatcher::new(Fixed(200))
            .with_runtime(handle)
            .dispatch(request(Duration::from_secs(1)), move |outcome| {
                sink.lock().unwrap().push(outcome);
            });
        std::thread::sleep(Duration::from_millis(300));

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert!(matches!(calls[0], Err(TransportError::Aborted(_))));
    }

    #[test]
    fn in_flight_request_is_aborted_when_runtime_drops() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        RequestDispatcher::new(Hangs)
            .with_runtime(runtime.handle().clone())
            .dispatch(request(Duration::from_secs(60)), move |outcome| {
                let _ = tx.send(outcome);
            });
        std::thread::sleep(Duration::from_millis(100));
        drop(runtime);

        let outcome = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(matches!(outcome, Err(TransportError::Aborted(_))));
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    }
}
