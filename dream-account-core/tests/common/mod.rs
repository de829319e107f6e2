//! Shared fixtures for dream-account-core integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dream_account_core::AccountSession;
use dream_account_core::contracts::{
    AccountSettings, HttpRequest, HttpResponse, HttpTransport, TransportError,
};

/// What the mock does for one request.
#[derive(Debug, Clone)]
pub enum Reply {
    Respond(u16, String),
    /// Respond after sleeping on the runtime clock.
    Delay(Duration, u16, String),
    Fail(TransportError),
    Hang,
}

/// Scripted transport. Replies are consumed in order; once the script is
/// exhausted every call fails with `TransportError::Other`.
#[derive(Debug, Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn scripted(replies: impl IntoIterator<Item = Reply>) -> Arc<Self> {
        let mock = Self::new();
        mock.script.lock().unwrap().extend(replies);
        mock
    }

    pub fn respond(status: u16, body: &str) -> Arc<Self> {
        Self::scripted([Reply::Respond(status, body.to_string())])
    }

    pub fn push(&self, reply: Reply) {
        self.script.lock().unwrap().push_back(reply);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        let reply = self.script.lock().unwrap().pop_front();
        match reply {
            Some(Reply::Respond(status, body)) => Ok(HttpResponse::new(status, body)),
            Some(Reply::Delay(delay, status, body)) => {
                tokio::time::sleep(delay).await;
                Ok(HttpResponse::new(status, body))
            }
            Some(Reply::Fail(err)) => Err(err),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(TransportError::Other("script exhausted".to_string())),
        }
    }
}

pub fn settings() -> AccountSettings {
    AccountSettings::new("http://accounts.test", Duration::from_secs(5))
}

pub fn session(transport: &Arc<MockTransport>) -> AccountSession {
    AccountSession::new(Arc::clone(transport), settings())
}

pub const ALICE_LOGIN: &str =
    r#"{"user":{"user_name":"alice","user_id":42},"token":"abc123","message":"welcome"}"#;

pub const ALICE_USER: &str = r#"{"user":{"user_name":"alice","user_id":42}}"#;
