//! [`HttpTransport`] backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use dream_account_contracts::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError,
};
use reqwest::Client;
use tracing::debug;

/// Production transport. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport with a fresh client.
    ///
    /// Redirects are not followed in debug builds so an http -> https hop
    /// during development shows up as a status instead of a silent retry.
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .redirect(if cfg!(debug_assertions) {
                reqwest::redirect::Policy::none()
            } else {
                reqwest::redirect::Policy::default()
            })
            .build()
            .map_err(|err| TransportError::Other(err.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an existing client, e.g. one configured with custom roots.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        let method = match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
        };

        let mut builder = self.client.request(method, url.as_str()).timeout(timeout);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, timeout))?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| map_reqwest_error(err, timeout))?;

        debug!(status, len = bytes.len(), url = %url, "response received");
        Ok(HttpResponse::new(status, bytes.to_vec()))
    }
}

fn map_reqwest_error(err: reqwest::Error, timeout: Duration) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout(timeout)
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else if err.is_builder() || err.is_request() {
        TransportError::InvalidRequest(err.to_string())
    } else if err.is_body() || err.is_decode() {
        TransportError::Body(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}
