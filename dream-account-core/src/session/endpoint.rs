use dream_account_contracts::{AccountSettings, HttpMethod, HttpRequest};
use dream_account_model::wire::{headers, paths};
use dream_account_model::{Credentials, ErrorKind, OperationKind, OperationResult};

use crate::classifier::classify;
use crate::decoder::{DecodeOutcome, DecodeStrategy, Payload, decode};
use crate::dispatcher::TransportOutcome;

/// Everything that differs between register, login and auth.
pub(crate) struct Endpoint {
    pub(crate) kind: OperationKind,
    method: HttpMethod,
    path: &'static str,
    body: Option<Vec<u8>>,
    bearer: Option<String>,
    strategy: DecodeStrategy,
    /// Reported when settings are unavailable.
    pub(crate) unavailable: ErrorKind,
}

impl Endpoint {
    pub(crate) fn register(credentials: &Credentials) -> Result<Self, ErrorKind> {
        Ok(Self {
            kind: OperationKind::Register,
            method: HttpMethod::Post,
            path: paths::REGISTER,
            body: Some(credentials_body(credentials)?),
            bearer: None,
            strategy: DecodeStrategy::User,
            unavailable: ErrorKind::InputInvalid,
        })
    }

    pub(crate) fn login(credentials: &Credentials) -> Result<Self, ErrorKind> {
        Ok(Self {
            kind: OperationKind::Login,
            method: HttpMethod::Post,
            path: paths::LOGIN,
            body: Some(credentials_body(credentials)?),
            bearer: None,
            strategy: DecodeStrategy::UserAndToken,
            unavailable: ErrorKind::InputInvalid,
        })
    }

    pub(crate) fn auth(token: String) -> Self {
        Self {
            kind: OperationKind::Auth,
            method: HttpMethod::Get,
            path: paths::AUTH,
            body: None,
            bearer: Some(token),
            strategy: DecodeStrategy::User,
            unavailable: ErrorKind::TokenInvalid,
        }
    }

    pub(crate) fn strategy(&self) -> DecodeStrategy {
        self.strategy
    }

    pub(crate) fn request(self, settings: &AccountSettings) -> HttpRequest {
        let mut request = HttpRequest::new(
            self.method,
            settings.endpoint(self.path),
            settings.timeout(),
        );
        if let Some(token) = self.bearer {
            request = request.with_header(headers::AUTHORIZATION, headers::bearer(&token));
        }
        if let Some(body) = self.body {
            request = request
                .with_header(headers::CONTENT_TYPE, headers::JSON_UTF8)
                .with_body(body);
        }
        request
    }
}

fn credentials_body(credentials: &Credentials) -> Result<Vec<u8>, ErrorKind> {
    serde_json::to_vec(credentials).map_err(|_| ErrorKind::InputInvalid)
}

/// Collapse a transport outcome into the caller-facing result.
pub(crate) fn resolve(
    kind: OperationKind,
    strategy: DecodeStrategy,
    outcome: TransportOutcome,
) -> OperationResult {
    let response = match outcome {
        Ok(response) => response,
        Err(_) => return OperationResult::failure(kind, ErrorKind::TransportError),
    };

    match decode(&response.body, response.status, strategy) {
        DecodeOutcome::Malformed => {
            OperationResult::failure(kind, ErrorKind::TransportError)
        }
        DecodeOutcome::Decoded(Payload::Success {
            user,
            token,
            message,
        }) => OperationResult::success(kind, user, token, message),
        DecodeOutcome::Decoded(Payload::Failure { error, message }) => {
            OperationResult::failure_with_message(kind, classify(Some(&error)), message)
        }
    }
}
