//! Turns raw response bytes into payloads.
//!
//! Parsing is attempted for every response. Anything that is not a JSON
//! object becomes [`DecodeOutcome::Malformed`]; missing or ill-typed fields
//! inside an object fall back to defaults instead of failing.

use dream_account_model::UserRecord;
use dream_account_model::wire::fields;
use serde_json::{Map, Value};

/// Which fields a success body is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    /// `user` only (register, auth).
    User,
    /// `user` plus `token` (login).
    UserAndToken,
}

/// Fields extracted from a well-formed body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Status 200 or 201.
    Success {
        /// Nested `user` object, or the flat top level.
        user: UserRecord,
        /// Only read for [`DecodeStrategy::UserAndToken`]; never empty.
        token: Option<String>,
        /// `message`, empty when absent.
        message: String,
    },
    /// Any other status.
    Failure {
        /// Raw server code, possibly empty.
        error: String,
        /// `message`, empty when absent.
        message: String,
    },
}

/// Result of [`decode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The body was a JSON object.
    Decoded(Payload),
    /// Empty, not JSON, or JSON that is not an object.
    Malformed,
}

/// 200 and 201 are the only success statuses.
pub fn is_success_status(status: u16) -> bool {
    matches!(status, 200 | 201)
}

/// Decode a response body. Never fails; see [`DecodeOutcome`].
pub fn decode(body: &[u8], status: u16, strategy: DecodeStrategy) -> DecodeOutcome {
    let document = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(document)) => document,
        Ok(_) | Err(_) => return DecodeOutcome::Malformed,
    };

    let message = string_field(&document, fields::MESSAGE).unwrap_or_default();

    if !is_success_status(status) {
        return DecodeOutcome::Decoded(Payload::Failure {
            error: string_field(&document, fields::ERROR).unwrap_or_default(),
            message,
        });
    }

    let token = match strategy {
        DecodeStrategy::User => None,
        DecodeStrategy::UserAndToken => {
            string_field(&document, fields::TOKEN).filter(|t| !t.is_empty())
        }
    };

    DecodeOutcome::Decoded(Payload::Success {
        user: user_from(&document),
        token,
        message,
    })
}

/// The canonical shape nests the user under `"user"`. A body without that
/// object is read flat, which is how some auth deployments answer.
fn user_from(document: &Map<String, Value>) -> UserRecord {
    let source = match document.get(fields::USER) {
        Some(Value::Object(user)) => user,
        _ => document,
    };

    let name = string_field(source, fields::USER_NAME).unwrap_or_default();
    let id = source
        .get(fields::USER_ID)
        .and_then(integer)
        .unwrap_or(UserRecord::DEFAULT_ID);

    UserRecord::new(name, id)
}

fn string_field(object: &Map<String, Value>, field: &str) -> Option<String> {
    object.get(field).and_then(Value::as_str).map(str::to_owned)
}

fn integer(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}
