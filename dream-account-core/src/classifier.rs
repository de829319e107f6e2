//! Maps server error codes onto [`ErrorKind`].

use dream_account_model::ErrorKind;

/// Classify the `error` field of a failure response.
///
/// Absent or empty codes and codes outside the table are `Unknown`. Total
/// and side-effect free.
pub fn classify(server_code: Option<&str>) -> ErrorKind {
    server_code
        .filter(|code| !code.is_empty())
        .and_then(ErrorKind::from_server_code)
        .unwrap_or(ErrorKind::Unknown)
}
