use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Coarse grouping of [`ErrorKind`] members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorFamily {
    /// The operation succeeded.
    Normal,
    /// Rejected before any request was sent.
    Local,
    /// The request never completed or the response could not be read.
    Transport,
    /// The server answered with a failure code.
    Server,
}

/// Closed taxonomy every operation outcome is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ErrorKind {
    Normal,

    /// Empty name/password, or no settings to build a request from.
    InputInvalid,
    /// No session token to authenticate with.
    TokenInvalid,

    TransportError,

    UsernameExists,
    UsernameInvalid,
    PasswordInvalid,
    InvalidCredentials,
    UserNotFound,
    UserBanned,
    LoginDisabled,
    TokenMissing,
    TokenRejected,
    TokenExpired,
    ValidationError,
    TooManyRequests,
    InternalError,
    ServiceUnavailable,
    /// A server code that is absent or not in the table.
    Unknown,
}

impl ErrorKind {
    /// Every member that maps to a wire code, in table order.
    pub const SERVER_DECLARED: [ErrorKind; 14] = [
        Self::UsernameExists,
        Self::UsernameInvalid,
        Self::PasswordInvalid,
        Self::InvalidCredentials,
        Self::UserNotFound,
        Self::UserBanned,
        Self::LoginDisabled,
        Self::TokenMissing,
        Self::TokenRejected,
        Self::TokenExpired,
        Self::ValidationError,
        Self::TooManyRequests,
        Self::InternalError,
        Self::ServiceUnavailable,
    ];

    /// Exact, case-sensitive lookup of a server `error` code.
    pub fn from_server_code(code: &str) -> Option<Self> {
        let kind = match code {
            "USERNAME_EXISTS" => Self::UsernameExists,
            "USERNAME_INVALID" => Self::UsernameInvalid,
            "PASSWORD_INVALID" => Self::PasswordInvalid,
            "INVALID_CREDENTIALS" => Self::InvalidCredentials,
            "USER_NOT_FOUND" => Self::UserNotFound,
            "USER_BANNED" => Self::UserBanned,
            "USER_LOGIN_DISABLED" => Self::LoginDisabled,
            "TOKEN_MISSING" => Self::TokenMissing,
            "TOKEN_INVALID" => Self::TokenRejected,
            "TOKEN_EXPIRED" => Self::TokenExpired,
            "VALIDATION_ERROR" => Self::ValidationError,
            "TOO_MANY_REQUESTS" => Self::TooManyRequests,
            "INTERNAL_ERROR" => Self::InternalError,
            "SERVICE_UNAVAILABLE" => Self::ServiceUnavailable,
            _ => return None,
        };
        Some(kind)
    }

    /// Wire code for server-declared members, `None` for the rest.
    pub const fn server_code(self) -> Option<&'static str> {
        match self {
            Self::UsernameExists => Some("USERNAME_EXISTS"),
            Self::UsernameInvalid => Some("USERNAME_INVALID"),
            Self::PasswordInvalid => Some("PASSWORD_INVALID"),
            Self::InvalidCredentials => Some("INVALID_CREDENTIALS"),
            Self::UserNotFound => Some("USER_NOT_FOUND"),
            Self::UserBanned => Some("USER_BANNED"),
            Self::LoginDisabled => Some("USER_LOGIN_DISABLED"),
            Self::TokenMissing => Some("TOKEN_MISSING"),
            Self::TokenRejected => Some("TOKEN_INVALID"),
            Self::TokenExpired => Some("TOKEN_EXPIRED"),
            Self::ValidationError => Some("VALIDATION_ERROR"),
            Self::TooManyRequests => Some("TOO_MANY_REQUESTS"),
            Self::InternalError => Some("INTERNAL_ERROR"),
            Self::ServiceUnavailable => Some("SERVICE_UNAVAILABLE"),
            Self::Normal
            | Self::InputInvalid
            | Self::TokenInvalid
            | Self::TransportError
            | Self::Unknown => None,
        }
    }

    pub const fn family(self) -> ErrorFamily {
        match self {
            Self::Normal => ErrorFamily::Normal,
            Self::InputInvalid | Self::TokenInvalid => ErrorFamily::Local,
            Self::TransportError => ErrorFamily::Transport,
            _ => ErrorFamily::Server,
        }
    }

    pub const fn is_normal(self) -> bool {
        matches!(self, Self::Normal)
    }

    pub const fn is_local(self) -> bool {
        matches!(self.family(), ErrorFamily::Local)
    }

    /// Transport and server failures, i.e. anything that needed the network.
    pub const fn is_network(self) -> bool {
        matches!(self.family(), ErrorFamily::Transport | ErrorFamily::Server)
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Normal => "no error",
            Self::InputInvalid => "input data not valid",
            Self::TokenInvalid => "session token not valid",
            Self::TransportError => "network request failed",
            Self::UsernameExists => "username already exists",
            Self::UsernameInvalid => "username not accepted",
            Self::PasswordInvalid => "password not accepted",
            Self::InvalidCredentials => "invalid username or password",
            Self::UserNotFound => "user not found",
            Self::UserBanned => "user is banned",
            Self::LoginDisabled => "login disabled for this user",
            Self::TokenMissing => "server did not receive a token",
            Self::TokenRejected => "server rejected the token",
            Self::TokenExpired => "token expired",
            Self::ValidationError => "request failed validation",
            Self::TooManyRequests => "too many requests",
            Self::InternalError => "server internal error",
            Self::ServiceUnavailable => "service unavailable",
            Self::Unknown => "unknown server error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_codes_map_both_ways() {
        for kind in ErrorKind::SERVER_DECLARED {
            let code = kind.server_code().unwrap();
            assert_eq!(ErrorKind::from_server_code(code), Some(kind));
            assert_eq!(kind.family(), ErrorFamily::Server);
        }
    }

    #[test]
    fn lookup_is_case_sensitive_and_exact() {
        assert_eq!(ErrorKind::from_server_code("username_exists"), None);
        assert_eq!(ErrorKind::from_server_code(" USERNAME_EXISTS"), None);
        assert_eq!(ErrorKind::from_server_code(""), None);
    }

    #[test]
    fn families() {
        assert!(ErrorKind::Normal.is_normal());
        assert!(ErrorKind::InputInvalid.is_local());
        assert!(ErrorKind::TokenInvalid.is_local());
        assert!(!ErrorKind::TokenInvalid.is_network());
        assert!(ErrorKind::TransportError.is_network());
        assert!(ErrorKind::Unknown.is_network());
        assert_eq!(ErrorKind::Unknown.server_code(), None);
    }
}
