//! Names the account server uses on the wire.

/// Endpoint paths, relative to the configured base URL.
pub mod paths {
    pub const REGISTER: &str = "/api/account/register";
    pub const LOGIN: &str = "/api/account/login";
    pub const AUTH: &str = "/api/account/auth";
}

/// JSON field names in request and response bodies.
pub mod fields {
    pub const USER: &str = "user";
    pub const USER_NAME: &str = "user_name";
    pub const USER_ID: &str = "user_id";
    pub const USER_PASSWORD: &str = "user_password";
    pub const TOKEN: &str = "token";
    pub const MESSAGE: &str = "message";
    pub const ERROR: &str = "error";
}

/// Header names and values.
pub mod headers {
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const JSON_UTF8: &str = "application/json;charset=UTF-8";
    pub const AUTHORIZATION: &str = "Authorization";

    pub fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }
}
