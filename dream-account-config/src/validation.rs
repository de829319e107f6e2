use std::time::Duration;

use url::Url;

use crate::loader::error::ConfigLoadError;

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Normalise a configured base URL.
///
/// Users often write `localhost:8080`, which has no scheme; `http://` is
/// assumed in that case and a warning recorded. Trailing slashes are dropped
/// so endpoint joins never produce `//`.
pub fn normalize_base_url(
    raw: &str,
    warnings: &mut ConfigWarnings,
) -> Result<String, ConfigLoadError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        let normalized = format!("http://{trimmed}");
        warnings.push_with_hint(
            format!("base URL '{raw}' has no scheme; using '{normalized}'"),
            "write the scheme explicitly, e.g. https://accounts.example.com",
        );
        normalized
    };

    let parsed = Url::parse(&with_scheme).map_err(|source| {
        ConfigLoadError::InvalidBaseUrl {
            value: raw.to_string(),
            source,
        }
    })?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigLoadError::UnsupportedScheme {
                scheme: other.to_string(),
            });
        }
    }

    if parsed.scheme() == "http"
        && parsed
            .host_str()
            .is_some_and(|host| !matches!(host, "localhost" | "127.0.0.1" | "[::1]"))
    {
        warnings.push(format!(
            "base URL '{with_scheme}' is not encrypted; credentials and tokens are sent in clear text"
        ));
    }

    Ok(with_scheme)
}

/// Parse a humantime duration such as `30s` or `1m 30s`. Zero is rejected.
pub fn parse_timeout(raw: &str) -> Result<Duration, ConfigLoadError> {
    let duration = humantime::parse_duration(raw.trim()).map_err(|source| {
        ConfigLoadError::InvalidTimeout {
            value: raw.to_string(),
            source,
        }
    })?;
    if duration.is_zero() {
        return Err(ConfigLoadError::ZeroTimeout);
    }
    Ok(duration)
}
