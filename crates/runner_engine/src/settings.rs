use std::fmt;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.apify.com";
/// Profile scraper actor the runs are launched against unless overridden.
pub const DEFAULT_ACTOR_ID: &str = "GdWCkxBtKWOsKjdch";
pub const ENV_API_TOKEN: &str = "APIFY_API_TOKEN";
pub const ENV_BASE_URL: &str = "APIFY_API_BASE_URL";
pub const ENV_ACTOR_ID: &str = "APIFY_ACTOR_ID";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("APIFY_API_TOKEN is not set")]
    MissingToken,
}

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_bytes: 64 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Bearer credential for the remote API. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Rejects absent or blank tokens so no request is ever sent without one.
    pub fn new(raw: Option<String>) -> Result<Self, ConfigError> {
        match raw.map(|t| t.trim().to_string()) {
            Some(token) if !token.is_empty() => Ok(Self(token)),
            _ => Err(ConfigError::MissingToken),
        }
    }

    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_missing() {
        assert_eq!(ApiToken::new(None), Err(ConfigError::MissingToken));
        assert_eq!(ApiToken::new(Some("  ".into())), Err(ConfigError::MissingToken));
        let token = ApiToken::new(Some(" abc\n".into())).unwrap();
        assert_eq!(token.expose(), "abc");
        assert_eq!(format!("{token:?}"), "ApiToken(***)");
    }
}
