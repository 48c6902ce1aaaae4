use std::fmt;
use std::time::Duration;

use sforce_core::{SalesforceError, SalesforceResult};
use url::Url;

/// Production login endpoint. Sandboxes use `https://test.salesforce.com`.
pub const DEFAULT_LOGIN_URL: &str = "https://login.salesforce.com";

pub const DEFAULT_API_VERSION: &str = "59.0";

/// Settings needed to open a [`crate::RestSession`].
#[derive(Clone)]
pub struct SessionConfig {
    pub login_url: Url,
    /// API version without the `v` prefix, e.g. `59.0`.
    pub api_version: String,
    pub username: String,
    /// Password, with the security token appended when the org requires one.
    pub password: String,
    pub timeout: Duration,
}

impl SessionConfig {
    /// Creates a configuration for the production login endpoint.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> SalesforceResult<Self> {
        Ok(Self {
            login_url: parse_url(DEFAULT_LOGIN_URL)?,
            api_version: DEFAULT_API_VERSION.to_string(),
            username: username.into(),
            password: password.into(),
            timeout: Duration::from_secs(60),
        })
    }

    pub fn with_login_url(mut self, login_url: &str) -> SalesforceResult<Self> {
        self.login_url = parse_url(login_url)?;
        Ok(self)
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        let version = api_version.into();
        self.api_version = version.trim_start_matches('v').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keeps the password out of logs.
impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("login_url", &self.login_url.as_str())
            .field("api_version", &self.api_version)
            .field("username", &self.username)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

pub(crate) fn parse_url(value: &str) -> SalesforceResult<Url> {
    Url::parse(value).map_err(|e| SalesforceError::InvalidUrl(format!("{}: {}", value, e)))
}
