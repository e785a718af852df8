use std::time::Duration;

use crate::error::ConfigError;

pub const EMAIL_VAR: &str = "SKOOL_EMAIL";
pub const PASSWORD_VAR: &str = "SKOOL_PASSWORD";
pub const WEBDRIVER_VAR: &str = "WEBDRIVER_URL";

const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const LOGIN_TIMEOUT_SECS: u64 = 30;
const FEED_TIMEOUT_SECS: u64 = 20;
const SETTLE_MS: u64 = 5000;
const POLL_MS: u64 = 500;
const MAX_STALLS: u32 = 3;

/// Account credentials. Never logged.
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Read both secrets from the environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |var: &'static str| {
            lookup(var)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingCredential { var })
        };
        Ok(Self {
            email: read(EMAIL_VAR)?,
            password: read(PASSWORD_VAR)?,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Browser and crawl tunables.
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub webdriver_url: String,
    pub headless: bool,
    pub user_agent: String,
    pub login_timeout: Duration,
    pub feed_timeout: Duration,
    pub poll_interval: Duration,
    pub settle_delay: Duration,
    pub max_stalls: u32,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            headless: true,
            user_agent: USER_AGENT.to_string(),
            login_timeout: Duration::from_secs(LOGIN_TIMEOUT_SECS),
            feed_timeout: Duration::from_secs(FEED_TIMEOUT_SECS),
            poll_interval: Duration::from_millis(POLL_MS),
            settle_delay: Duration::from_millis(SETTLE_MS),
            max_stalls: MAX_STALLS,
        }
    }
}

impl BrowserConfig {
    /// Defaults, with the WebDriver endpoint taken from the flag, then the
    /// environment.
    pub fn resolve(webdriver: Option<String>) -> Self {
        let webdriver_url = webdriver
            .or_else(|| std::env::var(WEBDRIVER_VAR).ok())
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_WEBDRIVER_URL.to_string());
        Self {
            webdriver_url,
            ..Self::default()
        }
    }
}
