//! Client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::radio::DEFAULT_DISPLAY;
use crate::{Result, StrategistError};

/// Base URL of a locally running prediction service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for a [`crate::SessionController`] and its HTTP client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prediction service root, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    #[serde(rename = "request_timeout_ms", with = "millis")]
    pub request_timeout: Duration,
    /// How long each team radio message stays on screen
    #[serde(rename = "radio_display_ms", with = "millis")]
    pub radio_display: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_TIMEOUT,
            radio_display: DEFAULT_DISPLAY,
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with `STRATEGIST_BASE_URL`, `STRATEGIST_TIMEOUT_MS` and
    /// `STRATEGIST_RADIO_DISPLAY_MS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup("STRATEGIST_BASE_URL") {
            config = config.with_base_url(url);
        }
        if let Some(raw) = lookup("STRATEGIST_TIMEOUT_MS") {
            config.request_timeout = parse_millis("STRATEGIST_TIMEOUT_MS", &raw)?;
        }
        if let Some(raw) = lookup("STRATEGIST_RADIO_DISPLAY_MS") {
            config.radio_display = parse_millis("STRATEGIST_RADIO_DISPLAY_MS", &raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_radio_display(mut self, display: Duration) -> Self {
        self.radio_display = display;
        self
    }

    /// Reject settings no client could work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(StrategistError::config(format!(
                "base URL '{}' must start with http:// or https://",
                self.base_url
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(StrategistError::config("request timeout must be non-zero"));
        }
        if self.radio_display.is_zero() {
            return Err(StrategistError::config("radio display time must be non-zero"));
        }
        Ok(())
    }
}

fn parse_millis(name: &str, raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| StrategistError::config(format!("{name}='{raw}': {e}")))
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
