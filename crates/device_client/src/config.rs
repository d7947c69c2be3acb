use std::{path::PathBuf, time::Duration};

use thiserror::Error;
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid light controller address '{host}': {source}")]
    InvalidHost {
        host: String,
        source: url::ParseError,
    },
    #[error("light controller address '{0}' must use http or https")]
    UnsupportedScheme(String),
    #[error("zone id must not be empty")]
    EmptyZone,
}

/// Fixed at start-up and handed to every component that talks to the controller.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    base_url: Url,
    zone_id: String,
    pub timeout: Duration,
    pub fallback_path: PathBuf,
}

impl DeviceConfig {
    /// `host` is either a bare host/IP (optionally with port), or a full `http(s)://` URL.
    pub fn new(host: &str, zone_id: impl Into<String>) -> Result<Self, ConfigError> {
        let host = host.trim();
        let raw = if host.contains("://") {
            host.to_string()
        } else {
            format!("http://{host}")
        };
        let base_url = Url::parse(&raw).map_err(|source| ConfigError::InvalidHost {
            host: host.to_string(),
            source,
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(host.to_string()));
        }

        let zone_id = zone_id.into();
        if zone_id.trim().is_empty() {
            return Err(ConfigError::EmptyZone);
        }

        Ok(Self {
            base_url,
            zone_id,
            timeout: DEFAULT_TIMEOUT,
            fallback_path: PathBuf::from("response.json"),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_fallback_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallback_path = path.into();
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn zone_id(&self) -> &str {
        &self.zone_id
    }

    pub fn catalog_url(&self) -> Url {
        self.endpoint(&["v1", "sequences"])
    }

    pub fn zone_sequence_url(&self) -> Url {
        self.endpoint(&["v1", "zones", self.zone_id.as_str(), "sequence"])
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // http(s) URLs always accept path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
