use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use shared::domain::CatalogPayload;
use url::Url;

use crate::{config::DeviceConfig, error::SourceError};

/// One place a catalog can come from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn fetch(&self) -> Result<CatalogPayload, SourceError>;
}

pub struct LiveDeviceSource {
    http: Client,
    url: Url,
    timeout: Duration,
}

impl LiveDeviceSource {
    pub fn new(http: Client, config: &DeviceConfig) -> Self {
        Self {
            http,
            url: config.catalog_url(),
            timeout: config.timeout,
        }
    }

    async fn fetch_once(&self) -> Result<CatalogPayload, SourceError> {
        let response = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(SourceError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        let body = response.bytes().await.map_err(SourceError::Transport)?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl CatalogSource for LiveDeviceSource {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn fetch(&self) -> Result<CatalogPayload, SourceError> {
        // Dropping the request future on expiry closes the connection; nothing read
        // before the deadline is kept.
        tokio::time::timeout(self.timeout, self.fetch_once())
            .await
            .map_err(|_| SourceError::Timeout(self.timeout))?
    }
}

/// A previously captured catalog on local disk.
pub struct SnapshotSource {
    path: PathBuf,
    timeout: Duration,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
        }
    }

    async fn read_once(&self) -> Result<CatalogPayload, SourceError> {
        let raw = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Snapshot {
                path: self.path.clone(),
                source,
            })?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

#[async_trait]
impl CatalogSource for SnapshotSource {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    async fn fetch(&self) -> Result<CatalogPayload, SourceError> {
        tokio::time::timeout(self.timeout, self.read_once())
            .await
            .map_err(|_| SourceError::Timeout(self.timeout))?
    }
}
