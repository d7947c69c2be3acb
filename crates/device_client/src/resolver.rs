use reqwest::Client;
use shared::{
    domain::{Catalog, CatalogPayload},
    protocol::CatalogOrigin,
};
use tracing::{error, info, warn};

use crate::{
    config::DeviceConfig,
    error::{SourceError, SourceUnavailable},
    source::{CatalogSource, LiveDeviceSource, SnapshotSource},
};

/// A catalog plus where it came from. Built fresh on every call.
#[derive(Debug)]
pub struct Resolution {
    pub payload: CatalogPayload,
    pub origin: CatalogOrigin,
    /// Set when the snapshot was served; explains why the live source was skipped.
    pub live_failure: Option<SourceError>,
}

impl Resolution {
    pub fn served_fallback(&self) -> bool {
        self.origin == CatalogOrigin::Fallback
    }

    pub fn into_catalog(self) -> Catalog {
        self.payload.into_catalog()
    }
}

/// Tries the live controller once, then the snapshot. No retries, no caching.
pub struct CatalogResolver {
    live: Box<dyn CatalogSource>,
    fallback: Box<dyn CatalogSource>,
}

impl CatalogResolver {
    pub fn new(live: Box<dyn CatalogSource>, fallback: Box<dyn CatalogSource>) -> Self {
        Self { live, fallback }
    }

    pub fn from_config(config: &DeviceConfig, http: Client) -> Self {
        Self::new(
            Box::new(LiveDeviceSource::new(http, config)),
            Box::new(SnapshotSource::new(
                config.fallback_path.clone(),
                config.timeout,
            )),
        )
    }

    pub async fn resolve(&self) -> Result<Resolution, SourceUnavailable> {
        let live = match self.live.fetch().await {
            Ok(payload) => {
                return Ok(Resolution {
                    payload,
                    origin: CatalogOrigin::Live,
                    live_failure: None,
                })
            }
            Err(err) => err,
        };
        warn!(source = self.live.name(), error = %live, "catalog: live source failed");

        match self.fallback.fetch().await {
            Ok(payload) => {
                info!(source = self.fallback.name(), "catalog: serving fallback data");
                Ok(Resolution {
                    payload,
                    origin: CatalogOrigin::Fallback,
                    live_failure: Some(live),
                })
            }
            Err(fallback) => {
                error!(
                    live = %live,
                    fallback = %fallback,
                    "catalog: no source available"
                );
                Err(SourceUnavailable { live, fallback })
            }
        }
    }
}
