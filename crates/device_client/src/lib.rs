//! Talks to the light controller: resolves the sequence catalog (live, else the local
//! snapshot) and forwards activation and deactivation commands under a hard deadline.

pub mod config;
pub mod error;
pub mod gateway;
pub mod resolver;
pub mod source;

pub use config::{ConfigError, DeviceConfig, DEFAULT_TIMEOUT};
pub use error::{CommandError, SourceError, SourceUnavailable};
pub use gateway::{ActivationResult, CommandGateway};
pub use resolver::{CatalogResolver, Resolution};
pub use source::{CatalogSource, LiveDeviceSource, SnapshotSource};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
