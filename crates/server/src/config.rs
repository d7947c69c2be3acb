use std::{collections::HashMap, fs, time::Duration};

use anyhow::Context;
use device_client::{DeviceConfig, DEFAULT_TIMEOUT};
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server_bind: String,
    pub light_controller_ip: String,
    pub zone_id: String,
    pub request_timeout_ms: u64,
    pub fallback_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            light_controller_ip: "127.0.0.1".into(),
            zone_id: "0".into(),
            request_timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            fallback_path: "response.json".into(),
        }
    }
}

impl Settings {
    pub fn device_config(&self) -> anyhow::Result<DeviceConfig> {
        let config = DeviceConfig::new(&self.light_controller_ip, self.zone_id.as_str())
            .with_context(|| {
                format!(
                    "invalid light controller settings (ip '{}', zone '{}')",
                    self.light_controller_ip, self.zone_id
                )
            })?;
        Ok(config
            .with_timeout(Duration::from_millis(self.request_timeout_ms))
            .with_fallback_path(&self.fallback_path))
    }
}

/// Defaults, then `server.toml`, then the environment. Read once at start-up.
pub fn load_settings() -> Settings {
    let file = fs::read_to_string("server.toml").ok();
    load_settings_from(file.as_deref(), |key| std::env::var(key).ok())
}

pub(crate) fn load_settings_from(
    file: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file {
        match toml::from_str::<HashMap<String, toml::Value>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_value(&file_cfg, "bind_addr") {
                    settings.server_bind = v;
                }
                if let Some(v) = file_value(&file_cfg, "light_controller_ip") {
                    settings.light_controller_ip = v;
                }
                if let Some(v) = file_value(&file_cfg, "zone_id") {
                    settings.zone_id = v;
                }
                if let Some(v) = file_value(&file_cfg, "request_timeout_ms") {
                    apply_timeout(&mut settings, &v);
                }
                if let Some(v) = file_value(&file_cfg, "fallback_path") {
                    settings.fallback_path = v;
                }
            }
            Err(error) => warn!(%error, "ignoring unparsable server.toml"),
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("LIGHT_CONTROLLER_IP") {
        settings.light_controller_ip = v;
    }
    if let Some(v) = env("APP__LIGHT_CONTROLLER_IP") {
        settings.light_controller_ip = v;
    }

    if let Some(v) = env("ZONE_ID") {
        settings.zone_id = v;
    }
    if let Some(v) = env("APP__ZONE_ID") {
        settings.zone_id = v;
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_MS") {
        apply_timeout(&mut settings, &v);
    }

    if let Some(v) = env("APP__FALLBACK_PATH") {
        settings.fallback_path = v;
    }

    settings
}

/// Strings are taken as-is and integers as their decimal text; other types are skipped.
fn file_value(file_cfg: &HashMap<String, toml::Value>, key: &str) -> Option<String> {
    match file_cfg.get(key)? {
        toml::Value::String(v) => Some(v.clone()),
        toml::Value::Integer(v) => Some(v.to_string()),
        other => {
            warn!(key, kind = other.type_str(), "ignoring server.toml value of unexpected type");
            None
        }
    }
}

fn apply_timeout(settings: &mut Settings, raw: &str) {
    if let Ok(parsed) = raw.trim().parse::<u64>() {
        if parsed > 0 {
            settings.request_timeout_ms = parsed;
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
