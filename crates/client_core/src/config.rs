use std::{env, path::Path, time::Duration};

use anyhow::{bail, Context};
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "lights.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientSettings {
    /// Base URL of the recommendation service; `recommendations` and
    /// `events` are resolved against it.
    pub endpoint: String,
    pub campaign_arn: String,
    pub event_tracker_arn: String,
    pub database_url: String,
    pub request_timeout_secs: u64,
    /// `source` property attached to feedback events.
    pub event_source: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:5000/personalize".into(),
            campaign_arn: "arn:aws:personalize:us-east-1:123456789012:campaign/iot-lights-campaign"
                .into(),
            event_tracker_arn:
                "arn:aws:personalize:us-east-1:123456789012:event-tracker/iot-lights-event-tracker"
                    .into(),
            database_url: "sqlite://./data/lights.db".into(),
            request_timeout_secs: 10,
            event_source: "cli".into(),
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Event tracker id is the last path segment of the tracker ARN.
    pub fn tracking_id(&self) -> &str {
        self.event_tracker_arn
            .rsplit('/')
            .next()
            .unwrap_or(&self.event_tracker_arn)
    }

    pub fn normalized_database_url(&self) -> String {
        normalize_database_url(&self.database_url)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let endpoint = Url::parse(&self.endpoint)
            .with_context(|| format!("invalid recommendation endpoint '{}'", self.endpoint))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            bail!("recommendation endpoint must be http(s), got '{}'", self.endpoint);
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        if self.tracking_id().is_empty() {
            bail!("event tracker ARN '{}' has no tracker id", self.event_tracker_arn);
        }
        Ok(())
    }
}

/// Loads settings from `lights.toml` in the working directory (optional) and
/// the environment.
pub fn load_settings() -> anyhow::Result<ClientSettings> {
    load_settings_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Layering: defaults, then the TOML file at `path` when present, then
/// `APP__*` variables, then `PERSONALIZE_CAMPAIGN_ARN` /
/// `PERSONALIZE_EVENT_TRACKER_ARN`.
pub fn load_settings_from(path: &Path) -> anyhow::Result<ClientSettings> {
    let defaults = ClientSettings::default();
    let mut builder = Config::builder()
        .set_default("endpoint", defaults.endpoint)?
        .set_default("campaign_arn", defaults.campaign_arn)?
        .set_default("event_tracker_arn", defaults.event_tracker_arn)?
        .set_default("database_url", defaults.database_url)?
        .set_default("request_timeout_secs", defaults.request_timeout_secs)?
        .set_default("event_source", defaults.event_source)?
        .add_source(File::from(path).format(FileFormat::Toml).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .try_parsing(true),
        );

    if let Ok(v) = env::var("PERSONALIZE_CAMPAIGN_ARN") {
        builder = builder.set_override("campaign_arn", v)?;
    }
    if let Ok(v) = env::var("PERSONALIZE_EVENT_TRACKER_ARN") {
        builder = builder.set_override("event_tracker_arn", v)?;
    }

    let settings: ClientSettings = builder
        .build()
        .with_context(|| format!("failed to load client settings from '{}'", path.display()))?
        .try_deserialize()
        .context("client settings have the wrong shape")?;
    settings.validate()?;
    Ok(settings)
}

fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return ClientSettings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        return format!("sqlite://{}", path.replace('\\', "/"));
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
