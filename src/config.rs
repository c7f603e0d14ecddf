//! Application-level configuration loading: rest timing, paging and storage location.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

use crate::state::{game::DEFAULT_ITEMS_PER_PAGE, rotation::DEFAULT_REST_DURATION};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "PLAYER_ROTATION_CONFIG_PATH";
/// Interval between two rest countdown passes.
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);
/// Directory used by the file store when nothing else is configured.
const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    rest_duration: Duration,
    tick_interval: Duration,
    items_per_page: usize,
    data_dir: PathBuf,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to baked-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        rest_secs = app_config.rest_duration.as_secs(),
                        items_per_page = app_config.items_per_page,
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// Cooldown applied to players after a finished game.
    pub fn rest_duration(&self) -> Duration {
        self.rest_duration
    }

    /// Period of the rest countdown.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Games shown per page.
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Directory used by the file store.
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Same configuration with a different rest duration and tick interval.
    pub fn with_timing(mut self, rest_duration: Duration, tick_interval: Duration) -> Self {
        self.rest_duration = rest_duration;
        self.tick_interval = tick_interval.max(Duration::from_millis(1));
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rest_duration: DEFAULT_REST_DURATION,
            tick_interval: DEFAULT_TICK_INTERVAL,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    rest_duration_secs: Option<u64>,
    tick_interval_ms: Option<u64>,
    items_per_page: Option<usize>,
    data_dir: Option<PathBuf>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        Self {
            rest_duration: value
                .rest_duration_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.rest_duration),
            tick_interval: value
                .tick_interval_ms
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick_interval),
            items_per_page: value
                .items_per_page
                .filter(|count| *count > 0)
                .unwrap_or(defaults.items_per_page),
            data_dir: value.data_dir.unwrap_or(defaults.data_dir),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_keep_defaults_for_missing_fields() {
        let raw: RawConfig = serde_json::from_str(r#"{ "rest_duration_secs": 120 }"#).unwrap();
        let config = AppConfig::from(raw);

        assert_eq!(config.rest_duration(), Duration::from_secs(120));
        assert_eq!(config.tick_interval(), DEFAULT_TICK_INTERVAL);
        assert_eq!(config.items_per_page(), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(config.data_dir(), &PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn zero_values_are_ignored() {
        let raw: RawConfig =
            serde_json::from_str(r#"{ "tick_interval_ms": 0, "items_per_page": 0 }"#).unwrap();
        let config = AppConfig::from(raw);

        assert_eq!(config.tick_interval(), DEFAULT_TICK_INTERVAL);
        assert_eq!(config.items_per_page(), DEFAULT_ITEMS_PER_PAGE);
    }
}
