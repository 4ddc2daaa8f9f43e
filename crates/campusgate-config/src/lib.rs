//! Configuration for the campusgate TUI.
//!
//! TOML profiles merged with environment overrides, and translation to
//! `campusgate_core::ServiceConfig`. The filtering service has no
//! client credentials, so a profile is just a URL plus transport tuning.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use campusgate_core::ServiceConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no profile named '{profile}'")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults applied when a profile doesn't override them.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named service profiles (e.g. one per campus).
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: default_timeout(),
            refresh_interval: default_refresh_interval(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}
fn default_refresh_interval() -> u64 {
    30
}

/// A named filtering-service profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Service base URL (e.g., "http://10.0.4.2:8000").
    pub service: String,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override dashboard refresh interval (seconds).
    pub refresh_interval: Option<u64>,
}

impl Config {
    /// Look up a profile, falling back to `default_profile`.
    pub fn resolve_profile(&self, name: Option<&str>) -> Result<(&str, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");

        self.profiles
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.into(),
            })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("edu", "campusgate", "campusgate").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("campusgate");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit path (used by tests and `--config`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CAMPUSGATE_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Save to an explicit path.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to runtime config ───────────────────────────────────

/// Build a `ServiceConfig` from a profile plus the global defaults.
pub fn profile_to_service_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ServiceConfig, ConfigError> {
    // Validate eagerly so a typo fails at startup, not on first request.
    let _: url::Url = profile
        .service
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "service".into(),
            reason: format!("invalid URL: {}", profile.service),
        })?;

    Ok(ServiceConfig {
        base_url: profile.service.clone(),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        accept_invalid_certs: profile.insecure.unwrap_or(defaults.insecure),
        refresh_interval_secs: profile
            .refresh_interval
            .unwrap_or(defaults.refresh_interval),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn profile(service: &str) -> Profile {
        Profile {
            service: service.into(),
            insecure: None,
            timeout: None,
            refresh_interval: None,
        }
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("nope.toml")).unwrap();

        assert_eq!(config.default_profile.as_deref(), Some("default"));
        assert!(config.profiles.is_empty());
        assert_eq!(config.defaults.timeout, 30);
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config
            .profiles
            .insert("campus-a".into(), profile("http://10.0.4.2:8000"));
        config.default_profile = Some("campus-a".into());

        save_config_to(&config, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded.default_profile.as_deref(), Some("campus-a"));
        assert_eq!(
            loaded.profiles.get("campus-a").unwrap().service,
            "http://10.0.4.2:8000"
        );
    }

    #[test]
    fn env_var_overrides_file_value() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                default_profile = "default"

                [defaults]
                timeout = 10

                [profiles.default]
                service = "http://localhost:8000"
                "#,
            )?;
            jail.set_env("CAMPUSGATE_DEFAULTS_TIMEOUT", "5");

            let config = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(config.defaults.timeout, 5);
            Ok(())
        });
    }

    #[test]
    fn resolve_profile_falls_back_to_default() {
        let mut config = Config::default();
        config
            .profiles
            .insert("default".into(), profile("http://localhost:8000"));

        let (name, _) = config.resolve_profile(None).unwrap();
        assert_eq!(name, "default");

        let err = config.resolve_profile(Some("ghost")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { .. }));
    }

    #[test]
    fn profile_overrides_beat_defaults() {
        let defaults = Defaults::default();
        let mut p = profile("https://filter.campus.edu");
        p.timeout = Some(5);
        p.insecure = Some(true);

        let service = profile_to_service_config(&p, &defaults).unwrap();
        assert_eq!(service.timeout, Duration::from_secs(5));
        assert!(service.accept_invalid_certs);
        assert_eq!(service.refresh_interval_secs, 30);
    }

    #[test]
    fn invalid_service_url_is_rejected() {
        let err = profile_to_service_config(&profile("not a url"), &Defaults::default())
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }
}
