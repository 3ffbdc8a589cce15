//! Central module for application-wide configuration settings.
//!
//! Settings are layered: compiled defaults, then an optional TOML file named
//! by `EDA_CONFIG`, then individual `EDA_*` environment variables. Each layer
//! overrides the previous one.

use serde::Deserialize;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "EDA_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnv { var: &'static str, reason: String },
}

/// Where the session snapshot is kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum StorageBackend {
    Memory,
    File(PathBuf),
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "" => Err("storage must be \"memory\" or a file path".to_string()),
            "memory" => Ok(Self::Memory),
            path => Ok(Self::File(PathBuf::from(path))),
        }
    }
}

impl TryFrom<String> for StorageBackend {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Who validates tokens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum IdentityBackend {
    Demo,
    Remote(String),
}

impl FromStr for IdentityBackend {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "demo" => Ok(Self::Demo),
            url if url.starts_with("http://") || url.starts_with("https://") => {
                Ok(Self::Remote(url.to_string()))
            }
            other => Err(format!(
                "identity must be \"demo\" or an http(s) base url, got {other:?}"
            )),
        }
    }
}

impl TryFrom<String> for IdentityBackend {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub addr: SocketAddr,
    pub storage: StorageBackend,
    pub identity: IdentityBackend,
    /// Base simulated latency per operation.
    pub latency_ms: u64,
    /// Random extra latency on top of `latency_ms`.
    pub latency_jitter_ms: u64,
    /// Mounts the `/debug` routes.
    pub debug_hooks: bool,
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            storage: StorageBackend::Memory,
            identity: IdentityBackend::Demo,
            latency_ms: 400,
            latency_jitter_ms: 0,
            debug_hooks: false,
            log_json: false,
        }
    }
}

impl Config {
    /// Loads from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|var| std::env::var(var).ok())
    }

    /// Loads using `lookup` in place of the process environment.
    pub fn load_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(PathBuf::from(path))?,
            None => Self::default(),
        };
        config.apply_env(lookup)?;
        Ok(config)
    }

    pub fn from_file(path: PathBuf) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(&path).map_err(|source| ConfigError::Read { path, source })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("EDA_ADDR") {
            self.addr = parse_env("EDA_ADDR", &value)?;
        }
        if let Some(value) = lookup("EDA_STORAGE") {
            self.storage = parse_env("EDA_STORAGE", &value)?;
        }
        if let Some(value) = lookup("EDA_IDENTITY") {
            self.identity = parse_env("EDA_IDENTITY", &value)?;
        }
        if let Some(value) = lookup("EDA_LATENCY_MS") {
            self.latency_ms = parse_env("EDA_LATENCY_MS", &value)?;
        }
        if let Some(value) = lookup("EDA_LATENCY_JITTER_MS") {
            self.latency_jitter_ms = parse_env("EDA_LATENCY_JITTER_MS", &value)?;
        }
        if let Some(value) = lookup("EDA_DEBUG_HOOKS") {
            self.debug_hooks = parse_bool("EDA_DEBUG_HOOKS", &value)?;
        }
        if let Some(value) = lookup("EDA_LOG_JSON") {
            self.log_json = parse_bool("EDA_LOG_JSON", &value)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    #[must_use]
    pub fn latency_jitter(&self) -> Duration {
        Duration::from_millis(self.latency_jitter_ms)
    }
}

fn parse_env<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|err: T::Err| ConfigError::InvalidEnv {
        var,
        reason: err.to_string(),
    })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidEnv {
            var,
            reason: "expected bool".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::load_with(env(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert!(!config.debug_hooks);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = Config::load_with(env(&[
            ("EDA_ADDR", "0.0.0.0:8080"),
            ("EDA_STORAGE", "/tmp/eda/session.json"),
            ("EDA_IDENTITY", "https://api.eda.example"),
            ("EDA_LATENCY_MS", "0"),
            ("EDA_DEBUG_HOOKS", "yes"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 8080);
        assert_eq!(
            config.storage,
            StorageBackend::File(PathBuf::from("/tmp/eda/session.json"))
        );
        assert_eq!(
            config.identity,
            IdentityBackend::Remote("https://api.eda.example".to_string())
        );
        assert_eq!(config.latency(), Duration::ZERO);
        assert!(config.debug_hooks);
    }

    #[test]
    fn bad_environment_values_are_reported() {
        let err = Config::load_with(env(&[("EDA_LATENCY_MS", "slow")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: "EDA_LATENCY_MS", .. }));

        let err = Config::load_with(env(&[("EDA_IDENTITY", "ldap://x")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: "EDA_IDENTITY", .. }));

        let err = Config::load_with(env(&[("EDA_DEBUG_HOOKS", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { var: "EDA_DEBUG_HOOKS", .. }));
    }

    #[test]
    fn toml_file_then_environment() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("eda.toml");
        std::fs::write(
            &path,
            "storage = \"memory\"\nlatency_ms = 250\ndebug_hooks = true\n",
        )
        .unwrap();

        let path_str = path.to_string_lossy().to_string();
        let config = Config::load_with(env(&[
            (CONFIG_PATH_VAR, path_str.as_str()),
            ("EDA_DEBUG_HOOKS", "false"),
        ]))
        .unwrap();

        assert_eq!(config.latency_ms, 250);
        assert!(!config.debug_hooks);
        assert_eq!(config.identity, IdentityBackend::Demo);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Config::from_toml_str("databse_url = \"x\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
