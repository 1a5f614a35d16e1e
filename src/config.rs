use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "timetable.toml";
pub const DEFAULT_DB_PATH: &str = "timetable.db";
pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const ENV_PREFIX: &str = "TIMETABLE_";
pub const CONFIG_PATH_ENV: &str = "TIMETABLE_CONFIG";

#[derive(Debug, Error)]
#[error("config error: {0}")]
pub struct ConfigError(#[from] Box<figment::Error>);

/// Top-level config (timetable.toml + TIMETABLE_* env overrides, nested keys
/// split on `__`, e.g. `TIMETABLE_HTTP__BIND`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimetableConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    /// Use a private in-memory database instead of `path`.
    #[serde(default)]
    pub in_memory: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(DEFAULT_DB_PATH)
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            in_memory: false,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl TimetableConfig {
    /// Load from the file named by `TIMETABLE_CONFIG`, else ./timetable.toml.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config_path = std::env::var(CONFIG_PATH_ENV).ok();
        Self::load(config_path.as_deref())
    }

    /// Load config from a TOML file with TIMETABLE_* env overrides on top.
    /// A missing file falls back to defaults; a malformed one is an error.
    pub fn load(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);
        Self::from_figment(
            Figment::from(Serialized::defaults(Self::default()))
                .merge(Toml::file(path))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        figment.extract().map_err(|err| ConfigError(Box::new(err)))
    }
}
