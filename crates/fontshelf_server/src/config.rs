//! Server configuration resolved from environment variables.
//!
//! # Invariants
//! - Blank or whitespace-only values fall back to defaults.
//! - `log_dir` is always absolute; relative values resolve against the
//!   current working directory.

use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "FONTSHELF_DB_PATH";
pub const ENV_UPLOAD_DIR: &str = "FONTSHELF_UPLOAD_DIR";
pub const ENV_HOST: &str = "FONTSHELF_HOST";
pub const ENV_PORT: &str = "FONTSHELF_PORT";
pub const ENV_LOG_LEVEL: &str = "FONTSHELF_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "FONTSHELF_LOG_DIR";

const DEFAULT_DB_PATH: &str = "./fontshelf.sqlite3";
const DEFAULT_UPLOAD_DIR: &str = "./uploads/fonts";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_DIR_NAME: &str = "logs";

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(String),
    CurrentDir(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPort(value) => {
                write!(f, "{ENV_PORT} must be a port number in 1..=65535, got {value:?}")
            }
            Self::CurrentDir(err) => write!(f, "cannot resolve current directory: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPort(_) => None,
            Self::CurrentDir(err) => Some(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub db_path: PathBuf,
    pub upload_dir: PathBuf,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Self::from_lookup(|key| std::env::var(key).ok(), &cwd)
    }

    /// Resolves configuration through `lookup`, relative log dirs against `cwd`.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        cwd: &Path,
    ) -> Result<Self, ConfigError> {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };

        let port = match value(ENV_PORT) {
            Some(raw) => match raw.parse::<u16>() {
                Ok(port) if port > 0 => port,
                _ => return Err(ConfigError::InvalidPort(raw)),
            },
            None => DEFAULT_PORT,
        };

        let log_dir = value(ENV_LOG_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR_NAME));
        let log_dir = if log_dir.is_absolute() {
            log_dir
        } else {
            cwd.join(log_dir)
        };

        Ok(Self {
            db_path: PathBuf::from(value(ENV_DB_PATH).unwrap_or_else(|| DEFAULT_DB_PATH.into())),
            upload_dir: PathBuf::from(
                value(ENV_UPLOAD_DIR).unwrap_or_else(|| DEFAULT_UPLOAD_DIR.into()),
            ),
            host: value(ENV_HOST).unwrap_or_else(|| DEFAULT_HOST.into()),
            port,
            log_level: value(ENV_LOG_LEVEL)
                .unwrap_or_else(|| fontshelf_core::default_log_level().to_string()),
            log_dir,
        })
    }
}
