use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SERVER_NAME: &str = "likeminds-mcp-wrapper";
pub const DEFAULT_SERVER_VERSION: &str = "1.0.0";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid PORT: {0}")]
    InvalidPort(String),
    #[error("PORT cannot be 0")]
    ZeroPort,
    #[error("Invalid MODE: {0}. Must be 'server' or 'stdio'")]
    InvalidMode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Server,
    Stdio,
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "server" => Ok(Mode::Server),
            "stdio" => Ok(Mode::Stdio),
            other => Err(ConfigError::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Server => "server",
            Mode::Stdio => "stdio",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub port: u16,
    pub server_name: String,
    pub server_version: String,
    pub api_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Server,
            port: DEFAULT_PORT,
            server_name: DEFAULT_SERVER_NAME.into(),
            server_version: DEFAULT_SERVER_VERSION.into(),
            api_base_url: DEFAULT_API_URL.into(),
        }
    }
}

/// Optional TOML overlay, pointed to by `GATEWAY_CONFIG`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    mode: Option<String>,
    port: Option<u16>,
    server_name: Option<String>,
    server_version: Option<String>,
    api_base_url: Option<String>,
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Ok(toml::from_str(&raw)?)
    }
}

impl Config {
    /// Load from the process environment (and the TOML file it names, if any).
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings: defaults, then the config file, then env. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let file = match get("GATEWAY_CONFIG") {
            Some(path) => FileConfig::read(Path::new(&path))?,
            None => FileConfig::default(),
        };

        let mut cfg = Config::default();
        if let Some(mode) = get("MODE").or(file.mode) {
            cfg.mode = mode.parse()?;
        }
        cfg.port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };
        if cfg.port == 0 {
            return Err(ConfigError::ZeroPort);
        }
        if let Some(name) = get("SERVER_NAME").or(file.server_name) {
            cfg.server_name = name;
        }
        if let Some(version) = get("SERVER_VERSION").or(file.server_version) {
            cfg.server_version = version;
        }
        if let Some(url) = get("LIKEMINDS_API_URL").or(file.api_base_url) {
            cfg.api_base_url = url;
        }
        Ok(cfg)
    }
}
