use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG_PATH: &str = "dictionary.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Which set of per-dictionary hooks to run with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileKind {
    /// Plain MDict export: `@@@LINK=` redirects, no structured parsing
    #[default]
    Mdict,
    /// 日汉双解词典, with entry parsing and Anki cards
    Rhsjcd,
}

/// Settings for the single dictionary this process serves.
/// Read once at startup and never changed afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct DictionaryConfig {
    pub name: String,
    pub mdx_path: PathBuf,
    #[serde(default)]
    pub mdd_path: Option<PathBuf>,
    #[serde(default)]
    pub mdd_case_insensitive: bool,
    #[serde(default)]
    pub css_path: Option<PathBuf>,
    #[serde(default)]
    pub css_name: Option<String>,
    #[serde(default)]
    pub profile: ProfileKind,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    3000
}

fn default_pool_size() -> u32 {
    4
}

fn default_log_level() -> String {
    "info".into()
}

impl DictionaryConfig {
    /// Loads `.env`, then the TOML file named by `DICT_CONFIG`.
    /// `DICT_PORT` overrides the configured port.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let path = std::env::var("DICT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut config = Self::from_file(Path::new(&path))?;

        if let Ok(port) = std::env::var("DICT_PORT") {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("DICT_PORT is not a port: {port}")))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.mdx_path.is_file() {
            return Err(ConfigError::Invalid(format!(
                "mdx_path {:?} does not exist",
                self.mdx_path
            )));
        }
        if let Some(mdd_path) = &self.mdd_path {
            if !mdd_path.is_file() {
                return Err(ConfigError::Invalid(format!(
                    "mdd_path {:?} does not exist",
                    mdd_path
                )));
            }
        }
        if self.css_path.is_some() != self.css_name.is_some() {
            return Err(ConfigError::Invalid(
                "css_path and css_name must be set together".into(),
            ));
        }
        Ok(())
    }

    /// Name the entries reference the stylesheet by, and where it lives.
    pub fn stylesheet(&self) -> Option<(&str, &Path)> {
        match (&self.css_name, &self.css_path) {
            (Some(name), Some(path)) => Some((name.as_str(), path.as_path())),
            _ => None,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
