use discotui_types::DiscoError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_rows() -> usize {
    2
}
fn default_cols() -> usize {
    3
}

/// Shape of the card grid (cards per page = `rows * cols`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
        }
    }
}

impl GridConfig {
    /// Number of cards visible at once.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.rows * self.cols
    }
}

fn default_timeout_secs() -> u64 {
    300
}

/// OAuth handshake settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Loopback port for the OAuth callback. `None` probes 8080..=8085.
    #[serde(default)]
    pub callback_port: Option<u16>,
    /// How long to wait for the browser redirect (defaults to 5 minutes).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            callback_port: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.discogs.com".to_string()
}
fn default_per_page() -> u32 {
    50
}
fn default_max_pages() -> u32 {
    10
}

/// Discogs API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Items requested per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Upper bound on pages fetched per list.
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            per_page: default_per_page(),
            max_pages: default_max_pages(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    /// Log file path. Defaults to `discotui.log` in the app config directory.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

fn default_update_frequency() -> u64 {
    300
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    /// Seconds between background reloads of all three lists.
    #[serde(default = "default_update_frequency")]
    pub update_frequency: u64,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            update_frequency: default_update_frequency(),
            auth: AuthConfig::default(),
            api: ApiConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Config {
    /// Parses configuration from a YAML string, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoError::Config`] if the YAML is invalid, extraction fails
    /// or the values are out of range.
    pub fn from_yaml(yaml: &str) -> Result<Self, DiscoError> {
        use figment::{
            Figment,
            providers::{Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::string(yaml))
            .extract::<Self>()
            .map_err(|e| DiscoError::Config(e.to_string()))?
            .validated()
    }

    /// Loads configuration from a file path, merged with defaults and
    /// `DISCOTUI_*` environment overrides (`DISCOTUI_GRID__ROWS=3`).
    ///
    /// # Errors
    ///
    /// Returns [`DiscoError::Config`] if the file cannot be parsed or the
    /// values are out of range.
    pub fn from_file(path: &Path) -> Result<Self, DiscoError> {
        use figment::{
            Figment,
            providers::{Env, Format as _, Serialized, Yaml},
        };
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("DISCOTUI_").split("__"))
            .extract::<Self>()
            .map_err(|e| DiscoError::Config(format!("{}: {e}", path.display())))?
            .validated()
    }

    /// Loads from `path` when given, otherwise from the first existing default
    /// location, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoError::Config`] if a located file is invalid.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>), DiscoError> {
        let located = match path {
            Some(p) => Some(p.to_path_buf()),
            None => crate::paths::default_config_candidates()
                .into_iter()
                .find(|p| p.is_file()),
        };
        match located {
            Some(p) => Ok((Self::from_file(&p)?, Some(p))),
            None => Ok((Self::default(), None)),
        }
    }

    fn validated(self) -> Result<Self, DiscoError> {
        if self.grid.rows == 0 || self.grid.cols == 0 {
            return Err(DiscoError::Config(
                "grid rows and cols must be at least 1".into(),
            ));
        }
        if self.api.per_page == 0 {
            return Err(DiscoError::Config("api.per_page must be at least 1".into()));
        }
        Ok(self)
    }
}
