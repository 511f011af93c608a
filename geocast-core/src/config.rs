use directories::ProjectDirs;
use reqwest::Url;
use serde::Deserialize;
use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::debug;

use crate::error::ConfigError;

const DEFAULT_FILE_NAME: &str = ".env";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Startup configuration, built once and passed by reference to the resolvers.
///
/// Example `.env`:
/// ```text
/// USERAGENT='my-weather-cli/1.0 me@example.com'
/// GEOCODEAPIURL=https://nominatim.openstreetmap.org/search.php?format=jsonv2
/// FORECASTAPIURL=https://api.met.no/weatherapi/locationforecast/2.0/compact
/// ```
///
/// Unquoted and double-quoted dotenv values expand `$VAR` and `${VAR}` from
/// the process environment; single-quoted values are taken literally.
///
/// The same keys, in lower case, are accepted from a `.toml` file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Sent as the `User-Agent` header on every request.
    #[serde(rename = "useragent", default)]
    pub user_agent: String,

    /// Base URL of the geocoding service.
    #[serde(rename = "geocodeapiurl", default)]
    pub geocode_api_url: String,

    /// Base URL of the forecast service.
    #[serde(rename = "forecastapiurl", default)]
    pub forecast_api_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Config {
    /// Load from `path`, or from the first existing default location.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::locate()?,
        };

        Self::from_file(&path)
    }

    /// Candidate locations, in lookup order: `./.env`, then the platform
    /// config directory.
    pub fn default_locations() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(DEFAULT_FILE_NAME)];
        if let Some(dirs) = ProjectDirs::from("dev", "geocast", "geocast") {
            paths.push(dirs.config_dir().join(DEFAULT_FILE_NAME));
        }
        paths
    }

    fn locate() -> Result<PathBuf, ConfigError> {
        let candidates = Self::default_locations();
        candidates
            .iter()
            .find(|p| p.is_file())
            .cloned()
            .ok_or(ConfigError::NotFound(candidates))
    }

    /// Read and validate a config file. Files ending in `.toml` are parsed as
    /// TOML, everything else as dotenv.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading configuration from {}", path.display());

        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        let config = if is_toml {
            let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str(&contents).map_err(|e| ConfigError::Parse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        } else {
            let file = fs::File::open(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_dotenv(file, path)?
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse `KEY=value` lines. Values are not exported to the process
    /// environment, but `$VAR` in non-single-quoted values is expanded from it.
    fn from_dotenv<R: Read>(reader: R, path: &Path) -> Result<Self, ConfigError> {
        let parse_error = |reason: String| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        };

        let pairs = dotenvy::from_read_iter(reader)
            .collect::<Result<Vec<(String, String)>, _>>()
            .map_err(|e| parse_error(e.to_string()))?;

        envy::from_iter(pairs).map_err(|e| parse_error(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Missing("USERAGENT"));
        }
        check_url("GEOCODEAPIURL", &self.geocode_api_url)?;
        check_url("FORECASTAPIURL", &self.forecast_api_url)?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn check_url(key: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Missing(key));
    }

    let url = Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        key,
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidUrl {
            key,
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}
