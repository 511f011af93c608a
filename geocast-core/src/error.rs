use std::{io, path::PathBuf};

use reqwest::StatusCode;
use thiserror::Error;

/// Failures while loading the startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file exists but its contents are malformed.
    #[error("Failed to parse config file {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    /// A required key is absent or empty.
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),

    /// A base URL does not parse.
    #[error("Invalid URL in {key}: {reason}")]
    InvalidUrl { key: &'static str, reason: String },

    /// `TIMEOUT_SECS` is zero.
    #[error("TIMEOUT_SECS must be greater than zero")]
    InvalidTimeout,

    /// No config file was given and none of the default locations exist.
    #[error("No config file found. Looked in: {}", join_paths(.0))]
    NotFound(Vec<PathBuf>),
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}

/// Failures of a single outbound GET request.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection, timeout or body read failure.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
}

/// Failures of the geocode and forecast resolvers.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Invalid request URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The geocoding response is not a JSON array of location objects.
    #[error("Failed to decode geocoding response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The forecast response is malformed or carries an empty time-series.
    #[error("Unexpected API format: {0}")]
    UnexpectedFormat(String),
}

/// Fatal outcomes of the whole lookup, tagged with the failing stage.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("An error occurred while fetching geo codes")]
    Geocode(#[source] Error),

    #[error("An error occurred while fetching forecast")]
    Forecast(#[source] Error),
}
