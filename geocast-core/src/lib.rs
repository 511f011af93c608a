//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration loading (dotenv or TOML)
//! - The HTTP fetcher seam
//! - Geocode and forecast resolvers
//! - The orchestrator that turns a place query into a [`Resolution`]
//!
//! It is used by `geocast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod fetch;
pub mod forecast;
pub mod geocode;
pub mod model;
pub mod resolver;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{ConfigError, Error, FetchError, ResolveError};
pub use fetch::{Fetch, HttpFetcher};
pub use forecast::resolve_forecast;
pub use geocode::resolve_geocodes;
pub use model::{Forecast, GeoCode, Resolution};
pub use resolver::resolve;
