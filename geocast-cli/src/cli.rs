use anyhow::Context;
use clap::Parser;
use geocast_core::{Config, HttpFetcher, resolve};
use std::{io, path::PathBuf};

use crate::report;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Show the upcoming weather for a place")]
pub struct Cli {
    /// Free-text place query, e.g. "Stockholm, Sweden".
    pub query: Option<String>,

    /// Config file (dotenv, or TOML when it ends in `.toml`).
    /// Defaults to `./.env`, then the platform config directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let Some(query) = self.query else {
            println!("{}", report::USAGE_HINT);
            return Ok(());
        };

        let config =
            Config::load(self.config.as_deref()).context("Error reading configuration")?;
        let fetcher = HttpFetcher::new(&config)?;

        let resolution = resolve(&config, &fetcher, &query).await?;

        report::write_report(&mut io::stdout().lock(), &query, &resolution)
            .context("Failed to write report to stdout")?;

        Ok(())
    }
}
