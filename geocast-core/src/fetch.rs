use async_trait::async_trait;
use reqwest::{Client, Url};
use std::fmt::Debug;
use tracing::debug;

use crate::{
    Config,
    error::{Error, FetchError},
};

/// Issues one GET request and hands back the raw body.
#[async_trait]
pub trait Fetch: Send + Sync + Debug {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

/// `Fetch` over HTTPS, identifying itself with the configured user agent.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { http })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        debug!("GET {url}");

        let transport = |source| FetchError::Transport {
            url: url.to_string(),
            source,
        };

        let res = self.http.get(url.clone()).send().await.map_err(transport)?;

        let status = res.status();
        let body = res.bytes().await.map_err(transport)?;

        debug!("{url} answered {status} with {} bytes", body.len());

        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
                body: truncate_body(&String::from_utf8_lossy(&body)),
            });
        }

        Ok(body.to_vec())
    }
}

/// Appends `params` to `base` with percent-encoding. Query pairs already in
/// `base` are kept.
pub fn build_url(base: &str, params: &[(&str, &str)]) -> Result<Url, Error> {
    Url::parse_with_params(base, params).map_err(|e| Error::InvalidUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
