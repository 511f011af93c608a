use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::{collections::VecDeque, sync::Mutex};

use crate::{error::FetchError, fetch::Fetch};

/// In-memory `Fetch` that replays canned bodies and records every URL asked for.
#[derive(Debug, Default)]
pub struct StubFetcher {
    responses: Mutex<VecDeque<Result<Vec<u8>, StatusCode>>>,
    requests: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a 200 response with `body`.
    pub fn respond(self, body: &str) -> Self {
        self.responses.lock().unwrap().push_back(Ok(body.as_bytes().to_vec()));
        self
    }

    /// Queue a 503 response.
    pub fn fail(self) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(StatusCode::SERVICE_UNAVAILABLE));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetch for StubFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(body)) => Ok(body),
            Some(Err(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status,
                body: String::new(),
            }),
            None => panic!("unexpected request to {url}"),
        }
    }
}
