use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use wordly_core::{Validity, WordValidityOracle};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(2);

/// Dictionary-API-backed validity oracle.
///
/// Only a definitive 404 marks a word invalid; timeouts, transport
/// failures and server errors all leave the answer `Unknown` so the
/// engine can fail open rather than block play.
pub struct DictionaryApi {
    client: Client,
    base_url: String,
}

impl DictionaryApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl WordValidityOracle for DictionaryApi {
    async fn check(&self, word: &str) -> Validity {
        let mut url = match Url::parse(&self.base_url) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!("invalid dictionary base url {:?}: {}", self.base_url, err);
                return Validity::Unknown;
            }
        };
        // push() percent-encodes the word as a path segment
        match url.path_segments_mut() {
            Ok(mut segments) => {
                segments.push(&word.to_lowercase());
            }
            Err(()) => return Validity::Unknown,
        }

        match self.client.get(url).timeout(LOOKUP_TIMEOUT).send().await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => Validity::Invalid,
            Ok(response) if response.status().is_success() => Validity::Valid,
            Ok(response) => {
                tracing::debug!(status = %response.status(), "dictionary lookup inconclusive");
                Validity::Unknown
            }
            Err(err) => {
                tracing::debug!("dictionary lookup failed: {}", err);
                Validity::Unknown
            }
        }
    }
}
