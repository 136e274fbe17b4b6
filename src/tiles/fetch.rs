use crate::core::constants::{FETCH_ATTEMPTS, FETCH_RETRY_DELAY_MS, FETCH_TIMEOUT_SECS};
use crate::{Error, Result};
use once_cell::sync::Lazy;
use reqwest::blocking::Client;
use std::time::Duration;

/// Shared blocking HTTP client with a custom User-Agent so that public tile
/// servers (e.g. OpenStreetMap) don't reject the request. Building the client
/// once avoids the cost of TLS and connection pool setup for every tile.
pub(crate) static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent("printmaps/0.1 (+https://github.com/example/printmaps)")
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()
        .expect("failed to build reqwest blocking client")
});

/// Trait for retrieving raw tile bytes from a URL. The HTTP implementation is
/// the production path; tests inject fakes.
pub trait TileFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Blocking HTTP fetcher with a bounded retry-with-backoff policy. A fetch
/// failure is transient and retried; exhausting all attempts fails only the
/// map being generated, not the batch.
pub struct HttpFetcher;

impl TileFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let mut delay = Duration::from_millis(FETCH_RETRY_DELAY_MS);

        for attempt in 1..=FETCH_ATTEMPTS {
            log::debug!("fetch {} attempt {}", url, attempt);
            let result: Result<Vec<u8>> = (|| {
                let resp = HTTP_CLIENT.get(url).send()?.error_for_status()?;
                Ok(resp.bytes()?.to_vec())
            })();

            match result {
                Ok(data) => return Ok(data),
                Err(e) => {
                    log::warn!("fetch {} failed on attempt {}: {}", url, attempt, e);
                    if attempt < FETCH_ATTEMPTS {
                        std::thread::sleep(delay);
                        delay *= 2;
                    }
                }
            }
        }

        Err(Error::Fetch {
            url: url.to_string(),
            attempts: FETCH_ATTEMPTS,
        })
    }
}
