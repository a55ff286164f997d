//! Outbound fetching for fstation.
//!
//! The [Fetch] trait is the only I/O boundary the preview pipeline talks to. [HttpFetcher] is the
//! real implementation: a blocking `reqwest` client that resolves listing hrefs against a base URL
//! and never reads more of a body than the caller asked for.

use reqwest::Url;
use reqwest::blocking::Client;
use thiserror::Error;

use std::io::Read;
use std::time::Duration;

/// Why a fetch did not produce a body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a status outside `200..400`.
    #[error("HTTP {0}")]
    Status(u16),
    /// Connection, TLS, timeout or body read failure.
    #[error("network error: {0}")]
    Transport(String),
    /// The href could not be turned into an absolute URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Status code for [FetchError::Status], `None` otherwise.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            _ => None,
        }
    }
}

/// The bytes a fetch produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchedBody {
    bytes: Vec<u8>,
    total_len: Option<u64>,
}

impl FetchedBody {
    pub fn new(bytes: Vec<u8>, total_len: Option<u64>) -> Self {
        Self { bytes, total_len }
    }

    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Full size of the resource as reported by the server, if it said.
    #[inline]
    pub fn total_len(&self) -> Option<u64> {
        self.total_len
    }
}

/// Something that can fetch the resource behind a listing href.
///
/// Implementations are called from the preview worker thread.
pub trait Fetch: Send + Sync {
    /// Fetches `href`, reading at most `limit + 1` bytes of the body so the caller can tell
    /// whether it was cut short.
    fn fetch(&self, href: &str, limit: usize) -> Result<FetchedBody, FetchError>;
}

/// Blocking HTTP fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base: Option<Url>,
}

impl HttpFetcher {
    /// Builds a fetcher. `base` is the URL relative hrefs are resolved against.
    pub fn new(
        base: Option<&str>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let base = base
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(|b| Url::parse(b).map_err(|e| FetchError::InvalidUrl(format!("{b}: {e}"))))
            .transpose()?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(Self { client, base })
    }

    pub fn base(&self) -> Option<&Url> {
        self.base.as_ref()
    }

    /// Turns a listing href into an absolute URL.
    ///
    /// Absolute hrefs are used as they are; relative ones need a base.
    pub fn resolve(&self, href: &str) -> Result<Url, FetchError> {
        let parsed = match &self.base {
            Some(base) => base.join(href),
            None => Url::parse(href),
        };
        parsed.map_err(|e| FetchError::InvalidUrl(format!("{href}: {e}")))
    }

    /// Fetches a whole document as text. Used to load remote listings.
    pub fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let url = self.resolve(url)?;
        tracing::debug!(%url, "fetching listing");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        check_status(response.status().as_u16())?;

        response
            .text()
            .map_err(|e| FetchError::Transport(e.to_string()))
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, href: &str, limit: usize) -> Result<FetchedBody, FetchError> {
        let url = self.resolve(href)?;
        tracing::debug!(%url, limit, "fetching preview");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        check_status(response.status().as_u16())?;

        let total_len = response.content_length();
        let mut bytes = Vec::with_capacity(limit.min(64 * 1024));
        response
            .take(limit as u64 + 1)
            .read_to_end(&mut bytes)
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Ok(FetchedBody::new(bytes, total_len))
    }
}

fn check_status(code: u16) -> Result<(), FetchError> {
    if (200..400).contains(&code) {
        Ok(())
    } else {
        Err(FetchError::Status(code))
    }
}
